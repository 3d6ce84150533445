use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::admin::{InviteRequest, InviteResponse},
    middleware::{ensure_role, CurrentUser},
    models::Role,
    utils::ValidatedJson,
    AppState,
};

const DIRECTOR_ONLY: &[Role] = &[Role::Director];

pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, DIRECTOR_ONLY)?;
    let users = state.admin_service.list_accounts().await;
    Ok(Json(users))
}

pub async fn create_invite(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(req): ValidatedJson<InviteRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, DIRECTOR_ONLY)?;
    let invite_code = state
        .admin_service
        .create_invite(&req.username, req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(InviteResponse { invite_code })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, DIRECTOR_ONLY)?;
    state.admin_service.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

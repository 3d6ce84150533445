use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::clients::CreateClientRequest,
    middleware::{ensure_role, CurrentUser},
    models::Role,
    utils::ValidatedJson,
    AppState,
};

// The roles that open new submissions are the ones that pick clients.
const CLIENT_ROLES: &[Role] = &[Role::Director, Role::Documentation];

pub async fn list_clients(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, CLIENT_ROLES)?;
    Ok(Json(state.db.list_clients().await))
}

pub async fn create_client(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, CLIENT_ROLES)?;
    let client = state
        .db
        .insert_client(&req.company_name, &req.cac_number)
        .await;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Deletion is refused with a Conflict while the client still owns
/// applications; nothing cascades.
pub async fn delete_client(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, &[Role::Director])?;
    state.db.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

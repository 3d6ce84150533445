use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::applications::{CreateApplicationRequest, StatusChangeRequest},
    middleware::{ensure_role, CurrentUser},
    models::Role,
    utils::ValidatedJson,
    AppState,
};

const ALL_DEPARTMENTS: &[Role] = &[
    Role::Director,
    Role::Finance,
    Role::Vetting,
    Role::Documentation,
];

const INTAKE_ROLES: &[Role] = &[Role::Director, Role::Documentation];

/// Roles owning an explicit transition edge. Documentation's edge fires via
/// upload only, so it is absent here.
const TRANSITION_ROLES: &[Role] = &[Role::Director, Role::Finance, Role::Vetting];

/// List applications, scoped to the acting role's view.
pub async fn list_applications(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, ALL_DEPARTMENTS)?;
    let views = state.workflow_service.list_applications(current.role).await;
    Ok(Json(views))
}

pub async fn create_application(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateApplicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, INTAKE_ROLES)?;
    let application = state
        .workflow_service
        .create_application(&req.product_name, req.client_id)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn change_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, TRANSITION_ROLES)?;
    let application = state
        .workflow_service
        .request_transition(id, req.status, current.role)
        .await?;
    Ok(Json(application))
}

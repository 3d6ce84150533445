use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::{
    dtos::auth::{LoginRequest, RegisterRequest, SessionUser},
    middleware::CurrentUser,
    utils::ValidatedJson,
    AppState,
};

/// Login with username and secret. Fails uniformly whatever the cause.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.auth_service.login(req).await?;
    Ok((StatusCode::OK, Json(res)))
}

/// Activate a pending account by redeeming its one-time invite code.
/// Returns a session credential: registration doubles as login.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.auth_service.register_with_invite(req).await?;
    Ok((StatusCode::OK, Json(res)))
}

/// Sessions are stateless, so logout is a client-side discard; the endpoint
/// exists so the UI has something to call.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}

/// Echo the verified identity behind the presented credential.
pub async fn me(current: CurrentUser) -> Result<impl IntoResponse, AppError> {
    let claims = current.require_user()?;
    Ok(Json(serde_json::json!({
        "authenticated": true,
        "user": SessionUser {
            id: claims.sub,
            username: claims.username.clone(),
            role: claims.role,
        },
    })))
}

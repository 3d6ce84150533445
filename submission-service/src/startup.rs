use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use service_core::middleware::tracing::request_id_middleware;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    admin::{create_invite, delete_user, list_users},
    app::health_check,
    applications::{change_status, create_application, list_applications},
    auth::{login, logout, me, register},
    clients::{create_client, delete_client, list_clients},
    upload::upload_document,
};
use crate::middleware::auth::resolve_session;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/admin/users", get(list_users))
        .route("/admin/users/invite", post(create_invite))
        .route("/admin/users/:id", delete(delete_user))
        .route("/applications", get(list_applications).post(create_application))
        .route("/applications/:id/status", patch(change_status))
        .route("/upload", post(upload_document))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:id", delete(delete_client))
        .layer(from_fn_with_state(state.clone(), resolve_session));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

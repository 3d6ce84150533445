use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::{
    middleware::{ensure_role, CurrentUser},
    models::Role,
    AppState,
};

const UPLOAD_ROLES: &[Role] = &[Role::Director, Role::Documentation];

/// Multipart document submission: `file`, `application_id`, `file_type`.
/// A successful upload also advances the application to FINANCE_PENDING.
pub async fn upload_document(
    State(state): State<AppState>,
    current: CurrentUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    ensure_role(&current, UPLOAD_ROLES)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut application_id: Option<i64> = None;
    let mut file_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("malformed multipart body: {}", e)))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload.bin".to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("failed to read file field: {}", e))
                })?;
                file = Some((name, bytes.to_vec()));
            }
            Some("application_id") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("failed to read application_id: {}", e))
                })?;
                application_id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest(anyhow::anyhow!("application_id must be an integer"))
                })?);
            }
            Some("file_type") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("failed to read file_type: {}", e))
                })?;
                file_type = Some(text);
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("File required")))?;
    let application_id = application_id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("application_id required")))?;
    let file_type =
        file_type.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("file_type required")))?;

    let document = state
        .workflow_service
        .submit_document(application_id, &file_name, &file_type, &data)
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

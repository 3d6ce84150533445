use chrono::{DateTime, Utc};
use serde::Serialize;

/// An uploaded file attached to an application. Append-only: documents are
/// never edited or deleted through this service.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: i64,
    pub application_id: i64,
    /// Free-form category tag, e.g. "CAC", "LABEL", "SOP".
    pub file_type: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Application, ApplicationStatus, Client, Document};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(min = 1, max = 128))]
    pub product_name: String,
    pub client_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ApplicationStatus,
}

/// Read-side projection of an application. The client is always attached;
/// documents only where the role's view includes them.
#[derive(Debug, Serialize)]
pub struct ApplicationView {
    pub id: i64,
    pub product_name: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
}

impl ApplicationView {
    pub fn new(application: Application, client: Option<Client>) -> Self {
        Self {
            id: application.id,
            product_name: application.product_name,
            status: application.status,
            created_at: application.created_at,
            client,
            documents: None,
        }
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = Some(documents);
        self
    }
}

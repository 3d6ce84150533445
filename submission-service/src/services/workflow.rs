//! Workflow engine: owns the application lifecycle, the role-keyed edge
//! check for explicit transitions, and the upload-triggered auto-advance.

use std::sync::Arc;

use crate::dtos::applications::ApplicationView;
use crate::models::{Application, ApplicationStatus, Document, Role};

use super::{database::Database, storage::Storage, ServiceError};

pub struct WorkflowService {
    db: Arc<Database>,
    storage: Arc<dyn Storage>,
}

impl WorkflowService {
    pub fn new(db: Arc<Database>, storage: Arc<dyn Storage>) -> Self {
        Self { db, storage }
    }

    pub async fn create_application(
        &self,
        product_name: &str,
        client_id: i64,
    ) -> Result<Application, ServiceError> {
        let application = self.db.insert_application(product_name, client_id).await?;
        tracing::info!(
            application_id = application.id,
            product = %application.product_name,
            "application created"
        );
        Ok(application)
    }

    /// Role-scoped listing, applied after the access guard has passed:
    /// Finance sees only the finance queue, Vetting only its own (with the
    /// documents it needs to review), everyone else the unfiltered set.
    pub async fn list_applications(&self, role: Role) -> Vec<ApplicationView> {
        let applications = self.db.list_applications().await;

        let mut views = Vec::new();
        for application in applications {
            match role {
                Role::Finance if application.status != ApplicationStatus::FinancePending => {
                    continue
                }
                Role::Vetting if application.status != ApplicationStatus::VettingProgress => {
                    continue
                }
                _ => {}
            }

            let client = self.db.get_client(application.client_id).await;
            let mut view = ApplicationView::new(application, client);
            if role == Role::Vetting {
                let documents = self.db.list_documents(view.id).await;
                view = view.with_documents(documents);
            }
            views.push(view);
        }
        views
    }

    /// Explicit status change. The acting role may execute exactly its own
    /// `(current, requested)` edge; everything else, including no-ops,
    /// skips, and any move by the most privileged role outside its own
    /// edge, is Forbidden. The check and the write share one atomic unit.
    pub async fn request_transition(
        &self,
        application_id: i64,
        requested: ApplicationStatus,
        acting_role: Role,
    ) -> Result<Application, ServiceError> {
        let updated = self
            .db
            .update_application(application_id, |application| {
                match acting_role.direct_edge() {
                    Some((current, next))
                        if application.status == current && requested == next =>
                    {
                        application.status = requested;
                        Ok(())
                    }
                    Some((current, next)) => Err(ServiceError::Forbidden(format!(
                        "{} may only move {} to {}",
                        acting_role, current, next
                    ))),
                    None => Err(ServiceError::Forbidden(format!(
                        "{} may not change application status directly",
                        acting_role
                    ))),
                }
            })
            .await?;

        tracing::info!(
            application_id,
            status = %updated.status,
            role = %acting_role,
            "application transitioned"
        );
        Ok(updated)
    }

    /// Store the uploaded bytes, record the document, and advance the
    /// application to `FinancePending`. The advance is unconditional --
    /// document intake always (re-)starts the finance gate, even for an
    /// application already past it.
    pub async fn submit_document(
        &self,
        application_id: i64,
        file_name: &str,
        file_type: &str,
        data: &[u8],
    ) -> Result<Document, ServiceError> {
        // Reject unknown applications before touching blob storage.
        if self.db.get_application(application_id).await.is_none() {
            return Err(ServiceError::NotFound("application"));
        }

        let path = self.storage.store(file_name, data).await?;
        let document = self
            .db
            .attach_document(application_id, file_type, &path)
            .await?;

        tracing::info!(
            application_id,
            document_id = document.id,
            file_type = %document.file_type,
            "document submitted, application moved to FINANCE_PENDING"
        );
        Ok(document)
    }
}

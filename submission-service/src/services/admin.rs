use std::sync::Arc;

use crate::models::{user::UserView, Role};

use super::{database::Database, ServiceError};

/// Director-only account administration: invites, listing, deletion.
/// Role checks happen at the access guard; this service assumes the caller
/// has already passed it.
pub struct AdminService {
    db: Arc<Database>,
}

impl AdminService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a pending account with a pre-assigned role and a one-time
    /// invite code, relayed to the new teammate out-of-band.
    pub async fn create_invite(
        &self,
        username: &str,
        role: Role,
    ) -> Result<String, ServiceError> {
        if !role.is_assignable() {
            return Err(ServiceError::Validation(
                "role must be one of DIRECTOR, FINANCE, VETTING, DOCUMENTATION".to_string(),
            ));
        }
        let user = self.db.create_invited_user(username, role).await?;
        let code = user.invite_code.ok_or_else(|| {
            ServiceError::Internal(anyhow::anyhow!("freshly invited account is missing its code"))
        })?;
        tracing::info!(username = %user.username, role = %user.role, "invite created");
        Ok(code)
    }

    pub async fn list_accounts(&self) -> Vec<UserView> {
        self.db
            .list_users()
            .await
            .iter()
            .map(UserView::from)
            .collect()
    }

    pub async fn delete_account(&self, id: i64) -> Result<(), ServiceError> {
        self.db.delete_user(id).await?;
        tracing::info!(user_id = id, "account deleted");
        Ok(())
    }
}

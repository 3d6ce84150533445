//! In-memory credential store. A single `RwLock` guards the table maps, so
//! every mutation is one atomic read-modify-write: uniqueness checks,
//! invite redemption, and status transitions all re-read current rows
//! inside the write guard rather than from an earlier snapshot.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::RwLock;

use crate::models::{Application, ApplicationStatus, Client, Document, Role, User};
use crate::utils::password::hash_password;

use super::ServiceError;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    clients: BTreeMap<i64, Client>,
    applications: BTreeMap<i64, Application>,
    documents: BTreeMap<i64, Document>,
    next_user_id: i64,
    next_client_id: i64,
    next_application_id: i64,
    next_document_id: i64,
}

pub struct Database {
    inner: RwLock<Tables>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::default()),
        }
    }

    // ---- users ----

    /// Insert an already-active account (seeding path).
    pub async fn insert_active_user(
        &self,
        username: &str,
        role: Role,
        password_hash: String,
    ) -> Result<User, ServiceError> {
        let mut tables = self.inner.write().await;
        ensure_username_free(&tables, username, None)?;
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password_hash: Some(password_hash),
            role,
            invite_code: None,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Create a pending account bound to a fresh one-time invite code.
    /// The code is unique among currently pending accounts.
    pub async fn create_invited_user(
        &self,
        username: &str,
        role: Role,
    ) -> Result<User, ServiceError> {
        let mut tables = self.inner.write().await;
        ensure_username_free(&tables, username, None)?;

        let code = loop {
            let candidate = mint_invite_code(role);
            let taken = tables
                .users
                .values()
                .any(|u| u.invite_code.as_deref() == Some(candidate.as_str()));
            if !taken {
                break candidate;
            }
        };

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password_hash: None,
            role,
            invite_code: Some(code),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Consume an invite code exactly once: binds the credential, clears the
    /// code, and adopts the chosen username. A code that has already been
    /// consumed (or never existed) yields the uniform `InvalidInvite`.
    pub async fn redeem_invite(
        &self,
        code: &str,
        chosen_username: &str,
        password_hash: String,
    ) -> Result<User, ServiceError> {
        let mut tables = self.inner.write().await;

        let id = tables
            .users
            .values()
            .find(|u| u.invite_code.as_deref() == Some(code))
            .map(|u| u.id)
            .ok_or(ServiceError::InvalidInvite)?;

        // The code is cleared on redemption, so a hash here means a
        // corrupted row rather than a replay; reject it the same way.
        if tables.users[&id].password_hash.is_some() {
            return Err(ServiceError::InvalidInvite);
        }

        ensure_username_free(&tables, chosen_username, Some(id))?;

        let user = tables
            .users
            .get_mut(&id)
            .ok_or(ServiceError::InvalidInvite)?;
        user.username = chosen_username.to_string();
        user.password_hash = Some(password_hash);
        user.invite_code = None;
        Ok(user.clone())
    }

    pub async fn find_user_by_username(&self, username: &str) -> Option<User> {
        let tables = self.inner.read().await;
        tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.values().cloned().collect()
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.inner.write().await;
        tables
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound("user"))
    }

    // ---- clients ----

    pub async fn insert_client(&self, company_name: &str, cac_number: &str) -> Client {
        let mut tables = self.inner.write().await;
        tables.next_client_id += 1;
        let client = Client {
            id: tables.next_client_id,
            company_name: company_name.to_string(),
            cac_number: cac_number.to_string(),
        };
        tables.clients.insert(client.id, client.clone());
        client
    }

    pub async fn get_client(&self, id: i64) -> Option<Client> {
        self.inner.read().await.clients.get(&id).cloned()
    }

    pub async fn list_clients(&self) -> Vec<Client> {
        self.inner.read().await.clients.values().cloned().collect()
    }

    /// Referential-integrity guard: a client that still owns applications
    /// cannot be deleted, and the failure is a Conflict rather than a
    /// silent cascade.
    pub async fn delete_client(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.inner.write().await;
        if !tables.clients.contains_key(&id) {
            return Err(ServiceError::NotFound("client"));
        }
        if tables.applications.values().any(|a| a.client_id == id) {
            return Err(ServiceError::Conflict(
                "client still owns applications".to_string(),
            ));
        }
        tables.clients.remove(&id);
        Ok(())
    }

    // ---- applications ----

    /// Applications are always created in `PendingDocs`, whoever creates
    /// them.
    pub async fn insert_application(
        &self,
        product_name: &str,
        client_id: i64,
    ) -> Result<Application, ServiceError> {
        let mut tables = self.inner.write().await;
        if !tables.clients.contains_key(&client_id) {
            return Err(ServiceError::NotFound("client"));
        }
        tables.next_application_id += 1;
        let application = Application {
            id: tables.next_application_id,
            product_name: product_name.to_string(),
            client_id,
            status: ApplicationStatus::PendingDocs,
            created_at: Utc::now(),
        };
        tables.applications.insert(application.id, application.clone());
        Ok(application)
    }

    pub async fn get_application(&self, id: i64) -> Option<Application> {
        self.inner.read().await.applications.get(&id).cloned()
    }

    pub async fn list_applications(&self) -> Vec<Application> {
        self.inner
            .read()
            .await
            .applications
            .values()
            .cloned()
            .collect()
    }

    /// Apply a fallible mutation to one application under the write guard.
    /// The closure sees the current row, not an earlier snapshot, and the
    /// row is committed only when the closure succeeds.
    pub async fn update_application<F>(&self, id: i64, f: F) -> Result<Application, ServiceError>
    where
        F: FnOnce(&mut Application) -> Result<(), ServiceError>,
    {
        let mut tables = self.inner.write().await;
        let row = tables
            .applications
            .get_mut(&id)
            .ok_or(ServiceError::NotFound("application"))?;
        let mut updated = row.clone();
        f(&mut updated)?;
        *row = updated.clone();
        Ok(updated)
    }

    // ---- documents ----

    /// Record an uploaded document and force the owning application to
    /// `FinancePending` in the same atomic unit. The advance is deliberately
    /// unconditional: intake always (re-)starts the finance gate.
    pub async fn attach_document(
        &self,
        application_id: i64,
        file_type: &str,
        file_path: &str,
    ) -> Result<Document, ServiceError> {
        let mut tables = self.inner.write().await;
        let application = tables
            .applications
            .get_mut(&application_id)
            .ok_or(ServiceError::NotFound("application"))?;
        application.status = ApplicationStatus::FinancePending;

        tables.next_document_id += 1;
        let document = Document {
            id: tables.next_document_id,
            application_id,
            file_type: file_type.to_string(),
            file_path: file_path.to_string(),
            created_at: Utc::now(),
        };
        tables.documents.insert(document.id, document.clone());
        Ok(document)
    }

    pub async fn list_documents(&self, application_id: i64) -> Vec<Document> {
        self.inner
            .read()
            .await
            .documents
            .values()
            .filter(|d| d.application_id == application_id)
            .cloned()
            .collect()
    }

    // ---- seeding ----

    /// Seed the four demo department accounts and two demo clients.
    /// No-op when accounts already exist.
    pub async fn seed_demo(&self, password: &str) -> Result<(), ServiceError> {
        if !self.list_users().await.is_empty() {
            return Ok(());
        }
        for (username, role) in [
            ("director", Role::Director),
            ("finance", Role::Finance),
            ("vetting", Role::Vetting),
            ("docs", Role::Documentation),
        ] {
            let hash = hash_password(password)?;
            self.insert_active_user(username, role, hash).await?;
        }
        self.insert_client("PharmaCore Ltd", "RC123456").await;
        self.insert_client("AgroAllied Inc", "RC654321").await;
        tracing::info!("seeded demo accounts and clients");
        Ok(())
    }
}

fn ensure_username_free(
    tables: &Tables,
    username: &str,
    except_id: Option<i64>,
) -> Result<(), ServiceError> {
    let taken = tables
        .users
        .values()
        .any(|u| u.username == username && Some(u.id) != except_id);
    if taken {
        Err(ServiceError::Conflict("User already exists".to_string()))
    } else {
        Ok(())
    }
}

/// Short operator-relayable code, e.g. `FIN-A3K9Z`. Not security-sensitive,
/// only collision-resistant within the pending set (enforced by the caller
/// under the write guard).
fn mint_invite_code(role: Role) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{}-{}", role.invite_prefix(), suffix)
}

use std::sync::Arc;

use crate::dtos::auth::{LoginRequest, RegisterRequest, SessionResponse, SessionUser};
use crate::models::User;
use crate::utils::{hash_password, verify_password};

use super::{database::Database, jwt::JwtService, ServiceError};

pub struct AuthService {
    db: Arc<Database>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: Arc<Database>, jwt: Arc<JwtService>) -> Self {
        Self { db, jwt }
    }

    /// Authenticate by username and secret. Unknown username, pending
    /// account and wrong secret all fail with the same outcome; callers
    /// must not be able to tell which one happened.
    pub async fn login(&self, req: LoginRequest) -> Result<SessionResponse, ServiceError> {
        let user = self
            .db
            .find_user_by_username(&req.username)
            .await
            .ok_or(ServiceError::InvalidCredentials)?;

        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(&req.password, stored_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(username = %user.username, role = %user.role, "login succeeded");
        self.session_for(&user)
    }

    /// Redeem a one-time invite code: binds the hashed secret, adopts the
    /// chosen username, and auto-issues a session credential.
    pub async fn register_with_invite(
        &self,
        req: RegisterRequest,
    ) -> Result<SessionResponse, ServiceError> {
        let hash = hash_password(&req.password)?;
        let user = self
            .db
            .redeem_invite(&req.invite_code, &req.username, hash)
            .await?;

        tracing::info!(username = %user.username, role = %user.role, "invite redeemed");
        self.session_for(&user)
    }

    fn session_for(&self, user: &User) -> Result<SessionResponse, ServiceError> {
        let token = self.jwt.issue(user)?;
        Ok(SessionResponse {
            token,
            user: SessionUser {
                id: user.id,
                username: user.username.clone(),
                role: user.role,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn service() -> (Arc<Database>, AuthService) {
        let db = Arc::new(Database::new());
        let jwt = Arc::new(JwtService::new("test_secret", 24));
        (db.clone(), AuthService::new(db, jwt))
    }

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (db, auth) = service();
        let hash = hash_password("right-secret").unwrap();
        db.insert_active_user("finance", Role::Finance, hash)
            .await
            .unwrap();
        db.create_invited_user("pending", Role::Vetting)
            .await
            .unwrap();

        let unknown = auth.login(login_req("ghost", "x")).await.unwrap_err();
        let pending = auth.login(login_req("pending", "x")).await.unwrap_err();
        let wrong = auth
            .login(login_req("finance", "wrong-secret"))
            .await
            .unwrap_err();

        for err in [&unknown, &pending, &wrong] {
            assert!(matches!(err, ServiceError::InvalidCredentials));
        }
        assert_eq!(unknown.to_string(), pending.to_string());
        assert_eq!(pending.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn successful_login_returns_role_bearing_session() {
        let (db, auth) = service();
        let hash = hash_password("s3cret-pass").unwrap();
        db.insert_active_user("finance", Role::Finance, hash)
            .await
            .unwrap();

        let session = auth.login(login_req("finance", "s3cret-pass")).await.unwrap();
        assert_eq!(session.user.role, Role::Finance);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn registration_overwrites_the_invited_username() {
        let (db, auth) = service();
        let pending = db.create_invited_user("fin1", Role::Finance).await.unwrap();

        let session = auth
            .register_with_invite(RegisterRequest {
                invite_code: pending.invite_code.unwrap(),
                username: "finlead".to_string(),
                password: "s3cret-pass".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.user.username, "finlead");
        assert_eq!(session.user.role, Role::Finance);

        // The admin-assigned username no longer authenticates.
        let old = auth.login(login_req("fin1", "s3cret-pass")).await;
        assert!(matches!(old, Err(ServiceError::InvalidCredentials)));

        let new = auth.login(login_req("finlead", "s3cret-pass")).await;
        assert!(new.is_ok());
    }
}

//! Session authenticator: signed, time-limited credentials carrying account
//! identity and role. Validity is purely a function of signature and expiry;
//! nothing is persisted server-side.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

use super::ServiceError;

/// Claims embedded in a session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id.
    pub sub: i64,
    pub username: String,
    pub role: Role,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
}

impl JwtService {
    /// HS256 keyed by the configuration-supplied process-wide secret.
    pub fn new(secret: &str, session_ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    /// Issue a session credential for an active account. Pending accounts
    /// hold no credential and cannot be issued a session.
    pub fn issue(&self, user: &User) -> Result<String, ServiceError> {
        if !user.is_active() {
            return Err(ServiceError::Unauthenticated);
        }
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.session_ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("failed to sign session: {}", e)))
    }

    /// Verify a credential. Signature mismatch and expiry both collapse into
    /// the single `Unauthenticated` outcome; callers never learn which.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, ServiceError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthenticated)
    }
}

use service_core::error::AppError;
use thiserror::Error;

/// Failure taxonomy of the workflow core. Every variant is a recoverable,
/// caller-visible outcome; none is fatal to the process.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    /// Uniform login failure. Deliberately identical for unknown username,
    /// pending account, and wrong secret.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Uniform invite-redemption failure: unknown code or already consumed.
    #[error("Invalid invite code")]
    InvalidInvite,

    /// Missing or unverifiable session credential. Tampered and expired
    /// tokens collapse into this single outcome.
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(what) => {
                AppError::NotFound(anyhow::anyhow!("{} not found", what))
            }
            ServiceError::Forbidden(msg) => AppError::Forbidden(anyhow::anyhow!(msg)),
            ServiceError::Conflict(msg) => AppError::Conflict(anyhow::anyhow!(msg)),
            ServiceError::InvalidCredentials => {
                AppError::AuthError(anyhow::anyhow!("Invalid credentials"))
            }
            ServiceError::InvalidInvite => {
                AppError::BadRequest(anyhow::anyhow!("Invalid invite code"))
            }
            ServiceError::Unauthenticated => {
                AppError::AuthError(anyhow::anyhow!("Not authenticated"))
            }
            ServiceError::Validation(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ServiceError::Storage(e) => AppError::InternalError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}

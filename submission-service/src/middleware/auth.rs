//! Session resolution and the access guard. Every `/api` request passes
//! through `resolve_session`, which maps the bearer token to a
//! `(identity, role)` pair or the `GUEST` fallback; handlers then call
//! `ensure_role` before doing anything sensitive.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::models::Role;
use crate::services::{jwt::SessionClaims, ServiceError};
use crate::AppState;

/// The acting identity for the current request. `user` is `None` exactly
/// when `role` is `Guest`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: Option<SessionClaims>,
    pub role: Role,
}

impl CurrentUser {
    fn guest() -> Self {
        Self {
            user: None,
            role: Role::Guest,
        }
    }

    fn from_claims(claims: SessionClaims) -> Self {
        Self {
            role: claims.role,
            user: Some(claims),
        }
    }

    /// The verified claims, or the collapsed "not authenticated" failure.
    pub fn require_user(&self) -> Result<&SessionClaims, ServiceError> {
        self.user.as_ref().ok_or(ServiceError::Unauthenticated)
    }
}

/// Resolve the session for every request. Missing, tampered and expired
/// credentials all resolve to `Guest`; rejection happens later, at the
/// guard, so the outcome shape stays uniform.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let current = match token {
        Some(token) => match state.jwt.verify(token) {
            Ok(claims) => CurrentUser::from_claims(claims),
            Err(_) => CurrentUser::guest(),
        },
        None => CurrentUser::guest(),
    };

    req.extensions_mut().insert(current);
    next.run(req).await
}

/// The access guard: a pure membership test of the acting role against the
/// operation's allow-list. No allow-list in this service contains `Guest`.
pub fn ensure_role(current: &CurrentUser, allowed: &[Role]) -> Result<(), ServiceError> {
    if allowed.contains(&current.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "insufficient permissions".to_string(),
        ))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // resolve_session runs on every /api route, so the extension is
        // always present; treat its absence as an unauthenticated request.
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_else(CurrentUser::guest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(role: Role) -> CurrentUser {
        CurrentUser {
            user: Some(SessionClaims {
                sub: 1,
                username: "someone".to_string(),
                role,
                iat: 0,
                exp: i64::MAX,
            }),
            role,
        }
    }

    #[test]
    fn guard_is_a_pure_membership_test() {
        let allowed = [Role::Director, Role::Finance];
        assert!(ensure_role(&current(Role::Finance), &allowed).is_ok());
        assert!(matches!(
            ensure_role(&current(Role::Vetting), &allowed),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn guest_never_passes_a_guard() {
        let all_roles = [
            Role::Director,
            Role::Finance,
            Role::Vetting,
            Role::Documentation,
        ];
        assert!(ensure_role(&CurrentUser::guest(), &all_roles).is_err());
    }
}

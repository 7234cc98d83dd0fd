//! Handler composition that runs token verification first.
//!
//! The HTTP layer uses the axum middleware and extractor built on
//! [`AuthService::verify`]; `AccessGuard` is the same contract as a plain
//! wrapper, usable for any async operation that takes verified claims.

use std::future::Future;

use crate::account::Role;
use crate::claims::Claims;
use crate::error::AuthError;
use crate::service::AuthService;

/// Wraps `handler` so it only runs with claims from a verified token.
///
/// ```ignore
/// let guarded = AccessGuard::new(auth.clone(), |claims: Claims, id: i32| async move {
///     Ok::<_, AuthError>(format!("{} reads {}", claims.user_name, id))
/// });
/// let body = guarded.call(Some("Bearer eyJ..."), 12).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AccessGuard<F> {
    auth: AuthService,
    roles: Option<Vec<Role>>,
    handler: F,
}

impl<F> AccessGuard<F> {
    pub fn new(auth: AuthService, handler: F) -> Self {
        Self {
            auth,
            roles: None,
            handler,
        }
    }

    /// Additionally requires the verified role to be one of `roles`.
    pub fn with_roles(auth: AuthService, roles: &[Role], handler: F) -> Self {
        Self {
            auth,
            roles: Some(roles.to_vec()),
            handler,
        }
    }

    /// Verifies `authorization`, then invokes the handler with the claims
    /// prepended to `args`. On failure the handler is never polled.
    pub async fn call<A, Fut, T, E>(&self, authorization: Option<&str>, args: A) -> Result<T, E>
    where
        F: Fn(Claims, A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<AuthError>,
    {
        let claims = self.auth.verify(authorization).await?;

        if let Some(roles) = &self.roles {
            if !claims.has_any_role(roles) {
                tracing::warn!(
                    user_id = claims.user_id,
                    role = %claims.role,
                    "Role not permitted for guarded operation"
                );
                return Err(AuthError::Forbidden(
                    "You do not have permission to access this resource".to_string(),
                )
                .into());
            }
        }

        (self.handler)(claims, args).await
    }
}

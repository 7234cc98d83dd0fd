//! Route-level guards for `axum::middleware::from_fn_with_state`.
//!
//! Each guard verifies the token before the inner handler runs and stores
//! the resulting [`AuthUser`] in request extensions, so extractors in the
//! handler do not verify a second time.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_staff;
//!
//! let routes = Router::new()
//!     .route("/marks", post(create_marks))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_staff));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use spts_auth::{AuthError, Role};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Verifies the caller and, when `allowed_roles` is given, checks the role.
pub async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed_roles: Option<&[Role]>,
) -> Result<Response, AuthError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if let Some(allowed) = allowed_roles {
        if !auth_user.has_any_role(allowed) {
            tracing::warn!(
                user_id = auth_user.user_id(),
                role = %auth_user.role(),
                "Role not permitted for route"
            );
            return Err(AuthError::Forbidden(
                "You do not have permission to access this resource".to_string(),
            ));
        }
    }

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Any verified account.
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(state, req, next, None)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Teachers, principals, and admins.
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(state, req, next, Some(&Role::STAFF[..]))
        .await
        .unwrap_or_else(IntoResponse::into_response)
}


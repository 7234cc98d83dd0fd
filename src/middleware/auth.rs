use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use spts_auth::{AuthError, Claims, Role};
use spts_core::AppError;

use crate::state::AppState;

/// Claims of the verified caller.
///
/// Reuses the claims stored in request extensions by the `require_*`
/// middleware; otherwise verifies the `Authorization` header itself.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i32 {
        self.0.user_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.0.has_any_role(roles)
    }

    /// Staff may read any student; a student only their own record.
    pub fn ensure_can_access_student(&self, student_id: i32) -> Result<(), AppError> {
        if self.0.can_access_student(student_id) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You can only access your own record".to_string(),
            ))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let claims = state.auth.verify(authorization).await?;
        Ok(AuthUser(claims))
    }
}

/// Creates an extractor that admits only the listed roles.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $roles:expr, $denied:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = spts_auth::AuthError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.has_any_role(&$roles) {
                    tracing::warn!(
                        user_id = auth_user.user_id(),
                        role = %auth_user.role(),
                        "Role not permitted"
                    );
                    return Err(spts_auth::AuthError::Forbidden($denied.to_string()));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(
    StaffUser,
    Role::STAFF,
    "Access denied. Staff only"
);
require_role!(
    ManagementUser,
    Role::MANAGEMENT,
    "Access denied. Principal or admin only"
);

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(role: Role, user_id: i32) -> AuthUser {
        AuthUser(Claims {
            user_id,
            user_name: "alice".to_string(),
            role,
            iat: 1_700_000_000,
            exp: 1_700_007_200,
            jti: "jti".to_string(),
        })
    }

    #[test]
    fn test_has_any_role() {
        let user = auth_user(Role::Principal, 1);
        assert!(user.has_any_role(&Role::MANAGEMENT));
        assert!(user.has_any_role(&Role::STAFF));
        assert!(!auth_user(Role::Teacher, 1).has_any_role(&Role::MANAGEMENT));
    }

    #[test]
    fn test_student_self_access() {
        let student = auth_user(Role::Student, 12);
        assert!(student.ensure_can_access_student(12).is_ok());

        let err = student.ensure_can_access_student(13).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);

        assert!(auth_user(Role::Teacher, 5).ensure_can_access_student(13).is_ok());
    }
}

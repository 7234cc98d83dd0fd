//! Token claim structure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::account::Role;

/// Claims carried by every session token, staff and student alike.
///
/// `user_id`, `user_name`, and `role` are required; a token missing any of
/// them fails to decode and is rejected as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject id (teacher_id or student_id, depending on `role`)
    pub user_id: i32,
    /// Subject username
    pub user_name: String,
    pub role: Role,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Unique token id, so two logins in the same second never share a token
    pub jti: String,
}

impl Claims {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Whether the caller may read the student record `student_id`:
    /// any staff member, or the student themself.
    pub fn can_access_student(&self, student_id: i32) -> bool {
        self.is_staff() || (self.role == Role::Student && self.user_id == student_id)
    }
}

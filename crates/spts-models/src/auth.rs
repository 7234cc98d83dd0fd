//! Login and token verification payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub use spts_auth::{AccountSummary, Claims};

/// Login request.
///
/// Emptiness is checked by the auth service so that a blank user name or
/// password is a 400, like every other malformed login.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(alias = "user_name")]
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: AccountSummary,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyTokenResponse {
    pub message: String,
    pub decoded_token: Claims,
}

/// Generic success message response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

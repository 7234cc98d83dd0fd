//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC-SHA256 signing secret
//! - `JWT_TOKEN_TTL`: token lifetime in seconds (default: 7200, two hours)

use std::env;

/// Secret used when `JWT_SECRET` is unset. Only suitable for local development.
pub const DEVELOPMENT_SECRET: &str = "spts-development-secret-change-in-production";

/// Two hours, for staff and students alike.
pub const DEFAULT_TOKEN_TTL: i64 = 7200;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEVELOPMENT_SECRET.to_string()),
            token_ttl: env::var("JWT_TOKEN_TTL")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_TOKEN_TTL),
        }
    }

    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

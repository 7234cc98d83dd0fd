//! Session token issuing and decoding.
//!
//! Tokens are compact HS256 JWTs signed with the server-held secret from
//! [`JwtConfig`]. Decoding distinguishes an expired token (the client should
//! log in again) from every other failure (the token is structurally wrong,
//! forged, or carries an unknown role).
//!
//! # Example
//!
//! ```ignore
//! use spts_auth::{Role, TokenIssuer};
//! use spts_config::JwtConfig;
//!
//! let issuer = TokenIssuer::new(&JwtConfig::from_env());
//! let token = issuer.issue(7, "alice", Role::Teacher)?;
//! let claims = issuer.decode(&token)?;
//! assert_eq!(claims.user_id, 7);
//! ```

use std::fmt;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use spts_config::JwtConfig;

use crate::account::Role;
use crate::claims::Claims;
use crate::error::AuthError;

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is live only while now < exp.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.token_ttl,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl
    }

    /// Issues a token valid for the configured TTL starting now.
    pub fn issue(&self, user_id: i32, user_name: &str, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, user_name, role, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i32,
        user_name: &str,
        role: Role,
        issued_at: i64,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            user_id,
            user_name: user_name.to_string(),
            role,
            iat: issued_at,
            exp: issued_at + self.ttl,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Checks signature and expiry, then returns the claims.
    ///
    /// This does not consult the credential store; a decoded token may still
    /// have been revoked by a newer login.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token decode failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            }
        })?;

        if data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &"HS256")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

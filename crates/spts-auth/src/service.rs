//! Login and token verification.
//!
//! Login resolves the account (staff first, then students), checks the
//! password and the permission flag, issues a token, and stores it on the
//! account row, all inside one store transaction that holds the row lock.
//! Verification decodes the token and then requires it to equal the token
//! currently stored for its subject; a newer login overwrites the stored
//! value and so revokes every earlier token.

use std::fmt;
use std::sync::{Arc, LazyLock};

use tracing::{info, instrument, warn};

use spts_core::{hash_password, verify_password};

use crate::account::{Account, AccountSummary, Partition};
use crate::claims::Claims;
use crate::error::{AuthError, StoreError};
use crate::jwt::TokenIssuer;
use crate::store::{CredentialStore, CredentialTx};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub account: AccountSummary,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            warn!("Login rejected: user name and password are required");
            return Err(AuthError::Validation(
                "User name and password are required".to_string(),
            ));
        }

        let mut tx = self.store.begin().await?;

        let Some(account) = resolve_account(tx.as_mut(), username).await? else {
            // Same bcrypt cost as a wrong password.
            check_password(password, &UNKNOWN_ACCOUNT_HASH).await?;
            warn!("Login failed: user not found");
            return Err(AuthError::InvalidCredentials);
        };
        let partition = account.partition();
        let record = account.record();

        if !check_password(password, &record.password_hash).await? {
            warn!(user_id = record.user_id, %partition, "Login failed: invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        if !record.permission {
            warn!(user_id = record.user_id, %partition, "Login refused: account permission is off");
            return Err(AuthError::PermissionDenied);
        }

        let token = self
            .issuer
            .issue(record.user_id, &record.username, record.role)?;

        tx.store_token(partition, record.user_id, &record.username, &token)
            .await?;
        tx.commit().await?;

        info!(
            user_id = record.user_id,
            role = %record.role,
            "Login successful, token stored"
        );

        Ok(LoginOutcome {
            token,
            account: account.summary(),
        })
    }

    /// Verifies the value of an `Authorization` header and returns its claims.
    #[instrument(skip_all)]
    pub async fn verify(&self, authorization: Option<&str>) -> Result<Claims, AuthError> {
        let token = bearer_token(authorization)?;

        let claims = self.issuer.decode(token).inspect_err(|e| {
            warn!("Token rejected: {}", e);
        })?;

        let stored = self
            .store
            .read_token(claims.role.partition(), claims.user_id, &claims.user_name)
            .await?;

        match stored {
            Some(stored) if stored == token => {
                info!(user_id = claims.user_id, role = %claims.role, "Token verified");
                Ok(claims)
            }
            _ => {
                warn!(
                    user_id = claims.user_id,
                    "Token does not match the stored session"
                );
                Err(AuthError::TokenInvalid)
            }
        }
    }
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

/// Extracts the token from an `Authorization` header value, with or without
/// the `Bearer ` scheme prefix.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let value = authorization
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)?;

    Ok(value.strip_prefix("Bearer ").unwrap_or(value))
}

/// Verified against when no account matches the name, so unknown users cost
/// a full bcrypt round like everyone else.
static UNKNOWN_ACCOUNT_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("unknown-account-placeholder").unwrap_or_else(|e| {
        tracing::error!(error = %e.error, "Failed to build placeholder hash");
        String::new()
    })
});

async fn resolve_account(
    tx: &mut dyn CredentialTx,
    username: &str,
) -> Result<Option<Account>, StoreError> {
    for partition in Partition::LOGIN_ORDER {
        if let Some(record) = tx.find_account(partition, username).await? {
            return Ok(Some(Account::from_partition(partition, record)));
        }
    }
    Ok(None)
}

/// bcrypt on the blocking pool. A stored value that is not a bcrypt hash
/// never matches.
async fn check_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    let outcome = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::error!(error = %e.error, "Stored password hash is unreadable");
            Ok(false)
        }
    }
}

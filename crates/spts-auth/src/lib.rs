//! # SPTS Auth
//!
//! Authentication for the SPTS API: credential checking, session tokens,
//! and the access guard that protected operations compose with.
//!
//! This crate provides:
//!
//! - [`account`]: roles, the staff/student partitions, and account records
//! - [`claims`]: the claim set carried by every session token
//! - [`jwt`]: [`TokenIssuer`], HS256 token issuing and decoding
//! - [`store`]: the [`CredentialStore`] interface the service persists through
//! - [`service`]: [`AuthService`], login and verification
//! - [`guard`]: [`AccessGuard`], verification-first handler wrapping
//! - [`error`]: [`AuthError`] and its HTTP status mapping
//!
//! # Sessions
//!
//! Each account keeps exactly one live token. A successful login overwrites
//! the stored token, and verification only accepts a token that both decodes
//! and equals the stored value, so logging in again revokes every earlier
//! token for that account.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spts_auth::{AuthService, TokenIssuer};
//! use spts_config::JwtConfig;
//!
//! let auth = AuthService::new(Arc::new(store), TokenIssuer::new(&JwtConfig::from_env()));
//!
//! let outcome = auth.login("alice", "correct-pw").await?;
//! let claims = auth.verify(Some(&format!("Bearer {}", outcome.token))).await?;
//! assert_eq!(claims.user_name, "alice");
//! ```

pub mod account;
pub mod claims;
pub mod error;
pub mod guard;
pub mod jwt;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod service;
pub mod store;

pub use account::{Account, AccountRecord, AccountSummary, Partition, Role};
pub use claims::Claims;
pub use error::{AuthError, StoreError};
pub use guard::AccessGuard;
pub use jwt::TokenIssuer;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{InMemoryCredentialStore, account_record};
pub use service::{AuthService, LoginOutcome, bearer_token};
pub use store::{CredentialStore, CredentialTx};

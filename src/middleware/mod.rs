//! Request guards.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor and role-restricted
//!   extractors built with `require_role!`
//! - [`role`]: `from_fn_with_state` middleware that verifies tokens for a
//!   whole router
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. A `require_*` middleware (or the extractor itself) calls
//!    `AuthService::verify`, which checks signature, expiry, and that the
//!    token is still the one stored for the account
//! 3. Role checks run on the verified claims
//! 4. Only then does the handler body run

pub mod auth;
pub mod role;

//! # SPTS Core
//!
//! Foundational types shared by every SPTS crate:
//!
//! - [`errors`]: the [`AppError`] type returned by record handlers
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use spts_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse")?;
//! assert!(verify_password("correct horse", &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};

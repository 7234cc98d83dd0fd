//! # SPTS DB
//!
//! Database pool and the PostgreSQL [`CredentialStore`] for the SPTS API.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spts_config::DatabaseConfig;
//! use spts_db::{PgCredentialStore, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! let store = Arc::new(PgCredentialStore::new(pool.clone()));
//! ```
//!
//! [`CredentialStore`]: spts_auth::CredentialStore

pub mod credentials;

use sqlx::postgres::PgPoolOptions;
use spts_config::DatabaseConfig;

pub use credentials::PgCredentialStore;

/// Initializes a PostgreSQL connection pool.
///
/// Called once during startup; the returned pool is cheaply cloneable and is
/// shared through the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;

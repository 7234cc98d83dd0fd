use std::sync::Arc;

use sqlx::PgPool;
use tracing::warn;

use spts_auth::{AuthService, TokenIssuer};
use spts_config::{CorsConfig, DatabaseConfig, JwtConfig};
use spts_db::{PgCredentialStore, init_db_pool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthService,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, auth: AuthService, cors_config: CorsConfig) -> Self {
        Self {
            db,
            auth,
            cors_config,
        }
    }
}

/// Builds the state from the environment: pool, token issuer, and the
/// PostgreSQL-backed credential store.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env()?).await?;

    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_development_secret() {
        warn!("JWT_SECRET is not set; signing tokens with the development secret");
    }

    let auth = AuthService::new(
        Arc::new(PgCredentialStore::new(db.clone())),
        TokenIssuer::new(&jwt_config),
    );

    Ok(AppState::new(db, auth, CorsConfig::from_env()))
}

//! # SPTS Config
//!
//! Configuration structures loaded once at startup from environment
//! variables (a `.env` file is honoured through `dotenvy` in the binaries):
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address
//!
//! All structs are immutable after construction and are injected into the
//! services that need them.

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

use dotenvy::dotenv;
use tracing::info;

use spts::logging::init_tracing;
use spts::router::init_router;
use spts::spts_config::ServerConfig;
use spts::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = init_app_state().await?;
    let app = init_router(state);

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(%address, "Server listening");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}

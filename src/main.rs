use dotenvy::dotenv;
use tracing::info;

use heimdall::infra::{config::AppConfig, server::serve, setup::{init_app_state, init_tracing}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.mode);
    info!(mode = %config.mode, "starting heimdall");

    let app_state = init_app_state(config)?;

    serve(app_state).await?;

    info!("Server exiting");
    Ok(())
}

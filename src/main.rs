use tracing::info;
use tracing_subscriber::EnvFilter;

use chronos_hr::{app, config::Config, errors::Result, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = AppState::init(config).await?;

    info!("Starting server");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Serving chronos-hr at http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;

    Ok(())
}

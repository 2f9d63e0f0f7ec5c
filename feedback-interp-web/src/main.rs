use std::sync::Arc;

use feedback_interp_pipeline::{Interpreter, LocalInterpreter, RemoteInterpreter};
use feedback_interp_web::{config::ServerConfig, routes::app, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ServerConfig::load()?;

    let interpreter: Arc<dyn Interpreter> = match &config.upstream_url {
        Some(url) => Arc::new(RemoteInterpreter::new(url)?),
        None => Arc::new(LocalInterpreter),
    };
    info!(
        provider = interpreter.provider_name(),
        record_limit = config.record_limit,
        "Starting feedback interpretation server"
    );

    let state = AppState::new(interpreter, config.record_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

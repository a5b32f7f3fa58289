use std::sync::Arc;

use spacelaunch_mcp::{
    build_app,
    cache::ArtifactCache,
    config::{Config, TransportMode},
    launch_api::SpaceXClient,
    logging, stdio, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let cache = Arc::new(ArtifactCache::new(&config.data_file));
    let state = AppState::new(cache, Arc::new(SpaceXClient::new()));

    match config.transport {
        TransportMode::Stdio => {
            info!(data_file = %config.data_file.display(), "stdio transport starting");
            stdio::serve_stdio(state).await?;
        }
        TransportMode::Http => {
            let bind_socket = config.bind_socket()?;
            let app = build_app(state);
            let listener = tokio::net::TcpListener::bind(bind_socket).await?;

            info!(
                bind_addr = %config.bind_addr,
                bind_port = config.bind_port,
                data_file = %config.data_file.display(),
                "server starting"
            );

            axum::serve(listener, app.into_make_service()).await?;
        }
    }

    Ok(())
}

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gazetteer_server::comments::{CommentError, CommentStore};
use gazetteer_server::config::{ConfigError, ServerConfig};
use gazetteer_server::gazetteer::{self, LoadError};
use gazetteer_server::web::{AppState, HomeRegion, create_router};

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("gazetteer: {0}")]
    Load(#[from] LoadError),

    #[error("comments: {0}")]
    Comments(#[from] CommentError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // The index is built before the listener exists and never changes after.
    let gazetteer = gazetteer::load(&config.gazetteer_path)?;

    let comments = match &config.comments_path {
        Some(path) => CommentStore::open(path)?,
        None => {
            info!("COMMENTS_PATH not set, comments will not survive a restart");
            CommentStore::in_memory()
        }
    };

    let home = HomeRegion::resolve(&gazetteer, &config.default_place);
    let state = AppState::new(gazetteer, comments, home);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Region gazetteer listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /search?query=          - Search place names");
    info!("  GET  /coordinates?place=     - Place name to coordinates");
    info!("  GET  /coordinates?lat=&lon=  - Coordinates to place name");
    info!("  GET  /place?lat=&lon=        - Coordinates to place name");
    info!("  POST /comments/{{region}}/add - Add a comment");

    axum::serve(listener, app).await?;
    Ok(())
}

use axum::Router;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_rules_core::{GameConfig, GameController};

mod config;
mod routes;

use config::ServerConfig;

/// One shared game. The lock is held for the whole of each request.
pub struct AppState {
    pub game: Mutex<GameController>,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Mutex::new(GameController::new(config)),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = Arc::new(AppState::new(GameConfig::default()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app(state)).await
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};

use chess_rules_core::{Error, GameController};

use crate::AppState;

pub mod game;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/game", get(game::current).post(game::start))
        .route("/select", post(game::select))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "OK"
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    StateUnavailable,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Core(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(Error::InvalidSquare { .. } | Error::Placement(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Core(Error::NoLegalEscape { .. }) => StatusCode::CONFLICT,
            ApiError::Core(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::StateUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Core(err) => err.to_string(),
            ApiError::StateUnavailable => "game state unavailable".to_string(),
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

/// Locks the shared game. A poisoned lock means a request panicked mid-move.
pub(crate) fn lock_game(game: &Mutex<GameController>) -> Result<MutexGuard<'_, GameController>, ApiError> {
    game.lock().map_err(|_| {
        tracing::error!("game lock poisoned");
        ApiError::StateUnavailable
    })
}

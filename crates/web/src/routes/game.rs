use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use chess_rules_core::{Color, GameMode, GameSnapshot, PromotionPolicy};

use super::{lock_game, ApiError};
use crate::AppState;

// ============================================================================
// REQUESTS
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub mode: GameMode,
    /// The human player's color
    pub color: Color,
    #[serde(default)]
    pub promotion: Option<PromotionPolicy>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub file: i32,
    pub rank: i32,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let mut game = lock_game(&state.game)?;

    let snapshot = if req.promotion.is_none() && req.seed.is_none() {
        game.start_game(req.mode, req.color)
    } else {
        let mut config = *game.config();
        config.mode = req.mode;
        config.player_color = req.color;
        if let Some(policy) = req.promotion {
            config = config.promotion(policy);
        }
        if let Some(seed) = req.seed {
            config = config.seed(seed);
        }
        game.restart(config)
    };
    Ok(Json(snapshot))
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    debug!(file = req.file, rank = req.rank, "select request");
    let mut game = lock_game(&state.game)?;
    let snapshot = game.select_square(req.file, req.rank)?;
    Ok(Json(snapshot))
}

pub async fn current(State(state): State<Arc<AppState>>) -> Result<Json<GameSnapshot>, ApiError> {
    let game = lock_game(&state.game)?;
    Ok(Json(game.snapshot()))
}

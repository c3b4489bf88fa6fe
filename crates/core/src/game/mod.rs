//! Turn-based game flow: selection, move resolution, promotion and checkmate

mod config;
mod controller;
mod snapshot;

pub use config::{GameConfig, GameMode, PromotionCursor, PromotionPolicy, PROMOTION_CYCLE};
pub use controller::{GameController, GameSession, Phase};
pub use snapshot::{GameSnapshot, PieceView, SquareView};

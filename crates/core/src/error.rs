//! Error types for chess-rules-core

use thiserror::Error;

use crate::board::{Color, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Illegal move: {reason}")]
    IllegalMove { reason: String },

    #[error("Move would leave own king in check")]
    OwnKingExposed,

    #[error("Move would capture or expose the opposing king")]
    OpponentKingExposed,

    #[error("{color} has no legal escape from check")]
    NoLegalEscape { color: Color },

    #[error("Square ({file}, {rank}) is off the board")]
    InvalidSquare { file: i32, rank: i32 },

    #[error("Square {0} is already occupied")]
    SquareOccupied(Square),

    #[error("Invalid placement: {0}")]
    Placement(String),
}

impl Error {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        Error::IllegalMove {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Serializable view of a game for front ends

use serde::Serialize;

use super::config::GameMode;
use super::controller::{GameSession, Phase};
use crate::board::{Board, Color, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareView {
    pub file: u8,
    pub rank: u8,
    pub piece: Option<PieceView>,
    pub selected: bool,
}

/// Everything a front end needs to draw the board and the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub mode: GameMode,
    /// Indexed `[rank][file]`, rank 0 first.
    pub squares: Vec<Vec<SquareView>>,
    pub active_color: Color,
    pub selected: Option<Square>,
    pub in_check: bool,
    pub winner: Option<Color>,
    /// "White is in check", "Black wins" or empty.
    pub message: String,
    pub last_rejection: Option<String>,
    pub placement: String,
}

impl GameSnapshot {
    pub(crate) fn capture(board: &Board, session: &GameSession, mode: GameMode) -> Self {
        let selected = session.selected();
        let squares = (0..8u8)
            .map(|rank| {
                (0..8u8)
                    .filter_map(|file| Square::new(file, rank))
                    .map(|square| SquareView {
                        file: square.file(),
                        rank: square.rank(),
                        piece: board.piece_at(square).map(|p| PieceView {
                            kind: p.kind,
                            color: p.color,
                        }),
                        selected: selected == Some(square),
                    })
                    .collect()
            })
            .collect();

        let winner = match session.phase {
            Phase::Checkmate { winner } => Some(winner),
            _ => None,
        };
        let message = match winner {
            Some(color) => format!("{} wins", color),
            None if session.in_check => format!("{} is in check", session.active_color),
            None => String::new(),
        };

        Self {
            mode,
            squares,
            active_color: session.active_color,
            selected,
            in_check: session.in_check,
            winner,
            message,
            last_rejection: session.last_rejection.clone(),
            placement: board.to_placement(),
        }
    }

    pub fn piece_at(&self, file: u8, rank: u8) -> Option<PieceView> {
        self.squares
            .get(rank as usize)
            .and_then(|row| row.get(file as usize))
            .and_then(|view| view.piece)
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

//! Chess Rules Core Library
//!
//! Board model, move legality, check and checkmate detection, and a
//! click-driven game controller with an optional computer opponent.

use serde::Serialize;

pub mod board;
pub mod computer;
pub mod error;
pub mod game;
pub mod rules;

pub use board::{Board, Color, Move, Piece, PieceKind, Square};
pub use computer::ComputerPlayer;
pub use error::{Error, Result};
pub use game::{GameConfig, GameController, GameMode, GameSnapshot, Phase, PromotionPolicy};

/// Basic position information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionInfo {
    pub piece_count: u32,
    pub legal_move_count: u32,
    pub side_to_move: Color,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Analyzes a position with `side_to_move` to play
pub fn analyze_position(board: &Board, side_to_move: Color) -> PositionInfo {
    let legal_move_count = rules::legal_moves(board, side_to_move).len() as u32;
    let is_check = rules::is_in_check(board, side_to_move);
    let is_checkmate = rules::is_checkmate(board, side_to_move);

    PositionInfo {
        piece_count: board.piece_count() as u32,
        legal_move_count,
        side_to_move,
        is_check,
        is_checkmate,
        is_stalemate: !is_check && legal_move_count == 0,
    }
}

/// Creates the standard starting position
pub fn starting_position() -> Board {
    Board::standard()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

    /// Positions without castling, en passant or pending promotions, so both
    /// engines play by the same rules.
    const ORACLE_POSITIONS: &[(&str, Color)] = &[
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White),
        ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR", Color::Black),
        ("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR", Color::White),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::White),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::Black),
        ("3r3k/8/8/8/7b/8/5N2/3qK3", Color::White),
        ("6k1/8/8/8/8/8/5PPP/r5K1", Color::White),
        ("6k1/8/8/8/8/3N4/5PPP/r5K1", Color::White),
        ("4k3/8/8/8/8/8/8/r3K3", Color::White),
        ("k7/2Q5/8/8/8/8/8/7K", Color::Black),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White),
    ];

    fn oracle(placement: &str, side: Color) -> Chess {
        let turn = match side {
            Color::White => "w",
            Color::Black => "b",
        };
        let fen: Fen = format!("{placement} {turn} - - 0 1").parse().unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let info = analyze_position(&starting_position(), Color::White);
        assert_eq!(info.piece_count, 32);
        assert_eq!(info.legal_move_count, 20);
        assert!(!info.is_check);
        assert!(!info.is_checkmate);
        assert!(!info.is_stalemate);
    }

    #[test]
    fn test_agrees_with_shakmaty() {
        for &(placement, side) in ORACLE_POSITIONS {
            let board = Board::from_placement(placement).unwrap();
            let info = analyze_position(&board, side);
            let reference = oracle(placement, side);

            assert_eq!(info.is_check, reference.is_check(), "check: {placement}");
            assert_eq!(info.is_checkmate, reference.is_checkmate(), "mate: {placement}");
            assert_eq!(info.is_stalemate, reference.is_stalemate(), "stalemate: {placement}");
            assert_eq!(
                info.legal_move_count as usize,
                reference.legal_moves().len(),
                "legal moves: {placement}"
            );
        }
    }

    #[test]
    fn test_stalemate_reported() {
        let board = Board::from_placement("k7/2Q5/8/8/8/8/8/7K").unwrap();
        let info = analyze_position(&board, Color::Black);
        assert!(info.is_stalemate);
        assert!(!info.is_checkmate);
        assert_eq!(info.legal_move_count, 0);
    }
}

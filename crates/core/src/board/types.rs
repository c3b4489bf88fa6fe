//! Core value types: colors, piece kinds, squares, pieces and moves

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Side to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    /// Rank delta of a single pawn step.
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn back_rank(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    pub fn is_slider(&self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Placement letter, uppercase for white.
    pub fn to_char(&self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// A square on the 8x8 board. Files and ranks are 0-based; rank 0 is white's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Checked constructor for coordinates arriving from outside the engine.
    pub fn try_from_coords(file: i32, rank: i32) -> Result<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Ok(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            Err(Error::InvalidSquare { file, rank })
        }
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Signed (file, rank) delta from `self` to `other`.
    pub fn delta_to(&self, other: Square) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// Point reflection through the board centre.
    pub fn rotated(&self) -> Square {
        Square {
            file: 7 - self.file,
            rank: 7 - self.rank,
        }
    }

    /// Squares strictly between `self` and `other` when they share a rank, file or diagonal.
    pub fn between(&self, other: Square) -> Vec<Square> {
        let (df, dr) = self.delta_to(other);
        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        if !aligned || (df == 0 && dr == 0) {
            return Vec::new();
        }

        let (step_f, step_r) = (df.signum(), dr.signum());
        let mut squares = Vec::new();
        let mut current = self.offset(step_f, step_r);
        while let Some(sq) = current {
            if sq == other {
                break;
            }
            squares.push(sq);
            current = sq.offset(step_f, step_r);
        }
        squares
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The same move seen from the other side of the board.
    pub fn rotated(&self) -> Move {
        Move {
            from: self.from.rotated(),
            to: self.to.rotated(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert_eq!(
            Square::try_from_coords(-1, 3),
            Err(Error::InvalidSquare { file: -1, rank: 3 })
        );
        assert_eq!(sq(0, 0).offset(-1, 0), None);
        assert_eq!(sq(0, 0).offset(1, 2), Some(sq(1, 2)));
    }

    #[test]
    fn test_between_lines() {
        assert_eq!(sq(0, 0).between(sq(0, 3)), vec![sq(0, 1), sq(0, 2)]);
        assert_eq!(sq(5, 5).between(sq(2, 2)), vec![sq(4, 4), sq(3, 3)]);
        assert!(sq(0, 0).between(sq(1, 2)).is_empty());
        assert!(sq(3, 3).between(sq(3, 4)).is_empty());
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(Color::Black.pawn_direction(), -1);
        assert_eq!(Color::White.promotion_rank(), 7);
        assert_eq!(Color::Black.to_string(), "Black");
    }

    #[test]
    fn test_piece_letters() {
        assert_eq!(PieceKind::Knight.to_char(Color::White), 'N');
        assert_eq!(PieceKind::from_char('q'), Some((PieceKind::Queen, Color::Black)));
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_all_squares() {
        assert_eq!(Square::all().count(), 64);
        assert!(Square::all().all(|s| s.rotated().rotated() == s));
    }
}

//! Board state: the live piece set, move application and simulation

use std::fmt;

use super::types::{Color, Move, Piece, PieceKind, Square};
use crate::error::{Error, Result};

pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Exact copy of a board's piece list, used to roll back simulations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pieces: Vec<Piece>,
}

impl Snapshot {
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
}

/// The set of pieces currently on the board.
///
/// At most one piece occupies a square whenever control is outside a
/// simulation. Captured pieces are removed from the set, never parked on a
/// placeholder square.
#[derive(Debug)]
pub struct Board {
    pieces: Vec<Piece>,
    rollback: Option<Snapshot>,
}

impl Clone for Board {
    /// A clone is detached: it never inherits an open simulation.
    fn clone(&self) -> Self {
        Self {
            pieces: self.pieces.clone(),
            rollback: None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            pieces: Vec::with_capacity(32),
            rollback: None,
        }
    }

    /// The standard 32-piece opening layout.
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(32);
        for color in Color::ALL {
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                let back = Square::new(file, color.back_rank());
                let front = Square::new(file, color.pawn_start_rank());
                if let (Some(back), Some(front)) = (back, front) {
                    pieces.push(Piece::new(kind, color, back));
                    pieces.push(Piece::new(PieceKind::Pawn, color, front));
                }
            }
        }
        Self {
            pieces,
            rollback: None,
        }
    }

    /// Builds a board from the piece-placement field of a FEN record.
    pub fn from_placement(placement: &str) -> Result<Self> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(Error::Placement(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = 7 - row_idx as u8;
            let mut file: u8 = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(Error::Placement(format!("bad empty-run '{}'", c)));
                    }
                    file += skip as u8;
                } else {
                    let (kind, color) = PieceKind::from_char(c)
                        .ok_or_else(|| Error::Placement(format!("unknown piece '{}'", c)))?;
                    let square = Square::new(file, rank).ok_or_else(|| {
                        Error::Placement(format!("rank {} has more than 8 files", rank))
                    })?;
                    board.place(Piece::new(kind, color, square))?;
                    file += 1;
                }
                if file > 8 {
                    return Err(Error::Placement(format!(
                        "rank {} has more than 8 files",
                        rank
                    )));
                }
            }
            if file != 8 {
                return Err(Error::Placement(format!(
                    "rank {} has {} files",
                    rank, file
                )));
            }
        }

        for color in Color::ALL {
            let kings = board
                .pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            if kings > 1 {
                return Err(Error::Placement(format!("{} has {} kings", color, kings)));
            }
        }

        Ok(board)
    }

    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.kind.to_char(piece.color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.iter().find(|p| p.square == square).copied()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.pieces.iter().any(|p| p.square == square)
    }

    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    pub fn king_of(&self, color: Color) -> Option<Piece> {
        self.pieces
            .iter()
            .find(|p| p.color == color && p.kind == PieceKind::King)
            .copied()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color).copied()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn place(&mut self, piece: Piece) -> Result<()> {
        if self.is_occupied(piece.square) {
            return Err(Error::SquareOccupied(piece.square));
        }
        self.pieces.push(piece);
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let idx = self.pieces.iter().position(|p| p.square == square)?;
        Some(self.pieces.remove(idx))
    }

    /// Moves the piece on `mv.from` to `mv.to`, returning whatever was captured.
    ///
    /// Only occupancy is checked here; movement rules live in `rules::moves`.
    ///
    /// # Panics
    /// Panics if the destination holds a king. Kings are never captured; a
    /// caller reaching this point has skipped the legality checks.
    pub fn apply(&mut self, mv: Move) -> Result<Option<Piece>> {
        if mv.from == mv.to {
            return Err(Error::illegal("source and destination are the same square"));
        }
        let mover = self
            .piece_at(mv.from)
            .ok_or_else(|| Error::illegal(format!("no piece on {}", mv.from)))?;

        let captured = match self.piece_at(mv.to) {
            Some(target) if target.color == mover.color => {
                return Err(Error::illegal(format!(
                    "{} already holds a friendly piece",
                    mv.to
                )));
            }
            Some(target) => {
                assert!(
                    target.kind != PieceKind::King,
                    "attempted to capture the {} king on {}",
                    target.color.as_str(),
                    target.square
                );
                self.remove(mv.to)
            }
            None => None,
        };

        if let Some(piece) = self.pieces.iter_mut().find(|p| p.square == mv.from) {
            piece.square = mv.to;
        }
        Ok(captured)
    }

    /// Rewrites the kind of the piece on `square` in place.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<()> {
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.square == square)
            .ok_or_else(|| Error::illegal(format!("no piece on {} to promote", square)))?;
        if piece.kind != PieceKind::Pawn {
            return Err(Error::illegal(format!("{} is not a pawn", square)));
        }
        piece.kind = kind;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self.pieces.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.pieces = snapshot.pieces;
    }

    pub fn in_simulation(&self) -> bool {
        self.rollback.is_some()
    }

    /// Opens a simulation and applies `mv`. Must be paired with [`Board::end_simulation`].
    ///
    /// # Panics
    /// Panics if a simulation is already open on this board.
    pub fn begin_simulation(&mut self, mv: Move) -> Result<Option<Piece>> {
        assert!(
            self.rollback.is_none(),
            "simulation already open on this board"
        );
        let snapshot = self.snapshot();
        let captured = self.apply(mv)?;
        self.rollback = Some(snapshot);
        Ok(captured)
    }

    /// Rolls the board back to the state before [`Board::begin_simulation`].
    ///
    /// # Panics
    /// Panics if no simulation is open.
    pub fn end_simulation(&mut self) {
        match self.rollback.take() {
            Some(snapshot) => self.restore(snapshot),
            None => panic!("end_simulation called without an open simulation"),
        }
    }

    /// Applies `mv`, runs `probe` against the result, then restores the board exactly.
    pub fn simulate<R>(&mut self, mv: Move, probe: impl FnOnce(&Board) -> R) -> Result<R> {
        self.begin_simulation(mv)?;
        let outcome = probe(self);
        self.end_simulation();
        Ok(outcome)
    }

    /// A detached copy with `mv` applied.
    pub fn after(&self, mv: Move) -> Result<Board> {
        let mut next = self.clone();
        next.apply(mv)?;
        Ok(next)
    }

    /// The board turned 180 degrees with colors swapped.
    pub fn rotated(&self) -> Board {
        Board {
            pieces: self
                .pieces
                .iter()
                .map(|p| Piece::new(p.kind, !p.color, p.square.rotated()))
                .collect(),
            rollback: None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map(|p| p.kind.to_char(p.color))
                    .unwrap_or('.');
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.king_of(Color::White).unwrap().square, sq(4, 0));
        assert_eq!(board.king_of(Color::Black).unwrap().square, sq(4, 7));
        assert_eq!(board.to_placement(), STANDARD_PLACEMENT);
        for sq in Square::all() {
            let count = board.pieces().iter().filter(|p| p.square == sq).count();
            assert!(count <= 1);
        }
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::standard();
        let err = board
            .place(Piece::new(PieceKind::Queen, Color::Black, sq(0, 0)))
            .unwrap_err();
        assert_eq!(err, Error::SquareOccupied(sq(0, 0)));
    }

    #[test]
    fn test_apply_capture_removes_piece() {
        let mut board = Board::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let captured = board.apply(Move::new(sq(4, 3), sq(3, 4))).unwrap();
        assert_eq!(
            captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black, sq(3, 4)))
        );
        assert_eq!(board.piece_count(), 3);
        assert_eq!(board.color_at(sq(3, 4)), Some(Color::White));
        assert!(!board.is_occupied(sq(4, 3)));
    }

    #[test]
    fn test_apply_rejects_friendly_target_and_empty_source() {
        let mut board = Board::standard();
        assert!(matches!(
            board.apply(Move::new(sq(0, 0), sq(0, 1))),
            Err(Error::IllegalMove { .. })
        ));
        assert!(matches!(
            board.apply(Move::new(sq(3, 3), sq(3, 4))),
            Err(Error::IllegalMove { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "attempted to capture")]
    fn test_apply_king_capture_is_a_defect() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/4KR2").unwrap();
        let _ = board.apply(Move::new(sq(5, 0), sq(4, 7)));
    }

    #[test]
    fn test_simulate_restores_captured_piece() {
        let mut board = Board::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let before = board.snapshot();

        let count_during = board
            .simulate(Move::new(sq(4, 3), sq(3, 4)), |b| b.piece_count())
            .unwrap();

        assert_eq!(count_during, 3);
        assert_eq!(board.snapshot(), before);
        assert!(!board.in_simulation());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut board = Board::standard();
        let before = board.snapshot();
        board.apply(Move::new(sq(4, 1), sq(4, 3))).unwrap();
        board.remove(sq(3, 7));
        board.restore(before.clone());
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    #[should_panic(expected = "simulation already open")]
    fn test_nested_simulation_is_a_defect() {
        let mut board = Board::standard();
        board.begin_simulation(Move::new(sq(4, 1), sq(4, 3))).unwrap();
        let _ = board.begin_simulation(Move::new(sq(3, 1), sq(3, 3)));
    }

    #[test]
    #[should_panic(expected = "without an open simulation")]
    fn test_end_without_begin_is_a_defect() {
        let mut board = Board::standard();
        board.end_simulation();
    }

    #[test]
    fn test_clone_is_detached_from_open_simulation() {
        let mut board = Board::standard();
        board.begin_simulation(Move::new(sq(4, 1), sq(4, 3))).unwrap();
        let copy = board.clone();
        assert!(!copy.in_simulation());
        assert!(copy.is_occupied(sq(4, 3)));
        board.end_simulation();
        assert!(board.is_occupied(sq(4, 1)));
    }

    #[test]
    fn test_after_leaves_board_untouched() {
        let board = Board::standard();
        let next = board.after(Move::new(sq(6, 0), sq(5, 2))).unwrap();
        assert!(board.is_occupied(sq(6, 0)));
        assert!(next.is_occupied(sq(5, 2)));
    }

    #[test]
    fn test_promote_rewrites_kind_in_place() {
        let mut board = Board::from_placement("4k3/P7/8/8/8/8/8/4K3").unwrap();
        board.apply(Move::new(sq(0, 6), sq(0, 7))).unwrap();
        board.promote(sq(0, 7), PieceKind::Rook).unwrap();
        assert_eq!(board.piece_at(sq(0, 7)).unwrap().kind, PieceKind::Rook);
        assert_eq!(board.piece_count(), 3);
        assert!(board.promote(sq(0, 7), PieceKind::Queen).is_err());
    }

    #[test]
    fn test_placement_errors() {
        assert!(matches!(
            Board::from_placement("8/8/8"),
            Err(Error::Placement(_))
        ));
        assert!(matches!(
            Board::from_placement("9/8/8/8/8/8/8/8"),
            Err(Error::Placement(_))
        ));
        assert!(matches!(
            Board::from_placement("4k3/8/8/8/8/8/8/4KX2"),
            Err(Error::Placement(_))
        ));
        assert!(matches!(
            Board::from_placement("4k3/8/8/8/8/8/8/3KK3"),
            Err(Error::Placement(_))
        ));
        assert!(matches!(
            Board::from_placement("4k3/8/8/8/8/8/8/4K3R"),
            Err(Error::Placement(_))
        ));
    }

    #[test]
    fn test_rotated_swaps_colors() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let rotated = board.rotated();
        assert_eq!(rotated.to_placement(), "3k3r/8/8/8/8/8/8/3K4");
    }
}

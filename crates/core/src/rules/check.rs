//! Check and checkmate detection
//!
//! Attack predicates mirror the movement geometry in `moves` but ignore
//! whose turn it is. Sliding attackers need a clear line to the target.

use tracing::trace;

use super::moves::{is_path_clear, is_pseudo_legal};
use crate::board::{Board, Color, Move, Piece, PieceKind, Square};
use crate::error::{Error, Result};

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// How [`is_queen_making_check`] treats a queen the king could take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueenCheck {
    /// A clear line between queen and king is check.
    Line,
    /// A clear line counts only if the king, after capturing an adjacent
    /// queen, would still be in check (the queen is defended).
    KingCapture,
}

pub fn is_pawn_making_check(pawn: Square, color: Color, target: Square) -> bool {
    let (df, dr) = pawn.delta_to(target);
    df.abs() == 1 && dr == color.pawn_direction()
}

pub fn is_knight_making_check(knight: Square, target: Square) -> bool {
    let (df, dr) = knight.delta_to(target);
    let (dx, dy) = (df.abs(), dr.abs());
    (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
}

pub fn is_rook_making_check(board: &Board, rook: Square, target: Square) -> bool {
    let (df, dr) = rook.delta_to(target);
    (df == 0) != (dr == 0) && is_path_clear(board, rook, target)
}

pub fn is_bishop_making_check(board: &Board, bishop: Square, target: Square) -> bool {
    let (df, dr) = bishop.delta_to(target);
    df != 0 && df.abs() == dr.abs() && is_path_clear(board, bishop, target)
}

pub fn is_queen_making_check(board: &Board, queen: Square, king: Square, mode: QueenCheck) -> bool {
    let on_line =
        is_rook_making_check(board, queen, king) || is_bishop_making_check(board, queen, king);
    if !on_line {
        return false;
    }

    match mode {
        QueenCheck::Line => true,
        QueenCheck::KingCapture => {
            let (queen_piece, defender) = match (board.piece_at(queen), board.piece_at(king)) {
                (Some(q), Some(k)) => (q, k),
                _ => return true,
            };
            let (df, dr) = king.delta_to(queen);
            let adjacent = df.abs() <= 1 && dr.abs() <= 1;
            if defender.kind != PieceKind::King || defender.color == queen_piece.color || !adjacent {
                return true;
            }

            match board.after(Move::new(king, queen)) {
                Ok(next) => is_in_check(&next, defender.color),
                Err(_) => true,
            }
        }
    }
}

pub fn is_king_making_check(king: Square, target: Square) -> bool {
    let (df, dr) = king.delta_to(target);
    df.abs() <= 1 && dr.abs() <= 1 && !(df == 0 && dr == 0)
}

/// Makes-check predicate: does `attacker` hit `target` from where it stands.
pub fn attacks(board: &Board, attacker: &Piece, target: Square) -> bool {
    let from = attacker.square;
    if from == target {
        return false;
    }
    match attacker.kind {
        PieceKind::Pawn => is_pawn_making_check(from, attacker.color, target),
        PieceKind::Knight => is_knight_making_check(from, target),
        PieceKind::Bishop => is_bishop_making_check(board, from, target),
        PieceKind::Rook => is_rook_making_check(board, from, target),
        PieceKind::Queen => {
            is_queen_making_check(board, from, target, QueenCheck::Line)
                || is_queen_making_check(board, from, target, QueenCheck::KingCapture)
        }
        PieceKind::King => is_king_making_check(from, target),
    }
}

pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board.pieces_of(by).any(|p| attacks(board, &p, square))
}

pub fn attackers_of(board: &Board, square: Square, by: Color) -> Vec<Piece> {
    board
        .pieces_of(by)
        .filter(|p| attacks(board, p, square))
        .collect()
}

/// True iff some opposing piece attacks `color`'s king. A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_of(color) {
        Some(king) => is_square_attacked(board, king.square, !color),
        None => false,
    }
}

/// True iff `color` is in check and no king step, interposition or capture of
/// an attacker gets it out.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    let king = match board.king_of(color) {
        Some(k) => k,
        None => return false,
    };
    let attackers = attackers_of(board, king.square, !color);
    if attackers.is_empty() {
        return false;
    }

    // King steps
    for (df, dr) in KING_STEPS {
        if let Some(to) = king.square.offset(df, dr) {
            if escapes_check(board, Move::new(king.square, to), color) {
                trace!(color = color.as_str(), %to, "king can step out of check");
                return false;
            }
        }
    }

    // Interposition on the line from a sliding attacker
    for attacker in attackers.iter().filter(|a| a.kind.is_slider()) {
        for block in attacker.square.between(king.square) {
            let blockers = board
                .pieces_of(color)
                .filter(|p| p.kind != PieceKind::King);
            for blocker in blockers {
                if escapes_check(board, Move::new(blocker.square, block), color) {
                    trace!(color = color.as_str(), %block, "check can be blocked");
                    return false;
                }
            }
        }
    }

    // Capture of an attacker
    for attacker in &attackers {
        for defender in board.pieces_of(color) {
            if escapes_check(board, Move::new(defender.square, attacker.square), color) {
                trace!(color = color.as_str(), target = %attacker.square, "attacker can be captured");
                return false;
            }
        }
    }

    true
}

/// `Err(NoLegalEscape)` when `color` is checkmated.
pub fn require_escape(board: &Board, color: Color) -> Result<()> {
    if is_checkmate(board, color) {
        Err(Error::NoLegalEscape { color })
    } else {
        Ok(())
    }
}

/// Applies `mv` to a detached copy and reports whether `color` is out of check there.
fn escapes_check(board: &Board, mv: Move, color: Color) -> bool {
    if matches!(board.piece_at(mv.to), Some(p) if p.kind == PieceKind::King) {
        return false;
    }
    if !is_pseudo_legal(board, mv.from, mv.to, color) {
        return false;
    }
    match board.after(mv) {
        Ok(next) => !is_in_check(&next, color),
        Err(_) => false,
    }
}

//! Chess piece movement rules
//!
//! Geometry and occupancy rules for each piece kind. Everything here is a
//! pure query on a board, except [`check_move`] which simulates the move on
//! the caller's board and rolls it back before returning. The king's rule is
//! the only one that consults check detection.

use super::check;
use crate::board::{Board, Color, Move, PieceKind, Square};
use crate::error::{Error, Result};

/// Geometry and occupancy legality for the piece on `from` moving as `mover`.
///
/// Does not verify that the mover's own king is safe afterwards.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square, mover: Color) -> bool {
    if from == to {
        return false;
    }
    let piece = match board.piece_at(from) {
        Some(p) if p.color == mover => p,
        _ => return false,
    };

    match piece.kind {
        PieceKind::Pawn => is_pawn_move_valid(board, from, to, mover),
        PieceKind::Knight => is_knight_move_valid(board, from, to, mover, None),
        PieceKind::Bishop => is_bishop_move_valid(board, from, to, mover),
        PieceKind::Rook => is_rook_move_valid(board, from, to, mover),
        PieceKind::Queen => is_queen_move_valid(board, from, to, mover),
        PieceKind::King => is_king_move_valid(board, from, to, mover),
    }
}

pub fn is_pawn_move_valid(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let direction = color.pawn_direction();
    let (df, dr) = from.delta_to(to);

    // Single step
    if df == 0 && dr == direction {
        return !board.is_occupied(to);
    }

    // Double step from the starting rank
    if df == 0 && dr == 2 * direction && from.rank() == color.pawn_start_rank() {
        let intermediate_empty = from
            .offset(0, direction)
            .map_or(false, |mid| !board.is_occupied(mid));
        return intermediate_empty && !board.is_occupied(to);
    }

    // Diagonal capture
    if df.abs() == 1 && dr == direction {
        return board.color_at(to) == Some(!color);
    }

    false
}

pub fn is_rook_move_valid(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let (df, dr) = from.delta_to(to);
    if (df == 0) == (dr == 0) {
        return false;
    }
    is_path_clear(board, from, to) && board.color_at(to) != Some(color)
}

pub fn is_bishop_move_valid(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let (df, dr) = from.delta_to(to);
    if df == 0 || df.abs() != dr.abs() {
        return false;
    }
    is_path_clear(board, from, to) && board.color_at(to) != Some(color)
}

pub fn is_queen_move_valid(board: &Board, from: Square, to: Square, color: Color) -> bool {
    is_rook_move_valid(board, from, to, color) || is_bishop_move_valid(board, from, to, color)
}

/// Knight jumps need no clear path. The destination may not hold a piece of
/// `color`, nor of `excluded` when one is given.
pub fn is_knight_move_valid(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    excluded: Option<Color>,
) -> bool {
    let (df, dr) = from.delta_to(to);
    let (dx, dy) = (df.abs(), dr.abs());
    if !((dx == 1 && dy == 2) || (dx == 2 && dy == 1)) {
        return false;
    }
    match board.color_at(to) {
        Some(occupant) => occupant != color && Some(occupant) != excluded,
        None => true,
    }
}

/// One step in any direction onto a square the opponent does not attack once
/// the king stands there.
pub fn is_king_move_valid(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let (df, dr) = from.delta_to(to);
    if df.abs() > 1 || dr.abs() > 1 || (df == 0 && dr == 0) {
        return false;
    }
    match board.piece_at(to) {
        Some(p) if p.color == color || p.kind == PieceKind::King => return false,
        _ => {}
    }

    match board.after(Move::new(from, to)) {
        Ok(next) => !check::is_square_attacked(&next, to, !color),
        Err(_) => false,
    }
}

/// True when every square strictly between `from` and `to` is empty.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    from.between(to).into_iter().all(|sq| !board.is_occupied(sq))
}

/// Full legality for `color` playing `mv`.
///
/// The move is simulated on `board` to test the mover's king and rolled back
/// before returning, so the board is unchanged whatever the outcome.
pub fn check_move(board: &mut Board, mv: Move, color: Color) -> Result<()> {
    let piece = board
        .piece_at(mv.from)
        .ok_or_else(|| Error::illegal(format!("no piece on {}", mv.from)))?;
    if piece.color != color {
        return Err(Error::illegal(format!(
            "the piece on {} belongs to {}",
            mv.from, piece.color
        )));
    }

    if let Some(target) = board.piece_at(mv.to) {
        if target.kind == PieceKind::King && target.color != color {
            return Err(Error::OpponentKingExposed);
        }
    }

    if !is_pseudo_legal(board, mv.from, mv.to, color) {
        return Err(Error::illegal(format!(
            "{} cannot move from {} to {}",
            piece.kind.as_str(),
            mv.from,
            mv.to
        )));
    }

    let exposed = board.simulate(mv, |b| check::is_in_check(b, color))?;
    if exposed {
        return Err(Error::OwnKingExposed);
    }
    Ok(())
}

/// Geometry-valid destinations for the piece on `from`, never including a
/// square that holds a king.
pub fn pseudo_legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    Square::all()
        .filter(|&to| {
            !matches!(board.piece_at(to), Some(p) if p.kind == PieceKind::King)
        })
        .filter(|&to| is_pseudo_legal(board, from, to, piece.color))
        .filter(|&to| piece.kind == PieceKind::Knight || is_path_clear(board, from, to))
        .collect()
}

/// Every fully legal move for `color`.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut scratch = board.clone();
    let movers: Vec<Square> = board.pieces_of(color).map(|p| p.square).collect();

    let mut moves = Vec::new();
    for from in movers {
        for to in pseudo_legal_destinations(board, from) {
            let mv = Move::new(from, to);
            if check_move(&mut scratch, mv, color).is_ok() {
                moves.push(mv);
            }
        }
    }
    moves
}

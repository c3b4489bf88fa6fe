//! Greedy one-ply move picker

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::board::{Board, Color, Move, Square};
use crate::rules::{check, moves};

pub struct ComputerPlayer {
    color: Color,
    rng: StdRng,
}

impl ComputerPlayer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic player for tests and replays.
    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self {
            color,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Picks a random piece, then a random destination for it, and returns the
    /// first candidate that leaves the own king out of check.
    ///
    /// The board is only borrowed mutably for simulation and is unchanged on return.
    pub fn choose_move(&mut self, board: &mut Board) -> Option<Move> {
        let color = self.color;
        let mut movers: Vec<Square> = board.pieces_of(color).map(|p| p.square).collect();
        movers.shuffle(&mut self.rng);

        for from in movers {
            let mut targets = moves::pseudo_legal_destinations(board, from);
            targets.shuffle(&mut self.rng);

            for to in targets {
                let mv = Move::new(from, to);
                match board.simulate(mv, |b| !check::is_in_check(b, color)) {
                    Ok(true) => {
                        debug!(%mv, color = color.as_str(), "computer picked move");
                        return Some(mv);
                    }
                    Ok(false) => {}
                    Err(err) => debug!(%mv, %err, "candidate could not be simulated"),
                }
            }
        }

        warn!(color = color.as_str(), "computer has no legal move");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::check_move;

    #[test]
    fn test_opening_move_is_legal() {
        let mut board = Board::standard();
        for seed in 0..20 {
            let mut player = ComputerPlayer::with_seed(Color::White, seed);
            let mv = player.choose_move(&mut board).unwrap();
            assert!(check_move(&mut board, mv, Color::White).is_ok(), "{mv}");
        }
        assert_eq!(board.to_placement(), Board::standard().to_placement());
        assert!(!board.in_simulation());
    }

    #[test]
    fn test_same_seed_same_move() {
        let mut board = Board::standard();
        let a = ComputerPlayer::with_seed(Color::Black, 42).choose_move(&mut board);
        let b = ComputerPlayer::with_seed(Color::Black, 42).choose_move(&mut board);
        assert_eq!(a, b);
    }

    #[test]
    fn test_escapes_check() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/r3K3").unwrap();
        for seed in 0..20 {
            let mut player = ComputerPlayer::with_seed(Color::White, seed);
            let mv = player.choose_move(&mut board).unwrap();
            let next = board.after(mv).unwrap();
            assert!(!check::is_in_check(&next, Color::White), "{mv}");
        }
    }

    #[test]
    fn test_no_move_when_stalemated() {
        let mut board = Board::from_placement("k7/2Q5/8/8/8/8/8/7K").unwrap();
        let mut player = ComputerPlayer::with_seed(Color::Black, 3);
        assert_eq!(player.choose_move(&mut board), None);
    }
}

//! Chess rules: movement legality and check detection
//!
//! - `moves` - per-piece movement rules, full legality and legal-move listing
//! - `check` - attack predicates, check and checkmate

pub mod check;
pub mod moves;

pub use check::{is_checkmate, is_in_check, QueenCheck};
pub use moves::{check_move, is_pseudo_legal, legal_moves};

//! Board representation: value types and the live piece set

mod state;
mod types;

pub use state::{Board, Snapshot, STANDARD_PLACEMENT};
pub use types::*;

//! Computer opponent

mod player;

pub use player::ComputerPlayer;

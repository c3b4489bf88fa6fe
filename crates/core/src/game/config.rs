//! Game configuration and the promotion cursor

use serde::{Deserialize, Serialize};

use crate::board::{Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "PvP")]
    PlayerVsPlayer,
    #[serde(rename = "PvC")]
    PlayerVsComputer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "PvP",
            GameMode::PlayerVsComputer => "PvC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::PlayerVsComputer => "Player vs Computer",
        }
    }
}

/// Piece chosen when a pawn reaches the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Queen, rook, bishop, knight in turn, shared by both colors.
    #[default]
    Cycle,
    AlwaysQueen,
}

pub const PROMOTION_CYCLE: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionCursor {
    policy: PromotionPolicy,
    index: usize,
}

impl PromotionCursor {
    pub fn new(policy: PromotionPolicy) -> Self {
        Self { policy, index: 0 }
    }

    /// The kind the next promotion would produce.
    pub fn peek(&self) -> PieceKind {
        match self.policy {
            PromotionPolicy::Cycle => PROMOTION_CYCLE[self.index],
            PromotionPolicy::AlwaysQueen => PieceKind::Queen,
        }
    }

    /// Consumes one promotion and advances the cycle.
    pub fn next_kind(&mut self) -> PieceKind {
        let kind = self.peek();
        if self.policy == PromotionPolicy::Cycle {
            self.index = (self.index + 1) % PROMOTION_CYCLE.len();
        }
        kind
    }
}

/// Settings for a new game.
///
/// ```ignore
/// let config = GameConfig::new(GameMode::PlayerVsComputer, Color::Black)
///     .promotion(PromotionPolicy::AlwaysQueen)
///     .seed(7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Color of the human player. In PvC the computer takes the other one.
    pub player_color: Color,
    pub promotion: PromotionPolicy,
    /// Fixed RNG seed for the computer; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(mode: GameMode, player_color: Color) -> Self {
        Self {
            mode,
            player_color,
            promotion: PromotionPolicy::default(),
            seed: None,
        }
    }

    pub fn promotion(mut self, policy: PromotionPolicy) -> Self {
        self.promotion = policy;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn computer_color(&self) -> Option<Color> {
        match self.mode {
            GameMode::PlayerVsComputer => Some(!self.player_color),
            GameMode::PlayerVsPlayer => None,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(GameMode::PlayerVsPlayer, Color::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_cycles() {
        let mut cursor = PromotionCursor::new(PromotionPolicy::Cycle);
        let kinds: Vec<_> = (0..5).map(|_| cursor.next_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
                PieceKind::Queen
            ]
        );
    }

    #[test]
    fn test_cursor_always_queen() {
        let mut cursor = PromotionCursor::new(PromotionPolicy::AlwaysQueen);
        assert!((0..6).all(|_| cursor.next_kind() == PieceKind::Queen));
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(GameMode::PlayerVsComputer, Color::Black)
            .promotion(PromotionPolicy::AlwaysQueen)
            .seed(7);
        assert_eq!(config.computer_color(), Some(Color::White));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.promotion, PromotionPolicy::AlwaysQueen);
        assert_eq!(GameConfig::default().computer_color(), None);
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&GameMode::PlayerVsComputer).unwrap(),
            "\"PvC\""
        );
        let mode: GameMode = serde_json::from_str("\"PvP\"").unwrap();
        assert_eq!(mode, GameMode::PlayerVsPlayer);
    }
}

//! Game controller state machine

use tracing::{debug, info, warn};

use super::config::{GameConfig, GameMode, PromotionCursor};
use super::snapshot::GameSnapshot;
use crate::board::{Board, Color, Move, PieceKind, Square};
use crate::computer::ComputerPlayer;
use crate::error::Result;
use crate::rules::{check, moves};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting(Square),
    /// Terminal until the next `start_game`.
    Checkmate { winner: Color },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub active_color: Color,
    pub phase: Phase,
    pub in_check: bool,
    pub last_rejection: Option<String>,
    promotion: PromotionCursor,
}

impl GameSession {
    fn new(config: &GameConfig) -> Self {
        Self {
            active_color: Color::White,
            phase: Phase::Idle,
            in_check: false,
            last_rejection: None,
            promotion: PromotionCursor::new(config.promotion),
        }
    }

    pub fn selected(&self) -> Option<Square> {
        match self.phase {
            Phase::Selecting(square) => Some(square),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Checkmate { .. })
    }

    pub fn next_promotion(&self) -> PieceKind {
        self.promotion.peek()
    }
}

/// Owns the board and drives a game from square clicks.
pub struct GameController {
    board: Board,
    config: GameConfig,
    session: GameSession,
    computer: Option<ComputerPlayer>,
}

impl GameController {
    /// A fresh game from the standard position. In PvC with the computer on
    /// white, the computer's opening move is already played.
    pub fn new(config: GameConfig) -> Self {
        let mut controller = Self::with_board(config, Board::standard(), Color::White);
        info!(
            mode = config.mode.as_str(),
            player = config.player_color.as_str(),
            "game started"
        );
        controller.play_computer_turn();
        controller
    }

    /// Starts from an arbitrary placement with `active_color` to move. The
    /// computer does not move until asked to.
    pub fn from_placement(config: GameConfig, placement: &str, active_color: Color) -> Result<Self> {
        let board = Board::from_placement(placement)?;
        let mut controller = Self::with_board(config, board, active_color);
        controller.refresh_check();
        Ok(controller)
    }

    fn with_board(config: GameConfig, board: Board, active_color: Color) -> Self {
        let computer = config.computer_color().map(|color| match config.seed {
            Some(seed) => ComputerPlayer::with_seed(color, seed),
            None => ComputerPlayer::new(color),
        });
        let mut session = GameSession::new(&config);
        session.active_color = active_color;
        Self {
            board,
            config,
            session,
            computer,
        }
    }

    /// Resets to the standard position. `color` is the human player's color;
    /// promotion policy and seed carry over from the current configuration.
    pub fn start_game(&mut self, mode: GameMode, color: Color) -> GameSnapshot {
        let mut config = self.config;
        config.mode = mode;
        config.player_color = color;
        self.restart(config)
    }

    /// Resets to the standard position under a new configuration.
    pub fn restart(&mut self, config: GameConfig) -> GameSnapshot {
        *self = Self::new(config);
        self.snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn active_color(&self) -> Color {
        self.session.active_color
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.board, &self.session, self.config.mode)
    }

    /// Handles a click on (`file`, `rank`).
    ///
    /// Off-board coordinates are the only error; rejected moves are recorded
    /// in the session and reported through the snapshot.
    pub fn select_square(&mut self, file: i32, rank: i32) -> Result<GameSnapshot> {
        let square = Square::try_from_coords(file, rank)?;

        if self.session.is_over() {
            return Ok(self.snapshot());
        }
        if self.is_computer_turn() {
            self.play_computer_turn();
            return Ok(self.snapshot());
        }

        match self.session.phase {
            Phase::Idle => self.select(square),
            Phase::Selecting(from) if from == square => {
                debug!(%square, "selection cleared");
                self.session.phase = Phase::Idle;
            }
            Phase::Selecting(from) => self.resolve(Move::new(from, square)),
            Phase::Checkmate { .. } => {}
        }
        Ok(self.snapshot())
    }

    fn is_computer_turn(&self) -> bool {
        matches!(&self.computer, Some(c) if c.color() == self.session.active_color)
    }

    fn select(&mut self, square: Square) {
        if self.board.color_at(square) == Some(self.session.active_color) {
            debug!(%square, color = self.session.active_color.as_str(), "piece selected");
            self.session.phase = Phase::Selecting(square);
        }
    }

    fn resolve(&mut self, mv: Move) {
        let mover = self.session.active_color;
        match moves::check_move(&mut self.board, mv, mover) {
            Ok(()) => {
                self.session.last_rejection = None;
                if let Err(err) = self.commit(mv) {
                    warn!(%mv, %err, "accepted move failed to apply");
                    self.session.last_rejection = Some(err.to_string());
                    self.session.phase = Phase::Idle;
                    return;
                }
                if self.is_computer_turn() && !self.session.is_over() {
                    self.play_computer_turn();
                }
            }
            Err(err) => {
                debug!(%mv, %err, "move rejected");
                self.session.last_rejection = Some(err.to_string());
                self.session.phase = if self.board.color_at(mv.to) == Some(mover) {
                    Phase::Selecting(mv.to)
                } else {
                    Phase::Idle
                };
            }
        }
    }

    /// Applies an already validated move, promotes if needed and passes the turn.
    fn commit(&mut self, mv: Move) -> Result<()> {
        let mover = self.session.active_color;
        let captured = self.board.apply(mv)?;

        let promotes = matches!(
            self.board.piece_at(mv.to),
            Some(p) if p.kind == PieceKind::Pawn && mv.to.rank() == mover.promotion_rank()
        );
        if promotes {
            let kind = self.session.promotion.next_kind();
            self.board.promote(mv.to, kind)?;
            info!(square = %mv.to, kind = kind.as_str(), color = mover.as_str(), "pawn promoted");
        }

        info!(
            %mv,
            color = mover.as_str(),
            captured = captured.map(|p| p.kind.as_str()),
            "move played"
        );
        self.pass_turn();
        Ok(())
    }

    fn pass_turn(&mut self) {
        self.session.active_color = !self.session.active_color;
        self.session.phase = Phase::Idle;
        self.refresh_check();
    }

    fn refresh_check(&mut self) {
        let side = self.session.active_color;
        self.session.in_check = check::is_in_check(&self.board, side);
        if self.session.in_check && check::is_checkmate(&self.board, side) {
            self.declare_winner(!side);
        }
    }

    fn declare_winner(&mut self, winner: Color) {
        info!(winner = winner.as_str(), "checkmate");
        self.session.phase = Phase::Checkmate { winner };
    }

    /// Lets the computer move if it is its turn. Returns the move played.
    ///
    /// With no legal move the turn passes, unless the computer is mated.
    pub fn play_computer_turn(&mut self) -> Option<Move> {
        if self.session.is_over() || !self.is_computer_turn() {
            return None;
        }
        let computer = self.computer.as_mut()?;
        let color = computer.color();

        match computer.choose_move(&mut self.board) {
            Some(mv) => match self.commit(mv) {
                Ok(()) => Some(mv),
                Err(err) => {
                    warn!(%mv, %err, "computer move failed to apply");
                    None
                }
            },
            None => {
                if check::is_checkmate(&self.board, color) {
                    self.declare_winner(!color);
                } else {
                    self.pass_turn();
                }
                None
            }
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

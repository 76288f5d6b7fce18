//! Shared types and constants for the flip-tetris workspace.
//!
//! Everything here is plain data: piece kinds, the action vocabulary the
//! presentation layer speaks to the engine, session phases, the gravity
//! direction and the default tuning values. Both the engine and the
//! terminal front-end depend on this crate, so it stays free of game logic.
//!
//! # Board Dimensions
//!
//! The playfield is square by default:
//!
//! - **Width**: 20 columns (indexed 0-19)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top edge of the screen)
//!
//! Sessions may pick any size from [`MIN_BOARD_DIM`] to [`MAX_BOARD_DIM`].
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `INITIAL_DROP_MS` | 800 | Fall interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 50 | Fall interval floor |
//! | `CLEAR_ANIMATION_MS` | 700 | Board animation after a line clear |
//!
//! # Examples
//!
//! ```
//! use flip_tetris_types::{Gravity, PieceKind, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Gravity::Down.flipped(), Gravity::Up);
//! assert_eq!(DEFAULT_BOARD_WIDTH, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in columns.
pub const DEFAULT_BOARD_WIDTH: u8 = 20;

/// Default board height in rows.
pub const DEFAULT_BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board side (the I piece matrix is 4 wide).
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest accepted board side. Keeps coordinates inside `i8`.
pub const MAX_BOARD_DIM: u8 = 64;

/// Host frame interval in milliseconds.
pub const TICK_MS: u32 = 16;

/// Fall interval at the first level.
pub const INITIAL_DROP_MS: u32 = 800;

/// Fall interval used by the flip variant, which has no levels.
pub const FLIP_DROP_MS: u32 = 1000;

/// Interval reduction per level gained.
pub const DROP_STEP_MS: u32 = 50;

/// The fall interval never goes below this.
pub const DROP_INTERVAL_MIN_MS: u32 = 50;

/// Length of the board animation that follows a line clear (600 ms flip + 100 ms settle).
pub const CLEAR_ANIMATION_MS: u32 = 700;

/// Level at the start of a session.
pub const INITIAL_LEVEL: u32 = 1;

/// Cleared lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by rows cleared in one lock.
///
/// Multiplied by the current level when leveling is enabled.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell for a soft drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// Line-clear points needed to trigger a board flip.
pub const FLIP_SCORE_THRESHOLD: u32 = 100;

/// Rows emptied at the spawn edge after a flip.
pub const FLIP_CLEAR_BAND: u8 = 4;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in catalogue order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Direction blocks fall in.
///
/// Row 0 is always the top edge of the screen; under [`Gravity::Up`] pieces
/// spawn at the bottom and fall towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    #[default]
    Down,
    Up,
}

impl Gravity {
    /// Row delta of a single fall step.
    pub fn dy(self) -> i8 {
        match self {
            Gravity::Down => 1,
            Gravity::Up => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::Down => "down",
            Gravity::Up => "up",
        }
    }
}

/// Session phase.
///
/// `Start -> Playing -> {Paused <-> Playing} -> GameOver -> (Playing | Start)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Restart,
    /// Abandon the session and return to the start screen.
    Home,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "home" => Some(GameAction::Home),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Home => "home",
        }
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied, tagged with the kind that locked there
pub type Cell = Option<PieceKind>;

//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-piece simulation and the board-clearing
//! engine. It has no dependency on terminals, files or clocks: the host calls
//! [`GameState::tick`] with elapsed milliseconds and renders
//! [`GameSnapshot`]s.
//!
//! - **Deterministic**: the same seed and inputs produce the same game
//! - **Configurable**: board size, spawn policy, leveling, hold and the flip
//!   are all part of [`EngineConfig`]
//!
//! # Module Structure
//!
//! - [`board`]: occupancy grid, line clearing, row mirroring and settling
//! - [`pieces`]: tetromino matrices, matrix rotation and wall kicks
//! - [`rng`]: seedable LCG and the spawn policies
//! - [`scoring`]: line scores, drop bonuses, levels and fall speed
//! - [`gravity`]: the board flip and its score meter
//! - [`config`]: engine configuration and validation
//! - [`game_state`]: session state, phases and the lock/clear/spawn sequence
//! - [`snapshot`]: serializable render snapshots
//!
//! # Game Rules
//!
//! - Pieces spawn centred on the spawn edge; a blocked spawn ends the game
//! - Rotation tries the plain position first, then eight wall kicks
//! - A piece that cannot fall when the fall timer expires locks immediately
//! - Full rows clear together: 100/300/500/800 points times the level
//! - In the flip variant every 100 line-clear points turn the board upside down
//!
//! # Example
//!
//! ```
//! use flip_tetris_core::GameState;
//! use flip_tetris_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.phase(), Phase::Playing);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use flip_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{ConfigError, EngineConfig, Timing};
pub use game_state::{GameState, LockEvent, Stage, Tetromino, TickOutcome};
pub use gravity::{flip_board, FlipMeter, FlipPolicy, FlipReport};
pub use pieces::{try_rotate, Shape, KICKS};
pub use rng::{SimpleRng, SpawnPolicy, Spawner};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};

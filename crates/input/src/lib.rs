//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s for the
//! engine and the few host commands (start, quit) the engine does not own.

pub mod map;

pub use flip_tetris_types as types;

pub use map::{handle_key_event, map_key, should_quit, KeyCommand};

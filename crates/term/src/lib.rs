//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer by [`GameView`] and flushed to the terminal by
//! [`TerminalRenderer`]. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use flip_tetris_core as core;
pub use flip_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{Theme, ThemeKind, FLIP_PALETTE};

//! Flip Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `flip_tetris::{core,input,term,types}` and adds high-score [`records`].

pub mod records;

pub use flip_tetris_core as core;
pub use flip_tetris_input as input;
pub use flip_tetris_term as term;
pub use flip_tetris_types as types;

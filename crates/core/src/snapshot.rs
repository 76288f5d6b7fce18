//! Read-only render snapshots
//!
//! A [`GameSnapshot`] is everything a presentation layer needs to draw one
//! frame. It serializes to JSON so front-ends outside Rust can consume it.

use serde::Serialize;

use crate::game_state::Tetromino;
use crate::pieces::MinoOffset;
use crate::types::{Cell, Gravity, PieceKind, Phase, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    /// Absolute board cells.
    pub cells: [MinoOffset; 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            cells: value.minos(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, row 0 first, `width * height` cells.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<[MinoOffset; 4]>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub level: u32,
    pub lines: u32,
    pub phase: Phase,
    pub gravity: Gravity,
    pub flip_count: u32,
    /// A line clear animation is running; no piece is active.
    pub clearing: bool,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Cell at (`x`, `y`), `None` when empty or out of bounds.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.board
            .get(y * self.width as usize + x)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.clearing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            board: vec![None; DEFAULT_BOARD_WIDTH as usize * DEFAULT_BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            score: 0,
            high_score: 0,
            new_high_score: false,
            level: 1,
            lines: 0,
            phase: Phase::Start,
            gravity: Gravity::Down,
            flip_count: 0,
            clearing: false,
            episode_id: 0,
        }
    }
}

//! Gravity module - the board flip
//!
//! In the flip variant every [`FlipPolicy::score_threshold`] line-clear points
//! turn the playfield upside down: gravity reverses, the rows are mirrored,
//! a band of rows at the new spawn edge is emptied and every loose block
//! settles against the new floor.

use serde::Deserialize;

use crate::board::Board;
use crate::types::{Gravity, FLIP_CLEAR_BAND, FLIP_SCORE_THRESHOLD};

/// When and how hard the board flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlipPolicy {
    /// Line-clear points needed to trigger a flip. Drop bonuses do not count.
    pub score_threshold: u32,
    /// Rows emptied at the spawn edge after the board is mirrored.
    pub clear_band: u8,
}

impl Default for FlipPolicy {
    fn default() -> Self {
        Self {
            score_threshold: FLIP_SCORE_THRESHOLD,
            clear_band: FLIP_CLEAR_BAND,
        }
    }
}

/// Accumulates line-clear points between flips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipMeter {
    since_last_flip: u32,
}

impl FlipMeter {
    /// Add points; returns true (and resets) when the threshold is reached.
    pub fn record(&mut self, points: u32, policy: &FlipPolicy) -> bool {
        self.since_last_flip = self.since_last_flip.saturating_add(points);
        if self.since_last_flip >= policy.score_threshold {
            self.since_last_flip = 0;
            return true;
        }
        false
    }

    pub fn since_last_flip(&self) -> u32 {
        self.since_last_flip
    }

    pub fn reset(&mut self) {
        self.since_last_flip = 0;
    }
}

/// What a flip did to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipReport {
    /// Single-cell moves made while settling.
    pub settle_moves: u32,
    /// Rows completed by the settle and removed.
    pub settle_cleared: usize,
}

/// Mirror the board for `gravity` (the direction after the flip).
///
/// Rows are reversed, `band` rows at the new ceiling are emptied, loose
/// blocks settle, and any row the settle completed is removed.
pub fn flip_board(board: &mut Board, gravity: Gravity, band: u8) -> FlipReport {
    board.reverse_rows();
    board.clear_ceiling_band(band, gravity);
    let settle_moves = board.settle(gravity);
    let settle_cleared = board.clear_full_rows(gravity).len();

    FlipReport {
        settle_moves,
        settle_cleared,
    }
}

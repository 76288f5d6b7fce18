//! Scoring module - line clear points, drop bonuses, levels and fall speed
//!
//! One lock event clears 0-4 rows; the points come from [`LINE_SCORES`]
//! multiplied by the level the event happened at. Drops add a small bonus per
//! cell travelled. Every [`LINES_PER_LEVEL`] cleared lines raise the level by
//! one, and each level shortens the fall interval down to a fixed floor.

use crate::config::Timing;
use crate::types::{HARD_DROP_POINTS, INITIAL_LEVEL, LINE_SCORES, SOFT_DROP_POINTS};

#[cfg(doc)]
use crate::types::LINES_PER_LEVEL;

/// Points for clearing `lines` rows in a single lock at `level`.
///
/// Level 0 is treated as 1 so a misconfigured caller never zeroes a clear.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.max(1))
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level reached after `total_lines` cleared lines.
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    INITIAL_LEVEL + total_lines / lines_per_level.max(1)
}

/// Fall interval for a level, in milliseconds.
///
/// `initial - (level - 1) * step`, never below `timing.min_drop_ms`.
pub fn get_drop_interval_ms(level: u32, timing: &Timing) -> u32 {
    let steps = level.saturating_sub(INITIAL_LEVEL);
    timing
        .initial_drop_ms
        .saturating_sub(steps.saturating_mul(timing.drop_step_ms))
        .max(timing.min_drop_ms)
}

//! Engine configuration
//!
//! Two presets cover the shipped variants: [`EngineConfig::classic`] with
//! levels and a clear animation, and [`EngineConfig::flip`] with a fixed fall
//! speed and the board flip. Any field can be overridden from JSON; missing
//! fields fall back to the classic preset.

use serde::Deserialize;
use thiserror::Error;

use crate::gravity::FlipPolicy;
use crate::rng::SpawnPolicy;
use crate::types::{
    CLEAR_ANIMATION_MS, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DROP_INTERVAL_MIN_MS,
    DROP_STEP_MS, FLIP_DROP_MS, INITIAL_DROP_MS, LINES_PER_LEVEL, MAX_BOARD_DIM, MIN_BOARD_DIM,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be between {min}x{min} and {max}x{max}, got {width}x{height}")]
    Dimensions {
        width: u8,
        height: u8,
        min: u8,
        max: u8,
    },
    #[error("cycle spawn policy needs at least one piece")]
    EmptySpawnCycle,
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("flip clear band ({band}) must be smaller than the board height ({height})")]
    FlipBandTooTall { band: u8, height: u8 },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fall speed and animation timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub initial_drop_ms: u32,
    pub drop_step_ms: u32,
    pub min_drop_ms: u32,
    /// Pause between a line clear and the next spawn. 0 spawns immediately.
    pub clear_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            initial_drop_ms: INITIAL_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            min_drop_ms: DROP_INTERVAL_MIN_MS,
            clear_delay_ms: CLEAR_ANIMATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub spawn: SpawnPolicy,
    /// `None` disables the board flip.
    pub flip: Option<FlipPolicy>,
    /// Level up every `lines_per_level` lines and multiply line scores by the level.
    pub leveling: bool,
    pub lines_per_level: u32,
    pub hold_enabled: bool,
    pub timing: Timing,
}

impl EngineConfig {
    /// Leveling variant: speeds up every 10 lines, no flip.
    pub fn classic() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            spawn: SpawnPolicy::Uniform,
            flip: None,
            leveling: true,
            lines_per_level: LINES_PER_LEVEL,
            hold_enabled: true,
            timing: Timing::default(),
        }
    }

    /// Flip variant: constant speed, board flips every 100 line-clear points.
    pub fn flip() -> Self {
        Self {
            flip: Some(FlipPolicy::default()),
            leveling: false,
            timing: Timing {
                initial_drop_ms: FLIP_DROP_MS,
                drop_step_ms: 0,
                min_drop_ms: DROP_INTERVAL_MIN_MS,
                clear_delay_ms: 0,
            },
            ..Self::classic()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !dims.contains(&self.width) || !dims.contains(&self.height) {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
                min: MIN_BOARD_DIM,
                max: MAX_BOARD_DIM,
            });
        }
        if matches!(&self.spawn, SpawnPolicy::Cycle(kinds) if kinds.is_empty()) {
            return Err(ConfigError::EmptySpawnCycle);
        }
        if self.timing.initial_drop_ms == 0 {
            return Err(ConfigError::Zero("timing.initial_drop_ms"));
        }
        if self.timing.min_drop_ms == 0 {
            return Err(ConfigError::Zero("timing.min_drop_ms"));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::Zero("lines_per_level"));
        }
        if let Some(flip) = &self.flip {
            if flip.score_threshold == 0 {
                return Err(ConfigError::Zero("flip.score_threshold"));
            }
            if flip.clear_band >= self.height {
                return Err(ConfigError::FlipBandTooTall {
                    band: flip.clear_band,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}

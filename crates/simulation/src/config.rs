//! Tuning constants and the immutable [`GameConfig`] record built from them.
//!
//! The engine never reads the constants directly; it receives a `GameConfig`
//! at construction so tests and tools can run rounds with different tuning in
//! the same process.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const TRACK_WIDTH: i32 = 800;
pub const TRACK_HEIGHT: i32 = 500;
/// Inset of the playable rectangle from every track edge.
pub const TRACK_PADDING: i32 = 20;
pub const PLAYER_SIZE: i32 = 24;
pub const MOVE_STEP: i32 = 10;

/// Inclusive bounds of the randomized GREEN/RED hold ("caution window").
pub const CAUTION_MIN_MS: u64 = 1200;
pub const CAUTION_MAX_MS: u64 = 3000;

/// YELLOW duration on level 1. Halved on every win.
pub const INITIAL_YELLOW_MS: u64 = 500;
/// Hard lower bound on the YELLOW duration.
pub const YELLOW_FLOOR_MS: u64 = 50;

/// Host tick cadence (~60 Hz). Must stay below `YELLOW_FLOOR_MS`.
pub const TICK_INTERVAL_MS: u64 = 16;
pub const GRID_SPACING: i32 = 40;

// =============================================================================
// ConfigError
// =============================================================================

/// A tuning value that would make the round unplayable or the schedule
/// ill-defined. These are construction-time defects, never game outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The padding and token leave no room to move.
    EmptyPlayfield { width: i32, height: i32 },
    /// A size or step that must be strictly positive.
    NonPositive { field: &'static str, value: i64 },
    /// Caution window bounds are zero or inverted.
    InvalidCautionRange { min_ms: u64, max_ms: u64 },
    /// A YELLOW floor of zero would let the reaction window vanish.
    ZeroYellowFloor,
    /// Level 1 would already be below the floor.
    YellowBelowFloor { initial_ms: u64, floor_ms: u64 },
    /// Ticks this coarse could skip a whole YELLOW phase.
    TickTooCoarse { tick_ms: u64, floor_ms: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPlayfield { width, height } => write!(
                f,
                "Empty playfield: a {width}x{height} track has no room for the player"
            ),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::InvalidCautionRange { min_ms, max_ms } => write!(
                f,
                "Invalid caution range: [{min_ms}, {max_ms}] ms"
            ),
            ConfigError::ZeroYellowFloor => write!(f, "Yellow floor must be at least 1 ms"),
            ConfigError::YellowBelowFloor {
                initial_ms,
                floor_ms,
            } => write!(
                f,
                "Initial yellow {initial_ms} ms is below the {floor_ms} ms floor"
            ),
            ConfigError::TickTooCoarse { tick_ms, floor_ms } => write!(
                f,
                "Tick interval {tick_ms} ms is not finer than the {floor_ms} ms yellow floor"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// GameConfig
// =============================================================================

/// Every tuning knob of a round, fixed for the lifetime of an engine.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub padding: i32,
    pub player_size: i32,
    pub move_step: i32,
    pub caution_min_ms: u64,
    pub caution_max_ms: u64,
    pub initial_yellow_ms: u64,
    pub yellow_floor_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: TRACK_WIDTH,
            height: TRACK_HEIGHT,
            padding: TRACK_PADDING,
            player_size: PLAYER_SIZE,
            move_step: MOVE_STEP,
            caution_min_ms: CAUTION_MIN_MS,
            caution_max_ms: CAUTION_MAX_MS,
            initial_yellow_ms: INITIAL_YELLOW_MS,
            yellow_floor_ms: YELLOW_FLOOR_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    pub fn min_x(&self) -> i32 {
        self.padding
    }

    pub fn max_x(&self) -> i32 {
        self.width - self.padding - self.player_size
    }

    pub fn min_y(&self) -> i32 {
        self.padding
    }

    pub fn max_y(&self) -> i32 {
        self.height - self.padding - self.player_size
    }

    /// Reaching this x (after clamping) wins the round.
    pub fn finish_x(&self) -> i32 {
        self.max_x()
    }

    /// Left edge, vertically centred.
    pub fn start_position(&self) -> (i32, i32) {
        (self.min_x(), self.height / 2 - self.player_size / 2)
    }

    /// YELLOW duration after one more win: halved, never below the floor.
    pub fn next_yellow_ms(&self, current_ms: u64) -> u64 {
        (current_ms / 2).max(self.yellow_floor_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("player_size", self.player_size),
            ("move_step", self.move_step),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: i64::from(value),
                });
            }
        }
        if self.padding < 0 {
            return Err(ConfigError::NonPositive {
                field: "padding",
                value: i64::from(self.padding),
            });
        }
        if self.max_x() <= self.min_x() || self.max_y() < self.min_y() {
            return Err(ConfigError::EmptyPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.caution_min_ms == 0 || self.caution_min_ms > self.caution_max_ms {
            return Err(ConfigError::InvalidCautionRange {
                min_ms: self.caution_min_ms,
                max_ms: self.caution_max_ms,
            });
        }
        if self.yellow_floor_ms == 0 {
            return Err(ConfigError::ZeroYellowFloor);
        }
        if self.initial_yellow_ms < self.yellow_floor_ms {
            return Err(ConfigError::YellowBelowFloor {
                initial_ms: self.initial_yellow_ms,
                floor_ms: self.yellow_floor_ms,
            });
        }
        if self.tick_interval_ms == 0 || self.tick_interval_ms >= self.yellow_floor_ms {
            return Err(ConfigError::TickTooCoarse {
                tick_ms: self.tick_interval_ms,
                floor_ms: self.yellow_floor_ms,
            });
        }
        Ok(())
    }
}

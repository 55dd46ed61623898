use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::light_cycle::{LightState, LightTransition};

// =============================================================================
// Position
// =============================================================================

/// Top-left corner of the player token, in track units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn start(config: &GameConfig) -> Self {
        let (x, y) = config.start_position();
        Self { x, y }
    }

    /// Offset by `(dx, dy)` and clamp into the playable rectangle.
    pub fn stepped(self, dx: i32, dy: i32, config: &GameConfig) -> Self {
        Self {
            x: self
                .x
                .saturating_add(dx)
                .clamp(config.min_x(), config.max_x()),
            y: self
                .y
                .saturating_add(dy)
                .clamp(config.min_y(), config.max_y()),
        }
    }

    pub fn is_within(self, config: &GameConfig) -> bool {
        (config.min_x()..=config.max_x()).contains(&self.x)
            && (config.min_y()..=config.max_y()).contains(&self.y)
    }
}

// =============================================================================
// Outcome
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Headline shown over the frozen track.
    pub fn headline(self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won => Some("You Win! Level Up!"),
            Outcome::Lost => Some("You moved on RED! Game Over"),
        }
    }
}

/// One of the four step directions a host may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// A single `step` along one axis. Track y grows downwards.
    pub fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
        }
    }
}

/// What a single move attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The round was already over.
    Ignored,
    /// The token moved (possibly clamped to zero distance) and play continues.
    Moved(Position),
    /// The attempt happened under RED; the token did not move.
    Lost,
    /// The token reached the finish. Carries the level now unlocked.
    Won { next_level: u32 },
}

impl MoveResult {
    /// The outcome this move transitioned the round into, if any.
    pub fn ended_with(self) -> Option<Outcome> {
        match self {
            MoveResult::Lost => Some(Outcome::Lost),
            MoveResult::Won { .. } => Some(Outcome::Won),
            MoveResult::Ignored | MoveResult::Moved(_) => None,
        }
    }
}

// =============================================================================
// RoundSnapshot
// =============================================================================

/// Copied-out view of the round for renderers and agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoundSnapshot {
    pub position: Position,
    pub outcome: Outcome,
    pub level: u32,
    pub light: LightState,
    pub elapsed_ms: u64,
    pub yellow_duration_ms: u64,
}

impl RoundSnapshot {
    /// "Time: 3.4s"
    pub fn elapsed_label(&self) -> String {
        format!("Time: {:.1}s", self.elapsed_ms as f64 / 1000.0)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Request to move the token by one step along an axis.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub dx: i32,
    pub dy: i32,
}

impl MoveIntent {
    /// One configured step in `direction`.
    pub fn step(direction: Direction, config: &GameConfig) -> Self {
        let (dx, dy) = direction.delta(config.move_step);
        Self { dx, dy }
    }
}

/// Request to start the next round. Ignored while a round is in progress.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartIntent;

/// The light advanced one phase.
#[derive(Event, Debug, Clone, Copy)]
pub struct LightChanged(pub LightTransition);

/// A round left IN_PROGRESS.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnded {
    pub outcome: Outcome,
    /// Level after any advance.
    pub level: u32,
    pub elapsed_ms: u64,
}

/// The snapshot as of the end of this frame's [`RoundSet`](super::RoundSet).
/// Renderers read this instead of the engine.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CurrentRound(pub RoundSnapshot);

/// Milliseconds since startup on the host clock, sampled once per frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundClock(pub u64);

/// Seed for the schedule RNG. `None` seeds from the OS.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RoundSeed(pub Option<u64>);

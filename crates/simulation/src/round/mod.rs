//! Round engine: player position, outcome, level progression, and the light
//! cycle it owns.
//!
//! [`RoundEngine`] is plain data plus synchronous methods and can be driven
//! directly. [`RoundPlugin`] wires it into Bevy: host input arrives as
//! [`MoveIntent`] / [`RestartIntent`] events and every mutation runs in one
//! ordered chain under [`RoundSet`].

pub mod engine;
pub(crate) mod systems;
pub mod types;

pub use engine::RoundEngine;
pub use systems::{
    advance_round_clock, apply_move_intents, apply_restart_intents, publish_snapshot,
    tick_light_cycle,
};
pub use types::{
    CurrentRound, Direction, LightChanged, MoveIntent, MoveResult, Outcome, Position,
    RestartIntent, RoundClock, RoundEnded, RoundSeed, RoundSnapshot,
};

use bevy::prelude::*;

use crate::config::GameConfig;

/// Every system that mutates the round. Input producers should run
/// `.before(RoundSet)`, readers of the frame's result `.after(RoundSet)`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundSet;

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        // Order matters: the engine reads config, seed and clock when built.
        app.init_resource::<GameConfig>()
            .init_resource::<RoundSeed>()
            .init_resource::<RoundClock>()
            .init_resource::<RoundEngine>()
            .init_resource::<CurrentRound>()
            .add_event::<MoveIntent>()
            .add_event::<RestartIntent>()
            .add_event::<LightChanged>()
            .add_event::<RoundEnded>()
            .add_systems(
                Update,
                (
                    advance_round_clock,
                    apply_restart_intents,
                    tick_light_cycle,
                    apply_move_intents,
                    publish_snapshot,
                )
                    .chain()
                    .in_set(RoundSet),
            );
    }
}

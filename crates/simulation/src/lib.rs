//! Game logic for Red Light, Green Light.
//!
//! Owns the traffic-light cycle and the round engine that judges moves
//! against it. Nothing here draws or reads the keyboard; hosts send
//! [`round::MoveIntent`] / [`round::RestartIntent`] and read
//! [`round::RoundSnapshot`].

use bevy::prelude::*;

pub mod agent_protocol;
pub mod config;
pub mod light_cycle;
pub mod round;
pub mod sim_rng;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(round::RoundPlugin);
    }
}

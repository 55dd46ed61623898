//! # TestRound — headless harness for the round plugin
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `SimulationPlugin` and a
//! manual time step, so tests can send intents, advance frames and assert on
//! the engine without a window.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::GameConfig;
use crate::light_cycle::LightState;
use crate::round::{
    LightChanged, MoveIntent, RestartIntent, RoundClock, RoundEnded, RoundEngine, RoundSnapshot,
};
use crate::sim_rng::{IntervalSource, ScriptedIntervals};
use crate::SimulationPlugin;

/// Events captured by the harness each frame.
#[derive(Resource, Default)]
struct Recorded {
    transitions: Vec<LightChanged>,
    ended: Vec<RoundEnded>,
}

fn record_events(
    mut recorded: ResMut<Recorded>,
    mut changed: EventReader<LightChanged>,
    mut ended: EventReader<RoundEnded>,
) {
    recorded.transitions.extend(changed.read().copied());
    recorded.ended.extend(ended.read().copied());
}

pub struct TestRound {
    app: App,
}

impl TestRound {
    /// Default config, every random hold fixed at 1200 ms.
    pub fn new() -> Self {
        Self::with_intervals(GameConfig::default(), ScriptedIntervals::constant(1200))
    }

    pub fn with_intervals(config: GameConfig, intervals: impl IntervalSource + 'static) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        let step = Duration::from_millis(config.tick_interval_ms);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

        // Inserted BEFORE SimulationPlugin so init_resource keeps ours.
        app.insert_resource(RoundEngine::new(config.clone(), Box::new(intervals), 0));
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);

        app.init_resource::<Recorded>();
        app.add_systems(Update, record_events.after(crate::round::RoundSet));

        // First update establishes the time baseline (elapsed stays 0).
        app.update();
        Self { app }
    }

    /// Run `n` frames of one tick interval each.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run frames until the clock reaches `ms`.
    pub fn run_until_ms(&mut self, ms: u64) {
        while self.clock_ms() < ms {
            self.app.update();
        }
    }

    /// Run frames until the light shows `state`, panicking after `limit` frames.
    pub fn run_until_light(&mut self, state: LightState, limit: u32) {
        for _ in 0..limit {
            if self.engine().light_state() == state {
                return;
            }
            self.app.update();
        }
        panic!("light did not reach {state:?} within {limit} frames");
    }

    /// Queue a move; it is applied on the next frame.
    pub fn send_move(&mut self, dx: i32, dy: i32) -> &mut Self {
        self.app.world_mut().send_event(MoveIntent { dx, dy });
        self
    }

    pub fn send_restart(&mut self) -> &mut Self {
        self.app.world_mut().send_event(RestartIntent);
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn engine(&self) -> &RoundEngine {
        self.app.world().resource::<RoundEngine>()
    }

    pub fn clock_ms(&self) -> u64 {
        self.app.world().resource::<RoundClock>().0
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.engine().snapshot(self.clock_ms())
    }

    pub fn transitions(&self) -> Vec<LightChanged> {
        self.app.world().resource::<Recorded>().transitions.clone()
    }

    pub fn ended(&self) -> Vec<RoundEnded> {
        self.app.world().resource::<Recorded>().ended.clone()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

impl Default for TestRound {
    fn default() -> Self {
        Self::new()
    }
}

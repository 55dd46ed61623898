use bevy::prelude::*;

use super::engine::RoundEngine;
use super::types::{
    CurrentRound, LightChanged, MoveIntent, RestartIntent, RoundClock, RoundEnded,
};

/// Sample the host clock once per frame so every system below judges the
/// frame at the same instant.
pub fn advance_round_clock(time: Res<Time>, mut clock: ResMut<RoundClock>) {
    let now = u64::try_from(time.elapsed().as_millis()).unwrap_or(u64::MAX);
    // Time never runs backwards; keep the clock monotonic if it is reset.
    clock.0 = clock.0.max(now);
}

pub fn apply_restart_intents(
    mut intents: EventReader<RestartIntent>,
    clock: Res<RoundClock>,
    mut engine: ResMut<RoundEngine>,
) {
    for _ in intents.read() {
        if !engine.restart(clock.0) {
            debug!("Restart ignored: round still in progress");
        }
    }
}

pub fn apply_move_intents(
    mut intents: EventReader<MoveIntent>,
    clock: Res<RoundClock>,
    mut engine: ResMut<RoundEngine>,
    mut ended: EventWriter<RoundEnded>,
) {
    for intent in intents.read() {
        let result = engine.try_move(intent.dx, intent.dy, clock.0);
        if let Some(outcome) = result.ended_with() {
            let snapshot = engine.snapshot(clock.0);
            ended.send(RoundEnded {
                outcome,
                level: snapshot.level,
                elapsed_ms: snapshot.elapsed_ms,
            });
        }
    }
}

pub fn tick_light_cycle(
    clock: Res<RoundClock>,
    mut engine: ResMut<RoundEngine>,
    mut changed: EventWriter<LightChanged>,
) {
    if let Some(transition) = engine.tick(clock.0) {
        changed.send(LightChanged(transition));
    }
}

pub fn publish_snapshot(
    clock: Res<RoundClock>,
    engine: Res<RoundEngine>,
    mut current: ResMut<CurrentRound>,
) {
    current.0 = engine.snapshot(clock.0);
}

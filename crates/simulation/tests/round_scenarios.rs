//! End-to-end round scenarios against the public API, no Bevy app involved.
//!
//! Each test plays a round the way a host would: ticks at the 16 ms cadence
//! and move attempts at the current time.
//!
//! Run: cargo test -p simulation --test round_scenarios

use simulation::config::{GameConfig, TICK_INTERVAL_MS};
use simulation::light_cycle::LightState;
use simulation::round::{MoveResult, Outcome, RoundEngine};
use simulation::sim_rng::{ScriptedIntervals, SimRng};

struct Host {
    engine: RoundEngine,
    now: u64,
}

impl Host {
    fn new(engine: RoundEngine) -> Self {
        Self { engine, now: 0 }
    }

    fn frame(&mut self) {
        self.now += TICK_INTERVAL_MS;
        self.engine.tick(self.now);
    }

    fn wait_for(&mut self, light: LightState) {
        for _ in 0..10_000 {
            if self.engine.light_state() == light {
                return;
            }
            self.frame();
        }
        panic!("never saw {light:?}");
    }

    /// Walk right, standing still on RED, until the round ends.
    fn cautious_walk(&mut self) -> Outcome {
        for _ in 0..100_000 {
            if self.engine.outcome().is_over() {
                break;
            }
            if self.engine.light_state() == LightState::Green {
                self.engine.try_move(10, 0, self.now);
            }
            self.frame();
        }
        self.engine.outcome()
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_red_move_loses_round() {
    let mut host = Host::new(RoundEngine::new(
        GameConfig::default(),
        Box::new(ScriptedIntervals::new(vec![1500, 2500])),
        0,
    ));
    host.wait_for(LightState::Red);
    let before = host.engine.snapshot(host.now);

    assert_eq!(host.engine.try_move(10, 0, host.now), MoveResult::Lost);
    let after = host.engine.snapshot(host.now);
    assert_eq!(after.outcome, Outcome::Lost);
    assert_eq!(after.position, before.position);
    assert_eq!(after.level, before.level);
}

#[test]
fn test_cautious_player_always_wins() {
    for seed in 0..10 {
        let mut host = Host::new(RoundEngine::new(
            GameConfig::default(),
            Box::new(SimRng::from_seed_u64(seed)),
            0,
        ));
        assert_eq!(host.cautious_walk(), Outcome::Won, "seed {seed}");
        assert_eq!(host.engine.level(), 2);
        assert_eq!(host.engine.yellow_duration_ms(), 250);
    }
}

#[test]
fn test_levels_shrink_yellow_to_floor() {
    let mut host = Host::new(RoundEngine::new(
        GameConfig::default(),
        Box::new(SimRng::from_seed_u64(123)),
        0,
    ));
    let mut yellows = Vec::new();
    for _ in 0..6 {
        assert_eq!(host.cautious_walk(), Outcome::Won);
        yellows.push(host.engine.yellow_duration_ms());
        host.frame();
        assert!(host.engine.restart(host.now));
    }
    assert_eq!(yellows, vec![250, 125, 62, 50, 50, 50]);
    assert_eq!(host.engine.level(), 7);
}

#[test]
fn test_boundary_push_is_clamped() {
    let mut host = Host::new(RoundEngine::new(
        GameConfig::default(),
        Box::new(SimRng::default()),
        0,
    ));
    let min_y = host.engine.config().min_y();
    host.engine.try_move(0, -1000, host.now);
    assert_eq!(host.engine.position().y, min_y);
    assert_eq!(host.engine.outcome(), Outcome::InProgress);
}

#[test]
fn test_custom_config_changes_finish_line() {
    let config = GameConfig {
        width: 200,
        height: 100,
        ..Default::default()
    };
    let mut engine = RoundEngine::new(config, Box::new(SimRng::default()), 0);
    // min_x 20, finish at 200 - 20 - 24 = 156: fourteen steps.
    let mut steps = 0;
    while !engine.outcome().is_over() {
        engine.try_move(10, 0, 1);
        steps += 1;
    }
    assert_eq!(steps, 14);
    assert_eq!(engine.outcome(), Outcome::Won);
}

#[test]
fn test_elapsed_time_tracks_round_not_process() {
    let mut host = Host::new(RoundEngine::new(
        GameConfig::default(),
        Box::new(SimRng::default()),
        0,
    ));
    host.cautious_walk();
    let won_at = host.engine.ended_at().unwrap();
    for _ in 0..100 {
        host.frame();
    }
    host.engine.restart(host.now);
    for _ in 0..10 {
        host.frame();
    }
    let snap = host.engine.snapshot(host.now);
    assert_eq!(snap.elapsed_ms, 10 * TICK_INTERVAL_MS);
    assert!(won_at > 0);
}

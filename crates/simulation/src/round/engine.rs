use bevy::prelude::*;

use crate::config::{ConfigError, GameConfig};
use crate::light_cycle::{LightCycle, LightState, LightTransition};
use crate::sim_rng::{IntervalSource, SimRng};

use super::types::{MoveResult, Outcome, Position, RoundClock, RoundSeed, RoundSnapshot};

/// Authoritative state of the current round and the progression carried
/// between rounds.
///
/// All mutation goes through [`start_round`](Self::start_round),
/// [`try_move`](Self::try_move), [`tick`](Self::tick) and
/// [`restart`](Self::restart). None of them block; callers must not
/// interleave them from different threads.
#[derive(Resource)]
pub struct RoundEngine {
    config: GameConfig,
    intervals: Box<dyn IntervalSource>,
    light: LightCycle,
    position: Position,
    outcome: Outcome,
    started_at: u64,
    /// `Some` exactly when `outcome` is not `InProgress`.
    ended_at: Option<u64>,
    level: u32,
    yellow_duration_ms: u64,
}

impl RoundEngine {
    /// Build an engine and start level 1 at `now_ms`.
    pub fn try_new(
        config: GameConfig,
        intervals: Box<dyn IntervalSource>,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let yellow_duration_ms = config.initial_yellow_ms;
        let mut engine = Self {
            light: LightCycle::from_config(&config, yellow_duration_ms),
            position: Position::start(&config),
            config,
            intervals,
            outcome: Outcome::InProgress,
            started_at: now_ms,
            ended_at: None,
            level: 1,
            yellow_duration_ms,
        };
        engine.start_round(now_ms);
        Ok(engine)
    }

    /// Like [`try_new`](Self::try_new) but panics on a bad config.
    pub fn new(config: GameConfig, intervals: Box<dyn IntervalSource>, now_ms: u64) -> Self {
        match Self::try_new(config, intervals, now_ms) {
            Ok(engine) => engine,
            Err(e) => panic!("invalid game config: {e}"),
        }
    }

    /// Resume at an arbitrary level, e.g. for tests of late-game tuning.
    pub fn with_progress(mut self, level: u32, yellow_duration_ms: u64, now_ms: u64) -> Self {
        assert!(level >= 1, "levels start at 1");
        assert!(
            yellow_duration_ms >= self.config.yellow_floor_ms,
            "yellow {yellow_duration_ms} ms is below the floor"
        );
        self.level = level;
        self.yellow_duration_ms = yellow_duration_ms;
        self.start_round(now_ms);
        self
    }

    /// Reset the token, arm a fresh light cycle and clear the outcome.
    /// Only `level` and the yellow duration survive.
    pub fn start_round(&mut self, now_ms: u64) {
        self.position = Position::start(&self.config);
        self.light = LightCycle::from_config(&self.config, self.yellow_duration_ms);
        self.light.start(now_ms, self.intervals.as_mut());
        self.outcome = Outcome::InProgress;
        self.started_at = now_ms;
        self.ended_at = None;
        info!(
            "Round started: level {}, yellow {} ms",
            self.level, self.yellow_duration_ms
        );
    }

    /// Honor a restart intent. Returns `false` (and changes nothing) while
    /// the round is still being played.
    pub fn restart(&mut self, now_ms: u64) -> bool {
        if !self.outcome.is_over() {
            return false;
        }
        self.start_round(now_ms);
        true
    }

    /// Judge a move against the light as it is right now.
    pub fn try_move(&mut self, dx: i32, dy: i32, now_ms: u64) -> MoveResult {
        if self.outcome.is_over() {
            return MoveResult::Ignored;
        }

        if !self.light.current_state().allows_movement() {
            self.finish(Outcome::Lost, now_ms);
            return MoveResult::Lost;
        }

        self.position = self.position.stepped(dx, dy, &self.config);
        debug_assert!(self.position.is_within(&self.config));

        if self.position.x >= self.config.finish_x() {
            self.finish(Outcome::Won, now_ms);
            return MoveResult::Won {
                next_level: self.level,
            };
        }

        MoveResult::Moved(self.position)
    }

    /// Advance the light. Only the light changes; a stationary player is
    /// never judged here.
    pub fn tick(&mut self, now_ms: u64) -> Option<LightTransition> {
        if self.outcome.is_over() {
            return None;
        }
        let transition = self.light.tick(now_ms, self.intervals.as_mut())?;
        debug!(
            "Light {:?} -> {:?} at {} ms (next at {} ms)",
            transition.from, transition.to, transition.at_ms, transition.next_deadline_ms
        );
        Some(transition)
    }

    pub fn snapshot(&self, now_ms: u64) -> RoundSnapshot {
        RoundSnapshot {
            position: self.position,
            outcome: self.outcome,
            level: self.level,
            light: self.light.current_state(),
            elapsed_ms: self.ended_at.unwrap_or(now_ms).saturating_sub(self.started_at),
            yellow_duration_ms: self.yellow_duration_ms,
        }
    }

    fn finish(&mut self, outcome: Outcome, now_ms: u64) {
        debug_assert!(outcome.is_over());
        self.outcome = outcome;
        self.ended_at = Some(now_ms);
        self.light.stop();

        let elapsed = now_ms.saturating_sub(self.started_at);
        match outcome {
            Outcome::Won => {
                self.level += 1;
                self.yellow_duration_ms = self.config.next_yellow_ms(self.yellow_duration_ms);
                info!(
                    "Round won in {} ms; advancing to level {} (yellow {} ms)",
                    elapsed, self.level, self.yellow_duration_ms
                );
            }
            Outcome::Lost => info!("Round lost on RED after {} ms", elapsed),
            Outcome::InProgress => {}
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn yellow_duration_ms(&self) -> u64 {
        self.yellow_duration_ms
    }

    pub fn light_state(&self) -> LightState {
        self.light.current_state()
    }

    pub fn light(&self) -> &LightCycle {
        &self.light
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<u64> {
        self.ended_at
    }
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("light", &self.light)
            .field("position", &self.position)
            .field("outcome", &self.outcome)
            .field("started_at", &self.started_at)
            .field("ended_at", &self.ended_at)
            .field("level", &self.level)
            .field("yellow_duration_ms", &self.yellow_duration_ms)
            .finish_non_exhaustive()
    }
}

/// Built from the `GameConfig` and `RoundSeed` resources when the app did
/// not insert an engine of its own. Starts the first round at t = 0.
impl FromWorld for RoundEngine {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
        let seed = world.get_resource::<RoundSeed>().and_then(|s| s.0);
        let now = world.get_resource::<RoundClock>().map_or(0, |c| c.0);
        let rng = match seed {
            Some(seed) => SimRng::from_seed_u64(seed),
            None => SimRng::from_entropy(),
        };
        RoundEngine::new(config, Box::new(rng), now)
    }
}

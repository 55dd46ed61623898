//! The traffic-light timing state machine.
//!
//! GREEN and RED hold for a random caution window; YELLOW holds for an exact,
//! level-controlled reaction window. A single deadline is re-armed on every
//! transition and polled by [`LightCycle::tick`], which fires at most one
//! transition per call.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::sim_rng::IntervalSource;

// =============================================================================
// LightState
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightState {
    #[default]
    Green,
    Yellow,
    Red,
}

impl LightState {
    pub const ALL: [LightState; 3] = [LightState::Green, LightState::Yellow, LightState::Red];

    /// The fixed successor: GREEN -> YELLOW -> RED -> GREEN.
    pub fn next(self) -> Self {
        match self {
            LightState::Green => LightState::Yellow,
            LightState::Yellow => LightState::Red,
            LightState::Red => LightState::Green,
        }
    }

    /// Moving under this light is legal.
    pub fn allows_movement(self) -> bool {
        !matches!(self, LightState::Red)
    }

    pub fn label(self) -> &'static str {
        match self {
            LightState::Green => "GREEN \u{2014} Go!",
            LightState::Yellow => "YELLOW \u{2014} Hurry!",
            LightState::Red => "RED \u{2014} Don't Move!",
        }
    }
}

/// One fired transition, returned from [`LightCycle::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LightTransition {
    pub from: LightState,
    pub to: LightState,
    /// Tick time at which the transition was observed.
    pub at_ms: u64,
    /// Deadline of the following transition.
    pub next_deadline_ms: u64,
}

// =============================================================================
// LightCycle
// =============================================================================

#[derive(Debug, Clone)]
pub struct LightCycle {
    state: LightState,
    /// `Some` exactly while the cycle is running.
    next_transition_at: Option<u64>,
    yellow_duration_ms: u64,
    caution_min_ms: u64,
    caution_max_ms: u64,
}

impl LightCycle {
    /// A stopped cycle showing GREEN. Call [`start`](Self::start) to run it.
    ///
    /// Panics if the yellow duration is below `yellow_floor_ms`, the floor is
    /// zero, or the caution window is empty.
    pub fn new(
        yellow_duration_ms: u64,
        yellow_floor_ms: u64,
        caution_min_ms: u64,
        caution_max_ms: u64,
    ) -> Self {
        assert!(yellow_floor_ms > 0, "yellow floor must be positive");
        assert!(
            yellow_duration_ms >= yellow_floor_ms,
            "yellow duration {yellow_duration_ms} ms is below the {yellow_floor_ms} ms floor"
        );
        assert!(
            caution_min_ms > 0 && caution_min_ms <= caution_max_ms,
            "caution window [{caution_min_ms}, {caution_max_ms}] is invalid"
        );
        Self {
            state: LightState::Green,
            next_transition_at: None,
            yellow_duration_ms,
            caution_min_ms,
            caution_max_ms,
        }
    }

    pub fn from_config(config: &GameConfig, yellow_duration_ms: u64) -> Self {
        Self::new(
            yellow_duration_ms,
            config.yellow_floor_ms,
            config.caution_min_ms,
            config.caution_max_ms,
        )
    }

    /// Show GREEN and arm the first GREEN -> YELLOW deadline, replacing any
    /// pending one.
    pub fn start(&mut self, now_ms: u64, intervals: &mut dyn IntervalSource) {
        self.stop();
        self.state = LightState::Green;
        let hold = self.draw_caution(intervals);
        self.next_transition_at = Some(now_ms + hold);
    }

    /// Fire the due transition, if any. Missed deadlines are never replayed:
    /// one call advances the light by at most one phase.
    pub fn tick(
        &mut self,
        now_ms: u64,
        intervals: &mut dyn IntervalSource,
    ) -> Option<LightTransition> {
        let deadline = self.next_transition_at?;
        if now_ms < deadline {
            return None;
        }

        let from = self.state;
        let to = from.next();
        let hold = match to {
            LightState::Yellow => self.yellow_duration_ms,
            LightState::Red | LightState::Green => self.draw_caution(intervals),
        };
        let next_deadline_ms = now_ms + hold;

        self.state = to;
        self.next_transition_at = Some(next_deadline_ms);

        Some(LightTransition {
            from,
            to,
            at_ms: now_ms,
            next_deadline_ms,
        })
    }

    /// Cancel the pending deadline. The light keeps showing its last state.
    pub fn stop(&mut self) {
        self.next_transition_at = None;
    }

    pub fn current_state(&self) -> LightState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.next_transition_at.is_some()
    }

    pub fn next_transition_at(&self) -> Option<u64> {
        self.next_transition_at
    }

    pub fn yellow_duration_ms(&self) -> u64 {
        self.yellow_duration_ms
    }

    fn draw_caution(&self, intervals: &mut dyn IntervalSource) -> u64 {
        let hold = intervals.next_interval_ms(self.caution_min_ms, self.caution_max_ms);
        debug_assert!(
            (self.caution_min_ms..=self.caution_max_ms).contains(&hold),
            "interval source returned {hold} outside [{}, {}]",
            self.caution_min_ms,
            self.caution_max_ms
        );
        hold
    }
}

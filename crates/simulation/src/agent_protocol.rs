//! Agent text protocol types for the `--agent` headless mode.
//!
//! External programs (bots, scripts, test harnesses) play rounds over
//! newline-delimited JSON on stdin/stdout. The session owns a
//! [`RoundEngine`] and a logical clock, so play is fully deterministic for a
//! given seed. The I/O loop lives in `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::round::{Direction, MoveResult, RoundEngine, RoundSnapshot};
use crate::sim_rng::{SimRng, DEFAULT_SEED};

/// Current protocol version. Bump when the schema changes incompatibly.
pub const PROTOCOL_VERSION: u32 = 1;

/// Upper bound on a single `advance`, to keep one command from spinning.
pub const MAX_ADVANCE_MS: u64 = 600_000;

// ---------------------------------------------------------------------------
// Commands (stdin → session)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Report the current snapshot without changing anything.
    #[serde(rename = "observe")]
    Observe,

    /// Attempt one configured step at the current logical time. Step size
    /// is fixed by the session's `GameConfig`, never by the caller.
    #[serde(rename = "move")]
    Move { dir: Direction },

    /// Start the next round if the current one is over.
    #[serde(rename = "restart")]
    Restart,

    /// Advance the logical clock by `ms`, ticking at the configured cadence.
    #[serde(rename = "advance")]
    Advance { ms: u64 },

    /// Throw away all progress and start level 1 with a new seed.
    #[serde(rename = "new_game")]
    NewGame { seed: u64 },

    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (session → stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready { snapshot: RoundSnapshot },

    /// State after the command, plus what it did.
    #[serde(rename = "snapshot")]
    Snapshot {
        now_ms: u64,
        snapshot: RoundSnapshot,
        /// Number of light transitions fired by an `advance`.
        #[serde(skip_serializing_if = "Option::is_none")]
        transitions: Option<u32>,
        /// For `move`: "moved", "lost", "won" or "ignored". For `restart`:
        /// "restarted" or "ignored".
        #[serde(skip_serializing_if = "Option::is_none")]
        effect: Option<&'static str>,
    },

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

/// Parse one input line. Errors come back as an `error` response.
pub fn parse_command(line: &str) -> Result<AgentCommand, AgentResponse> {
    serde_json::from_str(line).map_err(|e| {
        make_response(ResponsePayload::Error {
            message: format!("Parse error: {e}"),
        })
    })
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One agent's game: an engine plus the logical clock it is driven by.
pub struct AgentSession {
    engine: RoundEngine,
    config: GameConfig,
    now_ms: u64,
}

impl AgentSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let engine = RoundEngine::new(config.clone(), Box::new(SimRng::from_seed_u64(seed)), 0);
        Self {
            engine,
            config,
            now_ms: 0,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.engine.snapshot(self.now_ms)
    }

    pub fn ready(&self) -> AgentResponse {
        make_response(ResponsePayload::Ready {
            snapshot: self.snapshot(),
        })
    }

    pub fn handle(&mut self, cmd: AgentCommand) -> AgentResponse {
        match cmd {
            AgentCommand::Observe => self.respond(None, None),

            AgentCommand::Move { dir } => {
                let (dx, dy) = dir.delta(self.config.move_step);
                let effect = match self.engine.try_move(dx, dy, self.now_ms) {
                    MoveResult::Ignored => "ignored",
                    MoveResult::Moved(_) => "moved",
                    MoveResult::Lost => "lost",
                    MoveResult::Won { .. } => "won",
                };
                self.respond(None, Some(effect))
            }

            AgentCommand::Restart => {
                let effect = if self.engine.restart(self.now_ms) {
                    "restarted"
                } else {
                    "ignored"
                };
                self.respond(None, Some(effect))
            }

            AgentCommand::Advance { ms } => {
                if ms > MAX_ADVANCE_MS {
                    return make_response(ResponsePayload::Error {
                        message: format!("advance of {ms} ms exceeds the {MAX_ADVANCE_MS} ms limit"),
                    });
                }
                let fired = self.advance(ms);
                self.respond(Some(fired), None)
            }

            AgentCommand::NewGame { seed } => {
                *self = Self::new(self.config.clone(), seed);
                self.respond(None, None)
            }

            AgentCommand::Quit => make_response(ResponsePayload::Goodbye),
        }
    }

    /// Tick in cadence-sized steps up to `now + ms`, landing exactly on it.
    fn advance(&mut self, ms: u64) -> u32 {
        let target = self.now_ms + ms;
        let step = self.config.tick_interval_ms;
        let mut fired = 0;
        while self.now_ms < target {
            self.now_ms = (self.now_ms + step).min(target);
            if self.engine.tick(self.now_ms).is_some() {
                fired += 1;
            }
        }
        fired
    }

    fn respond(&self, transitions: Option<u32>, effect: Option<&'static str>) -> AgentResponse {
        make_response(ResponsePayload::Snapshot {
            now_ms: self.now_ms,
            snapshot: self.snapshot(),
            transitions,
            effect,
        })
    }
}

impl Default for AgentSession {
    fn default() -> Self {
        Self::new(GameConfig::default(), DEFAULT_SEED)
    }
}

//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! No window and no Bevy schedule: the loop drives an [`AgentSession`]
//! directly on its logical clock.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`simulation::agent_protocol`] for the full schema.

use std::io::{self, BufRead, Write};

use simulation::agent_protocol::{
    parse_command, AgentResponse, AgentSession, ResponsePayload, PROTOCOL_VERSION,
};
use simulation::config::GameConfig;
use simulation::sim_rng::DEFAULT_SEED;

pub fn run_agent_mode(seed: Option<u64>) -> io::Result<()> {
    let session = AgentSession::new(GameConfig::default(), seed.unwrap_or(DEFAULT_SEED));

    // Log to stderr so it does not interfere with the JSON protocol on stdout.
    eprintln!("redlight agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(session, stdin.lock(), stdout.lock())?;

    eprintln!("redlight agent mode shutting down");
    Ok(())
}

/// Answer every line of `input` on `output` until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    mut session: AgentSession,
    input: R,
    mut output: W,
) -> io::Result<()> {
    // Send the "ready" message so the external program knows we are live.
    emit(&mut output, &session.ready())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match parse_command(&line) {
            Ok(cmd) => session.handle(cmd),
            Err(error) => error,
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        emit(&mut output, &response)?;

        if is_goodbye {
            break;
        }
    }
    Ok(())
}

fn emit<W: Write>(output: &mut W, response: &AgentResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    output.write_all(b"\n")?;
    output.flush()
}

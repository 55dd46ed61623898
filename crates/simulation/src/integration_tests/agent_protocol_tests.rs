//! Tests for the `--agent` JSON protocol and its session driver.

use crate::agent_protocol::{
    make_response, parse_command, AgentCommand, AgentSession, ResponsePayload, MAX_ADVANCE_MS,
    PROTOCOL_VERSION,
};
use crate::config::GameConfig;
use crate::light_cycle::LightState;
use crate::round::{Direction, Outcome};

fn to_json(session: &mut AgentSession, line: &str) -> serde_json::Value {
    let response = match parse_command(line) {
        Ok(cmd) => session.handle(cmd),
        Err(resp) => resp,
    };
    serde_json::to_value(&response).unwrap()
}

/// Step right until the round ends; returns the number of moves taken.
fn walk_to_finish(session: &mut AgentSession) -> u32 {
    let mut moves = 0;
    while !session.snapshot().outcome.is_over() {
        session.handle(AgentCommand::Move {
            dir: Direction::Right,
        });
        moves += 1;
        assert!(moves < 1_000, "never reached the finish");
    }
    moves
}

#[test]
fn test_parse_all_commands() {
    assert_eq!(parse_command(r#"{"cmd":"observe"}"#).unwrap(), AgentCommand::Observe);
    assert_eq!(
        parse_command(r#"{"cmd":"move","dir":"right"}"#).unwrap(),
        AgentCommand::Move {
            dir: Direction::Right
        }
    );
    assert_eq!(parse_command(r#"{"cmd":"restart"}"#).unwrap(), AgentCommand::Restart);
    assert_eq!(
        parse_command(r#"{"cmd":"advance","ms":250}"#).unwrap(),
        AgentCommand::Advance { ms: 250 }
    );
    assert_eq!(
        parse_command(r#"{"cmd":"new_game","seed":3}"#).unwrap(),
        AgentCommand::NewGame { seed: 3 }
    );
    assert_eq!(parse_command(r#"{"cmd":"quit"}"#).unwrap(), AgentCommand::Quit);
}

#[test]
fn test_parse_error_becomes_error_response() {
    let mut session = AgentSession::default();
    let json = to_json(&mut session, r#"{"cmd":"fly"}"#);
    assert_eq!(json["type"], "error");
    assert!(json["message"].as_str().unwrap().starts_with("Parse error"));
    assert_eq!(json["protocol_version"], PROTOCOL_VERSION);
}

#[test]
fn test_ready_and_goodbye_envelopes() {
    let session = AgentSession::default();
    let ready = serde_json::to_value(session.ready()).unwrap();
    assert_eq!(ready["type"], "ready");
    assert_eq!(ready["snapshot"]["outcome"], "in_progress");
    assert_eq!(ready["snapshot"]["light"], "green");
    assert_eq!(ready["snapshot"]["level"], 1);

    let bye = serde_json::to_value(make_response(ResponsePayload::Goodbye)).unwrap();
    assert_eq!(bye["type"], "goodbye");
}

#[test]
fn test_move_reports_effect_and_position() {
    let mut session = AgentSession::default();
    let json = to_json(&mut session, r#"{"cmd":"move","dir":"right"}"#);
    assert_eq!(json["type"], "snapshot");
    assert_eq!(json["effect"], "moved");
    assert_eq!(json["snapshot"]["position"]["x"], 30);
    assert!(json.get("transitions").is_none());
}

#[test]
fn test_advance_lands_on_exact_time() {
    let mut session = AgentSession::default();
    let json = to_json(&mut session, r#"{"cmd":"advance","ms":1001}"#);
    assert_eq!(json["now_ms"], 1001);
    assert_eq!(json["snapshot"]["elapsed_ms"], 1001);
    assert_eq!(session.now_ms(), 1001);
}

#[test]
fn test_advance_over_limit_is_rejected() {
    let mut session = AgentSession::default();
    let response = session.handle(AgentCommand::Advance {
        ms: MAX_ADVANCE_MS + 1,
    });
    assert!(matches!(response.payload, ResponsePayload::Error { .. }));
    assert_eq!(session.now_ms(), 0);
}

#[test]
fn test_agent_can_lose_by_moving_on_red() {
    let mut session = AgentSession::new(GameConfig::default(), 5);
    while session.snapshot().light != LightState::Red {
        session.handle(AgentCommand::Advance { ms: 16 });
        assert!(session.now_ms() < 20_000);
    }
    let step_right = AgentCommand::Move {
        dir: Direction::Right,
    };
    let json = serde_json::to_value(session.handle(step_right.clone())).unwrap();
    assert_eq!(json["effect"], "lost");
    assert_eq!(json["snapshot"]["outcome"], "lost");

    let json = serde_json::to_value(session.handle(step_right)).unwrap();
    assert_eq!(json["effect"], "ignored");
}

#[test]
fn test_agent_win_then_restart() {
    let mut session = AgentSession::default();
    let response = session.handle(AgentCommand::Restart);
    assert!(matches!(
        response.payload,
        ResponsePayload::Snapshot { effect: Some("ignored"), .. }
    ));

    walk_to_finish(&mut session);
    assert_eq!(session.snapshot().outcome, Outcome::Won);
    assert_eq!(session.snapshot().level, 2);

    session.handle(AgentCommand::Advance { ms: 100 });
    let response = session.handle(AgentCommand::Restart);
    assert!(matches!(
        response.payload,
        ResponsePayload::Snapshot { effect: Some("restarted"), .. }
    ));
    assert_eq!(session.snapshot().outcome, Outcome::InProgress);
    assert_eq!(session.snapshot().yellow_duration_ms, 250);
    assert_eq!(session.engine().started_at(), 100);
}

#[test]
fn test_same_seed_gives_same_schedule() {
    let mut a = AgentSession::new(GameConfig::default(), 99);
    let mut b = AgentSession::new(GameConfig::default(), 99);
    for _ in 0..50 {
        let fa = serde_json::to_value(a.handle(AgentCommand::Advance { ms: 200 })).unwrap();
        let fb = serde_json::to_value(b.handle(AgentCommand::Advance { ms: 200 })).unwrap();
        assert_eq!(fa, fb);
    }
}

#[test]
fn test_new_game_resets_progress() {
    let mut session = AgentSession::default();
    walk_to_finish(&mut session);
    session.handle(AgentCommand::Advance { ms: 500 });
    session.handle(AgentCommand::NewGame { seed: 1 });

    assert_eq!(session.now_ms(), 0);
    assert_eq!(session.snapshot().level, 1);
    assert_eq!(session.snapshot().outcome, Outcome::InProgress);
}

#[test]
fn test_raw_offsets_are_rejected() {
    let mut session = AgentSession::default();
    for line in [
        r#"{"cmd":"move","dx":5000,"dy":0}"#,
        r#"{"cmd":"move","dx":10,"dy":10}"#,
        r#"{"cmd":"move","dir":"up_right"}"#,
    ] {
        let json = to_json(&mut session, line);
        assert_eq!(json["type"], "error", "{line}");
    }
    assert_eq!(session.snapshot().position.x, 20);
    assert_eq!(session.snapshot().outcome, Outcome::InProgress);
}

#[test]
fn test_each_move_is_one_configured_step() {
    let mut session = AgentSession::default();
    let json = to_json(&mut session, r#"{"cmd":"move","dir":"down"}"#);
    assert_eq!(json["snapshot"]["position"]["y"], 248);
    let json = to_json(&mut session, r#"{"cmd":"move","dir":"left"}"#);
    assert_eq!(json["snapshot"]["position"]["x"], 20, "clamped at the left edge");

    // 20 -> 756 takes 74 steps of 10 with the last one clamped.
    assert_eq!(walk_to_finish(&mut session), 74);
    assert_eq!(session.snapshot().outcome, Outcome::Won);
}

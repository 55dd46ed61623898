//! Keyboard binding: arrow keys move one step, R restarts.
//!
//! Reads raw `KeyboardInput` events rather than `ButtonInput` so the OS key
//! repeat keeps the token moving while an arrow is held.

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;

use simulation::config::GameConfig;
use simulation::round::{Direction, MoveIntent, RestartIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Restart,
}

pub fn action_for_key(key: KeyCode) -> Option<KeyAction> {
    match key {
        KeyCode::ArrowLeft => Some(KeyAction::Move(Direction::Left)),
        KeyCode::ArrowRight => Some(KeyAction::Move(Direction::Right)),
        KeyCode::ArrowUp => Some(KeyAction::Move(Direction::Up)),
        KeyCode::ArrowDown => Some(KeyAction::Move(Direction::Down)),
        KeyCode::KeyR => Some(KeyAction::Restart),
        _ => None,
    }
}

pub fn keyboard_intents(
    mut keys: EventReader<KeyboardInput>,
    config: Res<GameConfig>,
    mut moves: EventWriter<MoveIntent>,
    mut restarts: EventWriter<RestartIntent>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        match action_for_key(key.key_code) {
            Some(KeyAction::Move(direction)) => {
                moves.send(MoveIntent::step(direction, &config));
            }
            Some(KeyAction::Restart) => {
                restarts.send(RestartIntent);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_arrow_maps_to_its_direction() {
        let pairs = [
            (KeyCode::ArrowLeft, Direction::Left),
            (KeyCode::ArrowRight, Direction::Right),
            (KeyCode::ArrowUp, Direction::Up),
            (KeyCode::ArrowDown, Direction::Down),
        ];
        for (key, dir) in pairs {
            assert_eq!(action_for_key(key), Some(KeyAction::Move(dir)), "{key:?}");
        }
    }

    #[test]
    fn test_up_is_negative_y_step() {
        let config = GameConfig::default();
        assert_eq!(
            MoveIntent::step(Direction::Up, &config),
            MoveIntent { dx: 0, dy: -10 }
        );
    }

    #[test]
    fn test_r_restarts_and_others_ignored() {
        assert_eq!(action_for_key(KeyCode::KeyR), Some(KeyAction::Restart));
        assert_eq!(action_for_key(KeyCode::Space), None);
    }
}

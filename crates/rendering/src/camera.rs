//! 2D camera and the mapping from track units to world space.
//!
//! Track units have their origin at the top-left of the window with y
//! pointing down; Bevy's 2D world is centred with y pointing up.

use bevy::prelude::*;

use simulation::config::GameConfig;

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// World-space centre of a `size` rect whose top-left corner sits at
/// `top_left` in track units.
pub fn track_to_world(config: &GameConfig, top_left: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        top_left.x + size.x / 2.0 - config.width as f32 / 2.0,
        config.height as f32 / 2.0 - (top_left.y + size.y / 2.0),
    )
}

/// World-space position of a single track point.
pub fn track_point(config: &GameConfig, x: f32, y: f32) -> Vec2 {
    track_to_world(config, Vec2::new(x, y), Vec2::ZERO)
}

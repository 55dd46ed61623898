//! The track: background grid, finish bar and its label.

use bevy::prelude::*;

use simulation::config::{GameConfig, GRID_SPACING};

use crate::camera::{track_point, track_to_world};

pub const BACKGROUND_COLOR: Color = Color::srgb(245.0 / 255.0, 246.0 / 255.0, 250.0 / 255.0);
const GRID_COLOR: Color = Color::srgb(230.0 / 255.0, 232.0 / 255.0, 238.0 / 255.0);
const FINISH_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
const FINISH_WIDTH: f32 = 6.0;

#[derive(Component)]
pub struct FinishLine;

pub fn spawn_track(mut commands: Commands, config: Res<GameConfig>) {
    let padding = config.padding as f32;
    let x = (config.width - config.padding) as f32 - FINISH_WIDTH;
    let size = Vec2::new(FINISH_WIDTH, config.height as f32 - 2.0 * padding);

    commands.spawn((
        FinishLine,
        Sprite::from_color(FINISH_COLOR, size),
        Transform::from_translation(
            track_to_world(&config, Vec2::new(x, padding), size).extend(1.0),
        ),
    ));

    commands.spawn((
        Text2d::new("Finish"),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(FINISH_COLOR),
        Transform::from_translation(track_point(&config, x - 25.0, padding + 10.0).extend(1.0)),
    ));
}

/// Grid line x (or y) offsets, one every `GRID_SPACING` inside the padding.
pub fn grid_offsets(start: i32, end: i32) -> impl Iterator<Item = i32> {
    (start..end).step_by(GRID_SPACING as usize)
}

pub fn draw_grid(mut gizmos: Gizmos, config: Res<GameConfig>) {
    let (p, w, h) = (config.padding, config.width, config.height);
    for x in grid_offsets(p, w - p) {
        gizmos.line_2d(
            track_point(&config, x as f32, p as f32),
            track_point(&config, x as f32, (h - p) as f32),
            GRID_COLOR,
        );
    }
    for y in grid_offsets(p, h - p) {
        gizmos.line_2d(
            track_point(&config, p as f32, y as f32),
            track_point(&config, (w - p) as f32, y as f32),
            GRID_COLOR,
        );
    }
}

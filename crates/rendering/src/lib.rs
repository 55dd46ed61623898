use bevy::prelude::*;

use simulation::round::RoundSet;

pub mod camera;
pub mod input;
pub mod player_render;
pub mod track;
pub mod traffic_light;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(track::BACKGROUND_COLOR))
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    track::spawn_track,
                    player_render::spawn_player,
                    traffic_light::spawn_traffic_light,
                ),
            )
            .add_systems(Update, input::keyboard_intents.before(RoundSet))
            .add_systems(
                Update,
                (
                    track::draw_grid,
                    player_render::sync_player,
                    traffic_light::sync_lamps,
                    traffic_light::sync_light_label,
                )
                    .after(RoundSet),
            );
    }
}

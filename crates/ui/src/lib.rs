use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::round::RoundSet;

pub mod game_over;
pub mod hud;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_track_theme)
            .add_systems(
                Update,
                (hud::hud_ui, game_over::game_over_ui)
                    .chain()
                    .after(RoundSet),
            );
    }
}

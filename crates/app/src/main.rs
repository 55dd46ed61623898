use bevy::prelude::*;
use bevy::window::PresentMode;

use simulation::config::GameConfig;
use simulation::round::RoundSeed;

mod agent_mode;
mod cli;

use cli::{CliOptions, SEED_ENV};

fn main() -> AppExit {
    let options = match CliOptions::parse(std::env::args().skip(1), std::env::var(SEED_ENV).ok()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("redlight: {e}");
            eprintln!("usage: redlight [--agent] [--seed <u64>]");
            return AppExit::from_code(2);
        }
    };

    if options.agent {
        return match agent_mode::run_agent_mode(options.seed) {
            Ok(()) => AppExit::Success,
            Err(e) => {
                eprintln!("redlight agent mode: {e}");
                AppExit::error()
            }
        };
    }

    let config = GameConfig::default();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Red Light, Green Light".to_string(),
            resolution: (config.width as f32, config.height as f32).into(),
            resizable: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(config)
    .insert_resource(RoundSeed(options.seed))
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run()
}

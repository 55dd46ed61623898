//! Traffic-light housing, its three lamps and the state label beneath it.

use bevy::prelude::*;

use simulation::config::GameConfig;
use simulation::light_cycle::LightState;
use simulation::round::CurrentRound;

use crate::camera::{track_point, track_to_world};

// =============================================================================
// Constants
// =============================================================================

/// Housing top-left, measured from the right edge and the top of the track.
const HOUSING_RIGHT_INSET: f32 = 120.0;
const HOUSING_TOP: f32 = 20.0;
const HOUSING_SIZE: Vec2 = Vec2::new(90.0, 200.0);
const LAMP_RADIUS: f32 = 25.0;

const HOUSING_COLOR: Color = Color::srgb(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0);
const LAMP_OFF_COLOR: Color = Color::srgb(120.0 / 255.0, 120.0 / 255.0, 120.0 / 255.0);
const LABEL_COLOR: Color = Color::BLACK;

// =============================================================================
// Components
// =============================================================================

/// One lamp of the housing; lit while the light shows this state.
#[derive(Component, Debug, Clone, Copy)]
pub struct Lamp(pub LightState);

#[derive(Component)]
pub struct LightLabel;

/// Colour of a lit lamp.
pub fn lamp_color(state: LightState) -> Color {
    match state {
        LightState::Red => Color::srgb_u8(220, 50, 47),
        LightState::Yellow => Color::srgb_u8(253, 203, 110),
        LightState::Green => Color::srgb_u8(46, 204, 64),
    }
}

/// Vertical offset of a lamp's centre from the housing top. Red on top.
fn lamp_offset(state: LightState) -> f32 {
    match state {
        LightState::Red => 40.0,
        LightState::Yellow => 100.0,
        LightState::Green => 160.0,
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn spawn_traffic_light(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let left = config.width as f32 - HOUSING_RIGHT_INSET;
    let housing_top_left = Vec2::new(left, HOUSING_TOP);

    commands.spawn((
        Sprite::from_color(HOUSING_COLOR, HOUSING_SIZE),
        Transform::from_translation(
            track_to_world(&config, housing_top_left, HOUSING_SIZE).extend(4.0),
        ),
    ));

    let lamp_mesh = meshes.add(Circle::new(LAMP_RADIUS));
    for state in LightState::ALL {
        let centre = track_point(
            &config,
            left + HOUSING_SIZE.x / 2.0,
            HOUSING_TOP + lamp_offset(state),
        );
        commands.spawn((
            Lamp(state),
            Mesh2d(lamp_mesh.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from(LAMP_OFF_COLOR))),
            Transform::from_translation(centre.extend(5.0)),
        ));
    }

    commands.spawn((
        LightLabel,
        Text2d::new(LightState::Green.label()),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(LABEL_COLOR),
        Transform::from_translation(
            track_point(
                &config,
                left + HOUSING_SIZE.x / 2.0,
                HOUSING_TOP + HOUSING_SIZE.y + 12.0,
            )
            .extend(5.0),
        ),
    ));
}

pub fn sync_lamps(
    current: Res<CurrentRound>,
    lamps: Query<(&Lamp, &MeshMaterial2d<ColorMaterial>)>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let lit = current.0.light;
    for (lamp, material) in &lamps {
        let want = if lamp.0 == lit {
            lamp_color(lamp.0)
        } else {
            LAMP_OFF_COLOR
        };
        if let Some(mat) = materials.get_mut(&material.0) {
            if mat.color != want {
                mat.color = want;
            }
        }
    }
}

pub fn sync_light_label(current: Res<CurrentRound>, mut labels: Query<&mut Text2d, With<LightLabel>>) {
    let label = current.0.light.label();
    for mut text in &mut labels {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}

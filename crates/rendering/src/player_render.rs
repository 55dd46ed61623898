use bevy::prelude::*;

use simulation::config::GameConfig;
use simulation::round::CurrentRound;

use crate::camera::track_to_world;

const PLAYER_COLOR: Color = Color::srgb(45.0 / 255.0, 114.0 / 255.0, 210.0 / 255.0);
/// Corner radius of the token, in track units.
const CORNER_RADIUS: f32 = 4.0;

#[derive(Component)]
pub struct PlayerToken;

/// Building blocks of a rounded square, relative to its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenPiece {
    Bar(Vec2),
    Corner(f32),
}

/// A cross of two bars plus a disc in each corner.
pub fn token_pieces(size: f32, radius: f32) -> Vec<(TokenPiece, Vec2)> {
    let radius = radius.clamp(0.0, size / 2.0);
    let inset = size / 2.0 - radius;
    let mut pieces = vec![
        (TokenPiece::Bar(Vec2::new(size, size - 2.0 * radius)), Vec2::ZERO),
        (TokenPiece::Bar(Vec2::new(size - 2.0 * radius, size)), Vec2::ZERO),
    ];
    for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        pieces.push((TokenPiece::Corner(radius), Vec2::new(sx * inset, sy * inset)));
    }
    pieces
}

pub fn spawn_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let size = config.player_size as f32;
    let (x, y) = config.start_position();
    let material = materials.add(ColorMaterial::from(PLAYER_COLOR));

    commands
        .spawn((
            PlayerToken,
            Transform::from_translation(
                track_to_world(&config, Vec2::new(x as f32, y as f32), Vec2::splat(size))
                    .extend(3.0),
            ),
            Visibility::default(),
        ))
        .with_children(|token| {
            for (piece, offset) in token_pieces(size, CORNER_RADIUS) {
                let mesh = match piece {
                    TokenPiece::Bar(extent) => meshes.add(Rectangle::from_size(extent)),
                    TokenPiece::Corner(radius) => meshes.add(Circle::new(radius)),
                };
                token.spawn((
                    Mesh2d(mesh),
                    MeshMaterial2d(material.clone()),
                    Transform::from_translation(offset.extend(0.0)),
                ));
            }
        });
}

pub fn sync_player(
    current: Res<CurrentRound>,
    config: Res<GameConfig>,
    mut tokens: Query<&mut Transform, With<PlayerToken>>,
) {
    let size = Vec2::splat(config.player_size as f32);
    let pos = current.0.position;
    let centre = track_to_world(&config, Vec2::new(pos.x as f32, pos.y as f32), size);
    for mut transform in &mut tokens {
        transform.translation.x = centre.x;
        transform.translation.y = centre.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pieces_fill_rounded_square() {
        let pieces = token_pieces(24.0, CORNER_RADIUS);
        assert_eq!(pieces.len(), 6);
        for (piece, offset) in pieces {
            let half = match piece {
                TokenPiece::Bar(extent) => extent / 2.0,
                TokenPiece::Corner(r) => Vec2::splat(r),
            };
            assert!(offset.x.abs() + half.x <= 12.0, "{piece:?} at {offset}");
            assert!(offset.y.abs() + half.y <= 12.0, "{piece:?} at {offset}");
        }
    }

    #[test]
    fn test_corners_sit_inside_each_corner() {
        let corners: Vec<Vec2> = token_pieces(24.0, 4.0)
            .into_iter()
            .filter(|(piece, _)| matches!(piece, TokenPiece::Corner(_)))
            .map(|(_, offset)| offset)
            .collect();
        assert_eq!(corners.len(), 4);
        assert!(corners.contains(&Vec2::new(8.0, 8.0)));
        assert!(corners.contains(&Vec2::new(-8.0, -8.0)));
    }

    #[test]
    fn test_radius_is_capped_at_half_size() {
        let pieces = token_pieces(10.0, 20.0);
        assert!(pieces.contains(&(TokenPiece::Corner(5.0), Vec2::ZERO)));
    }
}

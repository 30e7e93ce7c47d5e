//! Camera system
//!
//! The duel is a single fixed 2D playfield: one orthographic camera looking
//! at the arena, centered on the midpoint between both fighters.

use bevy::prelude::*;

use crate::combat::FightingGame;

/// Plugin for camera management
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, spawn_camera);
    }
}

/// Marker component for the playfield camera
#[derive(Component)]
pub struct MainCamera;

/// Playfield coordinates grow downward from the top-left corner like the HUD,
/// so the camera sits at the fighters' midpoint with y flipped.
fn spawn_camera(mut commands: Commands, game: Option<Res<FightingGame>>) {
    let center = game
        .map(|game| {
            let (player, opponent) = (game.player(), game.opponent());
            Vec2::new((player.x + opponent.x) / 2.0, (player.y + opponent.y) / 2.0)
        })
        .unwrap_or_default();

    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(center.x, -center.y, 0.0),
    ));
    debug!("Camera spawned at ({}, {})", center.x, center.y);
}

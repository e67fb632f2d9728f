//! Camera systems for the stacking game.
//!
//! The viewport eases toward the pointer when it strays from the center,
//! clamped to the arena view extents, and the zoom tweens toward a wheel
//! driven target.

pub mod follow;

pub use follow::*;

use bevy::prelude::*;

use crate::bevy::{GameCamera, MainCamera};

/// System to apply the zoom tween and write the camera state into the
/// Transform and projection.
///
/// Runs after the follow and zoom systems each frame.
pub fn apply_camera_smoothing(
    mut cameras: Query<(&mut GameCamera, &mut Transform, &mut Projection), With<MainCamera>>,
) {
    for (mut game_camera, mut transform, mut projection) in cameras.iter_mut() {
        // Smoothly tween the zoom factor
        if (game_camera.target_zoom - game_camera.zoom).abs() > 0.001 {
            let step = (game_camera.target_zoom - game_camera.zoom) * game_camera.zoom_smoothing;
            game_camera.zoom += step;
        }

        transform.translation.x = game_camera.center.x;
        transform.translation.y = game_camera.center.y;

        if let Projection::Orthographic(ortho) = projection.as_mut() {
            ortho.scale = 1.0 / game_camera.zoom;
        }
    }
}

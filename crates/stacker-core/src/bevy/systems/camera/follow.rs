//! Pointer-follow camera systems.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{GameCamera, MainCamera, PointerState};

/// Wheel zoom bounds, as factors of the native 1:1 view.
const MIN_ZOOM: f32 = 0.5;
const MAX_ZOOM: f32 = 2.0;

/// System to ease the camera toward the pointer.
///
/// The pointer is ignored inside a dead zone around the viewport center;
/// outside it the camera translates along the pointer direction with
/// `speed = min(max_speed, (dist - dead_zone)² · gain)` screen pixels per
/// frame, and the viewport rectangle is kept inside the view extents.
pub fn update_pointer_follow(
    pointer: Res<PointerState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut GameCamera, With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = pointer.screen else {
        return;
    };

    let viewport_center = Vec2::new(window.width() / 2.0, window.height() / 2.0);

    for mut game_camera in cameras.iter_mut() {
        let delta = cursor - viewport_center;
        let dist = delta.length();

        let speed = game_camera.follow_speed(dist);
        if speed > 0.0 {
            let direction = delta / dist;
            // Screen y grows downward, world y grows upward
            let world_direction = Vec2::new(direction.x, -direction.y);
            let scale = 1.0 / game_camera.zoom;
            game_camera.center += world_direction * speed * scale;
        }

        // Prevent the view moving outside the extents
        let half_view = Vec2::new(window.width(), window.height()) * 0.5 / game_camera.zoom;
        let center = game_camera.center;
        game_camera.center = Vec2::new(
            clamp_axis(
                center.x,
                game_camera.view_min.x + half_view.x,
                game_camera.view_max.x - half_view.x,
            ),
            clamp_axis(
                center.y,
                game_camera.view_min.y + half_view.y,
                game_camera.view_max.y - half_view.y,
            ),
        );
    }
}

/// System to drive the zoom target from the scroll wheel.
pub fn handle_zoom_input(
    mut scroll_events: MessageReader<MouseWheel>,
    mut cameras: Query<&mut GameCamera, With<MainCamera>>,
) {
    for event in scroll_events.read() {
        let scroll_amount = event.y;
        if scroll_amount.abs() < 0.001 {
            continue;
        }

        let zoom_factor = 1.1_f32;
        let multiplier = if scroll_amount > 0.0 {
            zoom_factor
        } else {
            1.0 / zoom_factor
        };

        for mut game_camera in cameras.iter_mut() {
            game_camera.target_zoom =
                (game_camera.target_zoom * multiplier).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }
}

/// Clamps `value` to `[lo, hi]`; when the view is larger than the extents
/// on an axis there is nothing to pan, so the camera sits at the middle.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_axis_inside_range() {
        assert_eq!(clamp_axis(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_axis(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_axis(42.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_axis_degenerate_range_centers() {
        // Viewport wider than the extents: no panning, camera centered
        assert_eq!(clamp_axis(7.0, 10.0, -10.0), 0.0);
    }
}

//! ECS Components for the stacking game.

use bevy::prelude::*;

use crate::shapes::{Color as ShapeColor, ShapeSpec};

/// Marker component for falling shape entities (spawned shapes and the
/// starter boxes alike).
#[derive(Component, Debug, Clone)]
pub struct FallingShape {
    pub spec: ShapeSpec,
}

impl FallingShape {
    pub fn new(spec: ShapeSpec) -> Self {
        Self { spec }
    }
}

/// Visual representation of a falling shape.
#[derive(Component, Debug, Clone)]
pub struct ShapeVisual {
    pub color: ShapeColor,
}

/// A sensor strip that awards points while a shape overlaps it.
#[derive(Component, Debug, Clone, Copy)]
pub struct SensorBand {
    /// Points awarded on overlap start, withdrawn on overlap end.
    pub points: i64,
    /// Index of this band in the arena config.
    pub band_index: usize,
}

/// Roles of static arena objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaRole {
    Ground,
    Band,
}

/// Marker component for static arena objects.
#[derive(Component, Debug, Clone)]
pub struct ArenaObjectMarker {
    pub role: ArenaRole,
}

/// Camera controller for the game view.
///
/// The camera eases toward the pointer, clamped so the viewport rectangle
/// stays inside the arena view extents, and tweens its zoom toward a wheel
/// driven target.
#[derive(Component, Debug, Clone)]
pub struct GameCamera {
    /// Current zoom factor (1.0 = one world pixel per screen pixel).
    pub zoom: f32,
    /// Target zoom for the smoothing tween.
    pub target_zoom: f32,
    /// Per-frame tween factor toward the target zoom.
    pub zoom_smoothing: f32,
    /// Current camera center in world coordinates.
    pub center: Vec2,
    /// View extents, min corner (world).
    pub view_min: Vec2,
    /// View extents, max corner (world).
    pub view_max: Vec2,
    /// The camera ignores the pointer within this many screen pixels of
    /// the viewport center.
    pub dead_zone: f32,
    /// Cap on the per-frame follow translation (screen pixels).
    pub max_speed: f32,
    /// Quadratic gain of the follow speed curve.
    pub follow_gain: f32,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl GameCamera {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            target_zoom: 1.0,
            zoom_smoothing: 0.2,
            center: Vec2::new(600.0, 400.0),
            view_min: Vec2::new(0.0, -100.0),
            view_max: Vec2::new(1200.0, 1600.0),
            dead_zone: 50.0,
            max_speed: 10.0,
            follow_gain: 2.0e-4,
        }
    }

    /// Update the view extents (called when an arena is loaded).
    pub fn set_view_extents(&mut self, min: Vec2, max: Vec2) {
        self.view_min = min;
        self.view_max = max;
    }

    /// Per-frame follow translation for a pointer `dist` screen pixels from
    /// the viewport center.
    pub fn follow_speed(&self, dist: f32) -> f32 {
        if dist <= self.dead_zone {
            return 0.0;
        }
        ((dist - self.dead_zone).powi(2) * self.follow_gain).min(self.max_speed)
    }
}

/// Marker for the main game camera.
#[derive(Component, Debug, Clone, Default)]
pub struct MainCamera;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_speed_is_zero_inside_dead_zone() {
        let camera = GameCamera::new();
        assert_eq!(camera.follow_speed(0.0), 0.0);
        assert_eq!(camera.follow_speed(50.0), 0.0);
    }

    #[test]
    fn test_follow_speed_grows_quadratically_then_caps() {
        let camera = GameCamera::new();

        // 100 px out: (100-50)^2 * 2e-4 = 0.5 px/frame
        assert!((camera.follow_speed(100.0) - 0.5).abs() < 1.0e-4);

        // Far out the curve saturates at max_speed
        assert_eq!(camera.follow_speed(5000.0), camera.max_speed);
    }
}

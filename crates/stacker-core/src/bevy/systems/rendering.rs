//! Rendering systems for the stacking game.
//!
//! Uses Bevy's Gizmos API for debug-style rendering of shapes.

use bevy::prelude::*;

use crate::bevy::rapier_plugin::PhysicsBody;
use crate::bevy::{
    ArenaRes, DragState, FallingShape, PointerState, SensorBand, ShapeVisual,
};
use crate::shapes::{Color as ShapeColor, ShapeKind};

/// Gizmo configuration resource for arena and shape rendering.
#[derive(Resource)]
pub struct ArenaGizmoConfig {
    /// Color for the ground slab.
    pub ground_color: Color,
    /// Color for score bands.
    pub band_color: Color,
    /// Color for the drag indicator line.
    pub drag_color: Color,
}

impl Default for ArenaGizmoConfig {
    fn default() -> Self {
        Self {
            ground_color: Color::srgb(0.5, 0.5, 0.55),
            band_color: Color::srgba(0.3, 0.8, 0.9, 0.6),
            drag_color: Color::srgba(0.9, 0.9, 0.4, 0.8),
        }
    }
}

fn to_bevy_color(color: ShapeColor) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, color.a)
}

/// System to render the ground and the score bands.
pub fn render_arena(
    mut gizmos: Gizmos,
    config: Res<ArenaGizmoConfig>,
    arena: Option<Res<ArenaRes>>,
    bands: Query<(&SensorBand, &Transform)>,
) {
    let Some(arena) = arena else {
        return;
    };

    let [gx, gy] = arena.0.ground_center();
    let [ghx, ghy] = arena.0.ground_half_extents();
    gizmos.rect_2d(
        Isometry2d::from_translation(Vec2::new(gx, gy)),
        Vec2::new(ghx * 2.0, ghy * 2.0),
        config.ground_color,
    );

    let [bhx, _bhy] = arena.0.band_half_extents();
    for (_band, transform) in bands.iter() {
        let pos = transform.translation.truncate();
        gizmos.line_2d(
            Vec2::new(pos.x - bhx, pos.y),
            Vec2::new(pos.x + bhx, pos.y),
            config.band_color,
        );
    }
}

/// System to render the falling shapes.
pub fn render_shapes(mut gizmos: Gizmos, shapes: Query<(&FallingShape, &ShapeVisual, &Transform)>) {
    for (shape, visual, transform) in shapes.iter() {
        let pos = transform.translation.truncate();
        let angle = transform.rotation.to_euler(EulerRot::ZYX).0;
        let color = to_bevy_color(visual.color);

        match shape.spec.kind {
            ShapeKind::TallBox | ShapeKind::WideBox => {
                let [hx, hy] = shape.spec.half_extents;
                gizmos.rect_2d(
                    Isometry2d::new(pos, Rot2::radians(angle)),
                    Vec2::new(hx * 2.0, hy * 2.0),
                    color,
                );
            }
            ShapeKind::Diamond => {
                let r = shape.spec.half_extents[0];
                let (sin, cos) = angle.sin_cos();
                let rotate = |p: Vec2| Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
                let corners = [
                    pos + rotate(Vec2::new(r, 0.0)),
                    pos + rotate(Vec2::new(0.0, r)),
                    pos + rotate(Vec2::new(-r, 0.0)),
                    pos + rotate(Vec2::new(0.0, -r)),
                ];
                for i in 0..corners.len() {
                    gizmos.line_2d(corners[i], corners[(i + 1) % corners.len()], color);
                }
            }
        }
    }
}

/// System to render the drag indicator: an elastic line from the grabbed
/// shape to the cursor.
pub fn render_drag_indicator(
    mut gizmos: Gizmos,
    config: Res<ArenaGizmoConfig>,
    drag: Res<DragState>,
    pointer: Res<PointerState>,
    shapes: Query<&Transform, With<PhysicsBody>>,
) {
    let Some(grab) = drag.grabbed else {
        return;
    };
    let (Some(cursor), Ok(transform)) = (pointer.world, shapes.get(grab.entity)) else {
        return;
    };

    gizmos.line_2d(transform.translation.truncate(), cursor, config.drag_color);
}

//! Pointer tracking and body dragging.
//!
//! A left press grabs the dynamic shape under the cursor; while held, a
//! damped spring pulls the grab point toward the cursor through the
//! external-force accumulator, and release lets go.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::rapier_plugin::{PhysicsBody, PhysicsExternalForce, PhysicsWorldRes};
use crate::bevy::{DragState, FallingShape, Grab, MainCamera, PointerState};
use crate::physics::PHYSICS_DT;
use crate::shapes::{ShapeKind, ShapeSpec};

/// System to track the pointer in screen and world coordinates.
pub fn track_pointer(
    mut pointer: ResMut<PointerState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        pointer.screen = None;
        pointer.world = None;
        return;
    };

    pointer.screen = Some(cursor_position);

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    if let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_position) {
        pointer.world = Some(world_pos);
    }
}

/// System to grab and release shapes with the left mouse button.
pub fn handle_drag_input(
    mut drag: ResMut<DragState>,
    pointer: Res<PointerState>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    shapes: Query<(Entity, &FallingShape, &Transform)>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        if let Some(cursor) = pointer.world {
            drag.grabbed = shapes.iter().find_map(|(entity, shape, transform)| {
                let pos = transform.translation.truncate();
                if cursor.distance_squared(pos) > shape.spec.bounding_radius().powi(2) {
                    return None;
                }
                let local = world_to_local(cursor - pos, transform.rotation);
                if !contains_local(&shape.spec, local) {
                    return None;
                }
                Some(Grab {
                    entity,
                    local_anchor: local,
                })
            });

            if let Some(grab) = drag.grabbed {
                tracing::debug!("Grabbed {:?} at local anchor {}", grab.entity, grab.local_anchor);
            }
        }
    }

    if mouse_button.just_released(MouseButton::Left) {
        drag.grabbed = None;
    }
}

/// System to pull the grabbed shape toward the cursor.
///
/// Runs in the pre-physics chain so the force participates in the same
/// step. The spring is mass-scaled: heavy shapes follow as readily as
/// light ones.
pub fn apply_drag_force(
    mut drag: ResMut<DragState>,
    pointer: Res<PointerState>,
    physics: Res<PhysicsWorldRes>,
    mut shapes: Query<(&PhysicsBody, &Transform, &mut PhysicsExternalForce)>,
) {
    let Some(grab) = drag.grabbed else {
        return;
    };
    let Some(cursor) = pointer.world else {
        return;
    };

    let Ok((body_comp, transform, mut ext_force)) = shapes.get_mut(grab.entity) else {
        // Shape despawned mid-drag
        drag.grabbed = None;
        return;
    };
    let Some(body) = physics.world.rigid_body_set.get(body_comp.0) else {
        drag.grabbed = None;
        return;
    };

    let mass = body.mass();
    let linvel = Vec2::new(body.linvel().x, body.linvel().y);
    let anchor_world =
        transform.translation.truncate() + local_to_world(grab.local_anchor, transform.rotation);

    let accel =
        (cursor - anchor_world) * (drag.stiffness / PHYSICS_DT) - linvel * drag.damping;
    ext_force.force += accel * mass;
}

fn rotation_angle(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::ZYX).0
}

fn local_to_world(local: Vec2, rotation: Quat) -> Vec2 {
    let (sin, cos) = rotation_angle(rotation).sin_cos();
    Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
}

fn world_to_local(offset: Vec2, rotation: Quat) -> Vec2 {
    let (sin, cos) = (-rotation_angle(rotation)).sin_cos();
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

fn contains_local(spec: &ShapeSpec, p: Vec2) -> bool {
    match spec.kind {
        ShapeKind::TallBox | ShapeKind::WideBox => {
            p.x.abs() <= spec.half_extents[0] && p.y.abs() <= spec.half_extents[1]
        }
        ShapeKind::Diamond => p.x.abs() + p.y.abs() <= spec.half_extents[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{ArenaConfig, ScoreBand};
    use crate::bevy::test_utils::TestApp;

    #[test]
    fn test_contains_local_box_and_diamond() {
        let tall = ShapeSpec {
            kind: ShapeKind::TallBox,
            half_extents: [15.0, 40.0],
        };
        assert!(contains_local(&tall, Vec2::new(10.0, -35.0)));
        assert!(!contains_local(&tall, Vec2::new(16.0, 0.0)));

        let diamond = ShapeSpec {
            kind: ShapeKind::Diamond,
            half_extents: [60.0, 60.0],
        };
        assert!(contains_local(&diamond, Vec2::new(30.0, 25.0)));
        // Inside the bounding box but outside the rotated square
        assert!(!contains_local(&diamond, Vec2::new(45.0, 45.0)));
    }

    #[test]
    fn test_local_world_roundtrip() {
        let rotation = Quat::from_rotation_z(0.7);
        let local = Vec2::new(12.0, -5.0);
        let roundtrip = world_to_local(local_to_world(local, rotation), rotation);
        assert!((roundtrip - local).length() < 1.0e-4);
    }

    #[test]
    fn test_drag_spring_pulls_shape_toward_cursor() {
        let mut config = ArenaConfig::default_classic();
        config.starter_boxes.clear();
        config.bands = vec![ScoreBand { y: 10_000.0, points: 1 }];
        config.spawn_point = [600.0, 200.0];

        let mut app = TestApp::new();
        app.load_arena(config);
        app.spawn_shape();
        app.step_physics(240);

        let entity = app.single_shape_entity();
        let start_x = app.shape_position(entity).x;

        // Grab the shape at its center and hold the cursor up and to the
        // right; the upward pull lifts it clear of ground friction.
        app.world_mut().resource_mut::<PointerState>().world = Some(Vec2::new(900.0, 500.0));
        app.world_mut().resource_mut::<DragState>().grabbed = Some(Grab {
            entity,
            local_anchor: Vec2::ZERO,
        });
        app.step_physics(120);

        let end_x = app.shape_position(entity).x;
        assert!(
            end_x > start_x + 50.0,
            "drag moved the shape only {start_x} -> {end_x}"
        );
    }

    #[test]
    fn test_drag_releases_despawned_shape() {
        let mut config = ArenaConfig::default_classic();
        config.starter_boxes.clear();
        config.spawn_point = [600.0, 200.0];

        let mut app = TestApp::new();
        app.load_arena(config);
        app.spawn_shape();
        app.update();

        let entity = app.single_shape_entity();
        app.world_mut().resource_mut::<PointerState>().world = Some(Vec2::new(600.0, 300.0));
        app.world_mut().resource_mut::<DragState>().grabbed = Some(Grab {
            entity,
            local_anchor: Vec2::ZERO,
        });

        app.world_mut().despawn(entity);
        app.step_physics(2);

        assert!(app.world().resource::<DragState>().grabbed.is_none());
    }
}

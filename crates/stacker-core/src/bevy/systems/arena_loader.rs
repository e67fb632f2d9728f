//! Arena loading system.
//!
//! Rebuilds the ECS and rapier state from an [`ArenaConfig`]: the ground
//! slab, the sensor bands, and the starter boxes.

use bevy::prelude::*;
use rapier2d::prelude::*;

use crate::arena::ArenaConfig;
use crate::bevy::rapier_plugin::{PhysicsCollider, PhysicsWorldRes, Sensor};
use crate::bevy::systems::shapes::{pick_color, spawn_shape_entity};
use crate::bevy::{
    ArenaLoadedEvent, ArenaObjectMarker, ArenaRes, ArenaRole, DeterministicRng, FallingShape,
    GameCamera, LoadArenaEvent, ScoreChangedEvent, SensorBand, StackGameState,
};
use crate::shapes::{ShapeKind, ShapeSpec};

/// System to handle arena loading requests.
///
/// Loading replaces the whole world: existing arena objects and shapes are
/// despawned, the physics world is reset, and the score returns to zero.
pub fn handle_load_arena(
    mut commands: Commands,
    mut events: MessageReader<LoadArenaEvent>,
    mut arena_loaded: MessageWriter<ArenaLoadedEvent>,
    mut score_events: MessageWriter<ScoreChangedEvent>,
    existing_arena: Query<Entity, With<ArenaObjectMarker>>,
    existing_shapes: Query<Entity, With<FallingShape>>,
    mut cameras: Query<&mut GameCamera>,
    mut physics: ResMut<PhysicsWorldRes>,
    mut rng: ResMut<DeterministicRng>,
    mut game_state: ResMut<StackGameState>,
) {
    for event in events.read() {
        for entity in existing_arena.iter().chain(existing_shapes.iter()) {
            commands.entity(entity).despawn();
        }

        // Reset physics world for the new arena
        physics.world.reset();

        let old_score = game_state.score.score();
        game_state.score.reset();
        game_state.frame = 0;
        game_state.shapes_spawned = 0;
        if old_score != 0 {
            score_events.write(ScoreChangedEvent {
                delta: -old_score,
                total: 0,
            });
        }

        let config = &event.config;

        spawn_ground(&mut commands, &mut physics, config);

        for (band_index, band) in config.bands.iter().enumerate() {
            spawn_band(&mut commands, &mut physics, config, band_index, band.points, band.y);
        }

        for starter in &config.starter_boxes {
            let spec = ShapeSpec {
                kind: ShapeKind::WideBox,
                half_extents: [starter.size / 2.0, starter.size / 2.0],
            };
            let color = pick_color(&mut rng.rng);
            spawn_shape_entity(&mut commands, &mut physics, spec, color, starter.center);
            game_state.shapes_spawned += 1;
        }

        for mut camera in cameras.iter_mut() {
            camera.set_view_extents(Vec2::from(config.view_min), Vec2::from(config.view_max));
            camera.center = Vec2::new(config.width * 0.5, config.height * 0.5);
        }

        tracing::info!(
            "[arena] loaded '{}': {} bands, {} starter boxes",
            config.meta.name,
            config.bands.len(),
            config.starter_boxes.len()
        );

        commands.insert_resource(ArenaRes::new(config.clone()));

        arena_loaded.write(ArenaLoadedEvent {
            arena_name: config.meta.name.clone(),
        });
    }
}

fn spawn_ground(
    commands: &mut Commands,
    physics: &mut ResMut<PhysicsWorldRes>,
    config: &ArenaConfig,
) -> Entity {
    let [x, y] = config.ground_center();
    let [hx, hy] = config.ground_half_extents();

    let entity = commands
        .spawn((
            ArenaObjectMarker {
                role: ArenaRole::Ground,
            },
            Transform::from_xyz(x, y, 0.0),
        ))
        .id();

    let collider = ColliderBuilder::cuboid(hx, hy)
        .translation(Vector::new(x, y))
        .friction(1.0)
        .user_data(u128::from(entity.to_bits()))
        .build();
    let handle = physics.world.add_static_collider(collider);
    commands.entity(entity).insert(PhysicsCollider(handle));

    entity
}

fn spawn_band(
    commands: &mut Commands,
    physics: &mut ResMut<PhysicsWorldRes>,
    config: &ArenaConfig,
    band_index: usize,
    points: i64,
    y: f32,
) -> Entity {
    let x = config.center_x();
    let [hx, hy] = config.band_half_extents();

    let entity = commands
        .spawn((
            ArenaObjectMarker {
                role: ArenaRole::Band,
            },
            SensorBand { points, band_index },
            Sensor,
            Transform::from_xyz(x, y, 0.0),
        ))
        .id();

    let collider = ColliderBuilder::cuboid(hx, hy)
        .translation(Vector::new(x, y))
        .sensor(true)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .user_data(u128::from(entity.to_bits()))
        .build();
    let handle = physics.world.add_static_collider(collider);
    commands.entity(entity).insert(PhysicsCollider(handle));

    entity
}

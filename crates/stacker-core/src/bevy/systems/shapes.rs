//! Shape spawning and restart systems.

use bevy::prelude::*;
use rand::prelude::*;
use tracing::warn;

use crate::bevy::rapier_plugin::{
    PhysicsBody, PhysicsCollider, PhysicsExternalForce, PhysicsWorldRes,
};
use crate::bevy::{
    ArenaRes, DeterministicRng, FallingShape, LoadArenaEvent, ResetGameEvent, ShapeVisual,
    SpawnShapeEvent, StackGameState,
};
use crate::shapes::{Color, ShapeSpec};

/// System to handle shape spawning requests.
///
/// Draws a random shape from the catalogue and drops it at the arena's
/// spawn point.
pub fn handle_spawn_shape(
    mut commands: Commands,
    mut events: MessageReader<SpawnShapeEvent>,
    arena: Option<Res<ArenaRes>>,
    mut physics: ResMut<PhysicsWorldRes>,
    mut rng: ResMut<DeterministicRng>,
    mut game_state: ResMut<StackGameState>,
) {
    for _ in events.read() {
        let Some(arena) = &arena else {
            warn!("No arena loaded, cannot spawn a shape");
            continue;
        };

        let spec = ShapeSpec::random(&mut rng.rng);
        let color = pick_color(&mut rng.rng);
        let entity = spawn_shape_entity(
            &mut commands,
            &mut physics,
            spec,
            color,
            arena.0.spawn_point,
        );
        game_state.shapes_spawned += 1;

        tracing::info!(
            "Spawned {:?} ({:.0}x{:.0}) as {:?}",
            spec.kind,
            spec.half_extents[0] * 2.0,
            spec.half_extents[1] * 2.0,
            entity
        );
    }
}

/// System to handle restart requests.
///
/// Restarting replays the arena load: the RNG rewinds to its seed and the
/// loader rebuilds the world and zeroes the score on the next frame.
pub fn handle_reset(
    mut events: MessageReader<ResetGameEvent>,
    arena: Option<Res<ArenaRes>>,
    mut rng: ResMut<DeterministicRng>,
    mut load_events: MessageWriter<LoadArenaEvent>,
) {
    for _ in events.read() {
        let Some(arena) = &arena else {
            warn!("No arena loaded, nothing to reset");
            continue;
        };

        tracing::info!("Restarting arena '{}'", arena.0.meta.name);
        rng.reset();
        load_events.write(LoadArenaEvent {
            config: arena.0.clone(),
        });
    }
}

/// Spawns a shape entity with its rapier body and collider at `position`.
pub(crate) fn spawn_shape_entity(
    commands: &mut Commands,
    physics: &mut ResMut<PhysicsWorldRes>,
    spec: ShapeSpec,
    color: Color,
    position: [f32; 2],
) -> Entity {
    let entity = commands
        .spawn((
            FallingShape::new(spec),
            ShapeVisual { color },
            Transform::from_xyz(position[0], position[1], 0.0),
            PhysicsExternalForce::default(),
        ))
        .id();

    let body = spec
        .body(position)
        .user_data(u128::from(entity.to_bits()))
        .build();
    let body_handle = physics.world.add_rigid_body(body);
    let collider_handle = physics.world.add_collider(spec.collider().build(), body_handle);

    commands
        .entity(entity)
        .insert((PhysicsBody(body_handle), PhysicsCollider(collider_handle)));

    entity
}

/// Picks a shape color from the palette.
pub(crate) fn pick_color(rng: &mut impl Rng) -> Color {
    let palette = Color::palette();
    palette[rng.random_range(0..palette.len())]
}

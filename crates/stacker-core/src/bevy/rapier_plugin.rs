//! Custom Rapier2D physics plugin for Bevy.
//!
//! Direct Rapier2D integration via `PhysicsWorld` instead of `bevy_rapier2d`.
//! This keeps the whole physics state in one place, with entity-handle
//! mapping through collider `user_data`.

use bevy::prelude::*;
use rapier2d::prelude::*;

use crate::physics::PhysicsWorld;

// ============================================================================
// Resources
// ============================================================================

/// Bevy Resource wrapping `PhysicsWorld` for direct Rapier access.
#[derive(Resource)]
pub struct PhysicsWorldRes {
    pub world: PhysicsWorld,
    /// Collision events collected during the last physics step.
    collision_events: Vec<PhysicsCollisionEvent>,
}

impl PhysicsWorldRes {
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::new(),
            collision_events: Vec::new(),
        }
    }

    /// Returns the collision events from the last step and clears the buffer.
    pub fn drain_collision_events(&mut self) -> Vec<PhysicsCollisionEvent> {
        std::mem::take(&mut self.collision_events)
    }
}

impl Default for PhysicsWorldRes {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Components
// ============================================================================

/// Entity ↔ RigidBody mapping component.
#[derive(Component, Debug, Clone, Copy)]
pub struct PhysicsBody(pub RigidBodyHandle);

/// Entity ↔ Collider mapping (for sensor/static colliders without a body).
#[derive(Component, Debug, Clone, Copy)]
pub struct PhysicsCollider(pub ColliderHandle);

/// External force accumulator component. Cleared at the start of every
/// fixed step and applied to the rapier body right before stepping.
#[derive(Component, Default, Debug, Clone)]
pub struct PhysicsExternalForce {
    pub force: Vec2,
    pub torque: f32,
}

/// Marker component for sensor colliders.
#[derive(Component, Default, Debug, Clone)]
pub struct Sensor;

// ============================================================================
// System Sets
// ============================================================================

/// Physics scheduling inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    /// Sync Bevy state → Rapier.
    SyncToRapier,
    /// Run physics simulation step.
    Step,
    /// Sync Rapier state → Bevy.
    SyncFromRapier,
}

// ============================================================================
// Collision Events
// ============================================================================

/// Collision event from the physics simulation, mapped to entities.
#[derive(Debug, Clone)]
pub enum PhysicsCollisionEvent {
    Started(Entity, Entity),
    Stopped(Entity, Entity),
}

/// Bevy Message for collision events (for system communication).
#[derive(Message, Debug, Clone)]
pub enum CollisionEvent {
    Started(Entity, Entity),
    Stopped(Entity, Entity),
}

// ============================================================================
// Physics Systems
// ============================================================================

/// Syncs Bevy component state into Rapier bodies.
///
/// Resets Rapier body forces then applies this frame's external forces.
/// Without the reset, `add_force()` accumulates across frames.
pub fn sync_to_rapier(
    mut physics: ResMut<PhysicsWorldRes>,
    force_bodies: Query<(&PhysicsBody, &PhysicsExternalForce)>,
) {
    for (body_comp, ext_force) in force_bodies.iter() {
        if let Some(body) = physics.world.rigid_body_set.get_mut(body_comp.0) {
            body.reset_forces(false);
            body.reset_torques(false);

            if ext_force.force.length_squared() < f32::EPSILON
                && ext_force.torque.abs() < f32::EPSILON
            {
                continue;
            }
            body.add_force(Vector::new(ext_force.force.x, ext_force.force.y), true);
            body.add_torque(ext_force.torque, true);
        }
    }
}

/// Runs one physics simulation step and collects collision events.
pub fn run_physics_step(mut physics: ResMut<PhysicsWorldRes>) {
    let raw = physics.world.step_with_events();

    // Convert raw rapier events → PhysicsCollisionEvent with entity mapping
    let mut bevy_events = Vec::with_capacity(raw.len());

    for event in raw {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                let e1 = collider_to_entity(&physics.world, h1);
                let e2 = collider_to_entity(&physics.world, h2);
                if let (Some(e1), Some(e2)) = (e1, e2) {
                    bevy_events.push(PhysicsCollisionEvent::Started(e1, e2));
                }
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                let e1 = collider_to_entity(&physics.world, h1);
                let e2 = collider_to_entity(&physics.world, h2);
                if let (Some(e1), Some(e2)) = (e1, e2) {
                    bevy_events.push(PhysicsCollisionEvent::Stopped(e1, e2));
                }
            }
        }
    }

    physics.collision_events = bevy_events;
}

/// Syncs Rapier body state back to Bevy Transforms.
pub fn sync_from_rapier(
    physics: Res<PhysicsWorldRes>,
    mut bodies: Query<(&PhysicsBody, &mut Transform)>,
) {
    for (body_comp, mut transform) in bodies.iter_mut() {
        if let Some(body) = physics.world.rigid_body_set.get(body_comp.0) {
            if body.is_dynamic() {
                let pos = body.translation();
                let rot = body.rotation().angle();
                transform.translation.x = pos.x;
                transform.translation.y = pos.y;
                transform.rotation = Quat::from_rotation_z(rot);
            }
        }
    }
}

/// Publishes collision events as Bevy Messages.
pub fn publish_collision_events(
    mut physics: ResMut<PhysicsWorldRes>,
    mut writer: MessageWriter<CollisionEvent>,
) {
    for event in physics.drain_collision_events() {
        match event {
            PhysicsCollisionEvent::Started(e1, e2) => {
                writer.write(CollisionEvent::Started(e1, e2));
            }
            PhysicsCollisionEvent::Stopped(e1, e2) => {
                writer.write(CollisionEvent::Stopped(e1, e2));
            }
        }
    }
}

// ============================================================================
// Helper: ColliderHandle → Entity via user_data
// ============================================================================

/// Maps a Rapier ColliderHandle to a Bevy Entity via user_data stored in the
/// collider's parent body or the collider itself.
fn collider_to_entity(world: &PhysicsWorld, handle: ColliderHandle) -> Option<Entity> {
    let collider = world.collider_set.get(handle)?;
    let user_data = if let Some(parent) = collider.parent() {
        // Collider attached to a body: use body's user_data
        world.rigid_body_set.get(parent)?.user_data
    } else {
        // Static collider without body: use collider's own user_data
        collider.user_data
    };

    if user_data == 0 {
        return None;
    }

    // user_data stores the Entity bits
    Some(Entity::from_bits(user_data as u64))
}

// ============================================================================
// Plugin
// ============================================================================

/// Custom physics plugin wiring `PhysicsWorld` into `FixedUpdate`.
pub struct StackPhysicsPlugin;

impl Plugin for StackPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PhysicsWorldRes::new());

        // Register collision event message
        app.add_message::<CollisionEvent>();

        // Configure system set ordering
        app.configure_sets(
            FixedUpdate,
            (
                PhysicsSet::SyncToRapier,
                PhysicsSet::Step,
                PhysicsSet::SyncFromRapier,
            )
                .chain(),
        );

        // Register physics systems
        app.add_systems(FixedUpdate, sync_to_rapier.in_set(PhysicsSet::SyncToRapier));
        app.add_systems(FixedUpdate, run_physics_step.in_set(PhysicsSet::Step));
        app.add_systems(
            FixedUpdate,
            (sync_from_rapier, publish_collision_events)
                .chain()
                .in_set(PhysicsSet::SyncFromRapier),
        );
    }
}

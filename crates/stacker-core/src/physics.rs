//! Physics simulation using `Rapier2D` with deterministic behavior.

use rapier2d::prelude::*;
use std::fmt;

/// Fixed timestep for physics simulation (60Hz).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Default gravity vector (downward, in pixels/s²).
pub fn default_gravity() -> Vector {
    Vector::new(0.0, -981.0)
}

/// Physics world containing all `Rapier2D` components for deterministic simulation.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub gravity: Vector,
    pub frame: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("frame", &self.frame)
            .field("rigid_body_count", &self.rigid_body_set.len())
            .field("collider_count", &self.collider_set.len())
            .field("gravity", &self.gravity)
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings.
    pub fn new() -> Self {
        Self::with_gravity(default_gravity())
    }

    /// Creates a new physics world with custom gravity.
    pub fn with_gravity(gravity: Vector) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: PHYSICS_DT,
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity,
            frame: 0,
        }
    }

    /// Advances the physics simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.frame += 1;
    }

    /// Advances the physics simulation by multiple steps.
    pub fn step_n(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Advances one timestep and returns the collision events it produced.
    ///
    /// Event collection goes through a channel collector so the pipeline
    /// only ever sees a `&dyn EventHandler`; contact force events are
    /// discarded.
    pub fn step_with_events(&mut self) -> Vec<CollisionEvent> {
        let (collision_send, collision_recv) = std::sync::mpsc::channel();
        let (contact_force_send, _contact_force_recv) = std::sync::mpsc::channel();
        let events = ChannelEventCollector::new(collision_send, contact_force_send);

        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &events,
        );
        self.frame += 1;

        collision_recv.try_iter().collect()
    }

    /// Adds a rigid body to the world and returns its handle.
    pub fn add_rigid_body(&mut self, rigid_body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(rigid_body)
    }

    /// Adds a collider attached to a rigid body.
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Adds a collider without a parent (static collider).
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Removes a rigid body and its attached colliders.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Gets an immutable reference to a rigid body.
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Gets a mutable reference to a rigid body.
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Returns the current simulation frame number.
    pub fn current_frame(&self) -> u64 {
        self.frame
    }

    /// Resets the physics world to its initial state.
    pub fn reset(&mut self) {
        *self = Self::with_gravity(self.gravity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.frame, 0);
        assert_eq!(world.integration_parameters.dt, PHYSICS_DT);
    }

    #[test]
    fn test_deterministic_simulation() {
        // Create two identical worlds
        let mut world1 = PhysicsWorld::new();
        let mut world2 = PhysicsWorld::new();

        // Add identical rigid bodies
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(100.0, 400.0))
            .build();

        let collider = ColliderBuilder::cuboid(40.0, 40.0)
            .restitution(0.3)
            .build();

        let handle1 = world1.add_rigid_body(body.clone());
        world1.add_collider(collider.clone(), handle1);

        let handle2 = world2.add_rigid_body(body);
        world2.add_collider(collider, handle2);

        // Run simulation for same number of steps
        for _ in 0..100 {
            world1.step();
            world2.step();
        }

        // Positions should be identical
        let pos1 = world1.get_rigid_body(handle1).unwrap().translation();
        let pos2 = world2.get_rigid_body(handle2).unwrap().translation();
        assert_eq!(pos1.x, pos2.x);
        assert_eq!(pos1.y, pos2.y);
    }

    #[test]
    fn test_step_advances_frame() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.current_frame(), 0);

        world.step();
        assert_eq!(world.current_frame(), 1);

        world.step_n(10);
        assert_eq!(world.current_frame(), 11);
    }

    #[test]
    fn test_add_and_remove_body() {
        let mut world = PhysicsWorld::new();

        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(50.0, 50.0))
            .build();
        let handle = world.add_rigid_body(body);

        assert!(world.get_rigid_body(handle).is_some());

        world.remove_rigid_body(handle);
        assert!(world.get_rigid_body(handle).is_none());
    }

    #[test]
    fn test_sensor_raises_intersection_events() {
        let mut world = PhysicsWorld::new();

        // Thin static sensor strip at y = 0
        let sensor = ColliderBuilder::cuboid(500.0, 2.5)
            .sensor(true)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        world.add_static_collider(sensor);

        // Box falling through it from above
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(0.0, 200.0))
            .build();
        let handle = world.add_rigid_body(body);
        let collider = ColliderBuilder::cuboid(20.0, 20.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        world.add_collider(collider, handle);

        let mut started = 0;
        let mut stopped = 0;
        for _ in 0..240 {
            for event in world.step_with_events() {
                match event {
                    CollisionEvent::Started(..) => started += 1,
                    CollisionEvent::Stopped(..) => stopped += 1,
                }
            }
        }

        // The box enters and then leaves the strip exactly once
        assert_eq!(started, 1);
        assert_eq!(stopped, 1);
    }

    #[test]
    fn test_reset_clears_bodies() {
        let mut world = PhysicsWorld::new();
        let body = RigidBodyBuilder::dynamic().build();
        world.add_rigid_body(body);
        world.step_n(5);

        world.reset();
        assert_eq!(world.current_frame(), 0);
        assert_eq!(world.rigid_body_set.len(), 0);
    }
}

//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `StackHeadlessPlugin` for testing game logic
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::arena::ArenaConfig;
use crate::bevy::plugin::StackHeadlessPlugin;
use crate::bevy::resources::{CommandQueue, GameCommand, StackGameState};
use crate::bevy::{FallingShape, SensorBand};
use crate::physics::PHYSICS_DT;

/// A headless Bevy app wrapper for testing.
///
/// Provides convenience methods for common test operations like loading
/// arenas, spawning shapes, and advancing the physics simulation.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with default seed.
    pub fn new() -> Self {
        Self::with_seed(12345)
    }

    /// Create a new test app with a specific RNG seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StackHeadlessPlugin {
            seed,
            command_queue: None,
            state_stores: None,
        });
        // Pause virtual time so that only explicit step_physics calls
        // advance the simulation — ensures deterministic behavior.
        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        // Run one update to initialize all resources
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Advance the physics simulation by exactly `n` fixed timesteps.
    ///
    /// Uses `Time<Fixed>::accumulate_overstep` to feed time directly into
    /// the fixed-timestep accumulator, bypassing virtual time. Combined
    /// with paused virtual time this gives fully deterministic physics.
    pub fn step_physics(&mut self, n: usize) {
        let dt = std::time::Duration::from_secs_f32(PHYSICS_DT);
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Fixed>>()
                .accumulate_overstep(dt);
            self.app.update();
        }
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: GameCommand) {
        self.app.world().resource::<CommandQueue>().push(cmd);
    }

    /// Load an arena configuration and run an update to process it.
    pub fn load_arena(&mut self, config: ArenaConfig) {
        self.push_command(GameCommand::LoadArena { config });
        self.update();
    }

    /// Spawn one random shape at the arena spawn point.
    pub fn spawn_shape(&mut self) {
        self.push_command(GameCommand::SpawnShape);
        self.update();
    }

    /// Request a restart.
    pub fn reset_game(&mut self) {
        self.push_command(GameCommand::Reset);
        self.update();
    }

    /// Write a Bevy message directly into the world.
    pub fn write_message<M: Message>(&mut self, message: M) {
        self.app.world_mut().write_message(message);
    }

    /// Current score.
    pub fn score(&self) -> i64 {
        self.game_state().score.score()
    }

    /// Get a reference to the current game state.
    pub fn game_state(&self) -> &StackGameState {
        self.app.world().resource::<StackGameState>()
    }

    /// The only band entity in the world. Panics unless exactly one exists.
    pub fn single_band_entity(&mut self) -> Entity {
        let mut query = self.app.world_mut().query_filtered::<Entity, With<SensorBand>>();
        query.single(self.app.world()).expect("expected exactly one band")
    }

    /// The only shape entity in the world. Panics unless exactly one exists.
    pub fn single_shape_entity(&mut self) -> Entity {
        let mut query = self
            .app
            .world_mut()
            .query_filtered::<Entity, With<FallingShape>>();
        query.single(self.app.world()).expect("expected exactly one shape")
    }

    /// World position of a shape entity.
    pub fn shape_position(&mut self, entity: Entity) -> Vec2 {
        self.app
            .world()
            .get::<Transform>(entity)
            .expect("shape has no transform")
            .translation
            .truncate()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

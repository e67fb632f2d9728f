//! Bevy plugins for the stacking game.
//!
//! Provides:
//! - `StackHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless testing
//! - `StackUnifiedPlugin`: Full plugin including `StackHeadlessPlugin` + input, camera, and rendering systems

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::rapier_plugin::{PhysicsSet, StackPhysicsPlugin};
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;
use crate::physics::PHYSICS_DT;

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing all game logic without rendering or window
/// dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` to run ECS systems
/// without requiring a windowing or rendering backend.
///
/// Excluded systems (rendering/window-dependent):
/// - Gizmos-based rendering (render_arena, render_shapes, render_drag_indicator)
/// - Window-dependent systems (track_pointer, handle_drag_input,
///   update_pointer_follow, handle_zoom_input)
/// - Projection-dependent systems (apply_camera_smoothing)
/// - Camera2d spawning (setup_game_camera)
pub struct StackHeadlessPlugin {
    pub seed: u64,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Default for StackHeadlessPlugin {
    fn default() -> Self {
        Self {
            seed: 12345,
            command_queue: None,
            state_stores: None,
        }
    }
}

impl Plugin for StackHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Physics
        // ====================================================================
        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(PHYSICS_DT)));
        app.add_plugins(StackPhysicsPlugin);

        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(StackGameState::new(self.seed))
            .insert_resource(DeterministicRng::new(self.seed))
            .insert_resource(PointerState::default())
            .insert_resource(DragState::default())
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());

        // Rendering config is registered here so logic systems can read it
        // in headless runs too.
        app.insert_resource(systems::ArenaGizmoConfig::default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<LoadArenaEvent>()
            .add_message::<ArenaLoadedEvent>()
            .add_message::<SpawnShapeEvent>()
            .add_message::<ResetGameEvent>()
            .add_message::<BandOverlapEvent>()
            .add_message::<ScoreChangedEvent>();

        // ====================================================================
        // Core systems
        // ====================================================================

        // Pre-physics (FixedUpdate)
        app.add_systems(
            FixedUpdate,
            (
                systems::clear_external_forces,
                systems::advance_game_frame,
                systems::apply_drag_force,
            )
                .chain()
                .before(PhysicsSet::SyncToRapier),
        );

        // Post-physics (FixedUpdate)
        app.add_systems(
            FixedUpdate,
            systems::check_band_overlaps.after(PhysicsSet::SyncFromRapier),
        );

        // Command processing and event handlers
        app.add_systems(
            Update,
            (
                systems::process_commands,
                systems::handle_load_arena,
                systems::handle_reset,
                systems::handle_spawn_shape,
            )
                .chain(),
        );

        // WASM exit system
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Update, crate::bevy::wasm_entry::check_exit_system);

        // State sync
        app.add_systems(
            PostUpdate,
            (systems::sync_score_to_store, systems::sync_game_summary).chain(),
        );
    }
}

// ============================================================================
// Unified Plugin (headless + input/camera/rendering)
// ============================================================================

/// Unified plugin: all game logic plus the systems that need `Window`,
/// `Projection`, `Gizmos`, and `Camera2d`.
pub struct StackUnifiedPlugin {
    pub seed: u64,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Default for StackUnifiedPlugin {
    fn default() -> Self {
        Self {
            seed: 12345,
            command_queue: None,
            state_stores: None,
        }
    }
}

impl StackUnifiedPlugin {
    pub fn new(command_queue: CommandQueue, state_stores: StateStores) -> Self {
        Self {
            seed: 12345,
            command_queue: Some(command_queue),
            state_stores: Some(state_stores),
        }
    }
}

impl Plugin for StackUnifiedPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(StackHeadlessPlugin {
            seed: self.seed,
            command_queue: self.command_queue.clone(),
            state_stores: self.state_stores.clone(),
        });

        // Pointer input and dragging (needs Window/Camera)
        app.add_systems(
            Update,
            (systems::track_pointer, systems::handle_drag_input).chain(),
        );

        // Camera follow, wheel zoom, smoothing (needs Window/Projection)
        app.add_systems(
            Update,
            (
                systems::update_pointer_follow,
                systems::handle_zoom_input,
                systems::apply_camera_smoothing,
            )
                .chain()
                .after(systems::track_pointer),
        );

        // Gizmo rendering
        app.add_systems(
            Update,
            (
                systems::render_arena,
                systems::render_shapes,
                systems::render_drag_indicator,
            ),
        );

        // Camera setup
        app.add_systems(Startup, setup_game_camera);
    }
}

/// Spawns the game camera.
fn setup_game_camera(mut commands: Commands) {
    tracing::info!("[stacker] spawning game camera");
    commands.spawn((
        Camera2d,
        crate::bevy::MainCamera,
        crate::bevy::GameCamera::new(),
    ));
}

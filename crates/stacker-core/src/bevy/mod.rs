//! Bevy-based game engine for stacker-live.
//!
//! Wires the rapier physics wrapper, the arena, and the scoring rules into
//! a Bevy ECS app that runs natively (headless tests) or in the browser
//! through the WASM entry points.

pub mod components;
pub mod events;
pub mod plugin;
pub mod rapier_plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm_entry;

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::*;

pub use components::*;
pub use events::*;
pub use plugin::{StackHeadlessPlugin, StackUnifiedPlugin};
pub use resources::*;
pub use state_store::{GameStateStore, GameSummary, ScoreStore, StateStores};
pub use systems::camera::{apply_camera_smoothing, handle_zoom_input, update_pointer_follow};

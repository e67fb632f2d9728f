//! Command processing system.
//!
//! Processes commands from the JavaScript/WASM interface.

use bevy::prelude::*;

use crate::bevy::{
    CommandQueue, GameCommand, LoadArenaEvent, ResetGameEvent, SpawnShapeEvent,
};

/// System to process all commands from the external command queue.
///
/// Handles commands until a Yield is encountered; commands after Yield are
/// processed in the next frame.
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    mut spawn_events: MessageWriter<SpawnShapeEvent>,
    mut reset_events: MessageWriter<ResetGameEvent>,
    mut load_events: MessageWriter<LoadArenaEvent>,
) {
    for command in command_queue.drain_until_yield() {
        match command {
            GameCommand::SpawnShape => {
                tracing::info!("[command] SpawnShape");
                spawn_events.write(SpawnShapeEvent);
            }
            GameCommand::Reset => {
                tracing::info!("[command] Reset");
                reset_events.write(ResetGameEvent);
            }
            GameCommand::LoadArena { config } => {
                tracing::info!(
                    "[command] LoadArena '{}' with {} bands",
                    config.meta.name,
                    config.bands.len()
                );
                load_events.write(LoadArenaEvent { config });
            }
            // Yield is consumed by drain_until_yield(), should not reach here
            GameCommand::Yield => {}
        }
    }
}

//! State-store synchronization systems.
//!
//! Publishes score and game-state slices into the shared stores the
//! frontend polls. Runs in PostUpdate so a collision and its score display
//! update land in the same frame.

use bevy::prelude::*;

use crate::bevy::state_store::{GameSummary, StateStores};
use crate::bevy::{ArenaRes, ScoreChangedEvent, StackGameState};

/// System to push score changes into the score store.
pub fn sync_score_to_store(
    mut score_events: MessageReader<ScoreChangedEvent>,
    stores: Res<StateStores>,
) {
    let mut latest = None;
    for event in score_events.read() {
        latest = Some(event.total);
    }
    if let Some(total) = latest {
        stores.score.set_score(total);
    }
}

/// System to publish the game summary.
pub fn sync_game_summary(
    game_state: Res<StackGameState>,
    arena: Option<Res<ArenaRes>>,
    stores: Res<StateStores>,
) {
    let summary = GameSummary {
        frame: game_state.frame,
        shapes_spawned: game_state.shapes_spawned,
        active_overlaps: game_state.score.active_overlaps(),
        arena_name: arena
            .map(|arena| arena.0.meta.name.clone())
            .unwrap_or_default(),
    };
    stores.game.set_summary(summary);
}

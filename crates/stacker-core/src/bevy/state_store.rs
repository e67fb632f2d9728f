//! Shared state stores for Bevy-Yew communication.
//!
//! Each store holds a slice of game state that the frontend polls
//! independently through a version counter, so components only re-render
//! when their slice actually changed.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Game state summary for UI display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameSummary {
    pub frame: u64,
    pub shapes_spawned: u32,
    pub active_overlaps: u32,
    pub arena_name: String,
}

/// Store for the running score.
#[derive(Debug, Default)]
pub struct ScoreStore {
    score: RwLock<i64>,
    version: RwLock<u64>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_score(&self) -> i64 {
        *self.score.read()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    pub fn set_score(&self, score: i64) {
        *self.score.write() = score;
        *self.version.write() += 1;
    }
}

/// Store for the game state summary.
#[derive(Debug, Default)]
pub struct GameStateStore {
    summary: RwLock<GameSummary>,
    version: RwLock<u64>,
}

impl GameStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_summary(&self) -> GameSummary {
        self.summary.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    /// Replaces the summary, bumping the version only on actual change.
    pub fn set_summary(&self, summary: GameSummary) {
        let mut guard = self.summary.write();
        if *guard != summary {
            *guard = summary;
            *self.version.write() += 1;
        }
    }
}

/// All state stores bundled as one cloneable handle.
#[derive(Resource, Clone, Default)]
pub struct StateStores {
    pub score: Arc<ScoreStore>,
    pub game: Arc<GameStateStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets everything for a restart.
    pub fn reset(&self) {
        self.score.set_score(0);
        self.game.set_summary(GameSummary::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_store_versions_every_write() {
        let store = ScoreStore::new();
        assert_eq!(store.get_version(), 0);

        store.set_score(1000);
        assert_eq!(store.get_score(), 1000);
        assert_eq!(store.get_version(), 1);

        store.set_score(0);
        assert_eq!(store.get_version(), 2);
    }

    #[test]
    fn test_game_store_versions_only_on_change() {
        let store = GameStateStore::new();
        let summary = GameSummary {
            frame: 60,
            shapes_spawned: 3,
            active_overlaps: 1,
            arena_name: "classic".to_string(),
        };

        store.set_summary(summary.clone());
        assert_eq!(store.get_version(), 1);

        // Same summary again: pollers see no change
        store.set_summary(summary);
        assert_eq!(store.get_version(), 1);
    }
}

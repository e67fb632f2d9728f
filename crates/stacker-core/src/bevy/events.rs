//! ECS Events (Messages) for the stacking game.
//!
//! Note: In Bevy 0.18+, buffered events use the Message trait.

use bevy::prelude::*;

use crate::arena::ArenaConfig;

/// Message to request loading an arena.
#[derive(Message, Debug, Clone)]
pub struct LoadArenaEvent {
    pub config: ArenaConfig,
}

/// Message fired when an arena has been loaded.
#[derive(Message, Debug, Clone)]
pub struct ArenaLoadedEvent {
    /// Name of the loaded arena.
    pub arena_name: String,
}

/// Message to request dropping a new random shape.
#[derive(Message, Debug, Clone, Default)]
pub struct SpawnShapeEvent;

/// Message to request a restart.
#[derive(Message, Debug, Clone, Default)]
pub struct ResetGameEvent;

/// Message fired when a shape's overlap with a score band starts or ends.
#[derive(Message, Debug, Clone)]
pub struct BandOverlapEvent {
    /// The shape entity involved.
    pub shape: Entity,
    /// The band entity involved.
    pub band: Entity,
    /// The band's point value.
    pub points: i64,
    /// true for overlap start, false for overlap end.
    pub entering: bool,
}

/// Message fired whenever the score changes.
#[derive(Message, Debug, Clone, Copy)]
pub struct ScoreChangedEvent {
    /// Signed change applied to the score.
    pub delta: i64,
    /// Score after the change.
    pub total: i64,
}

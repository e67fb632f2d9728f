//! ECS Resources for the stacking game.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::arena::ArenaConfig;
use crate::score::ScoreBoard;

/// Main game state resource.
#[derive(Resource, Debug, Clone)]
pub struct StackGameState {
    /// The running score.
    pub score: ScoreBoard,
    /// Current simulation frame number.
    pub frame: u64,
    /// Shapes spawned since the last reset (starter boxes included).
    pub shapes_spawned: u32,
    /// RNG seed for deterministic behavior.
    pub rng_seed: u64,
}

impl StackGameState {
    pub fn new(seed: u64) -> Self {
        Self {
            score: ScoreBoard::new(),
            frame: 0,
            shapes_spawned: 0,
            rng_seed: seed,
        }
    }
}

impl Default for StackGameState {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Arena configuration resource, inserted when an arena is loaded.
#[derive(Resource, Debug, Clone)]
pub struct ArenaRes(pub ArenaConfig);

impl ArenaRes {
    pub fn new(config: ArenaConfig) -> Self {
        Self(config)
    }
}

/// Deterministic RNG resource.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Pointer position shared between input, drag, and camera systems.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Cursor position in screen coordinates (y down), if inside the window.
    pub screen: Option<Vec2>,
    /// Cursor position in world coordinates.
    pub world: Option<Vec2>,
}

/// An active body grab.
#[derive(Debug, Clone, Copy)]
pub struct Grab {
    /// The grabbed shape entity.
    pub entity: Entity,
    /// Grab point in the body's local frame.
    pub local_anchor: Vec2,
}

/// State of the pointer-spring body drag.
#[derive(Resource, Debug, Clone)]
pub struct DragState {
    pub grabbed: Option<Grab>,
    /// Spring stiffness, fraction of the anchor error corrected per step.
    pub stiffness: f32,
    /// Velocity damping applied while dragging.
    pub damping: f32,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            grabbed: None,
            stiffness: 0.2,
            damping: 6.0,
        }
    }
}

/// Commands that can be sent from JavaScript to the Bevy app.
#[derive(Debug, Clone)]
pub enum GameCommand {
    /// Load an arena, replacing the current world.
    LoadArena { config: ArenaConfig },
    /// Drop a new random shape at the spawn point.
    SpawnShape,
    /// Restart: rebuild the world and zero the score.
    Reset,
    /// Frame boundary marker - commands after this are processed in the next frame.
    Yield,
}

/// Thread-safe command queue for WASM interop.
///
/// This allows JavaScript to push commands that will be processed
/// by Bevy systems on the next frame.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<GameCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed.
    pub fn push(&self, command: GameCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain commands until Yield or empty.
    ///
    /// Returns commands up to (not including) Yield. Yield itself is
    /// consumed but not returned.
    pub fn drain_until_yield(&self) -> Vec<GameCommand> {
        let mut guard = self.inner.lock();
        let mut commands = Vec::new();

        while let Some(cmd) = guard.pop_front() {
            if matches!(cmd, GameCommand::Yield) {
                tracing::debug!("[command] Yield - deferring remaining commands to next frame");
                break;
            }
            commands.push(cmd);
        }

        commands
    }

    /// Check if there are pending commands.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear all pending commands.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_stops_at_yield() {
        let queue = CommandQueue::new();
        queue.push(GameCommand::SpawnShape);
        queue.push(GameCommand::Yield);
        queue.push(GameCommand::Reset);

        let first = queue.drain_until_yield();
        assert_eq!(first.len(), 1);
        assert!(matches!(first[0], GameCommand::SpawnShape));

        let second = queue.drain_until_yield();
        assert_eq!(second.len(), 1);
        assert!(matches!(second[0], GameCommand::Reset));

        assert!(queue.is_empty());
    }
}

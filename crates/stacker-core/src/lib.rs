//! Stacker-Live Core Library
//!
//! Physics simulation and game logic for the shape-stacking demo, built on
//! `Rapier2D` with deterministic behavior and a Bevy ECS integration.
//!
//! The crate's own code is configuration and event wiring: the heavy lifting
//! (collision detection, constraint solving, rigid-body integration,
//! rendering) lives in rapier2d and bevy.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod arena;
pub mod physics;
pub mod score;
pub mod shapes;

// Bevy integration
pub mod bevy;

pub use arena::{ArenaConfig, ArenaError, ArenaMeta, ScoreBand, StarterBox};
pub use physics::{PHYSICS_DT, PhysicsWorld, default_gravity};
pub use score::ScoreBoard;
pub use shapes::{Color, SHAPE_DENSITY, SHAPE_FRICTION, ShapeKind, ShapeSpec};

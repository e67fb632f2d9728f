//! ECS systems for the stacking game.

pub mod arena_loader;
pub mod camera;
pub mod command;
pub mod drag;
pub mod physics;
pub mod rendering;
pub mod scoring;
pub mod shapes;
pub mod state_sync;

pub use arena_loader::*;
pub use camera::*;
pub use command::*;
pub use drag::*;
pub use physics::*;
pub use rendering::*;
pub use scoring::*;
pub use shapes::*;
pub use state_sync::*;

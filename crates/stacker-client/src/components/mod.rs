//! UI components.

pub mod controls;
pub mod game_view;
pub mod score_panel;

pub use controls::Controls;
pub use game_view::{GAME_VIEW_CANVAS_ID, GameView};
pub use score_panel::ScorePanel;

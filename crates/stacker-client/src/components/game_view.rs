//! Game view: the HUD layered over the Bevy canvas.

use yew::prelude::*;

use crate::components::{Controls, ScorePanel};

/// ID of the canvas element the Bevy app mounts into.
pub const GAME_VIEW_CANVAS_ID: &str = "stacker-canvas";

#[function_component(GameView)]
pub fn game_view() -> Html {
    let hud_style = "position: fixed; top: 16px; left: 16px; z-index: 1; \
                     display: flex; flex-direction: column; gap: 12px; \
                     font-family: sans-serif; color: #eee;";

    html! {
        <div class="hud" style={hud_style}>
            <ScorePanel />
            <Controls />
        </div>
    }
}

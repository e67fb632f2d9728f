//! Score display panel.

use yew::prelude::*;

use crate::hooks::{use_stack_game, use_stack_score};

#[function_component(ScorePanel)]
pub fn score_panel() -> Html {
    let score = use_stack_score();
    let game = use_stack_game();

    let panel_style = "background: rgba(20, 20, 28, 0.8); border-radius: 8px; \
                       padding: 12px 20px; min-width: 160px;";
    let score_style = "font-size: 2.2em; font-weight: bold;";
    let detail_style = "font-size: 0.8em; opacity: 0.7;";

    html! {
        <div class="score-panel" style={panel_style}>
            <div style={score_style} id="score">{ score }</div>
            <div style={detail_style}>
                { format!("{} shapes · {} overlaps", game.shapes_spawned, game.active_overlaps) }
            </div>
        </div>
    }
}

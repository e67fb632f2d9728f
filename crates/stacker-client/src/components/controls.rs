//! Spawn and reset buttons.

use yew::prelude::*;
use yew_icons::{Icon, IconId};

use crate::hooks::use_stack;

#[function_component(Controls)]
pub fn controls() -> Html {
    let stack = use_stack();

    let on_spawn = {
        let stack = stack.clone();
        Callback::from(move |_| {
            if let Err(e) = stack.spawn_shape() {
                tracing::error!("spawn_shape failed: {}", e);
            }
        })
    };

    let on_reset = {
        let stack = stack.clone();
        Callback::from(move |_| {
            if let Err(e) = stack.reset() {
                tracing::error!("reset failed: {}", e);
            }
        })
    };

    let row_style = "display: flex; gap: 8px;";
    let button_style = "display: flex; align-items: center; gap: 6px; \
                        background: rgba(20, 20, 28, 0.8); color: #eee; \
                        border: 1px solid #444; border-radius: 6px; \
                        padding: 8px 14px; cursor: pointer; font-size: 1em;";

    html! {
        <div class="controls" style={row_style}>
            <button style={button_style} onclick={on_spawn} disabled={!stack.initialized}>
                <Icon icon_id={IconId::LucidePlus} width="16" height="16" />
                { "Drop shape" }
            </button>
            <button style={button_style} onclick={on_reset} disabled={!stack.initialized}>
                <Icon icon_id={IconId::LucideRotateCcw} width="16" height="16" />
                { "Restart" }
            </button>
        </div>
    }
}

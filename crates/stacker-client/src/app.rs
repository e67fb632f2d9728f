//! Main application component.

use yew::prelude::*;

use crate::components::{GAME_VIEW_CANVAS_ID, GameView};
use crate::hooks::StackProvider;

/// Root application component.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <StackProvider canvas_id={GAME_VIEW_CANVAS_ID}>
            <GameView />
        </StackProvider>
    }
}

//! Bevy integration hooks for Yew.
//!
//! Provides hooks to access game state from Yew components. Each hook
//! polls its state store through a version counter and triggers re-renders
//! only when that slice of state changes.

use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

// ============================================================================
// Direct calls to stacker-core WASM functions
// These are re-exported from stacker_core::bevy::wasm_entry
// ============================================================================

pub use stacker_core::bevy::{
    get_game_state, get_game_version, get_score, get_score_version, is_app_ready, is_app_running,
    load_arena, request_app_exit, reset_app_state, send_command, start_stack_app,
};

use stacker_core::ArenaConfig;

// ============================================================================
// Types (mirroring stacker-core state_store types)
// ============================================================================

/// Game state summary.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
pub struct GameSummary {
    pub frame: u64,
    pub shapes_spawned: u32,
    pub active_overlaps: u32,
    pub arena_name: String,
}

// ============================================================================
// Context
// ============================================================================

/// Stack context for sharing command access across components.
#[derive(Clone, PartialEq)]
pub struct StackContext {
    /// Whether the Bevy app has been initialized.
    pub initialized: bool,
}

impl StackContext {
    /// Send a command to the game.
    pub fn send_command(&self, command: &str) -> Result<(), String> {
        if !self.initialized {
            return Err("app not initialized".to_string());
        }
        send_command(command).map_err(|e| format!("{e:?}"))
    }

    /// Drop a new shape.
    pub fn spawn_shape(&self) -> Result<(), String> {
        self.send_command(r#"{"type":"spawn_shape"}"#)
    }

    /// Restart the game.
    pub fn reset(&self) -> Result<(), String> {
        self.send_command(r#"{"type":"reset"}"#)
    }
}

/// Props for StackProvider.
#[derive(Properties, PartialEq)]
pub struct StackProviderProps {
    pub children: Children,
    /// Canvas element ID.
    pub canvas_id: String,
}

/// Provider component that initializes the Bevy app.
///
/// Renders the canvas, queues the classic arena, starts the app on mount,
/// and registers a beforeunload cleanup handler.
#[function_component(StackProvider)]
pub fn stack_provider(props: &StackProviderProps) -> Html {
    let initialized = use_state(|| false);

    {
        let initialized = initialized.clone();
        let canvas_id = props.canvas_id.clone();

        use_effect_with((), move |()| {
            // Register beforeunload handler to clean up Bevy state on page reload
            let window = web_sys::window().expect("no global window");
            let beforeunload_closure = Closure::<dyn Fn()>::new(move || {
                tracing::info!("beforeunload: requesting app exit and cleaning up state");
                request_app_exit();
                reset_app_state();
            });

            window
                .add_event_listener_with_callback(
                    "beforeunload",
                    beforeunload_closure.as_ref().unchecked_ref(),
                )
                .expect("failed to add beforeunload listener");

            // Small delay to ensure canvas is mounted
            let initialized = initialized.clone();
            let timeout = gloo::timers::callback::Timeout::new(100, move || {
                initialized.set(true);
                tracing::info!("Stacker initializing...");

                // Queue the classic arena before the app starts draining
                // commands.
                let config_json = serde_json::to_string(&ArenaConfig::default_classic())
                    .unwrap_or_else(|_| "{}".to_string());
                if let Err(e) = load_arena(&config_json) {
                    tracing::error!("Failed to queue arena load: {:?}", e);
                }

                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = start_stack_app(&canvas_id) {
                        tracing::error!("Failed to initialize app: {:?}", e);
                    }
                });
            });

            // Cleanup function - called on unmount
            let window_clone = web_sys::window().expect("no global window");
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "beforeunload",
                    beforeunload_closure.as_ref().unchecked_ref(),
                );
                drop(timeout);
            }
        });
    }

    let context = StackContext {
        initialized: *initialized,
    };

    let canvas_style = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: 0;";

    html! {
        <ContextProvider<StackContext> context={context}>
            <canvas
                id={props.canvas_id.clone()}
                class="stacker-canvas"
                style={canvas_style}
            />
            { props.children.clone() }
        </ContextProvider<StackContext>>
    }
}

/// Hook to get the stack context.
#[hook]
pub fn use_stack() -> StackContext {
    use_context::<StackContext>().unwrap_or(StackContext { initialized: false })
}

// ============================================================================
// Polling Hooks
// ============================================================================

/// Polling interval in milliseconds (20 FPS for UI updates).
const POLL_INTERVAL_MS: u32 = 50;

/// Hook to get the running score.
#[hook]
pub fn use_stack_score() -> i64 {
    let score = use_state(|| 0_i64);
    let last_version = use_mut_ref(|| 0u64);

    {
        let score = score.clone();
        let last_version = last_version.clone();
        use_effect_with((), move |()| {
            let interval = Interval::new(POLL_INTERVAL_MS, move || {
                let version = get_score_version();
                if version != *last_version.borrow() {
                    *last_version.borrow_mut() = version;
                    score.set(get_score());
                }
            });

            move || drop(interval)
        });
    }

    *score
}

/// Hook to get the game state summary.
#[hook]
pub fn use_stack_game() -> GameSummary {
    let state = use_state(GameSummary::default);
    let last_version = use_mut_ref(|| 0u64);

    {
        let state = state.clone();
        let last_version = last_version.clone();
        use_effect_with((), move |()| {
            let interval = Interval::new(POLL_INTERVAL_MS, move || {
                let version = get_game_version();
                if version != *last_version.borrow() {
                    *last_version.borrow_mut() = version;
                    let js_value = get_game_state();
                    if let Ok(summary) = serde_wasm_bindgen::from_value::<GameSummary>(js_value) {
                        state.set(summary);
                    }
                }
            });

            move || drop(interval)
        });
    }

    (*state).clone()
}

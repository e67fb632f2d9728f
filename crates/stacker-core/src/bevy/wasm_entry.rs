//! WASM entry points for the stacking game.
//!
//! Provides JavaScript-callable functions to initialize and control the
//! game from the browser page.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use wasm_bindgen::prelude::*;

use crate::arena::ArenaConfig;
use crate::bevy::{CommandQueue, GameCommand, StackUnifiedPlugin, StateStores};

// ============================================================================
// Global State
// ============================================================================

/// Atomic flag for signaling app shutdown (checked every frame by a Bevy
/// system). AtomicBool for lock-free access from Bevy systems.
static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);

/// Atomic flag indicating whether the Bevy App has been started.
/// In WASM, the EventLoop can only be created once, so we track this to
/// prevent RecreationAttempt errors on page transitions.
static APP_STARTED: AtomicBool = AtomicBool::new(false);

/// Global state that can be reset on page reload.
struct GlobalState {
    command_queue: CommandQueue,
    state_stores: StateStores,
}

impl GlobalState {
    fn new() -> Self {
        Self {
            command_queue: CommandQueue::new(),
            state_stores: StateStores::new(),
        }
    }
}

/// Global state protected by Mutex for thread-safe access.
/// Using Option to allow resetting on page reload.
static GLOBAL_STATE: Mutex<Option<GlobalState>> = Mutex::new(None);

fn ensure_global_state() {
    let mut guard = GLOBAL_STATE.lock().unwrap();
    if guard.is_none() {
        *guard = Some(GlobalState::new());
    }
}

fn get_command_queue() -> CommandQueue {
    ensure_global_state();
    let guard = GLOBAL_STATE.lock().unwrap();
    guard.as_ref().unwrap().command_queue.clone()
}

fn get_state_stores() -> StateStores {
    ensure_global_state();
    let guard = GLOBAL_STATE.lock().unwrap();
    guard.as_ref().unwrap().state_stores.clone()
}

fn is_shutdown_requested() -> bool {
    SHOULD_EXIT.load(Ordering::SeqCst)
}

/// Request the Bevy app to exit. Called before page unload.
/// The app will exit on the next frame when the exit system runs.
#[wasm_bindgen]
pub fn request_app_exit() {
    tracing::info!("[stacker] request_app_exit called - signaling app to exit");
    SHOULD_EXIT.store(true, Ordering::SeqCst);
}

/// Reset global state. Called after app exits or before page unload.
#[wasm_bindgen]
pub fn reset_app_state() {
    tracing::info!("[stacker] reset_app_state called - clearing global state");

    SHOULD_EXIT.store(true, Ordering::SeqCst);

    let mut guard = GLOBAL_STATE.lock().unwrap();
    if let Some(ref state) = *guard {
        state.command_queue.clear();
    }
    *guard = None;

    // Reset exit flag for next app instance
    SHOULD_EXIT.store(false, Ordering::SeqCst);
}

/// Bevy system that checks if exit was requested and sends AppExit.
pub fn check_exit_system(mut exit: MessageWriter<bevy::app::AppExit>) {
    if SHOULD_EXIT.load(Ordering::SeqCst) {
        tracing::info!("[stacker] check_exit_system: sending AppExit");
        exit.write(bevy::app::AppExit::Success);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Starts the Bevy app on the given canvas.
///
/// The app starts with an empty world; use `load_arena()` to build one.
#[wasm_bindgen]
pub fn start_stack_app(canvas_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    tracing::info!("[stacker] start_stack_app called");

    if APP_STARTED.load(Ordering::SeqCst) {
        tracing::info!("[stacker] App already running, skipping creation");
        return Ok(());
    }

    let command_queue = get_command_queue().clone();
    let state_stores = get_state_stores().clone();

    tracing::info!("[stacker] creating Bevy app for canvas: #{}", canvas_id);

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{canvas_id}")),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: true,
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::Continuous,
    });

    tracing::info!("[stacker] adding StackUnifiedPlugin");
    app.add_plugins(StackUnifiedPlugin::new(command_queue, state_stores));

    APP_STARTED.store(true, Ordering::SeqCst);

    tracing::info!("[stacker] calling app.run()");
    app.run();
    tracing::info!("[stacker] app.run() returned");

    Ok(())
}

/// Loads an arena from a JSON configuration.
///
/// Command sequence: LoadArena → Yield so the world is rebuilt before any
/// queued spawn commands run.
#[wasm_bindgen]
pub fn load_arena(config_json: &str) -> Result<(), JsValue> {
    if is_shutdown_requested() {
        return Err(JsValue::from_str("app is shutting down"));
    }

    let config = ArenaConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse arena config: {e}")))?;

    tracing::info!("[stacker] load_arena: '{}'", config.meta.name);

    let queue = get_command_queue();
    queue.push(GameCommand::LoadArena { config });
    queue.push(GameCommand::Yield);

    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

/// Check if the app is initialized and ready.
#[wasm_bindgen]
pub fn is_app_ready() -> bool {
    let guard = GLOBAL_STATE.lock().unwrap();
    guard.is_some() && !SHOULD_EXIT.load(Ordering::SeqCst)
}

/// Check if the app is currently running.
#[wasm_bindgen]
pub fn is_app_running() -> bool {
    APP_STARTED.load(Ordering::SeqCst) && !SHOULD_EXIT.load(Ordering::SeqCst)
}

/// Sends a command to the running game.
#[wasm_bindgen]
pub fn send_command(command_json: &str) -> Result<(), JsValue> {
    if is_shutdown_requested() {
        return Err(JsValue::from_str("app is shutting down"));
    }

    let value: serde_json::Value = serde_json::from_str(command_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid command JSON: {e}")))?;

    let command_type = value["type"]
        .as_str()
        .ok_or_else(|| JsValue::from_str("Missing 'type' field"))?;

    let command = match command_type {
        "spawn_shape" => GameCommand::SpawnShape,
        "reset" => GameCommand::Reset,
        "yield" => GameCommand::Yield,
        "load_arena" => {
            let config: ArenaConfig = serde_json::from_value(value["config"].clone())
                .map_err(|e| JsValue::from_str(&format!("Invalid arena config: {e}")))?;
            config
                .validate()
                .map_err(|e| JsValue::from_str(&format!("Invalid arena config: {e}")))?;
            GameCommand::LoadArena { config }
        }
        _ => {
            return Err(JsValue::from_str(&format!(
                "Unknown command type: {command_type}"
            )));
        }
    };

    get_command_queue().push(command);
    Ok(())
}

// ============================================================================
// State Getters (for Yew hooks)
// ============================================================================

/// Get the current score.
#[wasm_bindgen]
pub fn get_score() -> i64 {
    get_state_stores().score.get_score()
}

/// Get the score store version (for change detection).
#[wasm_bindgen]
pub fn get_score_version() -> u64 {
    get_state_stores().score.get_version()
}

/// Get the game state summary.
#[wasm_bindgen]
pub fn get_game_state() -> JsValue {
    if is_shutdown_requested() {
        return JsValue::NULL;
    }
    let summary = get_state_stores().game.get_summary();
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Get the game state version (for change detection).
#[wasm_bindgen]
pub fn get_game_version() -> u64 {
    get_state_stores().game.get_version()
}

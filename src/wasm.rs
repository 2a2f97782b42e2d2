//! JS-facing API over a single in-process game session.
//!
//! Snapshots cross the boundary as plain objects via `serde-wasm-bindgen`;
//! errors cross as strings built from [`ReversiError`]'s `Display`.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::config::SearchConfig;
use crate::error::{ReversiError, ReversiResult};
use crate::game::GameSession;
use crate::types::GameStatus;

static GAME: Lazy<Mutex<Option<GameSession>>> = Lazy::new(|| Mutex::new(None));

/// Routes `log` output to the browser console.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> Result<(), JsValue> {
    let level: log::Level = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("unknown log level: {level}")))?;
    install_logger(level)
}

#[cfg(target_arch = "wasm32")]
fn install_logger(level: log::Level) -> Result<(), JsValue> {
    console_log::init_with_level(level).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logger(level: log::Level) -> Result<(), JsValue> {
    log::set_max_level(level.to_level_filter());
    Ok(())
}

/// Starts a new game. `config` may be `undefined`/`null` for defaults.
#[wasm_bindgen]
pub fn init_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        SearchConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let status = start_game(&mut lock(), config).map_err(to_js_error)?;
    to_js(&status)
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    to_js(&session(&mut lock()).legal_moves())
}

#[wasm_bindgen]
pub fn attempt_move(x: i32, y: i32) -> Result<JsValue, JsValue> {
    let report = session(&mut lock())
        .attempt_move(x, y)
        .map_err(to_js_error)?;
    to_js(&report)
}

#[wasm_bindgen]
pub fn request_ai_move() -> Result<JsValue, JsValue> {
    let mv = session(&mut lock())
        .request_automated_move()
        .map_err(to_js_error)?;
    to_js(&mv)
}

#[wasm_bindgen]
pub fn play_ai_move() -> Result<JsValue, JsValue> {
    let report = session(&mut lock())
        .play_automated_move()
        .map_err(to_js_error)?;
    to_js(&report)
}

#[wasm_bindgen]
pub fn get_status() -> Result<JsValue, JsValue> {
    to_js(&session(&mut lock()).status())
}

/// Final result, or `undefined` while the game is running.
#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    to_js(&session(&mut lock()).result())
}

/// Row-major cells: 0=empty, 1=white, 2=black.
#[wasm_bindgen]
pub fn get_board() -> Vec<u8> {
    session(&mut lock()).board().to_array().to_vec()
}

#[wasm_bindgen]
pub fn get_search_report() -> Result<JsValue, JsValue> {
    to_js(&session(&mut lock()).last_search_report())
}

fn lock() -> MutexGuard<'static, Option<GameSession>> {
    GAME.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn start_game(slot: &mut Option<GameSession>, config: SearchConfig) -> ReversiResult<GameStatus> {
    let session = GameSession::with_config(config)?;
    let status = session.status();
    log::info!("new game: {config:?}");
    *slot = Some(session);
    Ok(status)
}

/// The current session, starting a default one on first use.
fn session(slot: &mut Option<GameSession>) -> &mut GameSession {
    slot.get_or_insert_with(GameSession::default)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: ReversiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

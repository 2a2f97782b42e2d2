//! Boundary tests for the JS API.
//! Run with: wasm-pack test --node
#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use othello_core::wasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).expect("field must exist")
}

#[wasm_bindgen_test]
fn ready_flag_is_set() {
    assert!(othello_core::wasm_ready());
}

#[wasm_bindgen_test]
fn init_game_with_defaults_returns_opening_status() {
    let status = wasm::init_game(JsValue::UNDEFINED).unwrap();

    assert_eq!(field(&status, "move_count").as_f64(), Some(4.0));
    assert_eq!(field(&status, "to_move").as_string().as_deref(), Some("white"));
    assert_eq!(field(&status, "is_terminal").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn legal_moves_and_board_reflect_the_opening() {
    wasm::init_game(JsValue::NULL).unwrap();

    let moves = Array::from(&wasm::get_legal_moves().unwrap());
    let board = wasm::get_board();

    assert_eq!(moves.length(), 4);
    assert_eq!(field(&moves.get(0), "x").as_f64(), Some(4.0));
    assert_eq!(field(&moves.get(0), "y").as_f64(), Some(2.0));
    assert_eq!(board.len(), 64);
    assert_eq!(board[27], 1);
    assert_eq!(board[28], 2);
}

#[wasm_bindgen_test]
fn rejected_move_surfaces_as_error_string() {
    wasm::init_game(JsValue::UNDEFINED).unwrap();

    let err = wasm::attempt_move(0, 0).unwrap_err();
    assert!(err.as_string().unwrap().contains("illegal move"));

    let err = wasm::attempt_move(9, 0).unwrap_err();
    assert!(err.as_string().unwrap().contains("outside the board"));
}

#[wasm_bindgen_test]
fn config_object_is_deserialized() {
    let config = js_sys::Object::new();
    Reflect::set(&config, &"early_depth".into(), &JsValue::from_f64(1.0)).unwrap();
    Reflect::set(&config, &"cache".into(), &"board_depth_side".into()).unwrap();

    wasm::init_game(config.into()).unwrap();
    let report = wasm::play_ai_move().unwrap();
    let search = wasm::get_search_report().unwrap();

    assert_eq!(field(&report, "color").as_string().as_deref(), Some("white"));
    assert_eq!(field(&search, "depth").as_f64(), Some(1.0));
    assert!(wasm::get_result().unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn zero_depth_config_is_rejected() {
    let config = js_sys::Object::new();
    Reflect::set(&config, &"mid_depth".into(), &JsValue::from_f64(0.0)).unwrap();

    let err = wasm::init_game(config.into()).unwrap_err();
    assert!(err.as_string().unwrap().contains("mid_depth"));
}

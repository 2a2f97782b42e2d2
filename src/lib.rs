use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod types;
pub mod wasm;

pub use ai::config::{CachePolicy, EvalPerspective, SearchConfig};
pub use ai::evaluator::Evaluator;
pub use ai::search::{SearchEngine, SearchReport};
pub use board::Board;
pub use error::{ReversiError, ReversiResult};
pub use game::{FirstLegalMoveSelector, GameSession, MoveSelector, SessionState};
pub use types::{Cell, Color, GameResult, GameStatus, MoveReport, Phase, Position, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

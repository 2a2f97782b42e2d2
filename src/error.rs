use thiserror::Error;

use crate::types::Color;

/// Errors surfaced by the rules engine, the search and the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReversiError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("illegal move: {color} cannot place at ({x}, {y})")]
    IllegalMove { x: u8, y: u8, color: Color },

    #[error("game is already over")]
    GameOver,

    /// Search was requested for a side with nothing to play.
    #[error("{color} has no legal move")]
    NoLegalMoveAvailable { color: Color },

    #[error("invalid search config: {0}")]
    InvalidConfig(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

pub type ReversiResult<T> = Result<T, ReversiError>;

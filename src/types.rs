use std::fmt;

use serde::Serialize;

use crate::error::{ReversiError, ReversiResult};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Moves counted at the start of a game: the four pre-placed discs.
pub const OPENING_MOVE_COUNT: u32 = 4;

/// Disc color, also used for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("white"),
            Self::Black => f.write_str("black"),
        }
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    White,
    Black,
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::White => Some(Color::White),
            Self::Black => Some(Color::Black),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Self::White,
            Color::Black => Self::Black,
        }
    }
}

/// A validated board coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Validates raw coordinates coming from a caller.
    pub fn new(x: i32, y: i32) -> ReversiResult<Self> {
        if is_in_bounds(x, y) {
            Ok(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(ReversiError::OutOfBounds { x, y })
        }
    }

    /// Row-major square index in `0..64`.
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// True iff both coordinates lie in `0..8`.
pub fn is_in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

/// Game phase derived from the number of moves played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    pub fn from_move_count(move_count: u32) -> Self {
        match move_count {
            0..=20 => Self::Early,
            21..=40 => Self::Mid,
            _ => Self::Late,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

/// Snapshot for on-screen counters and end-of-game messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub to_move: Color,
    pub move_count: u32,
    pub is_terminal: bool,
    pub white_count: u8,
    pub black_count: u8,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Winner,
    pub white_count: u8,
    pub black_count: u8,
}

impl GameResult {
    pub fn from_counts(white_count: u8, black_count: u8) -> Self {
        let winner = if white_count > black_count {
            Winner::White
        } else if black_count > white_count {
            Winner::Black
        } else {
            Winner::Draw
        };
        Self {
            winner,
            white_count,
            black_count,
        }
    }
}

/// Outcome of one applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub position: Position,
    pub color: Color,
    /// Cells turned to `color`, row-major. Never contains `position` itself.
    pub flipped: Vec<Position>,
    /// Side whose turn was skipped right after this move, if any.
    pub passed: Option<Color>,
    pub move_count: u32,
    pub game_over: bool,
}

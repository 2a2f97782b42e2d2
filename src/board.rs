use std::fmt;
use std::str::FromStr;

use crate::error::{ReversiError, ReversiResult};
use crate::types::{self, BOARD_SIZE, Cell, Color, NUM_SQUARES, Position};

/// 8x8 Othello board represented by two bitboards, bit `y * 8 + x` per cell.
///
/// `Board` is `Copy`: every copy is fully independent, which is what the
/// search relies on for its scratch boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    white: u64,
    black: u64,
}

impl Board {
    /// Creates the opening position:
    /// (3,3)=white, (4,3)=black, (3,4)=black, (4,4)=white.
    pub fn new() -> Self {
        Self {
            white: bit(27) | bit(36),
            black: bit(28) | bit(35),
        }
    }

    pub fn empty() -> Self {
        Self { white: 0, black: 0 }
    }

    pub fn from_bitboards(white: u64, black: u64) -> ReversiResult<Self> {
        if white & black != 0 {
            return Err(ReversiError::InvalidBoard(format!(
                "cells {:#018x} are both white and black",
                white & black
            )));
        }
        Ok(Self { white, black })
    }

    /// Bitboard of the discs owned by `color`.
    pub fn discs(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn occupied(&self) -> u64 {
        self.white | self.black
    }

    pub fn is_in_bounds(x: i32, y: i32) -> bool {
        types::is_in_bounds(x, y)
    }

    /// Reads a cell from raw coordinates.
    pub fn get(&self, x: i32, y: i32) -> ReversiResult<Cell> {
        Position::new(x, y).map(|pos| self.at(pos))
    }

    pub fn at(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if self.white & square != 0 {
            Cell::White
        } else if self.black & square != 0 {
            Cell::Black
        } else {
            Cell::Empty
        }
    }

    /// Puts a `color` disc on `pos`, replacing whatever was there.
    /// No legality check happens here.
    pub fn place(&mut self, pos: Position, color: Color) {
        self.set_mask(bit(pos.index()), color);
    }

    /// Hands every cell in `mask` to `color`.
    pub(crate) fn set_mask(&mut self, mask: u64, color: Color) {
        match color {
            Color::White => {
                self.white |= mask;
                self.black &= !mask;
            }
            Color::Black => {
                self.black |= mask;
                self.white &= !mask;
            }
        }
    }

    /// Returns `(white_count, black_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.white.count_ones() as u8, self.black.count_ones() as u8)
    }

    pub fn count_of(&self, color: Color) -> u8 {
        self.discs(color).count_ones() as u8
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.occupied().count_ones() as u8
    }

    /// Row-major cell states: 0=empty, 1=white, 2=black.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (pos, cell) in cells.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if self.white & square != 0 {
                1
            } else if self.black & square != 0 {
                2
            } else {
                0
            };
        }
        cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Eight lines of `.`, `W` and `B`, row 0 first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let symbol = match self.at(Position::from_index(y * BOARD_SIZE + x)) {
                    Cell::Empty => '.',
                    Cell::White => 'W',
                    Cell::Black => 'B',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ReversiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ReversiError::InvalidBoard(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(ReversiError::InvalidBoard(format!(
                    "row {y} has {} cells",
                    symbols.len()
                )));
            }
            for (x, symbol) in symbols.into_iter().enumerate() {
                let square = bit(y * BOARD_SIZE + x);
                match symbol {
                    '.' | '-' => {}
                    'W' | 'w' | 'O' | 'o' => board.white |= square,
                    'B' | 'b' | 'X' | 'x' => board.black |= square,
                    other => {
                        return Err(ReversiError::InvalidBoard(format!(
                            "unexpected symbol {other:?} at ({x}, {y})"
                        )));
                    }
                }
            }
        }
        Ok(board)
    }
}

pub(crate) fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

//! Move legality, enumeration and application on top of [`Board`] primitives.

use crate::board::{Board, bit};
use crate::error::{ReversiError, ReversiResult};
use crate::types::{BOARD_SIZE, Color, NUM_SQUARES, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// True iff `pos` is empty and placing `color` there captures in at least
/// one direction.
pub fn can_place(board: &Board, pos: Position, color: Color) -> bool {
    flips_for(board, pos.index(), color) != 0
}

/// Bit mask of every legal move for `color`.
pub fn legal_mask(board: &Board, color: Color) -> u64 {
    let me = board.discs(color);
    let opp = board.discs(color.opponent());
    let occupied = me | opp;

    let mut legal = 0u64;
    for pos in 0..NUM_SQUARES {
        let move_bit = bit(pos);
        if occupied & move_bit != 0 {
            continue;
        }
        if collect_flips(pos, me, opp) != 0 {
            legal |= move_bit;
        }
    }
    legal
}

/// Legal moves for `color` in row-major order (y ascending, then x).
/// Search tie-breaking depends on this order.
pub fn generate_moves(board: &Board, color: Color) -> Vec<Position> {
    mask_to_positions(legal_mask(board, color))
}

/// Number of legal moves available to `color`.
pub fn mobility(board: &Board, color: Color) -> u32 {
    legal_mask(board, color).count_ones()
}

/// Places `color` at `pos` and flips every captured run.
/// Returns the flipped cells in row-major order.
pub fn apply_move(board: &mut Board, pos: Position, color: Color) -> ReversiResult<Vec<Position>> {
    let flips = apply_index(board, pos.index(), color);
    if flips == 0 {
        return Err(ReversiError::IllegalMove {
            x: pos.x,
            y: pos.y,
            color,
        });
    }
    Ok(mask_to_positions(flips))
}

/// Applies a move by square index and returns the flip mask.
/// Returns 0 and leaves the board untouched when the move is illegal.
pub(crate) fn apply_index(board: &mut Board, pos: usize, color: Color) -> u64 {
    let flips = flips_for(board, pos, color);
    if flips != 0 {
        board.set_mask(bit(pos) | flips, color);
    }
    flips
}

pub(crate) fn mask_to_positions(mut mask: u64) -> Vec<Position> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        out.push(Position::from_index(mask.trailing_zeros() as usize));
        mask &= mask - 1;
    }
    out
}

fn flips_for(board: &Board, pos: usize, color: Color) -> u64 {
    collect_flips(pos, board.discs(color), board.discs(color.opponent()))
}

/// Directional scan: a direction captures when a non-empty run of `opp`
/// discs is closed by a `me` disc before an empty cell or the edge.
fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES {
        return 0;
    }

    let move_bit = bit(pos);
    if (me | opp) & move_bit != 0 {
        return 0;
    }

    let row = (pos / BOARD_SIZE) as i32;
    let col = (pos % BOARD_SIZE) as i32;
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;

        while in_bounds(r, c) {
            let square = bit(r as usize * BOARD_SIZE + c as usize);
            if opp & square != 0 {
                line |= square;
            } else {
                if me & square != 0 {
                    flips |= line;
                }
                break;
            }
            r += dr;
            c += dc;
        }
    }

    flips
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y).unwrap()
    }

    fn board(rows: &str) -> Board {
        rows.parse().unwrap()
    }

    #[test]
    fn opening_moves_for_both_colors() {
        let board = Board::new();

        assert_eq!(
            generate_moves(&board, Color::White),
            vec![pos(4, 2), pos(5, 3), pos(2, 4), pos(3, 5)]
        );
        assert_eq!(
            generate_moves(&board, Color::Black),
            vec![pos(3, 2), pos(2, 3), pos(5, 4), pos(4, 5)]
        );
    }

    #[test]
    fn adjacent_same_color_is_not_a_capture() {
        let board = board(
            "WW......
             ........
             ........
             ........
             ........
             ........
             ........
             ........",
        );

        assert!(!can_place(&board, pos(2, 0), Color::White));
    }

    #[test]
    fn run_without_closing_disc_does_not_capture() {
        let board = board(
            ".BB.....
             ........
             .B......
             ........
             ...W....
             ........
             ........
             ........",
        );

        // The run to the right ends on an empty cell.
        assert!(!can_place(&board, pos(0, 0), Color::White));
        assert_eq!(legal_mask(&board, Color::White), 0);
    }

    #[test]
    fn occupied_cell_is_never_legal() {
        let board = Board::new();

        assert!(!can_place(&board, pos(3, 3), Color::Black));
        assert!(!can_place(&board, pos(4, 3), Color::White));
    }

    #[test]
    fn apply_move_flips_every_capturing_direction() {
        let mut board = board(
            "W.W.W...
             .BBB....
             WB.BW...
             .BBB....
             W.W.W...
             ........
             ........
             ........",
        );

        let flipped = apply_move(&mut board, pos(2, 2), Color::White).unwrap();

        assert_eq!(flipped.len(), 8);
        assert_eq!(board.at(pos(2, 2)), Cell::White);
        assert!(flipped.iter().all(|&p| board.at(p) == Cell::White));
        assert_eq!(board.count_of(Color::Black), 0);
    }

    #[test]
    fn apply_move_only_flips_bracketed_run() {
        let mut board = Board::new();

        let flipped = apply_move(&mut board, pos(4, 2), Color::White).unwrap();

        assert_eq!(flipped, vec![pos(4, 3)]);
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.at(pos(3, 4)), Cell::Black);
    }

    #[test]
    fn illegal_apply_returns_error_and_keeps_board() {
        let mut board = Board::new();
        let before = board;

        let err = apply_move(&mut board, pos(0, 0), Color::White).unwrap_err();

        assert_eq!(
            err,
            ReversiError::IllegalMove {
                x: 0,
                y: 0,
                color: Color::White
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn generated_moves_agree_with_can_place() {
        let mut board = Board::new();
        let mut color = Color::White;

        for _ in 0..20 {
            let moves = generate_moves(&board, color);
            for y in 0..8 {
                for x in 0..8 {
                    let p = pos(x, y);
                    assert_eq!(moves.contains(&p), can_place(&board, p, color));
                    if moves.contains(&p) {
                        assert_eq!(board.at(p), Cell::Empty);
                    }
                }
            }
            let Some(&last) = moves.last() else {
                color = color.opponent();
                continue;
            };
            apply_move(&mut board, last, color).unwrap();
            color = color.opponent();
        }
    }

    #[test]
    fn legal_move_never_helps_opponent() {
        let mut board = Board::new();
        let mut color = Color::White;

        for _ in 0..30 {
            let moves = generate_moves(&board, color);
            let Some(&first) = moves.first() else {
                color = color.opponent();
                continue;
            };
            let mine = board.count_of(color);
            let theirs = board.count_of(color.opponent());

            apply_move(&mut board, first, color).unwrap();

            assert!(board.count_of(color) > mine);
            assert!(board.count_of(color.opponent()) < theirs);
            color = color.opponent();
        }
    }
}

use crate::board::Board;
use crate::movegen;
use crate::types::{BOARD_SIZE, Color, Phase};

/// Positional weights indexed `[y][x]`.
pub const WEIGHT_TABLE: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [30, -12, 0, -1, -1, 0, -12, 30],
    [-12, -15, -3, -3, -3, -3, -15, -12],
    [0, -3, 0, -1, -1, 0, -3, 0],
    [-1, -3, -1, -1, -1, -1, -3, -1],
    [-1, -3, -1, -1, -1, -1, -3, -1],
    [0, -3, 0, -1, -1, 0, -3, 0],
    [-12, -15, -3, -3, -3, -3, -15, -12],
    [30, -12, 0, -1, -1, 0, -12, 30],
];

/// Per-phase multipliers: `(positional, material, mobility)`.
const EARLY_WEIGHTS: (f32, f32, f32) = (1.5, 0.5, 1.0);
const MID_WEIGHTS: (f32, f32, f32) = (1.0, 2.0, 1.0);
const LATE_WEIGHTS: (f32, f32, f32) = (0.5, 4.0, 0.0);

/// Static evaluation combining positional weights, material and mobility.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Scores `board` for `color`; higher is better for `color`.
    pub fn evaluate(&self, board: &Board, move_count: u32, color: Color) -> f32 {
        let positional = positional_score(board, color) as f32;
        let material = material_diff(board, color) as f32;

        let (positional_weight, material_weight, mobility_weight) =
            match Phase::from_move_count(move_count) {
                Phase::Early => EARLY_WEIGHTS,
                Phase::Mid => MID_WEIGHTS,
                // Late game drops mobility, so skip move generation entirely.
                Phase::Late => return positional * LATE_WEIGHTS.0 + material * LATE_WEIGHTS.1,
            };

        let mobility = mobility_diff(board, color) as f32;
        positional * positional_weight + material * material_weight + mobility * mobility_weight
    }
}

/// Weight-table sum for `color`'s discs minus the opponent's.
pub fn positional_score(board: &Board, color: Color) -> i32 {
    let mine = board.discs(color);
    let theirs = board.discs(color.opponent());

    let mut score = 0;
    for (y, row) in WEIGHT_TABLE.iter().enumerate() {
        for (x, weight) in row.iter().enumerate() {
            let square = 1u64 << (y * BOARD_SIZE + x);
            if mine & square != 0 {
                score += weight;
            } else if theirs & square != 0 {
                score -= weight;
            }
        }
    }
    score
}

pub fn material_diff(board: &Board, color: Color) -> i32 {
    board.count_of(color) as i32 - board.count_of(color.opponent()) as i32
}

pub fn mobility_diff(board: &Board, color: Color) -> i32 {
    movegen::mobility(board, color) as i32 - movegen::mobility(board, color.opponent()) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn board(rows: &str) -> Board {
        rows.parse().unwrap()
    }

    fn midgame() -> Board {
        board(
            "W.......
             .B......
             ..BWW...
             ..WBB...
             ..BWB...
             ...W....
             ........
             .......B",
        )
    }

    #[test]
    fn weight_table_is_symmetric() {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                assert_eq!(WEIGHT_TABLE[y][x], WEIGHT_TABLE[x][y]);
                assert_eq!(WEIGHT_TABLE[y][x], WEIGHT_TABLE[BOARD_SIZE - 1 - y][x]);
            }
        }
    }

    #[test]
    fn opening_position_is_balanced() {
        let board = Board::new();

        assert_eq!(positional_score(&board, Color::White), 0);
        assert_eq!(material_diff(&board, Color::White), 0);
        assert_eq!(mobility_diff(&board, Color::White), 0);
        assert_eq!(Evaluator.evaluate(&board, 4, Color::White), 0.0);
    }

    #[test]
    fn corner_outweighs_x_square() {
        let board = board(
            "W.......
             .B......
             ........
             ........
             ........
             ........
             ........
             ........",
        );

        assert_eq!(positional_score(&board, Color::White), 45);
        assert_eq!(positional_score(&board, Color::Black), -45);
    }

    #[test]
    fn phase_weighting_scales_positional_once() {
        let board = midgame();
        let positional = positional_score(&board, Color::White) as f32;
        let material = material_diff(&board, Color::White) as f32;
        let mobility = mobility_diff(&board, Color::White) as f32;

        assert_eq!(
            Evaluator.evaluate(&board, 10, Color::White),
            positional * 1.5 + material * 0.5 + mobility
        );
        assert_eq!(
            Evaluator.evaluate(&board, 30, Color::White),
            positional + material * 2.0 + mobility
        );
        assert_eq!(
            Evaluator.evaluate(&board, 50, Color::White),
            positional * 0.5 + material * 4.0
        );
    }

    #[test]
    fn mobility_term_is_live() {
        let board = midgame();
        let white_moves = movegen::mobility(&board, Color::White) as i32;
        let black_moves = movegen::mobility(&board, Color::Black) as i32;

        assert_ne!(white_moves, black_moves);
        assert_eq!(mobility_diff(&board, Color::White), white_moves - black_moves);
    }

    #[test]
    fn evaluation_is_antisymmetric_in_every_phase() {
        let mut board = midgame();
        board.place(Position::new(7, 0).unwrap(), Color::Black);

        for move_count in [4, 20, 21, 40, 41, 60] {
            let white = Evaluator.evaluate(&board, move_count, Color::White);
            let black = Evaluator.evaluate(&board, move_count, Color::Black);
            assert_eq!(white, -black, "move_count={move_count}");
        }
    }
}

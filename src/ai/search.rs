use std::collections::HashMap;

use serde::Serialize;
use web_time::Instant;

use crate::ai::config::{CachePolicy, EvalPerspective, SearchConfig};
use crate::ai::evaluator::Evaluator;
use crate::board::Board;
use crate::error::ReversiResult;
use crate::movegen;
use crate::types::{Color, Phase, Position};

const MIN_SCORE: f32 = f32::NEG_INFINITY;
const MAX_SCORE: f32 = f32::INFINITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Row-major cell states.
    cells: [u8; 64],
    /// Remaining depth and maximizing flag, when the policy keys on them.
    node: Option<(u8, bool)>,
}

/// Diagnostics of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchReport {
    pub best_move: Position,
    pub score: f32,
    pub depth: u8,
    pub phase: Phase,
    pub move_count: u32,
    /// Leaf evaluations actually computed.
    pub evaluated_positions: u64,
    pub cache_hits: u64,
    pub elapsed_ms: f64,
}

/// Fixed-depth minimax with alpha-beta pruning and a per-call
/// transposition cache.
///
/// The maximizing side is always the color passed to
/// [`find_best_move`](Self::find_best_move); its opponent minimizes.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    evaluator: Evaluator,
    cache: HashMap<CacheKey, f32>,
    root_color: Option<Color>,
    move_count: u32,
    evaluated_positions: u64,
    cache_hits: u64,
    last_report: Option<SearchReport>,
}

impl SearchEngine {
    /// Rejects configs with a zero search depth.
    pub fn new(config: SearchConfig) -> ReversiResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Picks a move for `color`. `board` is never modified.
    /// Caller contract: `color` must have at least one legal move.
    pub fn find_best_move(&mut self, board: &Board, color: Color, move_count: u32) -> Position {
        let start = Instant::now();
        self.cache.clear();
        self.root_color = Some(color);
        self.move_count = move_count;
        self.evaluated_positions = 0;
        self.cache_hits = 0;

        let moves = movegen::generate_moves(board, color);
        debug_assert!(
            !moves.is_empty(),
            "find_best_move() requires at least one legal move"
        );
        if moves.is_empty() {
            unreachable!("find_best_move() called without legal moves for {color}");
        }

        let depth = self.config.depth_for(move_count);
        let mut best_move = moves[0];
        let mut best_score = MIN_SCORE;

        for mv in moves {
            let mut next = *board;
            let flips = movegen::apply_index(&mut next, mv.index(), color);
            debug_assert_ne!(flips, 0, "generated move {mv} must flip");
            let score = self.minimax(&next, depth - 1, false, MIN_SCORE, MAX_SCORE);

            // Strictly greater: the first move in row-major order wins ties.
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        let report = SearchReport {
            best_move,
            score: best_score,
            depth,
            phase: Phase::from_move_count(move_count),
            move_count,
            evaluated_positions: self.evaluated_positions,
            cache_hits: self.cache_hits,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        log::debug!(
            "search {color}: best {} score {:.2} depth {} ({:?}, move {}) evaluated {} cache hits {} in {:.1}ms",
            report.best_move,
            report.score,
            report.depth,
            report.phase,
            report.move_count,
            report.evaluated_positions,
            report.cache_hits,
            report.elapsed_ms
        );
        self.last_report = Some(report);

        best_move
    }

    fn minimax(&mut self, board: &Board, depth: u8, maximizing: bool, alpha: f32, beta: f32) -> f32 {
        let key = self.cache_key(board, depth, maximizing);
        if let Some(key) = &key
            && let Some(&score) = self.cache.get(key)
        {
            self.cache_hits += 1;
            return score;
        }

        let color = self.side_to_move(maximizing);

        if depth == 0 {
            let perspective = match self.config.perspective {
                EvalPerspective::SideToMove => color,
                EvalPerspective::RootColor => self.side_to_move(true),
            };
            self.evaluated_positions += 1;
            let score = self.evaluator.evaluate(board, self.move_count, perspective);
            if let Some(key) = key {
                self.cache.insert(key, score);
            }
            return score;
        }

        let moves = movegen::generate_moves(board, color);
        if moves.is_empty() {
            // Pass: same board, other side, one ply of budget spent.
            return self.minimax(board, depth - 1, !maximizing, alpha, beta);
        }

        let mut alpha = alpha;
        let mut beta = beta;
        let mut best_score = if maximizing { MIN_SCORE } else { MAX_SCORE };

        for mv in moves {
            let mut next = *board;
            let flips = movegen::apply_index(&mut next, mv.index(), color);
            debug_assert_ne!(flips, 0, "generated move {mv} must flip");
            let score = self.minimax(&next, depth - 1, !maximizing, alpha, beta);

            if maximizing {
                best_score = best_score.max(score);
                alpha = alpha.max(best_score);
            } else {
                best_score = best_score.min(score);
                beta = beta.min(best_score);
            }

            if self.config.pruning && beta <= alpha {
                break;
            }
        }

        if let Some(key) = key {
            self.cache.insert(key, best_score);
        }
        best_score
    }

    fn side_to_move(&self, maximizing: bool) -> Color {
        let root = self.root_color.unwrap_or(Color::White);
        if maximizing { root } else { root.opponent() }
    }

    fn cache_key(&self, board: &Board, depth: u8, maximizing: bool) -> Option<CacheKey> {
        let node = match self.config.cache {
            CachePolicy::Disabled => return None,
            CachePolicy::BoardOnly => None,
            CachePolicy::BoardDepthSide => Some((depth, maximizing)),
        };
        Some(CacheKey {
            cells: board.to_array(),
            node,
        })
    }
}

use crate::ai::config::SearchConfig;
use crate::ai::search::{SearchEngine, SearchReport};
use crate::board::Board;
use crate::error::{ReversiError, ReversiResult};
use crate::movegen;
use crate::types::{Color, GameResult, GameStatus, MoveReport, OPENING_MOVE_COUNT, Position};

/// Chooses moves for the automated side.
pub trait MoveSelector: Send {
    fn select_move(&mut self, board: &Board, color: Color, move_count: u32) -> Option<Position>;

    /// Diagnostics of the last selection, if the selector keeps any.
    fn last_report(&self) -> Option<&SearchReport> {
        None
    }
}

impl MoveSelector for SearchEngine {
    fn select_move(&mut self, board: &Board, color: Color, move_count: u32) -> Option<Position> {
        if movegen::legal_mask(board, color) == 0 {
            return None;
        }
        Some(self.find_best_move(board, color, move_count))
    }

    fn last_report(&self) -> Option<&SearchReport> {
        SearchEngine::last_report(self)
    }
}

/// Picks the first legal move in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, color: Color, _move_count: u32) -> Option<Position> {
        movegen::generate_moves(board, color).first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove(Color),
    Terminal { white_count: u8, black_count: u8 },
}

/// Owns the authoritative board and drives turn order, passes and game end.
pub struct GameSession {
    board: Board,
    state: SessionState,
    /// Side whose turn it is, or would be once the game is over.
    turn: Color,
    move_count: u32,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// Opening position with white to move.
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self::from_position(Board::new(), Color::White, OPENING_MOVE_COUNT, selector)
    }

    pub fn with_config(config: SearchConfig) -> ReversiResult<Self> {
        Ok(Self::new(Box::new(SearchEngine::new(config)?)))
    }

    /// Starts from an arbitrary position. Pass and game-end detection run
    /// immediately, so `to_move` may be skipped.
    pub fn from_position(
        board: Board,
        to_move: Color,
        move_count: u32,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        let mut session = Self {
            board,
            state: SessionState::AwaitingMove(to_move),
            turn: to_move,
            move_count,
            selector,
        };
        session.settle_turn(to_move);
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn to_move(&self) -> Option<Color> {
        match self.state {
            SessionState::AwaitingMove(color) => Some(color),
            SessionState::Terminal { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Terminal { .. })
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        match self.state {
            SessionState::AwaitingMove(color) => movegen::generate_moves(&self.board, color),
            SessionState::Terminal { .. } => Vec::new(),
        }
    }

    /// Plays `(x, y)` for the side to move. Rejections leave the session untouched.
    pub fn attempt_move(&mut self, x: i32, y: i32) -> ReversiResult<MoveReport> {
        let color = self.to_move().ok_or(ReversiError::GameOver)?;
        let pos = Position::new(x, y)?;
        self.apply(pos, color)
    }

    /// Asks the selector for a move for the side to move without applying it.
    pub fn request_automated_move(&mut self) -> ReversiResult<Position> {
        self.select_for_current().map(|(pos, _)| pos)
    }

    /// Requests an automated move and applies it.
    pub fn play_automated_move(&mut self) -> ReversiResult<MoveReport> {
        let (pos, color) = self.select_for_current()?;
        self.apply(pos, color)
    }

    pub fn last_search_report(&self) -> Option<&SearchReport> {
        self.selector.last_report()
    }

    pub fn status(&self) -> GameStatus {
        let (white_count, black_count) = self.board.count();
        GameStatus {
            to_move: self.turn,
            move_count: self.move_count,
            is_terminal: self.is_terminal(),
            white_count,
            black_count,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            SessionState::Terminal {
                white_count,
                black_count,
            } => Some(GameResult::from_counts(white_count, black_count)),
            SessionState::AwaitingMove(_) => None,
        }
    }

    fn select_for_current(&mut self) -> ReversiResult<(Position, Color)> {
        let color = self.to_move().ok_or(ReversiError::GameOver)?;
        let pos = self
            .selector
            .select_move(&self.board, color, self.move_count)
            .ok_or(ReversiError::NoLegalMoveAvailable { color })?;
        Ok((pos, color))
    }

    fn apply(&mut self, pos: Position, color: Color) -> ReversiResult<MoveReport> {
        let flipped = movegen::apply_move(&mut self.board, pos, color)?;
        self.move_count += 1;
        log::debug!(
            "{color} played {pos}, flipped {} (move {})",
            flipped.len(),
            self.move_count
        );

        let passed = self.settle_turn(color.opponent());

        Ok(MoveReport {
            position: pos,
            color,
            flipped,
            passed,
            move_count: self.move_count,
            game_over: self.is_terminal(),
        })
    }

    /// Hands the turn to `next`, skipping it when stuck and ending the game
    /// when both sides are stuck. Returns the skipped side, if any.
    fn settle_turn(&mut self, next: Color) -> Option<Color> {
        self.turn = next;
        if movegen::legal_mask(&self.board, next) != 0 {
            self.state = SessionState::AwaitingMove(next);
            return None;
        }

        if movegen::legal_mask(&self.board, next.opponent()) != 0 {
            log::debug!("{next} has no legal move and passes");
            self.turn = next.opponent();
            self.state = SessionState::AwaitingMove(next.opponent());
            return Some(next);
        }

        let (white_count, black_count) = self.board.count();
        log::info!("game over: white {white_count}, black {black_count}");
        self.state = SessionState::Terminal {
            white_count,
            black_count,
        };
        None
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Box::new(SearchEngine::default()))
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{ReversiError, ReversiResult};
use crate::types::Phase;

/// What the transposition cache keys its entries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Board layout only. Positions reached with a different remaining depth
    /// or side to move share one entry.
    #[default]
    BoardOnly,
    /// Board layout plus remaining depth and side to move.
    BoardDepthSide,
    Disabled,
}

/// Whose point of view leaf evaluations are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalPerspective {
    /// The side to move at the leaf, whether it maximizes or not.
    #[default]
    SideToMove,
    /// Always the color the search is choosing a move for.
    RootColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub early_depth: u8,
    pub mid_depth: u8,
    pub late_depth: u8,
    pub cache: CachePolicy,
    pub perspective: EvalPerspective,
    /// `false` turns the search into plain exhaustive minimax.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            early_depth: 3,
            mid_depth: 4,
            late_depth: 5,
            cache: CachePolicy::default(),
            perspective: EvalPerspective::default(),
            pruning: true,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> ReversiResult<()> {
        for (name, depth) in [
            ("early_depth", self.early_depth),
            ("mid_depth", self.mid_depth),
            ("late_depth", self.late_depth),
        ] {
            if depth == 0 {
                return Err(ReversiError::InvalidConfig(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        Ok(())
    }

    pub fn depth_for(&self, move_count: u32) -> u8 {
        match Phase::from_move_count(move_count) {
            Phase::Early => self.early_depth,
            Phase::Mid => self.mid_depth,
            Phase::Late => self.late_depth,
        }
    }
}

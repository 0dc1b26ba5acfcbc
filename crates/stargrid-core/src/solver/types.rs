//! Shared types for the rule-based solver.

use crate::{CellStatus, Position};
use serde::{Deserialize, Serialize};

/// The deduction rules, in firing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rule {
    StarPlacement,
    Icicle,
    ReverseIcicle,
    Intersection,
    Branch,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::StarPlacement => write!(f, "star placement"),
            Rule::Icicle => write!(f, "icicle"),
            Rule::ReverseIcicle => write!(f, "reverse icicle"),
            Rule::Intersection => write!(f, "intersection"),
            Rule::Branch => write!(f, "branch"),
        }
    }
}

/// One status change applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub pos: Position,
    pub status: CellStatus,
}

impl CellChange {
    pub fn new(pos: Position, status: CellStatus) -> Self {
        Self { pos, status }
    }
}

/// What a rule firing did: the changes it applied, in order, and the
/// difficulty cost it contributes to the running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: Rule,
    pub changes: Vec<CellChange>,
    pub difficulty: u32,
}

/// Terminal verdict of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// The rule set solved the board; the score is the accumulated
    /// difficulty of every rule firing.
    Solved { difficulty: u32 },
    /// Some row, column, or color ran out of candidates: no solution exists
    /// from the starting state.
    Contradiction,
    /// No rule fired (or the iteration cap was hit) before a verdict was
    /// reached. Signals rule-set weakness, not a bad board.
    Exhausted,
}

//! Engine for region-coloring star placement puzzles.
//!
//! An n x n grid is partitioned into n connected color regions; a solution
//! places exactly one star per row, column, and region, with no two stars
//! adjacent (diagonals included). The engine generates such boards by
//! weighted random graph contraction and verifies them with a rule-based
//! deduction solver that doubles as a difficulty rater.
//!
//! Everything here is synchronous, single-threaded, and free of external
//! side effects. Independent generation attempts share no state and may run
//! on separate threads.

mod board;
mod cellset;
pub mod codec;
mod generator;
mod graph;
mod solver;

pub use board::{Board, Cause, Cell, CellStatus, Position};
pub use cellset::{CellSet, CellSetIter};
pub use generator::{GeneratedPuzzle, Generator};
pub use graph::{RegionGraph, RegionNode};
pub use solver::{CellChange, Rule, RuleOutcome, SolveOutcome, Solver};

use thiserror::Error;

/// Engine failures. These all indicate programming errors; the legitimate
/// solver outcomes (contradiction, exhaustion) are [`SolveOutcome`]
/// variants, not errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A graph merge referenced a region that does not exist.
    #[error("region node {0} does not exist")]
    MissingNode(usize),
    /// Contraction was asked to continue with no edges left.
    #[error("contraction ran out of edges")]
    OutOfEdges,
}

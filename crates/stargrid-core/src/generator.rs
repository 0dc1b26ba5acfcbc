//! Puzzle generation: the generate-and-verify loop.
//!
//! Candidates come from random graph contraction; the rule-based solver
//! then has to prove a unique solution deductively. Candidates it cannot
//! prove are discarded and regenerated; rejection sampling with no retry
//! bound of its own. Callers wanting a deadline wrap the bounded variant.

use crate::graph::RegionGraph;
use crate::{Board, EngineError, SolveOutcome, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// An accepted puzzle: the untouched board, the difficulty score the
/// solver accumulated proving it, and how many candidates were rejected
/// along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub board: Board,
    pub difficulty: u32,
    pub attempts: usize,
}

/// Puzzle generator. Size is a per-call argument; the supported range
/// [4, 10] is enforced by callers at the process boundary, not here.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce one unverified candidate board: build the grid graph,
    /// contract it to `size` regions, scatter the regions into a color map.
    pub fn generate_board(&mut self, size: usize) -> Result<Board, EngineError> {
        let mut graph = RegionGraph::grid(size);
        graph.contract(size, &mut self.rng)?;
        Ok(Board::from_color_map(&graph.color_map(size)))
    }

    /// Generate candidates until the solver proves one unique. Loops
    /// indefinitely by design; generation time is a quality metric, not a
    /// correctness concern.
    pub fn generate(&mut self, size: usize) -> Result<GeneratedPuzzle, EngineError> {
        let solver = Solver::new();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let board = self.generate_board(size)?;
            match solver.solve(&board) {
                SolveOutcome::Solved { difficulty } => {
                    log::debug!(
                        "accepted size-{size} board after {attempts} attempt(s), difficulty {difficulty}"
                    );
                    return Ok(GeneratedPuzzle {
                        board,
                        difficulty,
                        attempts,
                    });
                }
                // Exhausted is logged apart from Contradiction: it means the
                // rule set came up short, not that the board was bad.
                SolveOutcome::Contradiction => {
                    log::trace!("attempt {attempts}: contradiction, discarding")
                }
                SolveOutcome::Exhausted => {
                    log::trace!("attempt {attempts}: rules exhausted, discarding")
                }
            }
        }
    }

    /// Bounded variant: give up after `max_attempts` rejected candidates.
    pub fn generate_with_attempts(
        &mut self,
        size: usize,
        max_attempts: usize,
    ) -> Result<Option<GeneratedPuzzle>, EngineError> {
        let solver = Solver::new();
        for attempt in 1..=max_attempts {
            let board = self.generate_board(size)?;
            if let SolveOutcome::Solved { difficulty } = solver.solve(&board) {
                return Ok(Some(GeneratedPuzzle {
                    board,
                    difficulty,
                    attempts: attempt,
                }));
            }
        }
        Ok(None)
    }
}

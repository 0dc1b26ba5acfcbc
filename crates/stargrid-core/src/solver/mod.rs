//! Rule-based solver driver.
//!
//! Runs the deduction rules to fixpoint over a working copy of the board:
//! star placement, then the icicle pair, then conflict-set intersection,
//! then bounded speculative branching. The first applicable rule fires and
//! the scan restarts from the top, so cheap deductions are always exploited
//! before costly ones. The accumulated cost of every firing becomes the
//! puzzle's difficulty score.

mod branch;
mod enumerate;
mod groups;
mod icicle;
mod intersection;
mod placement;
mod types;

use crate::Board;
use groups::GroupIndex;

pub use groups::Group;
pub use types::{CellChange, Rule, RuleOutcome, SolveOutcome};

/// Hard cap on rule firings per solve.
const MAX_ITERATIONS: usize = 100;

/// Stateless solver; all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Run the deduction rules on a working copy of `board` until a verdict
    /// is reached.
    pub fn solve(&self, board: &Board) -> SolveOutcome {
        let mut working = board.clone();
        let mut groups = GroupIndex::from_board(&working);
        let mut difficulty = 0u32;

        for iteration in 0..MAX_ITERATIONS {
            if groups.has_contradiction() {
                log::trace!("contradiction after {iteration} firings");
                return SolveOutcome::Contradiction;
            }
            if working.is_solution() {
                return SolveOutcome::Solved { difficulty };
            }
            match Self::apply_first_rule(&mut working, &mut groups) {
                Some(outcome) => {
                    log::trace!(
                        "{} fired: {} changes, difficulty +{}",
                        outcome.rule,
                        outcome.changes.len(),
                        outcome.difficulty
                    );
                    difficulty += outcome.difficulty;
                }
                None => {
                    log::trace!("no rule applicable after {iteration} firings");
                    return SolveOutcome::Exhausted;
                }
            }
        }
        log::debug!("iteration cap of {MAX_ITERATIONS} reached without a verdict");
        SolveOutcome::Exhausted
    }

    /// All solutions reachable from the board's current state, by
    /// exhaustive search. Validation aid, not part of generation.
    pub fn solutions(&self, board: &Board) -> Vec<Board> {
        enumerate::enumerate(board)
    }

    /// Whether exhaustive search finds exactly one solution.
    pub fn has_unique_solution(&self, board: &Board) -> bool {
        enumerate::enumerate_limited(board, 2).len() == 1
    }

    fn apply_first_rule(board: &mut Board, groups: &mut GroupIndex) -> Option<RuleOutcome> {
        if let Some(outcome) = placement::apply(board, groups) {
            return Some(outcome);
        }
        if let Some(outcome) = icicle::apply(board, groups) {
            return Some(outcome);
        }
        if let Some(outcome) = intersection::apply(board, groups) {
            return Some(outcome);
        }
        branch::apply(board, groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellStatus, Position};

    fn quadrant_board() -> Board {
        Board::from_color_map(&[
            vec![0, 0, 1, 1],
            vec![0, 0, 1, 1],
            vec![2, 2, 3, 3],
            vec![2, 2, 3, 3],
        ])
    }

    /// Singleton color 0 starts a chain of forced stars.
    fn cascade_board() -> Board {
        Board::from_color_map(&[
            vec![2, 0, 1, 1],
            vec![2, 3, 3, 1],
            vec![2, 3, 3, 3],
            vec![2, 3, 3, 3],
        ])
    }

    #[test]
    fn cascade_board_solves_by_star_placement_alone() {
        let solver = Solver::new();
        assert_eq!(
            solver.solve(&cascade_board()),
            SolveOutcome::Solved { difficulty: 0 }
        );
    }

    #[test]
    fn quadrant_board_exhausts_the_rule_set() {
        // Symmetric quadrants leave nothing for any rule to grip, and the
        // enumerator confirms the board is genuinely ambiguous.
        let solver = Solver::new();
        let board = quadrant_board();
        assert_eq!(solver.solve(&board), SolveOutcome::Exhausted);
        assert!(solver.solutions(&board).len() > 1);
        assert!(!solver.has_unique_solution(&board));
    }

    #[test]
    fn empty_unresolved_group_is_a_contradiction() {
        let mut board = quadrant_board();
        for col in 0..4 {
            board.cell_mut(Position::new(0, col)).status = CellStatus::Invalid;
        }
        assert_eq!(Solver::new().solve(&board), SolveOutcome::Contradiction);
    }

    #[test]
    fn solving_a_solved_board_is_idempotent() {
        let solver = Solver::new();
        let mut board = cascade_board();
        for pos in [
            Position::new(0, 1),
            Position::new(1, 3),
            Position::new(2, 0),
            Position::new(3, 2),
        ] {
            board.place_star(pos);
        }
        assert_eq!(solver.solve(&board), SolveOutcome::Solved { difficulty: 0 });
        assert_eq!(solver.solve(&board), SolveOutcome::Solved { difficulty: 0 });
    }

    #[test]
    fn deductive_verdict_agrees_with_enumeration() {
        let solver = Solver::new();
        let board = cascade_board();
        assert!(matches!(
            solver.solve(&board),
            SolveOutcome::Solved { .. }
        ));
        assert!(solver.has_unique_solution(&board));
        let solutions = solver.solutions(&board);
        assert!(solutions.iter().all(|s| s.is_solution()));
    }

    #[test]
    fn solve_does_not_mutate_the_input() {
        let board = cascade_board();
        let copy = board.clone();
        let _ = Solver::new().solve(&board);
        assert_eq!(board, copy);
    }
}

//! Exhaustive enumerator: row-by-row backtracking over all star
//! arrangements.
//!
//! Ground truth for uniqueness, independent of the deduction rules. Each
//! trial star auto-invalidates its conflict set through the board's cause
//! tracking, and the recursion undoes itself by removing the star again.

use crate::{Board, CellStatus, Position};

/// All solutions reachable from the board's current state.
pub fn enumerate(board: &Board) -> Vec<Board> {
    let mut working = board.clone();
    let mut solutions = Vec::new();
    search(&mut working, 0, usize::MAX, &mut solutions);
    solutions
}

/// Like [`enumerate`], but stops once `limit` solutions are found. Two is
/// enough to refute uniqueness.
pub fn enumerate_limited(board: &Board, limit: usize) -> Vec<Board> {
    let mut working = board.clone();
    let mut solutions = Vec::new();
    search(&mut working, 0, limit, &mut solutions);
    solutions
}

fn search(board: &mut Board, row: usize, limit: usize, solutions: &mut Vec<Board>) {
    if solutions.len() >= limit {
        return;
    }
    if row == board.size() {
        solutions.push(board.clone());
        return;
    }
    for col in 0..board.size() {
        let pos = Position::new(row, col);
        if board.status(pos) != CellStatus::Valid {
            continue;
        }
        board.place_star(pos);
        search(board, row + 1, limit, solutions);
        board.remove_star(pos);
        if solutions.len() >= limit {
            return;
        }
    }
}

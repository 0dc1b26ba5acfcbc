//! Star-Placement rule: an unresolved group with a single remaining
//! candidate must hold that unit's star.

use crate::solver::groups::{mark_star, GroupIndex};
use crate::solver::types::RuleOutcome;
use crate::{Board, Position};

/// Fire on the first unresolved singleton group, in row/column/color order.
pub fn apply(board: &mut Board, groups: &mut GroupIndex) -> Option<RuleOutcome> {
    let singleton = groups
        .rows
        .iter()
        .chain(&groups.columns)
        .chain(&groups.colors)
        .find(|g| !g.resolved && g.cells.len() == 1)
        .and_then(|g| g.cells.single())?;
    let pos = Position::from_index(singleton, board.size());
    Some(mark_star(board, groups, pos))
}

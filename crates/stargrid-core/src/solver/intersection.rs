//! Intersection rule: any cell conflicting with every possible placement in
//! some group is dead no matter which placement turns out to be right.
//!
//! Color groups are tried smallest-first, then row/column groups of size
//! 1-3. Row/column firings score one point higher than color firings of the
//! same size.

use crate::solver::groups::{mark_invalid, GroupIndex};
use crate::solver::types::{CellChange, Rule, RuleOutcome};
use crate::{Board, CellSet, Position};

/// Row/column groups larger than this are not worth intersecting.
const MAX_LINE_GROUP: usize = 3;

/// Intersect the conflict sets of every member of `cells`; invalidate the
/// survivors. Returns None when the intersection eliminates nothing new.
fn intersect_conflicts(
    board: &mut Board,
    groups: &mut GroupIndex,
    cells: &CellSet,
) -> Option<Vec<CellChange>> {
    let size = board.size();
    let mut intersection = CellSet::full(size * size);
    for idx in cells.iter() {
        let conflicts = board.conflict_set(Position::from_index(idx, size));
        intersection = intersection.intersection(&conflicts);
    }

    let mut changes = Vec::new();
    for idx in intersection.iter() {
        mark_invalid(board, groups, Position::from_index(idx, size), &mut changes);
    }
    if changes.is_empty() {
        None
    } else {
        Some(changes)
    }
}

pub fn apply(board: &mut Board, groups: &mut GroupIndex) -> Option<RuleOutcome> {
    let mut color_sets: Vec<CellSet> = groups
        .colors
        .iter()
        .filter(|g| !g.cells.is_empty())
        .map(|g| g.cells)
        .collect();
    color_sets.sort_by_key(|cells| cells.len());

    for cells in color_sets {
        if let Some(changes) = intersect_conflicts(board, groups, &cells) {
            return Some(RuleOutcome {
                rule: Rule::Intersection,
                difficulty: cells.len() as u32,
                changes,
            });
        }
    }

    let mut line_sets: Vec<CellSet> = groups
        .rows
        .iter()
        .chain(&groups.columns)
        .filter(|g| !g.cells.is_empty() && g.cells.len() <= MAX_LINE_GROUP)
        .map(|g| g.cells)
        .collect();
    line_sets.sort_by_key(|cells| cells.len());

    for cells in line_sets {
        if let Some(changes) = intersect_conflicts(board, groups, &cells) {
            return Some(RuleOutcome {
                rule: Rule::Intersection,
                difficulty: cells.len() as u32 + 1,
                changes,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellStatus;

    #[test]
    fn color_group_intersection_kills_common_conflicts() {
        // Color 0 is the pair (0, 0) / (0, 1): wherever its star lands,
        // all of row 0, the shared diagonal (1, 0) / (1, 1) neighborhood
        // intersection, and nothing else, is dead.
        let mut board = Board::from_color_map(&[
            vec![0, 0, 1, 1, 1],
            vec![2, 2, 1, 3, 3],
            vec![2, 2, 1, 3, 3],
            vec![2, 2, 4, 4, 3],
            vec![2, 2, 4, 4, 3],
        ]);
        let mut groups = GroupIndex::from_board(&board);
        let outcome = apply(&mut board, &mut groups).unwrap();

        assert_eq!(outcome.rule, Rule::Intersection);
        assert_eq!(outcome.difficulty, 2);
        let invalidated: Vec<Position> = outcome.changes.iter().map(|c| c.pos).collect();
        // Row 0 outside the pair, plus both cells diagonal to both members.
        assert_eq!(
            invalidated,
            vec![
                Position::new(0, 2),
                Position::new(0, 3),
                Position::new(0, 4),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
        for pos in invalidated {
            assert_eq!(board.status(pos), CellStatus::Invalid);
        }
    }

    #[test]
    fn smallest_color_group_is_tried_first() {
        let mut board = Board::from_color_map(&[
            vec![0, 0, 1, 1, 1],
            vec![2, 2, 1, 3, 3],
            vec![2, 2, 1, 3, 3],
            vec![2, 2, 4, 4, 3],
            vec![2, 2, 4, 4, 3],
        ]);
        let mut groups = GroupIndex::from_board(&board);
        let outcome = apply(&mut board, &mut groups).unwrap();
        // Color 0 (size 2) wins over every larger group.
        assert_eq!(outcome.difficulty, 2);
    }

    #[test]
    fn oversized_line_groups_are_skipped() {
        // Uniform quadrants: every line group has 4 cells, every color
        // group's conflict intersection adds nothing new.
        let mut board = Board::from_color_map(&[
            vec![0, 0, 1, 1],
            vec![0, 0, 1, 1],
            vec![2, 2, 3, 3],
            vec![2, 2, 3, 3],
        ]);
        let mut groups = GroupIndex::from_board(&board);
        assert!(apply(&mut board, &mut groups).is_none());
    }
}

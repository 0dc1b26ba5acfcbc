//! GroupIndex: the row/column/color partition the rules operate on.
//!
//! Built once per solve from the board's current statuses, then mutated
//! incrementally as rules invalidate cells or place stars; never rebuilt
//! mid-solve. Groups hold index sets into the board's cell arena.

use crate::solver::types::{CellChange, Rule, RuleOutcome};
use crate::{Board, CellSet, CellStatus, Position};

/// The still-eligible cells of one row, column, or color, plus whether that
/// unit already has its star.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub cells: CellSet,
    pub resolved: bool,
}

#[derive(Debug, Clone)]
pub struct GroupIndex {
    pub rows: Vec<Group>,
    pub columns: Vec<Group>,
    pub colors: Vec<Group>,
}

impl GroupIndex {
    /// Partition the board's valid cells; stars mark their three groups
    /// resolved, invalid cells are simply absent.
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let mut index = Self {
            rows: vec![Group::default(); size],
            columns: vec![Group::default(); size],
            colors: vec![Group::default(); size],
        };
        for pos in board.positions() {
            let color = board.color(pos) as usize;
            match board.status(pos) {
                CellStatus::Valid => {
                    let idx = pos.index(size);
                    index.rows[pos.row].cells.insert(idx);
                    index.columns[pos.col].cells.insert(idx);
                    index.colors[color].cells.insert(idx);
                }
                CellStatus::Star => {
                    index.rows[pos.row].resolved = true;
                    index.columns[pos.col].resolved = true;
                    index.colors[color].resolved = true;
                }
                _ => {}
            }
        }
        index
    }

    /// Drop a cell from all three of its groups.
    pub fn remove(&mut self, board: &Board, pos: Position) {
        let idx = pos.index(board.size());
        self.rows[pos.row].cells.remove(idx);
        self.columns[pos.col].cells.remove(idx);
        self.colors[board.color(pos) as usize].cells.remove(idx);
    }

    /// An empty, unresolved group means the board cannot be completed.
    pub fn has_contradiction(&self) -> bool {
        self.rows
            .iter()
            .chain(&self.columns)
            .chain(&self.colors)
            .any(|g| g.cells.is_empty() && !g.resolved)
    }
}

/// Invalidate a still-valid cell, keeping board and groups in sync and
/// recording the change. Already-invalid cells are left untouched.
pub fn mark_invalid(
    board: &mut Board,
    groups: &mut GroupIndex,
    pos: Position,
    changes: &mut Vec<CellChange>,
) {
    if board.status(pos) != CellStatus::Valid {
        return;
    }
    board.cell_mut(pos).status = CellStatus::Invalid;
    groups.remove(board, pos);
    changes.push(CellChange::new(pos, CellStatus::Invalid));
}

/// Star a cell: resolve its row, column, and color, and invalidate its
/// whole conflict set. The returned outcome carries difficulty 0; starring
/// a forced cell costs nothing.
pub fn mark_star(board: &mut Board, groups: &mut GroupIndex, pos: Position) -> RuleOutcome {
    let mut changes = vec![CellChange::new(pos, CellStatus::Star)];
    board.cell_mut(pos).status = CellStatus::Star;
    groups.remove(board, pos);
    groups.rows[pos.row].resolved = true;
    groups.columns[pos.col].resolved = true;
    groups.colors[board.color(pos) as usize].resolved = true;

    let size = board.size();
    let conflicts = board.conflict_set(pos);
    for idx in conflicts.iter() {
        mark_invalid(board, groups, Position::from_index(idx, size), &mut changes);
    }
    RuleOutcome {
        rule: Rule::StarPlacement,
        changes,
        difficulty: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant_board() -> Board {
        Board::from_color_map(&[
            vec![0, 0, 1, 1],
            vec![0, 0, 1, 1],
            vec![2, 2, 3, 3],
            vec![2, 2, 3, 3],
        ])
    }

    #[test]
    fn fresh_board_partitions_every_cell_three_ways() {
        let board = quadrant_board();
        let groups = GroupIndex::from_board(&board);
        for group in groups.rows.iter().chain(&groups.columns).chain(&groups.colors) {
            assert_eq!(group.cells.len(), 4);
            assert!(!group.resolved);
        }
        assert!(!groups.has_contradiction());
    }

    #[test]
    fn stars_resolve_and_invalid_cells_are_absent() {
        let mut board = quadrant_board();
        board.place_star(Position::new(0, 0));
        let groups = GroupIndex::from_board(&board);

        assert!(groups.rows[0].resolved);
        assert!(groups.columns[0].resolved);
        assert!(groups.colors[0].resolved);
        assert!(groups.rows[0].cells.is_empty());
        // (1, 1) fell to the diagonal; row 1 keeps cols 2 and 3 only
        // (color 0 lost its other three cells to the star).
        assert_eq!(groups.rows[1].cells.len(), 2);
    }

    #[test]
    fn empty_unresolved_group_is_a_contradiction() {
        let mut board = quadrant_board();
        for col in 0..4 {
            board.cell_mut(Position::new(2, col)).status = CellStatus::Invalid;
        }
        let groups = GroupIndex::from_board(&board);
        assert!(groups.has_contradiction());
    }

    #[test]
    fn mark_star_syncs_board_and_groups() {
        let mut board = quadrant_board();
        let mut groups = GroupIndex::from_board(&board);
        let outcome = mark_star(&mut board, &mut groups, Position::new(0, 0));

        assert_eq!(outcome.difficulty, 0);
        assert_eq!(outcome.changes[0].status, CellStatus::Star);
        // Star + row/col/color/diagonal invalidations.
        assert!(outcome.changes.len() > 1);
        for change in &outcome.changes[1..] {
            assert_eq!(board.status(change.pos), CellStatus::Invalid);
            let idx = change.pos.index(board.size());
            assert!(!groups.rows[change.pos.row].cells.contains(idx));
        }
    }
}

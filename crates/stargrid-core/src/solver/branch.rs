//! Branch rule: bounded speculative lookahead with consequence
//! intersection.
//!
//! When some group is down to two candidates, clone the board once per
//! candidate, star it, and run the non-branching rules for up to three
//! lookahead steps per branch. Any invalidation that shows up in every
//! branch's cumulative change log is forced no matter which candidate is
//! right, so it is applied to the real board. Branch boards are full deep
//! copies; nothing aliases the parent.

use crate::solver::groups::{mark_invalid, mark_star, GroupIndex};
use crate::solver::types::{CellChange, Rule, RuleOutcome};
use crate::solver::{icicle, intersection, placement};
use crate::{Board, CellStatus, Position};

/// Lookahead steps per branch.
const MAX_LOOKAHEAD: usize = 3;

/// Cost multiplier per lookahead depth.
const DEPTH_COST: u32 = 5;

/// One iteration of the non-branching rule set on a speculative board.
fn lookahead_step(board: &mut Board, groups: &mut GroupIndex) -> Option<RuleOutcome> {
    if groups.has_contradiction() || board.is_solution() {
        return None;
    }
    if let Some(outcome) = placement::apply(board, groups) {
        return Some(outcome);
    }
    if let Some(outcome) = icicle::apply(board, groups) {
        return Some(outcome);
    }
    intersection::apply(board, groups)
}

struct SpeculativeBranch {
    board: Board,
    groups: GroupIndex,
    log: Vec<CellChange>,
}

pub fn apply(board: &mut Board, groups: &mut GroupIndex) -> Option<RuleOutcome> {
    let size = board.size();
    let target = groups
        .rows
        .iter()
        .chain(&groups.columns)
        .chain(&groups.colors)
        .find(|g| g.cells.len() == 2)?
        .cells;

    let mut branches: Vec<SpeculativeBranch> = target
        .iter()
        .map(|idx| {
            let mut branch_board = board.clone();
            let mut branch_groups = GroupIndex::from_board(&branch_board);
            let seed = mark_star(
                &mut branch_board,
                &mut branch_groups,
                Position::from_index(idx, size),
            );
            SpeculativeBranch {
                board: branch_board,
                groups: branch_groups,
                log: seed.changes,
            }
        })
        .collect();

    for step in 0..MAX_LOOKAHEAD {
        for branch in &mut branches {
            if let Some(outcome) = lookahead_step(&mut branch.board, &mut branch.groups) {
                branch.log.extend(outcome.changes);
            }
        }

        // Invalidations present in every branch are forced consequences.
        let (first, rest) = branches.split_first()?;
        let forced: Vec<CellChange> = first
            .log
            .iter()
            .copied()
            .filter(|change| change.status == CellStatus::Invalid)
            .filter(|change| rest.iter().all(|b| b.log.contains(change)))
            .collect();

        if !forced.is_empty() {
            let mut changes = Vec::new();
            for change in forced {
                mark_invalid(board, groups, change.pos, &mut changes);
            }
            if !changes.is_empty() {
                return Some(RuleOutcome {
                    rule: Rule::Branch,
                    changes,
                    difficulty: DEPTH_COST * (step as u32 + 1),
                });
            }
        }
    }
    None
}

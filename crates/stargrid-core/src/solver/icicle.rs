//! Icicle rules: locked-candidate deductions over merged row/column windows.
//!
//! Forward: if the valid cells of `k` rows (or columns) span exactly `k`
//! distinct colors, those colors are locked into the window and their cells
//! outside it are dead. Reverse: if exactly `k` of the colors present are
//! wholly contained in the window, the window has no room for any other
//! color. Windows of span 2 also include the one-row-gap pairs; contiguity
//! is not required for soundness.

use crate::solver::groups::{mark_invalid, GroupIndex};
use crate::solver::types::{Rule, RuleOutcome};
use crate::{Board, CellSet, Position};

/// Largest window span scanned.
const MAX_SPAN: usize = 3;

/// Index windows of `span` consecutive units, plus the gap pairs for span 2.
fn window_index_sets(n: usize, span: usize) -> Vec<Vec<usize>> {
    let mut sets: Vec<Vec<usize>> = (0..n + 1 - span)
        .map(|start| (start..start + span).collect())
        .collect();
    if span == 2 {
        for start in 0..n - span {
            sets.push(vec![start, start + 2]);
        }
    }
    sets
}

/// Union the valid cells of the window's groups, or None if any group in
/// the window already has its star.
fn merge_window(units: &[crate::solver::groups::Group], window: &[usize]) -> Option<CellSet> {
    if window.iter().any(|&idx| units[idx].resolved) {
        return None;
    }
    let mut merged = CellSet::new();
    for &idx in window {
        merged = merged.union(&units[idx].cells);
    }
    Some(merged)
}

fn distinct_colors(board: &Board, merged: &CellSet) -> Vec<usize> {
    let mut colors = Vec::new();
    for idx in merged.iter() {
        let color = board.color(Position::from_index(idx, board.size())) as usize;
        if !colors.contains(&color) {
            colors.push(color);
        }
    }
    colors
}

fn check_merged_group(
    board: &mut Board,
    groups: &mut GroupIndex,
    merged: &CellSet,
    span: usize,
) -> Option<RuleOutcome> {
    let size = board.size();
    let colors = distinct_colors(board, merged);

    // Forward: exactly `span` colors in the window, with spillover outside.
    if colors.len() == span {
        let mut union = CellSet::new();
        for &color in &colors {
            union = union.union(&groups.colors[color].cells);
        }
        if union.len() > merged.len() {
            let mut changes = Vec::new();
            for idx in union.difference(merged).iter() {
                mark_invalid(board, groups, Position::from_index(idx, size), &mut changes);
            }
            return Some(RuleOutcome {
                rule: Rule::Icicle,
                changes,
                difficulty: span as u32,
            });
        }
    }

    // Reverse: exactly `span` of the colors present are trapped inside.
    let locked: Vec<usize> = colors
        .iter()
        .copied()
        .filter(|&color| groups.colors[color].cells.is_subset(merged))
        .collect();
    if locked.len() == span && colors.len() > span {
        let mut changes = Vec::new();
        for idx in merged.iter() {
            let pos = Position::from_index(idx, size);
            if !locked.contains(&(board.color(pos) as usize)) {
                mark_invalid(board, groups, pos, &mut changes);
            }
        }
        return Some(RuleOutcome {
            rule: Rule::ReverseIcicle,
            changes,
            difficulty: span as u32,
        });
    }

    None
}

/// Scan windows of span 1..=3 over rows then columns; fire on the first
/// applicable forward or reverse deduction.
pub fn apply(board: &mut Board, groups: &mut GroupIndex) -> Option<RuleOutcome> {
    let size = board.size();
    for span in 1..=MAX_SPAN.min(size - 1) {
        let windows = window_index_sets(size, span);
        let mut merged_sets: Vec<CellSet> = windows
            .iter()
            .filter_map(|w| merge_window(&groups.rows, w))
            .collect();
        merged_sets.extend(windows.iter().filter_map(|w| merge_window(&groups.columns, w)));

        for merged in merged_sets {
            if let Some(outcome) = check_merged_group(board, groups, &merged, span) {
                return Some(outcome);
            }
        }
    }
    None
}

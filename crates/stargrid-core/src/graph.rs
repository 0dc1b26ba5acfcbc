//! RegionGraph: randomized graph contraction that partitions the grid into
//! connected color regions.
//!
//! Starts as n^2 single-cell regions with weight-2 edges between orthogonal
//! neighbors, then repeatedly merges the endpoints of a randomly sampled
//! edge until n regions remain. Sampling is biased by `w^-6`, which strongly
//! favors edges touching small regions and yields irregular, elongated
//! region shapes instead of near-square blobs.

use crate::{EngineError, Position};
use rand::Rng;
use std::collections::BTreeMap;

/// Steepness of the inverse-power sampling bias.
const EDGE_BIAS_EXPONENT: i32 = 6;

/// Initial weight of every grid adjacency edge.
const INITIAL_EDGE_WEIGHT: u64 = 2;

/// A region under construction: the cells it covers, in absorption order.
#[derive(Debug, Clone)]
pub struct RegionNode {
    pub cells: Vec<usize>,
    pub size: usize,
}

/// Undirected weighted graph of regions, keyed by the original cell index
/// of each region's founding cell.
#[derive(Debug, Clone)]
pub struct RegionGraph {
    nodes: BTreeMap<usize, RegionNode>,
    /// Edge keys are normalized to (low, high). Weights bias sampling only;
    /// they are not graph distances.
    edges: BTreeMap<(usize, usize), u64>,
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl RegionGraph {
    /// The initial adjacency graph for an n x n grid: one single-cell region
    /// per cell, an edge between every pair of orthogonal neighbors.
    pub fn grid(size: usize) -> Self {
        let mut nodes = BTreeMap::new();
        let mut edges = BTreeMap::new();
        for row in 0..size {
            for col in 0..size {
                let idx = row * size + col;
                nodes.insert(
                    idx,
                    RegionNode {
                        cells: vec![idx],
                        size: 1,
                    },
                );
                if row + 1 < size {
                    edges.insert(edge_key(idx, idx + size), INITIAL_EDGE_WEIGHT);
                }
                if col + 1 < size {
                    edges.insert(edge_key(idx, idx + 1), INITIAL_EDGE_WEIGHT);
                }
            }
        }
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: usize) -> Option<&RegionNode> {
        self.nodes.get(&id)
    }

    /// Regions in stable key order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionNode> {
        self.nodes.values()
    }

    /// Merge `elim` into `stay`: stay absorbs elim's cells, the stay-elim
    /// edge disappears, and every other neighbor of elim is rewired to stay
    /// with weight `neighbor.size + stay.size` (stay's post-merge size).
    pub fn merge(&mut self, stay: usize, elim: usize) -> Result<(), EngineError> {
        if !self.nodes.contains_key(&stay) {
            return Err(EngineError::MissingNode(stay));
        }
        let elim_node = self
            .nodes
            .remove(&elim)
            .ok_or(EngineError::MissingNode(elim))?;

        self.edges.remove(&edge_key(stay, elim));

        let stay_size = {
            let node = self.nodes.get_mut(&stay).expect("stay checked above");
            node.cells.extend(elim_node.cells);
            node.size += elim_node.size;
            node.size
        };

        let rewired: Vec<(usize, usize)> = self
            .edges
            .keys()
            .filter(|&&(a, b)| a == elim || b == elim)
            .copied()
            .collect();
        for key in rewired {
            self.edges.remove(&key);
            let neighbor = if key.0 == elim { key.1 } else { key.0 };
            if neighbor != stay {
                let neighbor_size = self.nodes[&neighbor].size;
                self.edges
                    .insert(edge_key(stay, neighbor), (neighbor_size + stay_size) as u64);
            }
        }
        Ok(())
    }

    /// Single-pass weighted edge selection: per-edge probability `w^-6`,
    /// summed to a total, then a uniform draw walked over the cumulative
    /// distribution.
    fn sample_edge<R: Rng>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.edges.is_empty() {
            return None;
        }
        let probs: Vec<f64> = self
            .edges
            .values()
            .map(|&w| 1.0 / (w as f64).powi(EDGE_BIAS_EXPONENT))
            .collect();
        let total: f64 = probs.iter().sum();
        let draw = rng.gen::<f64>() * total;

        let mut cumulative = 0.0;
        for (key, prob) in self.edges.keys().zip(probs) {
            cumulative += prob;
            if draw < cumulative {
                return Some(*key);
            }
        }
        // Floating-point slack on the final accumulation step.
        self.edges.keys().last().copied()
    }

    /// Contract down to exactly `regions` regions via `n^2 - n` random
    /// merges. Merges never disconnect a region, so each survivor is a
    /// connected set of cells.
    pub fn contract<R: Rng>(&mut self, regions: usize, rng: &mut R) -> Result<(), EngineError> {
        let merges = self.nodes.len().saturating_sub(regions);
        for _ in 0..merges {
            let (stay, elim) = self.sample_edge(rng).ok_or(EngineError::OutOfEdges)?;
            self.merge(stay, elim)?;
        }
        Ok(())
    }

    /// Scatter each region's cells back onto the grid, with the region's
    /// position in stable key order as its color.
    pub fn color_map(&self, size: usize) -> Vec<Vec<u8>> {
        let mut map = vec![vec![0u8; size]; size];
        for (color, node) in self.regions().enumerate() {
            for &idx in &node.cells {
                let pos = Position::from_index(idx, size);
                map[pos.row][pos.col] = color as u8;
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grid_has_expected_shape() {
        let graph = RegionGraph::grid(4);
        assert_eq!(graph.node_count(), 16);
        // 2 * n * (n - 1) adjacency edges.
        assert_eq!(graph.edge_count(), 24);
        assert!(graph.regions().all(|n| n.size == 1 && n.cells.len() == 1));
    }

    #[test]
    fn merge_combines_cells_and_rewires() {
        let mut graph = RegionGraph::grid(3);
        graph.merge(0, 1).unwrap();

        let stay = graph.node(0).unwrap();
        assert_eq!(stay.cells, vec![0, 1]);
        assert_eq!(stay.size, 2);
        assert!(graph.node(1).is_none());
        // Old neighbor of the eliminated node now borders the merged region
        // with weight neighbor.size + stay.size.
        assert_eq!(graph.edges.get(&(0, 2)), Some(&3));
        assert_eq!(graph.edges.get(&(0, 4)), Some(&3));
        assert!(!graph.edges.contains_key(&(0, 1)));
    }

    #[test]
    fn merge_missing_node_is_an_invariant_violation() {
        let mut graph = RegionGraph::grid(3);
        assert!(matches!(
            graph.merge(0, 99),
            Err(EngineError::MissingNode(99))
        ));
        assert!(matches!(
            graph.merge(99, 0),
            Err(EngineError::MissingNode(99))
        ));
    }

    #[test]
    fn contraction_partitions_all_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 4..=10 {
            let mut graph = RegionGraph::grid(size);
            graph.contract(size, &mut rng).unwrap();
            assert_eq!(graph.node_count(), size);

            let mut seen = vec![false; size * size];
            for node in graph.regions() {
                assert!(!node.cells.is_empty());
                assert_eq!(node.size, node.cells.len());
                for &idx in &node.cells {
                    assert!(!seen[idx], "cell {idx} covered twice");
                    seen[idx] = true;
                }
            }
            assert!(seen.iter().all(|&s| s), "not every cell covered");
        }
    }

    #[test]
    fn contracted_regions_are_connected() {
        let mut rng = StdRng::seed_from_u64(11);
        let size = 6;
        let mut graph = RegionGraph::grid(size);
        graph.contract(size, &mut rng).unwrap();

        for node in graph.regions() {
            // Flood fill within the region's cell set.
            let cells: std::collections::BTreeSet<usize> = node.cells.iter().copied().collect();
            let mut reached = std::collections::BTreeSet::new();
            let mut stack = vec![node.cells[0]];
            while let Some(idx) = stack.pop() {
                if !reached.insert(idx) {
                    continue;
                }
                let pos = Position::from_index(idx, size);
                let mut neighbors = Vec::new();
                if pos.row > 0 {
                    neighbors.push(idx - size);
                }
                if pos.row + 1 < size {
                    neighbors.push(idx + size);
                }
                if pos.col > 0 {
                    neighbors.push(idx - 1);
                }
                if pos.col + 1 < size {
                    neighbors.push(idx + 1);
                }
                stack.extend(neighbors.into_iter().filter(|n| cells.contains(n)));
            }
            assert_eq!(reached, cells, "region not connected");
        }
    }

    #[test]
    fn color_map_uses_stable_region_indices() {
        let mut graph = RegionGraph::grid(4);
        let mut rng = StdRng::seed_from_u64(3);
        graph.contract(4, &mut rng).unwrap();

        let map = graph.color_map(4);
        let mut counts = [0usize; 4];
        for row in &map {
            for &c in row {
                assert!((c as usize) < 4);
                counts[c as usize] += 1;
            }
        }
        assert!(counts.iter().all(|&c| c > 0));
        assert_eq!(counts.iter().sum::<usize>(), 16);
    }
}

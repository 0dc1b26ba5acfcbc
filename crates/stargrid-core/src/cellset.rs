//! CellSet: a bitset over linear cell indices.
//!
//! Boards are at most 10x10, so every row/column/color group and every
//! conflict set fits in a single u128. Groups hold index sets into the
//! board's cell arena rather than cell references.

/// Set of linear cell indices (`row * size + col`), backed by a u128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSet(u128);

impl CellSet {
    /// The empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Set containing every index in `0..len`.
    pub fn full(len: usize) -> Self {
        debug_assert!(len <= 128);
        if len == 128 {
            Self(u128::MAX)
        } else {
            Self((1u128 << len) - 1)
        }
    }

    pub fn insert(&mut self, idx: usize) {
        self.0 |= 1u128 << idx;
    }

    pub fn remove(&mut self, idx: usize) {
        self.0 &= !(1u128 << idx);
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.0 & (1u128 << idx) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The sole element, if the set has exactly one.
    pub fn single(&self) -> Option<usize> {
        if self.len() == 1 {
            Some(self.0.trailing_zeros() as usize)
        } else {
            None
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Iterate indices in ascending order.
    pub fn iter(&self) -> CellSetIter {
        CellSetIter(self.0)
    }
}

impl FromIterator<usize> for CellSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = Self::new();
        for idx in iter {
            set.insert(idx);
        }
        set
    }
}

pub struct CellSetIter(u128);

impl Iterator for CellSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(idx)
    }
}

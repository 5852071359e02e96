//! Index-based neighbor relation.
//!
//! Points refer to each other by position in the input sequence, never by
//! reference, so the mutual back-links of the neighbor graph carry no
//! ownership cycles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-point neighbor list. Gabriel graphs in the plane average fewer than
/// four neighbors per point, so most lists stay inline.
pub type NeighborList = SmallVec<[usize; 6]>;

/// Symmetric adjacency: `j ∈ of(i)` iff `i ∈ of(j)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborSet {
    lists: Vec<NeighborList>,
}

impl NeighborSet {
    /// `n` points, no neighbor pairs.
    pub fn new(n: usize) -> Self {
        Self { lists: vec![NeighborList::new(); n] }
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Record `{a, b}` on both endpoints. Self-pairs and repeats are ignored.
    ///
    /// # Panics
    ///
    /// If either index is `>= len()`.
    pub fn link(&mut self, a: usize, b: usize) {
        if a == b || self.contains(a, b) {
            return;
        }
        insert_sorted(&mut self.lists[a], b);
        insert_sorted(&mut self.lists[b], a);
    }

    /// Neighbors of `i`, ascending. Empty for out-of-range `i`.
    pub fn of(&self, i: usize) -> &[usize] {
        self.lists.get(i).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.of(a).binary_search(&b).is_ok()
    }

    /// Each unordered pair once, as `(a, b)` with `a < b`, ordered by `a` then `b`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.lists.iter().enumerate().flat_map(|(a, list)| {
            list.iter().copied().filter(move |&b| b > a).map(move |b| (a, b))
        })
    }

    /// Number of unordered neighbor pairs.
    pub fn edge_count(&self) -> usize {
        self.lists.iter().map(|l| l.len()).sum::<usize>() / 2
    }

    /// Checks that every index is in range and every link is mirrored.
    pub(crate) fn is_consistent(&self) -> bool {
        let n = self.lists.len();
        self.lists.iter().enumerate().all(|(a, list)| {
            list.windows(2).all(|w| w[0] < w[1])
                && list.iter().all(|&b| b < n && b != a && self.contains(b, a))
        })
    }
}

fn insert_sorted(list: &mut NeighborList, value: usize) {
    if let Err(pos) = list.binary_search(&value) {
        list.insert(pos, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_symmetric_and_sorted() {
        let mut set = NeighborSet::new(4);
        set.link(2, 0);
        set.link(2, 3);
        set.link(1, 2);

        assert_eq!(set.of(2), &[0, 1, 3]);
        assert_eq!(set.of(0), &[2]);
        assert!(set.contains(3, 2));
        assert!(!set.contains(0, 1));
        assert_eq!(set.edge_count(), 3);
        assert!(set.is_consistent());
    }

    #[test]
    fn repeats_and_self_links_are_ignored() {
        let mut set = NeighborSet::new(2);
        set.link(0, 1);
        set.link(1, 0);
        set.link(1, 1);
        assert_eq!(set.edge_count(), 1);
        assert_eq!(set.of(1), &[0]);
    }

    #[test]
    fn pairs_lists_each_edge_once() {
        let mut set = NeighborSet::new(4);
        set.link(3, 1);
        set.link(0, 1);
        set.link(2, 3);
        let pairs: Vec<_> = set.pairs().collect();
        assert_eq!(pairs, vec![(0, 1), (1, 3), (2, 3)]);
    }

    #[test]
    fn out_of_range_reads_are_empty() {
        let set = NeighborSet::new(1);
        assert!(set.of(7).is_empty());
        assert!(!set.contains(7, 0));
    }

    #[test]
    fn inconsistent_lists_are_detected() {
        let mut lists = vec![NeighborList::new(), NeighborList::new()];
        lists[0].push(1);
        let set = NeighborSet { lists };
        assert!(!set.is_consistent());
    }
}

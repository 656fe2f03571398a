//! Disjoint-set structure over the 24 road-graph nodes, used to detect
//! cycles as roads are incrementally placed during the search.
//!
//! The whole structure is 24 bytes, so branch points in the backtracker
//! snapshot it by value rather than tracking and reverting individual
//! union operations.

use crate::board::NUM_NODES;

#[derive(Debug, Clone, Copy)]
pub struct UnionFind {
    parent: [u8; NUM_NODES],
}

impl Default for UnionFind {
    fn default() -> Self {
        let mut parent = [0u8; NUM_NODES];
        for (i, slot) in parent.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { parent }
    }
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }
        // Path compression.
        let mut cur = i;
        while self.parent[cur] as usize != root {
            let next = self.parent[cur] as usize;
            self.parent[cur] = root as u8;
            cur = next;
        }
        root
    }

    /// Unions the sets containing `i` and `j`. Returns `true` if they were
    /// already in the same set (i.e. this union would have closed a cycle).
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let (ri, rj) = (self.find(i), self.find(j));
        if ri == rj {
            return true;
        }
        self.parent[ri] = rj as u8;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_nodes_are_distinct_sets() {
        let mut uf = UnionFind::new();
        for i in 0..NUM_NODES {
            assert_eq!(uf.find(i), i);
        }
    }

    #[test]
    fn union_detects_cycle() {
        let mut uf = UnionFind::new();
        assert!(!uf.union(0, 1));
        assert!(!uf.union(1, 2));
        // 0-1-2 already connected; closing 0-2 would form a cycle.
        assert!(uf.union(0, 2));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut uf = UnionFind::new();
        uf.union(0, 1);
        let mut branch_a = uf;
        let mut branch_b = uf;
        branch_a.union(1, 2);
        branch_b.union(2, 3);
        // Mutating one branch's snapshot must not affect the other's.
        assert_eq!(branch_a.find(0), branch_a.find(2));
        assert_ne!(branch_b.find(0), branch_b.find(2));
        assert_eq!(branch_b.find(2), branch_b.find(3));
    }
}

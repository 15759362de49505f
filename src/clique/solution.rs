//! Clique solution state.
//!
//! Unlike the stable solution, membership is tracked against *non-edges*:
//! `penalty` counts ordered pairs `(u, v) ∈ S×S`, `u ≠ v`, `uv ∉ E`.
//! `penalty == 0` means `S` is a clique.

use crate::containers::IndexedSet;
use crate::graph::{Graph, Weight};

/// A (possibly infeasible) vertex subset, with incremental weight and
/// non-edge-penalty bookkeeping against a fixed [`Graph`].
#[derive(Clone)]
pub struct Solution<'g> {
    graph: &'g Graph,
    members: IndexedSet,
    weight: Weight,
    penalty: usize,
}

impl<'g> Solution<'g> {
    /// Creates an empty solution over `graph`.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            members: IndexedSet::new(graph.num_vertices()),
            weight: 0,
            penalty: 0,
        }
    }

    /// The graph this solution is defined over.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Whether `v` is currently selected.
    pub fn contains(&self, v: usize) -> bool {
        self.members.contains(v)
    }

    /// Total weight of selected vertices.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Number of selected vertices.
    pub fn size(&self) -> usize {
        self.members.size()
    }

    /// Count of ordered non-adjacent pairs within `S`. Zero iff `S` is a
    /// clique.
    pub fn penalty(&self) -> usize {
        self.penalty
    }

    /// Feasible iff `S` is a clique.
    pub fn feasible(&self) -> bool {
        self.penalty == 0
    }

    /// Iterates over selected vertices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter_in()
    }

    /// Iterates over unselected vertices.
    pub fn iter_out(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter_out()
    }

    /// Number of currently selected vertices that are *not* adjacent to `v`
    /// (0 means adding `v` keeps the clique property).
    pub fn non_neighbor_member_count(&self, v: usize) -> usize {
        let neighbors_in = self
            .graph
            .neighbors(v)
            .iter()
            .filter(|nb| self.members.contains(nb.vertex))
            .count();
        self.members.size() - neighbors_in
    }

    /// Adds `v` to the solution, updating weight and penalty.
    pub fn add(&mut self, v: usize) {
        let non_neighbors_in = self.non_neighbor_member_count(v);
        self.penalty += 2 * non_neighbors_in;
        self.members.add(v);
        self.weight += self.graph.weight(v);
    }

    /// Removes `v` from the solution, updating weight and penalty.
    pub fn remove(&mut self, v: usize) {
        self.members.remove(v);
        let non_neighbors_in = self.non_neighbor_member_count(v);
        self.penalty -= 2 * non_neighbors_in;
        self.weight -= self.graph.weight(v);
    }

    /// Sorted vertex ids currently selected.
    pub fn to_vertex_list(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.iter().collect();
        v.sort_unstable();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DuplicatePolicy, GraphBuilder};

    fn path3() -> Graph {
        // 0 - 1 - 2, so {0, 2} is not a clique.
        let mut b = GraphBuilder::new();
        b.add_vertices(3);
        b.set_unweighted();
        b.add_edge(0, 1, DuplicatePolicy::Fail).unwrap();
        b.add_edge(1, 2, DuplicatePolicy::Fail).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn single_vertex_is_feasible() {
        let g = path3();
        let mut s = Solution::new(&g);
        s.add(1);
        assert!(s.feasible());
    }

    #[test]
    fn non_adjacent_pair_is_infeasible() {
        let g = path3();
        let mut s = Solution::new(&g);
        s.add(0);
        s.add(2);
        assert!(!s.feasible());
        assert_eq!(s.penalty(), 2);
    }

    #[test]
    fn adjacent_pair_is_feasible() {
        let g = path3();
        let mut s = Solution::new(&g);
        s.add(0);
        s.add(1);
        assert!(s.feasible());
    }

    #[test]
    fn removing_offending_vertex_restores_feasibility() {
        let g = path3();
        let mut s = Solution::new(&g);
        s.add(0);
        s.add(2);
        s.remove(2);
        assert!(s.feasible());
        assert_eq!(s.penalty(), 0);
    }

    #[test]
    fn triangle_stays_feasible_as_it_fills() {
        let mut b = GraphBuilder::new();
        b.add_vertices(3);
        b.set_unweighted();
        for (u, v) in [(0, 1), (1, 2), (0, 2)] {
            b.add_edge(u, v, DuplicatePolicy::Fail).unwrap();
        }
        let g = b.build().unwrap();
        let mut s = Solution::new(&g);
        s.add(0);
        s.add(1);
        s.add(2);
        assert!(s.feasible());
        assert_eq!(s.weight(), 3);
    }
}

//! `update_core` weight-pruning operator.
//!
//! Maintains, for every vertex still in the "relevant" set `R`, an upper
//! bound `best(v) = w(v) + Σ_{u∈N(v)∩R} w(u)` on the weight of any clique
//! inside `R` that contains `v`. Vertices whose bound falls to or below the
//! incumbent can never extend a clique that beats it, so they are pruned
//! from `R`, cascading the weight loss to their still-relevant neighbors.

use crate::graph::{Graph, Weight};

/// Tracks the shrinking "relevant" vertex set `R` across repeated calls to
/// [`CoreBound::update`]. `best(v)` is not retained between calls: each call
/// recomputes it from scratch for vertices still in `R`, leaving a pruned
/// vertex's contribution at `0` rather than whatever bound it held the
/// instant it was removed.
pub struct CoreBound<'g> {
    graph: &'g Graph,
    relevant: Vec<bool>,
}

impl<'g> CoreBound<'g> {
    /// Starts with every vertex relevant.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            relevant: vec![true; graph.num_vertices()],
        }
    }

    /// Whether `v` is still in `R`.
    pub fn is_relevant(&self, v: usize) -> bool {
        self.relevant[v]
    }

    /// Prunes every vertex whose bound is at or below `incumbent_weight`,
    /// cascading removals, and returns `max_v best(v)`.
    ///
    /// `best` is a fresh all-zero array on every call: only vertices still
    /// in `R` at the start of this call get a real `best(v) = w(v) +
    /// Σ_{u∈N(v)∩R} w(u)` value, so a vertex pruned in an earlier call
    /// contributes exactly `0` here, not its last-held bound. This matches
    /// the reference implementation, which allocates `best_values` fresh on
    /// every call rather than carrying it across calls.
    pub fn update(&mut self, incumbent_weight: Weight) -> Weight {
        let n = self.graph.num_vertices();
        let mut best = vec![0; n];
        let mut queue: Vec<usize> = Vec::new();
        for v in 0..n {
            if !self.relevant[v] {
                continue;
            }
            best[v] = self.graph.weight(v)
                + self
                    .graph
                    .neighbors(v)
                    .iter()
                    .filter(|nb| self.relevant[nb.vertex])
                    .map(|nb| self.graph.weight(nb.vertex))
                    .sum::<Weight>();
            if best[v] <= incumbent_weight {
                queue.push(v);
            }
        }
        let mut head = 0;
        while head < queue.len() {
            let v = queue[head];
            head += 1;
            if !self.relevant[v] {
                continue;
            }
            self.relevant[v] = false;
            for nb in self.graph.neighbors(v) {
                if self.relevant[nb.vertex] {
                    best[nb.vertex] -= self.graph.weight(v);
                    if best[nb.vertex] <= incumbent_weight {
                        queue.push(nb.vertex);
                    }
                }
            }
        }
        best.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DuplicatePolicy, GraphBuilder};

    fn path3() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_vertices(3);
        b.set_unweighted();
        b.add_edge(0, 1, DuplicatePolicy::Fail).unwrap();
        b.add_edge(1, 2, DuplicatePolicy::Fail).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn pruning_cascades_along_a_path() {
        let g = path3();
        let mut core = CoreBound::new(&g);
        // best(0)=2, best(1)=3, best(2)=2. With incumbent 2, endpoints (best
        // == incumbent) are pruned, dragging vertex 1's bound down to 1,
        // which then prunes vertex 1 too. The returned bound is still the
        // max of the last-computed values (2, 1, 2), not 0.
        let bound = core.update(2);
        assert!(!core.is_relevant(0));
        assert!(!core.is_relevant(2));
        assert!(!core.is_relevant(1));
        assert_eq!(bound, 2);
    }

    #[test]
    fn high_incumbent_prunes_nothing() {
        let g = path3();
        let mut core = CoreBound::new(&g);
        let bound = core.update(0);
        assert!(core.is_relevant(1));
        assert_eq!(bound, 3);
    }
}

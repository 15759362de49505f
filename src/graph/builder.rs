//! [`GraphBuilder`]: the only way to construct a [`Graph`].

use super::{node_index, Graph, Weight};
use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use std::collections::HashSet;

/// How `add_edge` should handle a pair already present in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Add the edge again (the graph keeps a parallel edge).
    Allow,
    /// Silently skip the edge; the existing one is kept.
    Ignore,
    /// Return [`Error::DuplicateEdge`].
    Fail,
}

/// Incremental builder for [`Graph`]. `build()` consumes it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    weights: Vec<Weight>,
    raw_edges: Vec<(usize, usize)>,
    seen_pairs: HashSet<(usize, usize)>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `n` vertices with weight 0.
    pub fn add_vertices(&mut self, n: usize) -> &mut Self {
        self.weights.resize(self.weights.len() + n, 0);
        self
    }

    /// Appends a single vertex with weight `w`. Returns its index.
    pub fn add_vertex(&mut self, w: Weight) -> Result<usize> {
        if w < 0 {
            return Err(Error::NegativeWeight {
                vertex: self.weights.len(),
                weight: w,
            });
        }
        self.weights.push(w);
        Ok(self.weights.len() - 1)
    }

    /// Sets the weight of an existing vertex. Rejects negative weights.
    pub fn set_weight(&mut self, v: usize, w: Weight) -> Result<()> {
        if v >= self.weights.len() {
            return Err(Error::VertexOutOfBounds {
                index: v,
                num_vertices: self.weights.len(),
            });
        }
        if w < 0 {
            return Err(Error::NegativeWeight { vertex: v, weight: w });
        }
        self.weights[v] = w;
        Ok(())
    }

    /// Sets every vertex weight to 1.
    pub fn set_unweighted(&mut self) -> &mut Self {
        for w in &mut self.weights {
            *w = 1;
        }
        self
    }

    /// Adds an edge `{u, v}`. Self-loops are always rejected; repeated pairs
    /// are handled per `policy`.
    pub fn add_edge(&mut self, u: usize, v: usize, policy: DuplicatePolicy) -> Result<()> {
        let n = self.weights.len();
        if u >= n {
            return Err(Error::VertexOutOfBounds { index: u, num_vertices: n });
        }
        if v >= n {
            return Err(Error::VertexOutOfBounds { index: v, num_vertices: n });
        }
        if u == v {
            return Err(Error::SelfLoop { vertex: u });
        }
        let key = (u.min(v), u.max(v));
        let is_duplicate = self.seen_pairs.contains(&key);
        if is_duplicate {
            match policy {
                DuplicatePolicy::Allow => {}
                DuplicatePolicy::Ignore => return Ok(()),
                DuplicatePolicy::Fail => return Err(Error::DuplicateEdge { u, v }),
            }
        }
        self.seen_pairs.insert(key);
        self.raw_edges.push((u, v));
        Ok(())
    }

    /// Number of vertices added so far.
    pub fn num_vertices(&self) -> usize {
        self.weights.len()
    }

    /// Consumes the builder, computing `highest_degree`, `total_weight` and
    /// connected components.
    pub fn build(self) -> Result<Graph> {
        let n = self.weights.len();
        let mut pg = UnGraph::<Weight, ()>::with_capacity(n, self.raw_edges.len());
        for &w in &self.weights {
            pg.add_node(w);
        }
        for (u, v) in self.raw_edges {
            pg.add_edge(node_index(u), node_index(v), ());
        }
        Ok(Graph::from_petgraph(pg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_loop() {
        let mut b = GraphBuilder::new();
        b.add_vertices(2);
        assert_eq!(
            b.add_edge(0, 0, DuplicatePolicy::Allow),
            Err(Error::SelfLoop { vertex: 0 })
        );
    }

    #[test]
    fn duplicate_policy_fail() {
        let mut b = GraphBuilder::new();
        b.add_vertices(2);
        b.add_edge(0, 1, DuplicatePolicy::Fail).unwrap();
        assert_eq!(
            b.add_edge(1, 0, DuplicatePolicy::Fail),
            Err(Error::DuplicateEdge { u: 1, v: 0 })
        );
    }

    #[test]
    fn duplicate_policy_ignore() {
        let mut b = GraphBuilder::new();
        b.add_vertices(2);
        b.add_edge(0, 1, DuplicatePolicy::Ignore).unwrap();
        b.add_edge(0, 1, DuplicatePolicy::Ignore).unwrap();
        let g = b.build().unwrap();
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn duplicate_policy_allow_keeps_parallel_edge() {
        let mut b = GraphBuilder::new();
        b.add_vertices(2);
        b.add_edge(0, 1, DuplicatePolicy::Allow).unwrap();
        b.add_edge(0, 1, DuplicatePolicy::Allow).unwrap();
        let g = b.build().unwrap();
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn negative_weight_rejected() {
        let mut b = GraphBuilder::new();
        b.add_vertices(1);
        assert_eq!(
            b.set_weight(0, -5),
            Err(Error::NegativeWeight { vertex: 0, weight: -5 })
        );
    }

    #[test]
    fn vertex_out_of_bounds() {
        let mut b = GraphBuilder::new();
        b.add_vertices(1);
        assert!(matches!(
            b.add_edge(0, 3, DuplicatePolicy::Allow),
            Err(Error::VertexOutOfBounds { index: 3, num_vertices: 1 })
        ));
    }
}

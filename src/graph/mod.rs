//! The immutable graph model.
//!
//! A [`Graph`] is built once via [`GraphBuilder`] and never mutated
//! afterwards; every algorithm in the crate either reads it directly or
//! operates on a smaller [`Graph`] produced by the reduction engine plus a
//! [`crate::stable::LiftPlan`] back to this one.

mod builder;

pub use builder::{DuplicatePolicy, GraphBuilder};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// Vertex and edge weights are non-negative integers.
pub type Weight = i64;

/// One neighbor record on a vertex's adjacency list: the edge connecting to
/// it, and the vertex on the other end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub edge_id: usize,
    pub vertex: usize,
}

/// An undirected edge `{v1, v2}`, `v1 != v2`, tagged with the id of the
/// connected component it lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub v1: usize,
    pub v2: usize,
    pub component: usize,
}

/// Immutable vertex-weighted undirected graph with precomputed connected
/// components, built via [`GraphBuilder::build`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    weights: Vec<Weight>,
    adjacency: Vec<Vec<Neighbor>>,
    edges: Vec<Edge>,
    vertex_component: Vec<usize>,
    num_components: usize,
    highest_degree: usize,
    total_weight: Weight,
}

impl Graph {
    /// Number of vertices, `n`.
    pub fn num_vertices(&self) -> usize {
        self.weights.len()
    }

    /// Number of edges, `m`.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Weight of vertex `v`.
    pub fn weight(&self, v: usize) -> Weight {
        self.weights[v]
    }

    /// Degree of vertex `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Neighbor records of vertex `v`: `{edge_id, other_vertex_id}`.
    pub fn neighbors(&self, v: usize) -> &[Neighbor] {
        &self.adjacency[v]
    }

    /// Whether `u` and `v` are adjacent. O(min degree).
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        if self.degree(u) <= self.degree(v) {
            self.adjacency[u].iter().any(|nb| nb.vertex == v)
        } else {
            self.adjacency[v].iter().any(|nb| nb.vertex == u)
        }
    }

    /// The edge `{v1, v2, component}` with id `e`.
    pub fn edge(&self, e: usize) -> Edge {
        self.edges[e]
    }

    /// All edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Connected component id of vertex `v`.
    pub fn component(&self, v: usize) -> usize {
        self.vertex_component[v]
    }

    /// Total number of connected components (isolated vertices count as
    /// singleton components).
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Highest vertex degree in the graph.
    pub fn highest_degree(&self) -> usize {
        self.highest_degree
    }

    /// Sum of every vertex weight.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Builds the complement graph: same vertex set, `uv` is an edge iff it
    /// was absent here. Weights are preserved; components are recomputed
    /// (the complement of a disconnected graph is usually connected).
    pub fn complement(&self) -> Graph {
        let n = self.num_vertices();
        let mut present = vec![vec![false; n]; n];
        for e in &self.edges {
            present[e.v1][e.v2] = true;
            present[e.v2][e.v1] = true;
        }
        let mut builder = GraphBuilder::new();
        builder.add_vertices(n);
        for v in 0..n {
            builder.set_weight(v, self.weights[v]).unwrap();
        }
        for u in 0..n {
            for v in (u + 1)..n {
                if !present[u][v] {
                    builder
                        .add_edge(u, v, DuplicatePolicy::Fail)
                        .expect("complement never introduces a duplicate edge");
                }
            }
        }
        builder.build().expect("complement of a valid graph is valid")
    }

    /// Builds a [`Graph`] from a raw `petgraph` undirected graph carrying
    /// vertex weights, computing components, degrees and totals once.
    pub(crate) fn from_petgraph(pg: UnGraph<Weight, ()>) -> Self {
        let n = pg.node_count();
        let mut weights = vec![0; n];
        for idx in pg.node_indices() {
            weights[idx.index()] = pg[idx];
        }

        let mut adjacency = vec![Vec::new(); n];
        let mut edges = Vec::with_capacity(pg.edge_count());
        for edge_ref in pg.edge_references() {
            let v1 = edge_ref.source().index();
            let v2 = edge_ref.target().index();
            let edge_id = edges.len();
            edges.push(Edge {
                v1,
                v2,
                component: 0,
            });
            adjacency[v1].push(Neighbor {
                edge_id,
                vertex: v2,
            });
            adjacency[v2].push(Neighbor {
                edge_id,
                vertex: v1,
            });
        }

        let vertex_component = compute_components(n, &adjacency);
        let num_components = vertex_component.iter().copied().max().map_or(0, |m| m + 1);
        for edge in &mut edges {
            edge.component = vertex_component[edge.v1];
        }

        let highest_degree = adjacency.iter().map(|a| a.len()).max().unwrap_or(0);
        let total_weight = weights.iter().sum();

        Graph {
            weights,
            adjacency,
            edges,
            vertex_component,
            num_components,
            highest_degree,
            total_weight,
        }
    }
}

/// Breadth-first labeling of connected components.
fn compute_components(n: usize, adjacency: &[Vec<Neighbor>]) -> Vec<usize> {
    let mut component = vec![usize::MAX; n];
    let mut next_component = 0;
    let mut stack = Vec::new();
    for start in 0..n {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = next_component;
        stack.push(start);
        while let Some(v) = stack.pop() {
            for nb in &adjacency[v] {
                if component[nb.vertex] == usize::MAX {
                    component[nb.vertex] = next_component;
                    stack.push(nb.vertex);
                }
            }
        }
        next_component += 1;
    }
    component
}

/// Converts a vertex id into a `petgraph` node index. Used by the builder.
pub(crate) fn node_index(v: usize) -> NodeIndex {
    NodeIndex::new(v)
}

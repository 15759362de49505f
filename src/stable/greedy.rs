//! Greedy initial-solution constructors for MWIS.
//!
//! Each constructor is a pure function of `(&Graph, tie-break order)`: ties
//! are always broken by ascending vertex id, so the same graph always
//! produces the same solution.

use crate::graph::{Graph, Weight};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

fn key_order(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sorts by `w(v) / (deg(v) + 1)` descending, scans once: each available
/// vertex is added and clears its neighbors' availability.
pub fn gwmin(g: &Graph) -> Vec<usize> {
    let mut order: Vec<usize> = (0..g.num_vertices()).collect();
    order.sort_by(|&a, &b| {
        let ka = g.weight(a) as f64 / (g.degree(a) as f64 + 1.0);
        let kb = g.weight(b) as f64 / (g.degree(b) as f64 + 1.0);
        key_order(kb, ka).then(a.cmp(&b))
    });
    scan_by_availability(g, &order)
}

/// Sorts by `w(v) / Σ_{u∈N(v)} w(u)` descending (infinite if the denominator
/// is 0), then scans exactly like [`gwmin`].
pub fn gwmin2(g: &Graph) -> Vec<usize> {
    let mut order: Vec<usize> = (0..g.num_vertices()).collect();
    order.sort_by(|&a, &b| {
        let ka = gwmin2_key(g, a);
        let kb = gwmin2_key(g, b);
        key_order(kb, ka).then(a.cmp(&b))
    });
    scan_by_availability(g, &order)
}

fn gwmin2_key(g: &Graph, v: usize) -> f64 {
    let denom: Weight = g.neighbors(v).iter().map(|nb| g.weight(nb.vertex)).sum();
    if denom == 0 {
        f64::INFINITY
    } else {
        g.weight(v) as f64 / denom as f64
    }
}

fn scan_by_availability(g: &Graph, order: &[usize]) -> Vec<usize> {
    let mut available = vec![true; g.num_vertices()];
    let mut selected = Vec::new();
    for &v in order {
        if !available[v] {
            continue;
        }
        selected.push(v);
        available[v] = false;
        for nb in g.neighbors(v) {
            available[nb.vertex] = false;
        }
    }
    selected.sort_unstable();
    selected
}

/// Min-heap entry: `(key, vertex, degree snapshot the key was computed at)`.
struct HeapEntry {
    key: f64,
    vertex: usize,
    degree_snapshot: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest key pops first.
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then(other.vertex.cmp(&self.vertex))
    }
}

fn gwmax_key(w: Weight, degree: usize) -> f64 {
    if degree == 0 {
        f64::INFINITY
    } else {
        w as f64 / (degree as f64 * (degree as f64 + 1.0))
    }
}

/// Peels the residual graph by repeatedly deleting the vertex with the
/// lowest `w(v) / (deg(v)·(deg(v)+1))` key, lazily refreshing stale heap
/// entries as neighbors are deleted. Terminates once every remaining vertex
/// is isolated, and selects all of them.
pub fn gwmax(g: &Graph) -> Vec<usize> {
    let n = g.num_vertices();
    let mut degree: Vec<usize> = (0..n).map(|v| g.degree(v)).collect();
    let mut removed = vec![false; n];
    let mut heap: BinaryHeap<HeapEntry> = (0..n)
        .map(|v| HeapEntry {
            key: gwmax_key(g.weight(v), degree[v]),
            vertex: v,
            degree_snapshot: degree[v],
        })
        .collect();

    while let Some(entry) = heap.pop() {
        let v = entry.vertex;
        if removed[v] {
            continue;
        }
        if degree[v] == 0 {
            // Infinite key: v (and everything else left in the heap) is
            // isolated in the residual graph. Stop; all active vertices are
            // kept.
            break;
        }
        if entry.degree_snapshot != degree[v] {
            // Stale entry: the degree moved since this key was computed.
            heap.push(HeapEntry {
                key: gwmax_key(g.weight(v), degree[v]),
                vertex: v,
                degree_snapshot: degree[v],
            });
            continue;
        }
        removed[v] = true;
        for nb in g.neighbors(v) {
            if !removed[nb.vertex] {
                degree[nb.vertex] -= 1;
                heap.push(HeapEntry {
                    key: gwmax_key(g.weight(nb.vertex), degree[nb.vertex]),
                    vertex: nb.vertex,
                    degree_snapshot: degree[nb.vertex],
                });
            }
        }
    }

    let mut selected: Vec<usize> = (0..n).filter(|&v| !removed[v]).collect();
    selected.sort_unstable();
    selected
}

/// Repeatedly picks the candidate minimising the weight of its neighbors
/// still in the candidate set, adds it, then drops it and its neighbors
/// from the candidates.
pub fn strong_greedy(g: &Graph) -> Vec<usize> {
    let n = g.num_vertices();
    let mut is_candidate = vec![true; n];
    let mut selected = Vec::new();
    let mut remaining = n;

    while remaining > 0 {
        let mut best: Option<(Weight, usize)> = None;
        for v in 0..n {
            if !is_candidate[v] {
                continue;
            }
            let neighbor_weight: Weight = g
                .neighbors(v)
                .iter()
                .filter(|nb| is_candidate[nb.vertex])
                .map(|nb| g.weight(nb.vertex))
                .sum();
            // Stable: minimise neighbor weight, so the key maximised is its
            // negation.
            let score = -neighbor_weight;
            best = Some(match best {
                None => (score, v),
                Some((bs, bv)) if score > bs || (score == bs && v < bv) => (score, v),
                Some(prev) => prev,
            });
        }
        let Some((_, v)) = best else { break };
        selected.push(v);
        is_candidate[v] = false;
        remaining -= 1;
        for nb in g.neighbors(v) {
            if is_candidate[nb.vertex] {
                is_candidate[nb.vertex] = false;
                remaining -= 1;
            }
        }
    }

    selected.sort_unstable();
    selected
}

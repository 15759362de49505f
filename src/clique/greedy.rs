//! Greedy initial-solution constructors for MWC.

use crate::graph::{Graph, Weight};
use std::cmp::Ordering;

/// Sorts by `w(v) / (n-1-deg(v)+1)` descending; scans once, maintaining for
/// every vertex the count of currently selected vertices adjacent to it (its
/// "blocked count"). A candidate is addable once that count reaches the
/// current solution size, i.e. it is adjacent to every member selected so
/// far.
pub fn gwmin(g: &Graph) -> Vec<usize> {
    let n = g.num_vertices();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let ka = gwmin_key(g, a);
        let kb = gwmin_key(g, b);
        kb.partial_cmp(&ka).unwrap_or(Ordering::Equal).then(a.cmp(&b))
    });

    let mut support = vec![0usize; n];
    let mut selected: Vec<usize> = Vec::new();
    for v in order {
        if support[v] == selected.len() {
            selected.push(v);
            for nb in g.neighbors(v) {
                support[nb.vertex] += 1;
            }
        }
    }
    selected.sort_unstable();
    selected
}

fn gwmin_key(g: &Graph, v: usize) -> f64 {
    let n = g.num_vertices() as i64;
    let denom = (n - 1 - g.degree(v) as i64 + 1) as f64;
    g.weight(v) as f64 / denom
}

/// Repeatedly picks the candidate maximising the weight of its neighbors
/// still in the candidate set, adds it, then shrinks the candidate set to
/// its neighborhood (clique membership requires pairwise adjacency, so
/// every future pick must be a neighbor of every vertex picked so far).
pub fn strong_greedy(g: &Graph) -> Vec<usize> {
    let n = g.num_vertices();
    let mut is_candidate = vec![true; n];
    let mut selected = Vec::new();

    loop {
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
            best = Some(match best {
                None => (neighbor_weight, v),
                Some((bs, bv)) if neighbor_weight > bs || (neighbor_weight == bs && v < bv) => {
                    (neighbor_weight, v)
                }
                Some(prev) => prev,
            });
        }
        let Some((_, v)) = best else { break };
        selected.push(v);
        let neighbor_set: std::collections::HashSet<usize> =
            g.neighbors(v).iter().map(|nb| nb.vertex).collect();
        for u in 0..n {
            if is_candidate[u] && (u == v || !neighbor_set.contains(&u)) {
                is_candidate[u] = false;
            }
        }
    }

    selected.sort_unstable();
    selected
}

//! Large-neighborhood search.
//!
//! Destroy/penalize/repair cycle over a dense per-vertex score, the same
//! score invariant as [`crate::stable::row_weighting_v2`]. The two indexed
//! binary heaps are realized as lazily-invalidated `BinaryHeap`s keyed by
//! `(score, tiebreak)`, the same staleness pattern
//! [`crate::stable::greedy::gwmax`] uses for its degree-ordered heap.

use crate::config::{IterationGuard, Parameters};
use crate::graph::Graph;
use crate::output::Output;
use crate::stable::solution::Solution;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const COMMIT_INTERVAL: u64 = 100_000;

/// Heap entry ordered so `BinaryHeap::pop` returns the *highest* score,
/// breaking ties by the most recently touched vertex (highest counter).
struct Entry {
    score: i64,
    tiebreak: u64,
    vertex: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.tiebreak == other.tiebreak
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.tiebreak.cmp(&other.tiebreak))
    }
}

struct State<'g> {
    solution: Solution<'g>,
    pi: Vec<u32>,
    max_pi: u32,
    /// `-cost(v)` for out-of-`S` vertices, symmetric with row-weighting v2.
    score_out: Vec<i64>,
    /// Sum of conflict-edge penalties for in-`S` vertices.
    score_in: Vec<i64>,
    touched: Vec<u64>,
}

impl<'g> State<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            solution: Solution::new(graph),
            pi: vec![1; graph.num_edges()],
            max_pi: 1,
            score_out: vec![0; graph.num_vertices()],
            score_in: vec![0; graph.num_vertices()],
            touched: vec![0; graph.num_vertices()],
        }
    }

    fn add(&mut self, graph: &Graph, v: usize, tick: u64) {
        let mut conflict_sum: i64 = 0;
        for nb in graph.neighbors(v) {
            let pi_e = self.pi[nb.edge_id] as i64;
            if self.solution.contains(nb.vertex) {
                conflict_sum += pi_e;
                self.score_in[nb.vertex] += pi_e;
            } else {
                self.score_out[nb.vertex] -= pi_e;
            }
        }
        self.solution.add(v);
        self.score_in[v] = conflict_sum;
        self.touched[v] = tick;
    }

    fn remove(&mut self, graph: &Graph, v: usize, tick: u64) {
        let mut sum_in_s: i64 = 0;
        for nb in graph.neighbors(v) {
            let pi_e = self.pi[nb.edge_id] as i64;
            if self.solution.contains(nb.vertex) {
                sum_in_s += pi_e;
                self.score_in[nb.vertex] -= pi_e;
            } else {
                self.score_out[nb.vertex] += pi_e;
            }
        }
        self.solution.remove(v);
        self.score_out[v] = -sum_in_s;
        self.touched[v] = tick;
    }

    fn penalize_conflicts(&mut self, graph: &Graph) {
        let conflicts: Vec<usize> = self.solution.iter_conflicts().collect();
        for e in conflicts {
            let edge = graph.edge(e);
            self.pi[e] += 1;
            self.max_pi = self.max_pi.max(self.pi[e]);
            self.score_in[edge.v1] += 1;
            self.score_in[edge.v2] += 1;
        }
        if self.max_pi > u32::MAX / 2 {
            self.rescale(graph);
        }
    }

    fn rescale(&mut self, graph: &Graph) {
        for p in self.pi.iter_mut() {
            *p = (*p).div_ceil(2).max(1);
        }
        self.max_pi = self.pi.iter().copied().max().unwrap_or(1);
        for v in 0..graph.num_vertices() {
            let sum_in_s: i64 = graph
                .neighbors(v)
                .iter()
                .filter(|nb| self.solution.contains(nb.vertex))
                .map(|nb| self.pi[nb.edge_id] as i64)
                .sum();
            if self.solution.contains(v) {
                self.score_in[v] = sum_in_s;
            } else {
                self.score_out[v] = -sum_in_s;
            }
        }
    }
}

/// Runs large-neighborhood search to a time/iteration limit.
///
/// Destroy/repair are both deterministic heap pops; `rng` is accepted (and
/// unused) so this solver shares a call signature with its row-weighting
/// siblings for dispatch purposes.
pub fn solve<'g, R: Rng>(
    graph: &'g Graph,
    output: &Output,
    parameters: &Parameters,
    _rng: &mut R,
) -> Solution<'g> {
    let n = graph.num_vertices();
    let mut state = State::new(graph);
    let mut guard = IterationGuard::default();
    let mut iteration: u64 = 0;
    let timer = output.timer();

    while !timer.needs_to_end() && !guard.exhausted(parameters) {
        iteration += 1;
        guard.tick();

        // Destroy: pull the ceil(sqrt(n - |S|)) best out-of-S candidates in.
        let remaining = n.saturating_sub(state.solution.size());
        let destroy_count = (remaining as f64).sqrt().ceil() as usize;
        let mut heap_out: BinaryHeap<Entry> = (0..n)
            .filter(|&v| !state.solution.contains(v))
            .map(|v| Entry {
                score: state.score_out[v],
                tiebreak: state.touched[v],
                vertex: v,
            })
            .collect();
        for _ in 0..destroy_count.min(remaining) {
            let Some(entry) = pop_fresh(&mut heap_out, &state.score_out, &state.touched) else {
                break;
            };
            state.add(graph, entry.vertex, iteration);
        }

        state.penalize_conflicts(graph);

        // Repair: remove the worst in-S offenders until feasible, promoting
        // any out-of-S neighbor whose score has fallen to zero.
        let mut heap_in: BinaryHeap<Entry> = state
            .solution
            .iter()
            .map(|v| Entry {
                score: state.score_in[v],
                tiebreak: state.touched[v],
                vertex: v,
            })
            .collect();
        while !state.solution.feasible() {
            let Some(entry) = pop_fresh(&mut heap_in, &state.score_in, &state.touched) else {
                break;
            };
            if !state.solution.contains(entry.vertex) {
                continue;
            }
            state.remove(graph, entry.vertex, iteration);
            for nb in graph.neighbors(entry.vertex) {
                if !state.solution.contains(nb.vertex) && state.score_out[nb.vertex] == 0 {
                    state.add(graph, nb.vertex, iteration);
                    heap_in.push(Entry {
                        score: 0,
                        tiebreak: iteration,
                        vertex: nb.vertex,
                    });
                }
            }
        }
        if state.solution.feasible() {
            let improved = output.update_solution(
                &state.solution.to_vertex_list(),
                state.solution.weight(),
                "large-neighborhood-search",
            );
            if improved {
                guard.record_improvement();
            }
        }
        if iteration % COMMIT_INTERVAL == 0 && state.solution.feasible() {
            output.update_solution(
                &state.solution.to_vertex_list(),
                state.solution.weight(),
                "large-neighborhood-search-periodic",
            );
        }
    }

    if state.solution.feasible() {
        output.update_solution(
            &state.solution.to_vertex_list(),
            state.solution.weight(),
            "large-neighborhood-search-final",
        );
    }
    state.solution
}

/// Pops entries until one matches the live score/touched arrays (lazy
/// invalidation — the heap is never rebuilt eagerly on every score change).
fn pop_fresh(heap: &mut BinaryHeap<Entry>, score: &[i64], touched: &[u64]) -> Option<Entry> {
    while let Some(entry) = heap.pop() {
        if score[entry.vertex] == entry.score && touched[entry.vertex] == entry.tiebreak {
            return Some(entry);
        }
    }
    None
}

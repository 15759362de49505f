//! Row-weighting local search, variant 2.
//!
//! Unlike variant 1's component-stratified scheduler, this variant keeps a
//! single dense `score(v)` per vertex: for a member, the total penalty of
//! its conflict edges; for a non-member, the negated penalty it would incur
//! by joining. Every add/remove updates the toggled vertex's own score by a
//! fresh local sum (its membership role just flipped, so there is nothing
//! to carry over) and every neighbor's score by the matching delta — never
//! a full recompute.

use crate::config::{IterationGuard, Parameters};
use crate::graph::Graph;
use crate::output::Output;
use crate::stable::solution::Solution;
use rand::Rng;

const COMMIT_INTERVAL: u64 = 100_000;

struct State<'g> {
    solution: Solution<'g>,
    pi: Vec<u32>,
    max_pi: u32,
    score: Vec<i64>,
    last_touched: Vec<u64>,
    last_added: Option<usize>,
    last_removed: Option<usize>,
}

impl<'g> State<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            solution: Solution::new(graph),
            pi: vec![1; graph.num_edges()],
            max_pi: 1,
            score: vec![0; graph.num_vertices()],
            last_touched: vec![0; graph.num_vertices()],
            last_added: None,
            last_removed: None,
        }
    }

    fn add(&mut self, graph: &Graph, v: usize, iteration: u64) {
        let mut new_score_v: i64 = 0;
        for nb in graph.neighbors(v) {
            let pi_e = self.pi[nb.edge_id] as i64;
            if self.solution.contains(nb.vertex) {
                new_score_v += pi_e;
                self.score[nb.vertex] += pi_e;
            } else {
                self.score[nb.vertex] -= pi_e;
            }
        }
        self.solution.add(v);
        self.score[v] = new_score_v;
        self.last_touched[v] = iteration;
        self.last_added = Some(v);
    }

    fn remove(&mut self, graph: &Graph, v: usize, iteration: u64) {
        let mut sum_in_s: i64 = 0;
        for nb in graph.neighbors(v) {
            let pi_e = self.pi[nb.edge_id] as i64;
            if self.solution.contains(nb.vertex) {
                sum_in_s += pi_e;
                self.score[nb.vertex] -= pi_e;
            } else {
                self.score[nb.vertex] += pi_e;
            }
        }
        self.solution.remove(v);
        self.score[v] = -sum_in_s;
        self.last_touched[v] = iteration;
        self.last_removed = Some(v);
    }

    /// Bumps the penalty of every conflict edge incident to `v`, propagating
    /// the `+1` delta to both endpoints' scores.
    fn bump_conflicts_of(&mut self, graph: &Graph, v: usize) {
        for nb in graph.neighbors(v) {
            if self.solution.contains(nb.vertex) {
                self.pi[nb.edge_id] += 1;
                self.max_pi = self.max_pi.max(self.pi[nb.edge_id]);
                self.score[v] += 1;
                self.score[nb.vertex] += 1;
            }
        }
        if self.max_pi > u32::MAX / 2 {
            self.rescale_penalties(graph);
        }
    }

    fn rescale_penalties(&mut self, graph: &Graph) {
        for p in self.pi.iter_mut() {
            *p = (*p).div_ceil(2).max(1);
        }
        self.max_pi = self.pi.iter().copied().max().unwrap_or(1);
        // Scores are sums of pi over conflict edges; rebuild them directly
        // rather than trying to track the halving's effect on every vertex.
        self.score = vec![0; graph.num_vertices()];
        for v in 0..graph.num_vertices() {
            if self.solution.contains(v) {
                let s: i64 = graph
                    .neighbors(v)
                    .iter()
                    .filter(|nb| self.solution.contains(nb.vertex))
                    .map(|nb| self.pi[nb.edge_id] as i64)
                    .sum();
                self.score[v] = s;
            } else {
                let s: i64 = graph
                    .neighbors(v)
                    .iter()
                    .filter(|nb| self.solution.contains(nb.vertex))
                    .map(|nb| self.pi[nb.edge_id] as i64)
                    .sum();
                self.score[v] = -s;
            }
        }
    }
}

/// Runs row-weighting v2 to a time/iteration limit, reporting every
/// feasible improvement to `output`, and returns the best solution found.
pub fn solve<'g, R: Rng>(
    graph: &'g Graph,
    output: &Output,
    parameters: &Parameters,
    rng: &mut R,
) -> Solution<'g> {
    let mut state = State::new(graph);
    let mut guard = IterationGuard::default();
    let mut iteration: u64 = 0;
    let timer = output.timer();

    while !timer.needs_to_end() && !guard.exhausted(parameters) {
        iteration += 1;
        guard.tick();

        if state.solution.feasible() {
            if let Some(v) = argmin_score_in(&state) {
                state.remove(graph, v, iteration);
            }
        }

        if let Some(v) = argmin_score_out(graph, &state) {
            state.add(graph, v, iteration);
            state.bump_conflicts_of(graph, v);
        }

        repair_random_conflict(graph, &mut state, rng, iteration);

        if state.solution.feasible() {
            let improved = output.update_solution(
                &state.solution.to_vertex_list(),
                state.solution.weight(),
                "row-weighting-v2",
            );
            if improved {
                guard.record_improvement();
            }
        }
        if iteration % COMMIT_INTERVAL == 0 && state.solution.feasible() {
            output.update_solution(
                &state.solution.to_vertex_list(),
                state.solution.weight(),
                "row-weighting-v2-periodic",
            );
        }
    }

    if state.solution.feasible() {
        output.update_solution(&state.solution.to_vertex_list(), state.solution.weight(), "row-weighting-v2-final");
    }
    state.solution
}

fn argmin_score_in(state: &State) -> Option<usize> {
    let mut best: Option<(i64, u64, usize)> = None;
    for v in state.solution.iter() {
        let candidate = (state.score[v], state.last_touched[v], v);
        best = Some(match best {
            None => candidate,
            Some(b) if candidate < b => candidate,
            Some(b) => b,
        });
    }
    best.map(|(_, _, v)| v)
}

fn argmin_score_out(graph: &Graph, state: &State) -> Option<usize> {
    let mut best: Option<(i64, usize)> = None;
    for v in 0..graph.num_vertices() {
        if state.solution.contains(v) || Some(v) == state.last_removed {
            continue;
        }
        let candidate = (state.score[v], v);
        best = Some(match best {
            None => candidate,
            Some(b) if candidate < b => candidate,
            Some(b) => b,
        });
    }
    best.map(|(_, v)| v)
}

fn repair_random_conflict<R: Rng>(graph: &Graph, state: &mut State, rng: &mut R, iteration: u64) {
    let conflicts: Vec<usize> = state.solution.iter_conflicts().collect();
    if conflicts.is_empty() {
        return;
    }
    let edge = graph.edge(conflicts[rng.random_range(0..conflicts.len())]);
    let (v1, v2) = (edge.v1, edge.v2);
    let higher = if Some(v1) == state.last_added {
        v2
    } else if Some(v2) == state.last_added {
        v1
    } else if state.score[v1] > state.score[v2] {
        v1
    } else if state.score[v2] > state.score[v1] {
        v2
    } else {
        v1
    };
    state.remove(graph, higher, iteration);
}

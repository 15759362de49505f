//! Row-weighting local search, variant 1.
//!
//! Component-stratified: one component is "active" at a time, round-robin,
//! each getting a budget of iterations equal to its edge count before the
//! scheduler advances. Singleton components (no edges) are skipped — there
//! is nothing to locally search there.

use crate::config::{IterationGuard, Parameters};
use crate::graph::Graph;
use crate::output::Output;
use crate::stable::solution::Solution;
use rand::Rng;

const COMMIT_INTERVAL: u64 = 100_000;

/// Runs row-weighting v1 to a time/iteration limit, reporting every
/// feasible improvement to `output`, and returns the best solution found.
pub fn solve<'g, R: Rng>(
    graph: &'g Graph,
    output: &Output,
    parameters: &Parameters,
    rng: &mut R,
) -> Solution<'g> {
    let mut solution = Solution::new(graph);
    let num_edges = graph.num_edges();
    let mut pi: Vec<u32> = vec![1; num_edges];
    let mut max_pi: u32 = 1;
    let mut last_addition = vec![0u64; graph.num_vertices()];
    let mut last_removal = vec![0u64; graph.num_vertices()];
    let mut last_vertex_added: Option<usize> = None;
    let mut last_vertex_removed: Option<usize> = None;

    let component_vertices = group_by_component(graph);
    let component_order: Vec<usize> = (0..graph.num_components())
        .filter(|&c| component_edge_count(graph, c) > 0)
        .collect();
    if component_order.is_empty() {
        // No edges anywhere: every vertex is independent on its own.
        for v in 0..graph.num_vertices() {
            solution.add(v);
        }
        output.update_solution(&solution.to_vertex_list(), solution.weight(), "row-weighting-v1");
        return solution;
    }
    let component_budget: Vec<u64> = component_order
        .iter()
        .map(|&c| component_edge_count(graph, c) as u64)
        .collect();

    let mut active_idx = 0usize;
    let mut component_iterations_used = 0u64;
    let mut guard = IterationGuard::default();
    let mut iteration: u64 = 0;
    let timer = output.timer();

    while !timer.needs_to_end() && !guard.exhausted(parameters) {
        iteration += 1;
        guard.tick();

        let component = component_order[active_idx];

        while solution.feasible() {
            let Some(v) = best_shift_add(
                graph,
                &solution,
                &component_vertices[component],
                &pi,
                &last_addition,
                &last_removal,
            ) else {
                break;
            };
            solution.add(v);
            last_addition[v] = iteration;
            last_vertex_added = Some(v);
        }

        if !solution.feasible() {
            random_conflict_swap(
                graph,
                &mut solution,
                &pi,
                rng,
                &mut last_addition,
                &mut last_removal,
                iteration,
                &mut last_vertex_added,
                &mut last_vertex_removed,
            );
        }

        for e in solution.iter_conflicts().collect::<Vec<_>>() {
            pi[e] += 1;
            max_pi = max_pi.max(pi[e]);
        }
        if max_pi > u32::MAX / 2 {
            for p in pi.iter_mut() {
                *p = (*p).div_ceil(2).max(1);
            }
            max_pi = pi.iter().copied().max().unwrap_or(1);
        }

        component_iterations_used += 1;
        if component_iterations_used >= component_budget[active_idx] {
            active_idx = (active_idx + 1) % component_order.len();
            component_iterations_used = 0;
        }

        if solution.feasible() {
            let improved =
                output.update_solution(&solution.to_vertex_list(), solution.weight(), "row-weighting-v1");
            if improved {
                guard.record_improvement();
            }
        }

        if iteration % COMMIT_INTERVAL == 0 && solution.feasible() {
            output.update_solution(&solution.to_vertex_list(), solution.weight(), "row-weighting-v1-periodic");
        }
    }

    if solution.feasible() {
        output.update_solution(&solution.to_vertex_list(), solution.weight(), "row-weighting-v1-final");
    }
    solution
}

/// Vertex of `candidates` not in `solution` minimizing the penalty sum it
/// would create if added, ties broken by the oldest last-touched timestamp.
fn best_shift_add(
    g: &Graph,
    solution: &Solution,
    candidates: &[usize],
    pi: &[u32],
    last_addition: &[u64],
    last_removal: &[u64],
) -> Option<usize> {
    let mut best: Option<(u32, u64, usize)> = None;
    for &v in candidates {
        if solution.contains(v) {
            continue;
        }
        let cost: u32 = g
            .neighbors(v)
            .iter()
            .filter(|nb| solution.contains(nb.vertex))
            .map(|nb| pi[nb.edge_id])
            .sum();
        let touched = last_addition[v].max(last_removal[v]);
        let candidate = (cost, touched, v);
        best = Some(match best {
            None => candidate,
            Some(b) if candidate < b => candidate,
            Some(b) => b,
        });
    }
    best.map(|(_, _, v)| v)
}

/// Picks a uniformly random conflict edge, then the (endpoint, replacement)
/// swap minimising the resulting penalty.
#[allow(clippy::too_many_arguments)]
fn random_conflict_swap<R: Rng>(
    g: &Graph,
    solution: &mut Solution,
    pi: &[u32],
    rng: &mut R,
    last_addition: &mut [u64],
    last_removal: &mut [u64],
    iteration: u64,
    last_vertex_added: &mut Option<usize>,
    last_vertex_removed: &mut Option<usize>,
) {
    let conflicts: Vec<usize> = solution.iter_conflicts().collect();
    if conflicts.is_empty() {
        return;
    }
    let edge_id = conflicts[rng.random_range(0..conflicts.len())];
    let edge = g.edge(edge_id);

    let mut best: Option<(i64, usize, usize)> = None;
    for &v1 in &[edge.v1, edge.v2] {
        if Some(v1) == *last_vertex_added {
            continue;
        }
        let remove_gain: i64 = g
            .neighbors(v1)
            .iter()
            .filter(|nb| solution.contains(nb.vertex))
            .map(|nb| pi[nb.edge_id] as i64)
            .sum();
        for nb in g.neighbors(v1) {
            let v2 = nb.vertex;
            if solution.contains(v2) || Some(v2) == *last_vertex_removed {
                continue;
            }
            let add_cost: i64 = g
                .neighbors(v2)
                .iter()
                .filter(|nb2| solution.contains(nb2.vertex) && nb2.vertex != v1)
                .map(|nb2| pi[nb2.edge_id] as i64)
                .sum();
            let score = add_cost - remove_gain;
            best = Some(match best {
                None => (score, v1, v2),
                Some(b) if score < b.0 => (score, v1, v2),
                Some(b) => b,
            });
        }
    }

    if let Some((_, v1, v2)) = best {
        solution.remove(v1);
        last_removal[v1] = iteration;
        *last_vertex_removed = Some(v1);
        solution.add(v2);
        last_addition[v2] = iteration;
        *last_vertex_added = Some(v2);
    }
}

fn group_by_component(g: &Graph) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); g.num_components()];
    for v in 0..g.num_vertices() {
        groups[g.component(v)].push(v);
    }
    groups
}

fn component_edge_count(g: &Graph, component: usize) -> usize {
    g.edges().iter().filter(|e| e.component == component).count()
}

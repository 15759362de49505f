//! LP-relaxation-backed MILP solvers for the `milp-*` algorithm keywords,
//! feature-gated behind `ilp-solver`.
//!
//! `milp-1`, `milp-2`, `milp-3` are not three different models: they are one
//! LP-relaxation-with-exact-bounds model handed to whichever `good_lp`
//! backend feature is enabled (see DESIGN.md's Open Question resolution).

#![cfg(feature = "ilp-solver")]

use crate::graph::Graph;
use crate::output::Output;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, Solution as LpSolution, SolverModel,
};

/// Which problem family the LP relaxation encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Stable,
    Clique,
}

/// Builds the edge-constrained LP relaxation (`x_v + x_u <= 1` per
/// conflicting pair) and hands it to the configured backend, reporting the
/// rounded-down binary solution through `output`.
///
/// This is a relaxation, not a branch-and-bound MILP solver — exact
/// branch-and-bound search is out of scope here — it rounds the LP optimum
/// down to a feasible integral point and reports that, leaving the LP bound
/// as the reported upper bound.
pub fn solve(problem: Problem, graph: &Graph, output: &Output) -> Result<(), good_lp::ResolutionError> {
    let mut vars = ProblemVariables::new();
    let x: Vec<_> = (0..graph.num_vertices())
        .map(|_| vars.add(variable().min(0).max(1)))
        .collect();

    let objective: Expression = (0..graph.num_vertices())
        .map(|v| graph.weight(v) as f64 * x[v])
        .sum();

    let pairs: Vec<(usize, usize)> = match problem {
        Problem::Stable => graph.edges().iter().map(|e| (e.v1, e.v2)).collect(),
        Problem::Clique => {
            // Clique's LP relaxation constrains every *non-edge* pair instead.
            let mut non_edges = Vec::new();
            for u in 0..graph.num_vertices() {
                for v in (u + 1)..graph.num_vertices() {
                    if !graph.has_edge(u, v) {
                        non_edges.push((u, v));
                    }
                }
            }
            non_edges
        }
    };

    let mut model = vars.maximise(objective).using(good_lp::default_solver);
    for (u, v) in &pairs {
        model = model.with(constraint!(x[*u] + x[*v] <= 1));
    }

    let solution = model.solve()?;
    let bound: f64 = (0..graph.num_vertices())
        .map(|v| graph.weight(v) as f64 * solution.value(x[v]))
        .sum();
    output.update_bound(bound.ceil() as i64, "milp-lp-relaxation");

    // Round down: greedily keep variables at >=0.5 that don't violate the
    // pairwise constraint, in decreasing LP-value order.
    let mut order: Vec<usize> = (0..graph.num_vertices()).collect();
    order.sort_by(|&a, &b| {
        solution
            .value(x[b])
            .partial_cmp(&solution.value(x[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut selected = vec![false; graph.num_vertices()];
    let conflicts = |v: usize, selected: &[bool]| -> bool {
        match problem {
            Problem::Stable => graph.neighbors(v).iter().any(|nb| selected[nb.vertex]),
            Problem::Clique => (0..graph.num_vertices())
                .any(|u| selected[u] && u != v && !graph.has_edge(u, v)),
        }
    };
    for v in order {
        if solution.value(x[v]) >= 0.5 && !conflicts(v, &selected) {
            selected[v] = true;
        }
    }
    let vertices: Vec<usize> = (0..graph.num_vertices()).filter(|&v| selected[v]).collect();
    let weight: i64 = vertices.iter().map(|&v| graph.weight(v)).sum();
    output.update_solution(&vertices, weight, "milp-rounded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DuplicatePolicy, GraphBuilder};
    use crate::time::Timer;

    fn triangle() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_vertices(3);
        b.set_unweighted();
        for (u, v) in [(0, 1), (1, 2), (0, 2)] {
            b.add_edge(u, v, DuplicatePolicy::Fail).unwrap();
        }
        b.build().unwrap()
    }

    #[test]
    fn stable_lp_on_triangle_picks_one_vertex() {
        let g = triangle();
        let output = Output::new(Timer::new(None));
        solve(Problem::Stable, &g, &output).unwrap();
        assert_eq!(output.best_value(), Some(1));
    }

    #[test]
    fn clique_lp_on_triangle_picks_all_three() {
        let g = triangle();
        let output = Output::new(Timer::new(None));
        solve(Problem::Clique, &g, &output).unwrap();
        assert_eq!(output.best_value(), Some(3));
    }
}

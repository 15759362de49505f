//! End-to-end scenario tests against small, hand-computable instances.
//!
//! Scenarios B (pendant/isolated reduction) and D (vertex folding) are
//! already covered by unit tests in `src/stable/reduction.rs`; this file
//! only covers the remaining ones that need a full solve or a dedicated
//! graph shape.

use stablesolver::clique;
use stablesolver::graph::{DuplicatePolicy, Graph, GraphBuilder};
use stablesolver::stable;
use stablesolver::time::Timer;
use stablesolver::{Output, Parameters};
use std::time::Duration;

fn cycle4() -> Graph {
    let mut b = GraphBuilder::new();
    b.add_vertices(4);
    b.set_unweighted();
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        b.add_edge(u, v, DuplicatePolicy::Fail).unwrap();
    }
    b.build().unwrap()
}

fn triangle() -> Graph {
    let mut b = GraphBuilder::new();
    b.add_vertices(3);
    b.set_unweighted();
    for (u, v) in [(0, 1), (1, 2), (0, 2)] {
        b.add_edge(u, v, DuplicatePolicy::Fail).unwrap();
    }
    b.build().unwrap()
}

/// Standard Petersen graph: outer 5-cycle, inner pentagram, five spokes.
fn petersen() -> Graph {
    let mut b = GraphBuilder::new();
    b.add_vertices(10);
    b.set_unweighted();
    let outer = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)];
    let inner = [(5, 7), (7, 9), (9, 6), (6, 8), (8, 5)];
    let spokes = [(0, 5), (1, 6), (2, 7), (3, 8), (4, 9)];
    for (u, v) in outer.into_iter().chain(inner).chain(spokes) {
        b.add_edge(u, v, DuplicatePolicy::Fail).unwrap();
    }
    b.build().unwrap()
}

fn star(num_leaves: usize) -> Graph {
    let mut b = GraphBuilder::new();
    b.add_vertices(num_leaves + 1);
    b.set_weight(0, 100).unwrap();
    for leaf in 1..=num_leaves {
        b.set_weight(leaf, 1).unwrap();
        b.add_edge(0, leaf, DuplicatePolicy::Fail).unwrap();
    }
    b.build().unwrap()
}

/// Scenario A: unweighted 4-cycle, greedy-gwmin reaches the optimum 2.
#[test]
fn scenario_a_four_cycle_greedy_gwmin() {
    let g = cycle4();
    let output = Output::new(Timer::new(Some(Duration::from_millis(50))));
    let params = Parameters::default();
    let solution = stable::solve(stable::Algorithm::GreedyGwmin, &g, &output, &params, 1);
    assert!(solution.feasible());
    assert_eq!(solution.weight(), 2);
    let vertices = solution.to_vertex_list();
    assert!(vertices == vec![0, 2] || vertices == vec![1, 3]);
}

/// Scenario C: triangle duality — MWIS optimum 1, MWC optimum 3 on the same
/// graph.
#[test]
fn scenario_c_triangle_duality() {
    let g = triangle();
    let stable_output = Output::new(Timer::new(Some(Duration::from_millis(50))));
    let stable_params = Parameters::default();
    let stable_solution = stable::solve(
        stable::Algorithm::GreedyStrong,
        &g,
        &stable_output,
        &stable_params,
        1,
    );
    assert!(stable_solution.feasible());
    assert_eq!(stable_solution.weight(), 1);

    let clique_output = Output::new(Timer::new(Some(Duration::from_millis(50))));
    let clique_params = Parameters::default();
    let clique_solution = clique::solve(
        clique::Algorithm::GreedyStrong,
        &g,
        &clique_output,
        &clique_params,
        1,
    );
    assert!(clique_solution.feasible());
    assert_eq!(clique_solution.weight(), 3);
}

/// Scenario E: row-weighting v1 on the Petersen graph must reach the
/// independence number, 4.
#[test]
fn scenario_e_petersen_row_weighting_v1_reaches_optimum() {
    let g = petersen();
    let output = Output::new(Timer::new(None));
    let params = Parameters {
        seed: 0,
        maximum_number_of_iterations: Some(10_000),
        ..Default::default()
    };
    let solution = stable::solve(
        stable::Algorithm::LocalSearchRowWeighting1,
        &g,
        &output,
        &params,
        1,
    );
    assert!(solution.feasible());
    assert_eq!(output.best_value(), Some(4));
    assert_eq!(solution.weight(), 4);
}

/// Scenario F: `update_core` on a star graph. The centre (weight 100) has
/// `best(centre) = 100 + n`; every leaf (weight 1) has `best(leaf) = 101`.
/// At incumbent 101, every leaf's bound already sits at the threshold and
/// cascades away; each removal chips one unit off the centre's bound, which
/// eventually crosses the threshold too and gets pruned last. Since the
/// centre is always the *last* vertex removed, none of the leaves' own
/// entries (frozen at 101 from construction) ever get revisited — so the
/// returned bound is `max_v best(v) = 101` (a leaf's stale value), not the
/// centre's own final value of 100.
#[test]
fn scenario_f_update_core_on_a_star() {
    let g = star(3);
    let mut core = clique::CoreBound::new(&g);
    let bound = core.update(101);
    assert!(!core.is_relevant(0));
    for leaf in 1..=3 {
        assert!(!core.is_relevant(leaf));
    }
    assert_eq!(bound, 101);
}

//! Algorithm keyword dispatch for MWIS.

use crate::config::Parameters;
use crate::error::Error;
use crate::graph::Graph;
use crate::output::Output;
use crate::stable::local_search_bestfirst::StableLocalScheme;
use crate::stable::solution::Solution;
use crate::stable::{greedy, large_neighborhood_search, row_weighting_v1, row_weighting_v2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One of the algorithm keywords the CLI accepts for MWIS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    GreedyGwmin,
    GreedyGwmax,
    GreedyGwmin2,
    GreedyStrong,
    LocalSearch,
    LocalSearchRowWeighting1,
    LocalSearchRowWeighting2,
    LargeNeighborhoodSearch,
}

impl Algorithm {
    /// Parses a CLI keyword, e.g. `"greedy-gwmin"`.
    pub fn parse(keyword: &str) -> Result<Self, Error> {
        Ok(match keyword {
            "greedy-gwmin" => Self::GreedyGwmin,
            "greedy-gwmax" => Self::GreedyGwmax,
            "greedy-gwmin2" => Self::GreedyGwmin2,
            "greedy-strong" => Self::GreedyStrong,
            "local-search" => Self::LocalSearch,
            "local-search-row-weighting-1" => Self::LocalSearchRowWeighting1,
            "local-search-row-weighting-2" => Self::LocalSearchRowWeighting2,
            "large-neighborhood-search" => Self::LargeNeighborhoodSearch,
            other => return Err(Error::UnknownAlgorithm(other.to_string())),
        })
    }
}

/// Runs `algorithm` against `graph`, reporting through `output`.
///
/// `num_workers` only matters for [`Algorithm::LocalSearch`] (the best-first
/// engine); every other algorithm is single-threaded.
pub fn solve<'g>(
    algorithm: Algorithm,
    graph: &'g Graph,
    output: &Output,
    parameters: &Parameters,
    num_workers: usize,
) -> Solution<'g> {
    let mut rng = StdRng::seed_from_u64(parameters.seed);
    match algorithm {
        Algorithm::GreedyGwmin => report_greedy(graph, output, greedy::gwmin(graph), "greedy-gwmin"),
        Algorithm::GreedyGwmax => report_greedy(graph, output, greedy::gwmax(graph), "greedy-gwmax"),
        Algorithm::GreedyGwmin2 => report_greedy(graph, output, greedy::gwmin2(graph), "greedy-gwmin2"),
        Algorithm::GreedyStrong => report_greedy(graph, output, greedy::strong_greedy(graph), "greedy-strong"),
        Algorithm::LocalSearchRowWeighting1 => row_weighting_v1::solve(graph, output, parameters, &mut rng),
        Algorithm::LocalSearchRowWeighting2 => row_weighting_v2::solve(graph, output, parameters, &mut rng),
        Algorithm::LargeNeighborhoodSearch => {
            large_neighborhood_search::solve(graph, output, parameters, &mut rng)
        }
        Algorithm::LocalSearch => {
            let scheme = StableLocalScheme::new(graph);
            crate::bestfirst::solve(&scheme, output, parameters, num_workers.max(1));
            let mut solution = Solution::new(graph);
            if let Some(best) = output.best_solution() {
                for v in best {
                    solution.add(v);
                }
            }
            solution
        }
    }
}

fn report_greedy<'g>(graph: &'g Graph, output: &Output, vertices: Vec<usize>, tag: &str) -> Solution<'g> {
    let mut solution = Solution::new(graph);
    for v in &vertices {
        solution.add(*v);
    }
    output.update_solution(&vertices, solution.weight(), tag);
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DuplicatePolicy, GraphBuilder};
    use crate::time::Timer;
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

    #[test]
    fn unknown_keyword_is_an_input_error() {
        assert!(matches!(Algorithm::parse("bogus"), Err(Error::UnknownAlgorithm(_))));
    }

    #[test]
    fn every_keyword_round_trips() {
        for kw in [
            "greedy-gwmin",
            "greedy-gwmax",
            "greedy-gwmin2",
            "greedy-strong",
            "local-search",
            "local-search-row-weighting-1",
            "local-search-row-weighting-2",
            "large-neighborhood-search",
        ] {
            assert!(Algorithm::parse(kw).is_ok(), "{kw} should parse");
        }
    }

    #[test]
    fn greedy_gwmin_reports_through_output() {
        let g = cycle4();
        let output = Output::new(Timer::new(Some(Duration::from_millis(50))));
        let params = Parameters::default();
        let solution = solve(Algorithm::GreedyGwmin, &g, &output, &params, 1);
        assert!(solution.feasible());
        assert_eq!(output.best_value(), Some(2));
    }
}

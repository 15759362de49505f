//! Algorithm keyword dispatch for MWC.

use crate::clique::greedy;
use crate::clique::local_search_bestfirst::CliqueLocalScheme;
use crate::clique::solution::Solution;
use crate::config::Parameters;
use crate::error::Error;
use crate::graph::Graph;
use crate::output::Output;

/// One of the algorithm keywords the CLI accepts for MWC. Row-weighting and
/// large-neighborhood search stay stable-only; only greedy and best-first
/// carry over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    GreedyGwmin,
    GreedyStrong,
    LocalSearch,
}

impl Algorithm {
    /// Parses a CLI keyword, e.g. `"greedy-gwmin"`.
    pub fn parse(keyword: &str) -> Result<Self, Error> {
        Ok(match keyword {
            "greedy-gwmin" => Self::GreedyGwmin,
            "greedy-strong" => Self::GreedyStrong,
            "local-search" => Self::LocalSearch,
            other => return Err(Error::UnknownAlgorithm(other.to_string())),
        })
    }
}

/// Runs `algorithm` against `graph`, reporting through `output`.
pub fn solve<'g>(
    algorithm: Algorithm,
    graph: &'g Graph,
    output: &Output,
    parameters: &Parameters,
    num_workers: usize,
) -> Solution<'g> {
    match algorithm {
        Algorithm::GreedyGwmin => report_greedy(graph, output, greedy::gwmin(graph), "greedy-gwmin"),
        Algorithm::GreedyStrong => report_greedy(graph, output, greedy::strong_greedy(graph), "greedy-strong"),
        Algorithm::LocalSearch => {
            let scheme = CliqueLocalScheme::new(graph);
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
    fn unknown_keyword_is_an_input_error() {
        assert!(matches!(Algorithm::parse("bogus"), Err(Error::UnknownAlgorithm(_))));
    }

    #[test]
    fn greedy_gwmin_finds_the_whole_triangle() {
        let g = triangle();
        let output = Output::new(Timer::new(Some(Duration::from_millis(50))));
        let params = Parameters::default();
        let solution = solve(Algorithm::GreedyGwmin, &g, &output, &params, 1);
        assert!(solution.feasible());
        assert_eq!(output.best_value(), Some(3));
    }
}

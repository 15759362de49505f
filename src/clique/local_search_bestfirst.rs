//! [`LocalScheme`] implementation for MWC, driving the generic best-first
//! engine.

use crate::bestfirst::{LocalScheme, Perturbation};
use crate::clique::greedy;
use crate::clique::solution::Solution;
use crate::clique::update_core::CoreBound;
use crate::graph::{Graph, Weight};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;

/// Clique neighborhood: add (any non-member, evicting whichever current
/// members are not adjacent to it) and (2,1)-swap via the "tight" vertices
/// of each member — outside vertices with exactly one non-neighbor in `S`.
pub struct CliqueLocalScheme<'g> {
    graph: &'g Graph,
    core: Mutex<CoreBound<'g>>,
}

impl<'g> CliqueLocalScheme<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            core: Mutex::new(CoreBound::new(graph)),
        }
    }

    /// Out-of-solution vertices that are tight to `m`: exactly one
    /// non-neighbor inside `S`, and that non-neighbor is `m`.
    fn tight_to(&self, solution: &Solution<'g>, m: usize) -> Vec<usize> {
        (0..self.graph.num_vertices())
            .filter(|&v| {
                !solution.contains(v)
                    && solution.non_neighbor_member_count(v) == 1
                    && !self.graph.has_edge(v, m)
            })
            .collect()
    }

    fn try_add(&self, solution: &mut Solution<'g>) -> bool {
        for v in 0..self.graph.num_vertices() {
            if solution.contains(v) {
                continue;
            }
            let conflicting: Vec<usize> = solution
                .iter()
                .filter(|&m| !self.graph.has_edge(v, m))
                .collect();
            let conflict_weight: i64 = conflicting.iter().map(|&m| self.graph.weight(m)).sum();
            if self.graph.weight(v) > conflict_weight {
                for m in conflicting {
                    solution.remove(m);
                }
                solution.add(v);
                return true;
            }
        }
        false
    }

    fn try_swap(&self, solution: &mut Solution<'g>) -> bool {
        let members: Vec<usize> = solution.iter().collect();
        for m in members {
            let tight = self.tight_to(solution, m);
            for i in 0..tight.len() {
                for j in (i + 1)..tight.len() {
                    let (u1, u2) = (tight[i], tight[j]);
                    if !self.graph.has_edge(u1, u2) {
                        continue;
                    }
                    let gain = self.graph.weight(u1) + self.graph.weight(u2) - self.graph.weight(m);
                    if gain > 0 {
                        solution.remove(m);
                        solution.add(u1);
                        solution.add(u2);
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl<'g> LocalScheme for CliqueLocalScheme<'g> {
    type Solution = Solution<'g>;

    fn empty_solution(&self) -> Self::Solution {
        Solution::new(self.graph)
    }

    fn initial_solution(&self, seed: u64) -> Self::Solution {
        let picks = [greedy::gwmin(self.graph), greedy::strong_greedy(self.graph)];
        let chosen = &picks[(seed as usize) % picks.len()];
        let mut solution = Solution::new(self.graph);
        for &v in chosen {
            solution.add(v);
        }
        solution
    }

    fn solution2compact(&self, solution: &Self::Solution) -> Vec<usize> {
        solution.to_vertex_list()
    }

    fn compact2solution(&self, compact: &[usize]) -> Self::Solution {
        let mut solution = Solution::new(self.graph);
        for &v in compact {
            solution.add(v);
        }
        solution
    }

    fn global_cost(&self, solution: &Self::Solution) -> i64 {
        -solution.weight()
    }

    fn local_search(&self, solution: &mut Self::Solution, _rng: &mut StdRng) {
        loop {
            let mut changed = self.try_add(solution);
            if self.try_swap(solution) {
                changed = true;
            }
            if !changed {
                break;
            }
        }
    }

    fn perturbations(&self, _solution: &Self::Solution, _rng: &mut StdRng) -> Vec<Perturbation> {
        (0..self.graph.num_vertices())
            .map(|v| Perturbation { vertex_id: v })
            .collect()
    }

    fn apply_perturbation(&self, solution: &mut Self::Solution, p: &Perturbation, rng: &mut StdRng) {
        if solution.contains(p.vertex_id) {
            solution.remove(p.vertex_id);
            return;
        }
        let conflicting: Vec<usize> = solution
            .iter()
            .filter(|&m| !self.graph.has_edge(p.vertex_id, m))
            .collect();
        let mut conflicting = conflicting;
        conflicting.shuffle(rng);
        for m in conflicting {
            solution.remove(m);
        }
        solution.add(p.vertex_id);
    }

    /// Runs `update_core` against the new incumbent weight and drops any
    /// currently selected vertex that just left the relevant set — it can
    /// no longer belong to any clique heavier than `weight`.
    fn on_improvement(&self, solution: &mut Self::Solution, weight: Weight) {
        let mut core = self.core.lock().unwrap();
        core.update(weight);
        let evicted: Vec<usize> = solution
            .iter()
            .filter(|&v| !core.is_relevant(v))
            .collect();
        drop(core);
        for v in evicted {
            solution.remove(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DuplicatePolicy, GraphBuilder};
    use rand::SeedableRng;

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
    fn local_search_fills_the_whole_triangle() {
        let g = triangle();
        let scheme = CliqueLocalScheme::new(&g);
        let mut rng = StdRng::seed_from_u64(0);
        let mut solution = scheme.empty_solution();
        solution.add(0);
        scheme.local_search(&mut solution, &mut rng);
        assert!(solution.feasible());
        assert_eq!(solution.weight(), 3);
    }

    #[test]
    fn add_evicts_lighter_non_adjacent_members() {
        // 0-1 edge only; 2 isolated and heavy. Starting from {0,1}, adding 2
        // must evict both (neither adjacent to 2) since w(2) > w(0)+w(1).
        let mut b = GraphBuilder::new();
        b.add_vertices(3);
        b.set_weight(0, 1).unwrap();
        b.set_weight(1, 1).unwrap();
        b.set_weight(2, 5).unwrap();
        b.add_edge(0, 1, DuplicatePolicy::Fail).unwrap();
        let g = b.build().unwrap();
        let scheme = CliqueLocalScheme::new(&g);
        let mut solution = scheme.empty_solution();
        solution.add(0);
        solution.add(1);
        assert!(scheme.try_add(&mut solution));
        assert!(solution.contains(2));
        assert!(!solution.contains(0));
        assert!(!solution.contains(1));
    }
}

//! Generic best-first / iterated local search engine.
//!
//! The engine itself knows nothing about stable sets or cliques: it drives
//! any [`LocalScheme`] through perturb → local-search → accept cycles,
//! optionally across several worker threads that share one [`Output`]: N
//! threads, each a private clone of mutable state, reporting through one
//! shared mutex-guarded result sink.

use crate::config::{IterationGuard, Parameters};
use crate::graph::Weight;
use crate::output::Output;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single perturbation move: toggle one vertex's membership.
#[derive(Debug, Clone, Copy)]
pub struct Perturbation {
    pub vertex_id: usize,
}

/// The pluggable neighborhood contract.
///
/// Implementors must keep every method pure on its inputs apart from the
/// explicit `solution`/`rng` arguments — the engine shares one `&L` across
/// worker threads, so `L` itself is never mutated.
pub trait LocalScheme: Sync {
    /// The working solution representation (cheap to clone: threads and
    /// perturbation trials each work on their own copy).
    type Solution: Clone + Send;

    /// The empty solution (no vertices selected).
    fn empty_solution(&self) -> Self::Solution;

    /// A constructed starting solution, seeded for reproducibility.
    fn initial_solution(&self, seed: u64) -> Self::Solution;

    /// Compacts a solution to its canonical vertex list, for reporting and
    /// deduplication.
    fn solution2compact(&self, solution: &Self::Solution) -> Vec<usize>;

    /// Rebuilds a solution from a compact vertex list.
    fn compact2solution(&self, compact: &[usize]) -> Self::Solution;

    /// Lexicographic cost; lower is better. Here always `-weight(solution)`.
    fn global_cost(&self, solution: &Self::Solution) -> i64;

    /// Descends to a local optimum in the union of the add and (2,1)-swap
    /// neighborhoods.
    fn local_search(&self, solution: &mut Self::Solution, rng: &mut StdRng);

    /// Enumerates candidate perturbations out of `solution`.
    fn perturbations(&self, solution: &Self::Solution, rng: &mut StdRng) -> Vec<Perturbation>;

    /// Applies one perturbation, respecting membership preconditions.
    fn apply_perturbation(&self, solution: &mut Self::Solution, p: &Perturbation, rng: &mut StdRng);

    /// Called whenever `solution` is reported as a genuine improvement over
    /// every value seen so far (across all workers). Default no-op; the
    /// clique scheme overrides it to run `update_core` and drop whatever
    /// vertex just fell out of the relevant set.
    fn on_improvement(&self, _solution: &mut Self::Solution, _weight: Weight) {}
}

fn report<L: LocalScheme>(scheme: &L, output: &Output, solution: &L::Solution, tag: &str) -> bool {
    let vertices = scheme.solution2compact(solution);
    let weight: Weight = -scheme.global_cost(solution);
    output.update_solution(&vertices, weight, tag)
}

/// Runs one worker's perturb/local-search/accept loop until the shared
/// timer or iteration caps fire.
fn run_worker<L: LocalScheme>(scheme: &L, worker_id: usize, output: &Output, parameters: &Parameters) {
    let mut rng = StdRng::seed_from_u64(parameters.seed.wrapping_add(worker_id as u64));
    let mut solution = scheme.initial_solution(rng.random());
    scheme.local_search(&mut solution, &mut rng);
    if report(scheme, output, &solution, "best-first-initial") {
        let weight = -scheme.global_cost(&solution);
        scheme.on_improvement(&mut solution, weight);
    }

    let mut guard = IterationGuard::default();
    let timer = output.timer();
    while !timer.needs_to_end() && !guard.exhausted(parameters) {
        guard.tick();
        let perturbations = scheme.perturbations(&solution, &mut rng);
        if perturbations.is_empty() {
            break;
        }
        let choice = &perturbations[rng.random_range(0..perturbations.len())];
        let mut candidate = solution.clone();
        scheme.apply_perturbation(&mut candidate, choice, &mut rng);
        scheme.local_search(&mut candidate, &mut rng);

        if scheme.global_cost(&candidate) <= scheme.global_cost(&solution) {
            solution = candidate;
        }
        if report(scheme, output, &solution, "best-first") {
            guard.record_improvement();
            let weight = -scheme.global_cost(&solution);
            scheme.on_improvement(&mut solution, weight);
        }
    }
    report(scheme, output, &solution, "best-first-final");
}

/// Runs `num_workers` independent workers against `scheme`, all reporting
/// through `output`. Borrows `scheme` for the duration, so `L` need not be
/// `'static` (it typically borrows the graph it searches).
pub fn solve<L: LocalScheme>(scheme: &L, output: &Output, parameters: &Parameters, num_workers: usize) {
    if num_workers <= 1 {
        run_worker(scheme, 0, output, parameters);
        return;
    }
    std::thread::scope(|s| {
        for worker_id in 0..num_workers {
            let output = output.clone();
            let parameters = parameters.clone();
            s.spawn(move || run_worker(scheme, worker_id, &output, &parameters));
        }
    });
}

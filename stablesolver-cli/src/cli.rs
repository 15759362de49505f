use clap::Parser;
use std::path::PathBuf;

/// Maximum-weight independent set / maximum-weight clique solver.
///
/// Solving a clique is solving an independent set on the complement graph
/// (`--complementary`), so this binary only ever drives the stable-set
/// algorithm family plus the shared MILP relaxation.
#[derive(Parser, Debug)]
#[command(
    name = "stablesolver",
    version,
    about = "Maximum-weight independent set / maximum-weight clique solver",
    after_help = "\
Examples:
  stablesolver --input graph.gr --format dimacs1992 --algorithm greedy-gwmin
  stablesolver --input graph.mtx --format matrixmarket --algorithm local-search-row-weighting-2 --time-limit 10
  stablesolver --input graph.gr --format dimacs1992 --complementary --algorithm greedy-strong
  stablesolver --input graph.gr --format dimacs1992 --algorithm local-search --certificate sol.txt --output sol.json"
)]
pub struct Cli {
    /// Algorithm keyword: greedy-gwmin, greedy-gwmax, greedy-gwmin2,
    /// greedy-strong, local-search, local-search-row-weighting-1,
    /// local-search-row-weighting-2, large-neighborhood-search,
    /// milp-1|2|3-*.
    #[arg(long)]
    pub algorithm: String,

    /// Path to the input instance. Use - for stdin.
    #[arg(long)]
    pub input: PathBuf,

    /// Input format: dimacs1992, dimacs2010, matrixmarket, chaco, snap.
    #[arg(long)]
    pub format: String,

    /// Wall-clock time limit, in seconds.
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Maximum number of search iterations.
    #[arg(long)]
    pub maximum_number_of_iterations: Option<u64>,

    /// Maximum number of iterations without improvement.
    #[arg(long)]
    pub maximum_number_of_iterations_without_improvement: Option<u64>,

    /// Treat every vertex weight as 1, regardless of the input file.
    #[arg(long)]
    pub unweighted: bool,

    /// Solve on the complement graph (maximum-weight clique).
    #[arg(long)]
    pub complementary: bool,

    /// Path to write the certificate (whitespace-separated vertex ids).
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Path to write the JSON report. Printed to stdout if omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Number of worker threads for the best-first engine (`local-search`
    /// only). Every other algorithm ignores this.
    #[arg(long, default_value_t = 1)]
    pub num_workers: usize,

    /// Logging verbosity: 0 = warn, 1 = info, 2 = debug.
    #[arg(long, default_value_t = 0)]
    pub verbosity_level: u8,
}

mod cli;
mod formats;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use stablesolver::graph::{DuplicatePolicy, Graph, GraphBuilder};
use stablesolver::{Output, Parameters};
use std::io::Read as _;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity_level);

    let text = read_input(&cli.input)?;
    let format = formats::Format::parse(&cli.format).context("unknown --format")?;
    let mut graph = formats::read(&text, format).context("failed to parse input instance")?;
    if cli.unweighted {
        graph = strip_weights(&graph);
    }
    if cli.complementary {
        graph = graph.complement();
    }

    let parameters = Parameters {
        time_limit: cli.time_limit.map(Duration::from_secs),
        seed: cli.seed,
        maximum_number_of_iterations: cli.maximum_number_of_iterations,
        maximum_number_of_iterations_without_improvement: cli
            .maximum_number_of_iterations_without_improvement,
    };

    let mut output = Output::new(parameters.timer());
    if let Some(path) = &cli.certificate {
        output = output.with_certificate(path.clone());
    }

    if is_milp_keyword(&cli.algorithm) {
        run_milp(&graph, &output)?;
    } else {
        let algorithm = stablesolver::stable::Algorithm::parse(&cli.algorithm)
            .context("unknown --algorithm")?;
        stablesolver::stable::solve(algorithm, &graph, &output, &parameters, cli.num_workers.max(1));
    }

    let summary = output.algorithm_end(graph.num_vertices());
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize report")?;
    if let Some(path) = &cli.output {
        std::fs::write(path, &json).with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}

fn read_input(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read instance from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Rebuilds `graph` with every weight set to 1, keeping its edge set.
fn strip_weights(graph: &Graph) -> Graph {
    let mut builder = GraphBuilder::new();
    builder.add_vertices(graph.num_vertices());
    builder.set_unweighted();
    for edge in graph.edges() {
        builder
            .add_edge(edge.v1, edge.v2, DuplicatePolicy::Ignore)
            .expect("edges copied from a valid graph are always valid");
    }
    builder.build().expect("stripping weights never invalidates a graph")
}

/// Recognizes `milp-1-*`, `milp-2-*`, `milp-3-*` keywords. All three
/// currently resolve to the same LP-relaxation formulation; the suffix only
/// ever picks the `good_lp` backend feature compiled into this binary.
fn is_milp_keyword(keyword: &str) -> bool {
    keyword.starts_with("milp-1") || keyword.starts_with("milp-2") || keyword.starts_with("milp-3")
}

#[cfg(feature = "ilp-solver")]
fn run_milp(graph: &Graph, output: &Output) -> Result<()> {
    stablesolver::milp::solve(stablesolver::milp::Problem::Stable, graph, output)
        .map_err(|err| anyhow::anyhow!("MILP solve failed: {err}"))
}

#[cfg(not(feature = "ilp-solver"))]
fn run_milp(_graph: &Graph, _output: &Output) -> Result<()> {
    anyhow::bail!("this build was compiled without an ILP solver backend")
}

fn init_tracing(verbosity_level: u8) {
    let default_filter = match verbosity_level {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

//! Maximum-weight independent set (MWIS) and maximum-weight clique (MWC):
//! exact reductions, greedy constructors, row-weighting and large-
//! neighborhood local search, and a shared best-first / iterated local
//! search engine.
//!
//! The two problems are duals under [`graph::Graph::complement`]; this
//! crate implements each with the data structures and incremental
//! invariants its local searches actually need, sharing only the graph
//! model, indexed containers, and the [`output::Output`] reporting
//! protocol.

pub mod bestfirst;
pub mod clique;
pub mod config;
pub mod containers;
pub mod error;
pub mod graph;
#[cfg(feature = "ilp-solver")]
pub mod milp;
pub mod output;
pub mod stable;
pub mod time;

pub use config::Parameters;
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder};
pub use output::Output;

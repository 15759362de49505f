//! Maximum-weight clique: greedy constructors, best-first search and the
//! `update_core` weight-pruning operator.

pub mod algorithm;
pub mod greedy;
pub mod local_search_bestfirst;
pub mod solution;
pub mod update_core;

pub use algorithm::{solve, Algorithm};
pub use solution::Solution;
pub use update_core::CoreBound;

//! Error types for the stablesolver library.
//!
//! Input errors (malformed instance data, unknown algorithm keywords) are
//! ordinary [`Error`] values that propagate to the CLI. Invariant violations
//! (a score mismatch after a move, a double-add on an indexed set) are
//! programmer bugs: they are reported through [`bug`] instead, which logs and
//! panics rather than returning a `Result` a caller could paper over.

use thiserror::Error;

/// Errors that can occur while building or solving a stable/clique instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An edge endpoint is out of range.
    #[error("vertex index out of bounds: {index} >= {num_vertices}")]
    VertexOutOfBounds { index: usize, num_vertices: usize },

    /// `add_edge(v, v, ..)` was requested.
    #[error("self-loop rejected at vertex {vertex}")]
    SelfLoop { vertex: usize },

    /// `add_edge` was called with `DuplicatePolicy::Fail` on a repeated pair.
    #[error("duplicate edge ({u}, {v}) rejected by duplicate policy")]
    DuplicateEdge { u: usize, v: usize },

    /// `set_weight` was called with a negative weight.
    #[error("negative weight {weight} rejected for vertex {vertex}")]
    NegativeWeight { vertex: usize, weight: i64 },

    /// The weights vector passed to a constructor has the wrong length.
    #[error("invalid weights length: expected {expected}, got {got}")]
    InvalidWeightsLength { expected: usize, got: usize },

    /// An unknown input format keyword was given to the builder.
    #[error("unknown input format: {0}")]
    UnknownFormat(String),

    /// The input file could not be parsed in the requested format.
    #[error("parse error reading {format} input: {message}")]
    ParseError { format: String, message: String },

    /// An unknown algorithm keyword was given to the CLI selector.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// I/O failure reading an input file or writing a certificate/output file.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type alias for stablesolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Report an invariant violation: log it, then panic.
///
/// Used for programmer-error conditions (double-add on an indexed set, a
/// score that no longer matches its defining sum, ...). These are never
/// recoverable input errors, so they never flow through [`Error`].
macro_rules! bug {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::error!(%message, "invariant violation");
        panic!("invariant violation: {message}");
    }};
}

pub(crate) use bug;

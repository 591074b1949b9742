//! Error types for evolving graph operations.

use thiserror::Error;

/// Error type for evolving graph operations.
///
/// A missing path is not an error: traversal functions return `Option`.
#[derive(Error, Debug)]
pub enum Error {
    /// Key or index not registered in the graph.
    #[error("Node not found: {0}")]
    UnknownNode(String),

    /// Timestamp the graph has never seen.
    #[error("Timestamp not found: {0}")]
    UnknownTimestamp(String),

    /// Input rejected before any mutation (length mismatch, bad row, bad parameter).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Windowing requires timestamps in non-decreasing insertion order.
    #[error("evolving graph is not sorted by timestamp; call sort_timestamps first")]
    Unsorted,

    /// Window bounds out of order.
    #[error("invalid time range: start {start} > end {end}")]
    InvalidTimeRange { start: String, end: String },

    /// Katz resolvent could not be computed for this alpha.
    #[error(
        "Katz solve diverged for alpha {alpha} (spectral radius ~{spectral_radius:.4}{}): {reason}",
        .timestamp.as_ref().map(|t| format!(", timestamp {t}")).unwrap_or_default()
    )]
    NumericDivergence {
        alpha: f64,
        spectral_radius: f64,
        timestamp: Option<String>,
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for evolving graph operations.
pub type Result<T> = std::result::Result<T, Error>;

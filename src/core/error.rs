//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Traversal failures stay inside their unit of work (one profile, one
/// strategy) and are logged rather than propagated; this type surfaces
/// only where a caller has to decide what to do next.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from reading a directory or
    /// stat-ing a file during traversal.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents an error that occurred when a per-root scan task was
    /// joined, usually because the task panicked.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

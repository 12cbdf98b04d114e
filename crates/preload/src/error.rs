//! Preload error types.

use radeck_core::PreloadTarget;

/// Why a single target failed to load.
///
/// These never escape a preload run; they are recorded per target.
#[derive(Debug, thiserror::Error)]
pub enum PreloadError {
    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{target} returned status {status}")]
    Status {
        /// The requested target
        target: PreloadTarget,
        /// HTTP status code
        status: u16,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target could not be resolved to a location
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// The fetch task panicked or was aborted
    #[error("Fetch aborted: {0}")]
    Aborted(String),
}

//! Preload model - targets and the observable state of a preload run.

use serde::{Deserialize, Serialize};

/// An opaque resource locator (URL or asset path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreloadTarget(String);

impl PreloadTarget {
    /// Create a target from a locator.
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// The raw locator.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PreloadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PreloadTarget {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PreloadTarget {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle of a single preload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreloadPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetches in flight
    Loading,
    /// Every target settled (terminal)
    Done,
}

/// Counters for a preload run.
///
/// `loaded_count + failed_count` only ever grows, and reaches `total`
/// exactly when the phase becomes [`PreloadPhase::Done`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloadState {
    /// Current phase
    pub phase: PreloadPhase,

    /// Number of targets in the run
    pub total: usize,

    /// Targets fetched successfully
    pub loaded_count: usize,

    /// Targets that failed to fetch
    pub failed_count: usize,
}

impl PreloadState {
    /// State for a run that has just been handed `total` targets.
    pub fn loading(total: usize) -> Self {
        Self {
            phase: if total == 0 { PreloadPhase::Done } else { PreloadPhase::Loading },
            total,
            loaded_count: 0,
            failed_count: 0,
        }
    }

    /// Targets that have either succeeded or failed.
    pub fn settled(&self) -> usize {
        self.loaded_count + self.failed_count
    }

    /// `round(settled / total * 100)`, or 0 for an empty run.
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.settled() as f64 * 100.0 / self.total as f64).round() as u32
    }

    /// Whether every target has settled.
    pub fn is_loaded(&self) -> bool {
        self.phase == PreloadPhase::Done
    }

    /// Record one settlement. Settlements past `total` are ignored.
    pub fn record(&mut self, success: bool) {
        if self.settled() >= self.total {
            return;
        }
        if success {
            self.loaded_count += 1;
        } else {
            self.failed_count += 1;
        }
        if self.settled() == self.total {
            self.phase = PreloadPhase::Done;
        }
    }
}

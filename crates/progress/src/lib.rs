//! Progress Tracking
//!
//! Weighted completion for quality objectives and overview snapshots.

#![warn(missing_docs)]

pub mod aggregator;
pub mod snapshot;

pub use aggregator::{
    Aggregator, ObjectiveMetrics, WeightedAggregator, indicator_progress, objective_metrics,
};
pub use snapshot::{ProgressSnapshot, ObjectiveProgress, clamp_percent, indicator_label};

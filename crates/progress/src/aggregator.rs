//! Weighted progress aggregation.
//!
//! Each task contributes `completed * allocated / 100` to its indicator.
//! Progress is that weighted sum relative to the allocation sum, rounded
//! half away from zero. Allocation sums of 0, under 100 or over 100 are all
//! tolerated.

use radeck_core::{Indicator, Objective, Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Progress aggregation over quality objectives.
pub trait Aggregator: Send + Sync {
    /// Weighted progress of a single indicator, in percent.
    fn indicator_progress(&self, indicator: &Indicator) -> u32;

    /// Summary metrics for an objective. `None` yields all-zero metrics.
    fn objective_metrics(&self, objective: Option<&Objective>) -> ObjectiveMetrics;
}

/// Summary metrics for one objective.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveMetrics {
    /// Tasks across all indicators
    pub total_tasks: usize,

    /// Tasks marked Completed or at 100% completion
    pub completed_tasks: usize,

    /// Tasks marked Ongoing
    pub ongoing_tasks: usize,

    /// `total_tasks - completed_tasks`; may overlap with `ongoing_tasks`
    pub pending_tasks: usize,

    /// Weighted progress over every task of the objective
    pub overall_progress: u32,

    /// Weighted progress per indicator, in display order
    pub indicator_progress: Vec<u32>,
}

/// Default aggregator using allocation-weighted completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedAggregator;

impl WeightedAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for WeightedAggregator {
    fn indicator_progress(&self, indicator: &Indicator) -> u32 {
        weighted_progress(indicator.tasks.iter())
    }

    fn objective_metrics(&self, objective: Option<&Objective>) -> ObjectiveMetrics {
        let Some(objective) = objective else {
            return ObjectiveMetrics::default();
        };

        let mut total_tasks = 0;
        let mut completed_tasks = 0;
        let mut ongoing_tasks = 0;

        for task in objective.tasks() {
            total_tasks += 1;
            if task.is_done() {
                completed_tasks += 1;
            }
            if task.status == TaskStatus::Ongoing {
                ongoing_tasks += 1;
            }
        }

        // Allocation is summed over the flattened list, not per indicator.
        let overall_progress = weighted_progress(objective.tasks());

        let indicator_progress = objective
            .indicators
            .iter()
            .map(|ind| self.indicator_progress(ind))
            .collect();

        ObjectiveMetrics {
            total_tasks,
            completed_tasks,
            ongoing_tasks,
            pending_tasks: total_tasks.saturating_sub(completed_tasks),
            overall_progress,
            indicator_progress,
        }
    }
}

/// Weighted progress of an indicator using the default aggregator.
pub fn indicator_progress(indicator: &Indicator) -> u32 {
    WeightedAggregator.indicator_progress(indicator)
}

/// Objective metrics using the default aggregator.
pub fn objective_metrics(objective: Option<&Objective>) -> ObjectiveMetrics {
    WeightedAggregator.objective_metrics(objective)
}

fn weighted_progress<'a>(tasks: impl Iterator<Item = &'a Task>) -> u32 {
    let (allocated, weighted) = tasks.fold((0.0_f64, 0.0_f64), |(alloc, weight), task| {
        (alloc + task.allocated(), weight + task.weighted_completion())
    });
    percent_of(weighted, allocated)
}

/// `round(part / whole * 100)` with ties away from zero, or 0 when
/// `whole` is not positive.
///
/// The multiplication happens first so exact ties (52.5) stay exact.
pub(crate) fn percent_of(part: f64, whole: f64) -> u32 {
    if whole > 0.0 {
        // Casting saturates: negative results become 0.
        (part * 100.0 / whole).round() as u32
    } else {
        0
    }
}

//! Overview snapshots and display helpers.

use chrono::{DateTime, Utc};
use radeck_core::{Indicator, Objective};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::{Aggregator, ObjectiveMetrics};

/// Metrics of every objective at a point in time, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Per-objective progress
    pub objectives: Vec<ObjectiveProgress>,
}

/// One overview card.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveProgress {
    /// Objective number
    pub number: u32,

    /// Objective title
    pub title: String,

    /// Short labels for each indicator ("QI-1: Gap...")
    pub indicator_labels: Vec<String>,

    /// Computed metrics
    pub metrics: ObjectiveMetrics,
}

impl ProgressSnapshot {
    /// Compute metrics for every objective.
    pub fn capture<A: Aggregator + ?Sized>(aggregator: &A, objectives: &[Objective]) -> Self {
        let objectives: Vec<_> = objectives
            .iter()
            .map(|obj| ObjectiveProgress {
                number: obj.number,
                title: obj.title.clone(),
                indicator_labels: obj
                    .indicators
                    .iter()
                    .enumerate()
                    .map(|(idx, ind)| indicator_label(idx, ind))
                    .collect(),
                metrics: aggregator.objective_metrics(Some(obj)),
            })
            .collect();

        debug!("Captured progress for {} objectives", objectives.len());

        Self {
            timestamp: Utc::now(),
            objectives,
        }
    }

    /// Look up an objective's progress by number.
    pub fn get(&self, number: u32) -> Option<&ObjectiveProgress> {
        self.objectives.iter().find(|o| o.number == number)
    }
}

/// Clamp a percentage into `[0, 100]` for drawing gauges. Non-finite reads as 0.
pub fn clamp_percent(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Overview label for the indicator at `index`: `QI-<n>: <first word>...`.
pub fn indicator_label(index: usize, indicator: &Indicator) -> String {
    let head = indicator.name.split(' ').next().unwrap_or_default();
    format!("QI-{}: {}...", index + 1, head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::WeightedAggregator;
    use radeck_core::{Task, TaskStatus};

    fn objectives() -> Vec<Objective> {
        vec![
            Objective::new(1, "IVDR registration").with_indicator(Indicator::new(
                "Truenat HCV under IVDR",
                vec![
                    Task::new("T1", "Technical Dossier preparation", 70.0, TaskStatus::Ongoing, 75.0),
                    Task::new("T2", "Review by stakeholders", 15.0, TaskStatus::Ongoing, 0.0),
                    Task::new("T3", "Submission to Notified Body", 15.0, TaskStatus::Ongoing, 0.0),
                ],
            )),
            Objective::new(3, "IEC 62366-1")
                .with_indicator(Indicator::new(
                    "Gap Assessment",
                    vec![
                        Task::new("T1", "Gap Analysis", 50.0, TaskStatus::Completed, 100.0),
                        Task::new("T2", "Inter-department Meeting", 25.0, TaskStatus::Completed, 100.0),
                        Task::new("T3", "Feedback Assessment", 25.0, TaskStatus::Completed, 100.0),
                    ],
                ))
                .with_indicator(Indicator::new(
                    "Implementation",
                    vec![Task::new("T1", "Procedures", 100.0, TaskStatus::Ongoing, 30.0)],
                )),
        ]
    }

    #[test]
    fn test_capture_keeps_display_order() {
        let snapshot = ProgressSnapshot::capture(&WeightedAggregator, &objectives());
        let numbers: Vec<_> = snapshot.objectives.iter().map(|o| o.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_capture_metrics() {
        let snapshot = ProgressSnapshot::capture(&WeightedAggregator, &objectives());

        let first = snapshot.get(1).unwrap();
        assert_eq!(first.metrics.overall_progress, 53);
        assert_eq!(first.indicator_labels, vec!["QI-1: Truenat..."]);

        let third = snapshot.get(3).unwrap();
        assert_eq!(third.metrics.total_tasks, 4);
        assert_eq!(third.metrics.completed_tasks, 3);
        assert_eq!(third.metrics.ongoing_tasks, 1);
        assert_eq!(third.metrics.pending_tasks, 1);
        // (100 + 30) / 200
        assert_eq!(third.metrics.overall_progress, 65);
        assert_eq!(third.metrics.indicator_progress, vec![100, 30]);

        assert!(snapshot.get(2).is_none());
    }

    #[test]
    fn test_capture_empty() {
        let snapshot = ProgressSnapshot::capture(&WeightedAggregator, &[]);
        assert!(snapshot.objectives.is_empty());
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-4.0), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
        assert_eq!(clamp_percent(130.0), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_indicator_label_with_empty_name() {
        let label = indicator_label(1, &Indicator::new("", vec![]));
        assert_eq!(label, "QI-2: ...");
    }
}

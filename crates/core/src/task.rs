//! Task model - the smallest weighted unit of work under an indicator.

use serde::{Deserialize, Deserializer, Serialize};

/// A task contributing a share of its indicator's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within the owning indicator (e.g. "T1")
    pub id: String,

    /// Display name
    pub name: String,

    /// Share of the indicator's weight (0-100)
    #[serde(rename = "allocated", default, deserialize_with = "lenient_number")]
    pub allocated_percent: f64,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Progress within this task (0-100)
    #[serde(rename = "completed", default, deserialize_with = "lenient_number")]
    pub completed_percent: f64,
}

impl Task {
    /// Create a task.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        allocated_percent: f64,
        status: TaskStatus,
        completed_percent: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            allocated_percent,
            status,
            completed_percent,
        }
    }

    /// Allocation weight, with non-finite values read as zero.
    pub fn allocated(&self) -> f64 {
        finite_or_zero(self.allocated_percent)
    }

    /// Completion, with non-finite values read as zero.
    pub fn completed(&self) -> f64 {
        finite_or_zero(self.completed_percent)
    }

    /// Weighted contribution to the owning indicator: `completed * allocated / 100`.
    pub fn weighted_completion(&self) -> f64 {
        self.completed() * self.allocated() / 100.0
    }

    /// A task counts as done when its status says so or its completion has
    /// reached 100, whichever comes first.
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Completed || self.completed() >= 100.0
    }
}

/// Task status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// In progress
    Ongoing,
    /// Finished
    Completed,
}

impl TaskStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Ongoing => "Ongoing",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "ongoing" => Ok(TaskStatus::Ongoing),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown task status: {}", other)),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Accepts a number or `null`; `null` reads as zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_numbers_default_to_zero() {
        let task: Task = serde_json::from_str(r#"{"id": "T1", "name": "Gap Analysis"}"#).unwrap();
        assert_eq!(task.allocated_percent, 0.0);
        assert_eq!(task.completed_percent, 0.0);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_null_numbers_read_as_zero() {
        let task: Task = serde_json::from_str(
            r#"{"id": "T2", "name": "EU DoC", "allocated": null, "status": "Ongoing", "completed": null}"#,
        )
        .unwrap();
        assert_eq!(task.allocated(), 0.0);
        assert_eq!(task.completed(), 0.0);
        assert_eq!(task.status, TaskStatus::Ongoing);
    }

    #[test]
    fn test_non_finite_values_contribute_nothing() {
        let task = Task::new("T1", "x", f64::NAN, TaskStatus::Ongoing, f64::INFINITY);
        assert_eq!(task.allocated(), 0.0);
        assert_eq!(task.completed(), 0.0);
        assert_eq!(task.weighted_completion(), 0.0);
    }

    #[test]
    fn test_weighted_completion() {
        let task = Task::new("T1", "Certification by NB", 70.0, TaskStatus::Ongoing, 75.0);
        assert_eq!(task.weighted_completion(), 52.5);
    }

    #[test]
    fn test_is_done_by_status_or_completion() {
        let by_status = Task::new("T1", "a", 50.0, TaskStatus::Completed, 0.0);
        let by_completion = Task::new("T2", "b", 50.0, TaskStatus::Ongoing, 100.0);
        let neither = Task::new("T3", "c", 50.0, TaskStatus::Ongoing, 99.0);
        assert!(by_status.is_done());
        assert!(by_completion.is_done());
        assert!(!neither.is_done());
    }

    #[test]
    fn test_status_round_trip_names() {
        assert_eq!("ongoing".parse::<TaskStatus>().unwrap(), TaskStatus::Ongoing);
        assert_eq!(TaskStatus::Completed.to_string(), "Completed");
        assert!("blocked".parse::<TaskStatus>().is_err());
    }
}

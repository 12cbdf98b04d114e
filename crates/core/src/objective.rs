//! Objective model - top-level quality objective composed of indicators.

use serde::{Deserialize, Serialize};
use crate::task::Task;

/// A quality objective tracked on the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Objective number, as shown on its badge
    pub number: u32,

    /// Objective title
    pub title: String,

    /// Indicators in display order
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

impl Objective {
    /// Create an objective with no indicators.
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            indicators: Vec::new(),
        }
    }

    /// Add an indicator.
    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicators.push(indicator);
        self
    }

    /// All tasks across every indicator, in display order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.indicators.iter().flat_map(|ind| ind.tasks.iter())
    }
}

/// A named grouping of tasks contributing to one objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Indicator name
    pub name: String,

    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Indicator {
    /// Create an indicator.
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            tasks,
        }
    }

    /// Sum of the tasks' allocation weights.
    pub fn allocated_total(&self) -> f64 {
        self.tasks.iter().map(Task::allocated).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    #[test]
    fn test_tasks_flatten_in_order() {
        let objective = Objective::new(2, "ISO 14001")
            .with_indicator(Indicator::new(
                "Gap Assessment",
                vec![
                    Task::new("T1", "Gap Analysis", 50.0, TaskStatus::Completed, 100.0),
                    Task::new("T2", "Inter-department Meeting", 50.0, TaskStatus::Ongoing, 30.0),
                ],
            ))
            .with_indicator(Indicator::new(
                "Implementation",
                vec![Task::new("T1", "Procedures", 100.0, TaskStatus::Ongoing, 30.0)],
            ));

        let names: Vec<_> = objective.tasks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Gap Analysis", "Inter-department Meeting", "Procedures"]);
    }

    #[test]
    fn test_deserialize_without_indicators() {
        let objective: Objective =
            serde_json::from_str(r#"{"number": 7, "title": "Empty"}"#).unwrap();
        assert!(objective.indicators.is_empty());
        assert_eq!(objective.tasks().count(), 0);
    }

    #[test]
    fn test_allocated_total_tolerates_uneven_sums() {
        let indicator = Indicator::new(
            "Over",
            vec![
                Task::new("T1", "a", 80.0, TaskStatus::Pending, 0.0),
                Task::new("T2", "b", 40.0, TaskStatus::Pending, 0.0),
            ],
        );
        assert_eq!(indicator.allocated_total(), 120.0);
    }
}

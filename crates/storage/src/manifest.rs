//! Deck content manifest.

use std::collections::HashSet;
use std::path::PathBuf;

use radeck_core::{Objective, PreloadTarget};
use serde::{Deserialize, Serialize};

use crate::trait_::Result;

const SAMPLE_DECK: &str = include_str!("../assets/sample_deck.json");

/// Everything a deck needs besides its markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckManifest {
    /// Deck title
    pub title: String,

    /// Local directory the asset paths are relative to
    #[serde(default)]
    pub asset_root: Option<PathBuf>,

    /// Base URL the asset paths are relative to, when served remotely
    #[serde(default)]
    pub base_url: Option<String>,

    /// Assets to preload before the deck is shown
    #[serde(default)]
    pub critical_images: Vec<PreloadTarget>,

    /// Quality objectives in display order
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

impl DeckManifest {
    /// The bundled sample deck.
    pub fn sample() -> Result<Self> {
        Ok(serde_json::from_str(SAMPLE_DECK)?)
    }

    /// Check content for suspicious but tolerated data.
    pub fn validate(&self) -> Vec<ContentWarning> {
        let mut warnings = Vec::new();
        let mut numbers = HashSet::new();

        for objective in &self.objectives {
            if !numbers.insert(objective.number) {
                warnings.push(ContentWarning::DuplicateObjective {
                    number: objective.number,
                });
            }

            for indicator in &objective.indicators {
                let sum = indicator.allocated_total();
                if !indicator.tasks.is_empty() && (sum - 100.0).abs() > f64::EPSILON {
                    warnings.push(ContentWarning::AllocationSum {
                        objective: objective.number,
                        indicator: indicator.name.clone(),
                        sum,
                    });
                }

                let mut ids = HashSet::new();
                for task in &indicator.tasks {
                    if !ids.insert(task.id.as_str()) {
                        warnings.push(ContentWarning::DuplicateTaskId {
                            objective: objective.number,
                            indicator: indicator.name.clone(),
                            task_id: task.id.clone(),
                        });
                    }
                }
            }
        }

        warnings
    }
}

/// Content that loads fine but probably isn't what the author meant.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentWarning {
    /// Allocation weights under an indicator don't add up to 100
    AllocationSum {
        /// Objective number
        objective: u32,
        /// Indicator name
        indicator: String,
        /// Actual sum
        sum: f64,
    },
    /// Two tasks under one indicator share an id
    DuplicateTaskId {
        /// Objective number
        objective: u32,
        /// Indicator name
        indicator: String,
        /// Repeated id
        task_id: String,
    },
    /// Two objectives share a number
    DuplicateObjective {
        /// Repeated number
        number: u32,
    },
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentWarning::AllocationSum { objective, indicator, sum } => write!(
                f,
                "objective {} / {}: allocations sum to {} instead of 100",
                objective, indicator, sum
            ),
            ContentWarning::DuplicateTaskId { objective, indicator, task_id } => write!(
                f,
                "objective {} / {}: task id {} used more than once",
                objective, indicator, task_id
            ),
            ContentWarning::DuplicateObjective { number } => {
                write!(f, "objective number {} used more than once", number)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radeck_core::{Indicator, Task, TaskStatus};

    #[test]
    fn test_sample_parses_and_is_clean() {
        let manifest = DeckManifest::sample().unwrap();
        assert_eq!(manifest.objectives.len(), 3);
        assert_eq!(manifest.critical_images.len(), 14);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_minimal_manifest_defaults() {
        let manifest: DeckManifest = serde_json::from_str(r#"{"title": "Empty"}"#).unwrap();
        assert!(manifest.objectives.is_empty());
        assert!(manifest.critical_images.is_empty());
        assert!(manifest.asset_root.is_none());
    }

    #[test]
    fn test_validate_reports_problems() {
        let manifest = DeckManifest {
            title: "Broken".to_string(),
            asset_root: None,
            base_url: None,
            critical_images: vec![],
            objectives: vec![
                Objective::new(1, "A").with_indicator(Indicator::new(
                    "Under",
                    vec![
                        Task::new("T1", "a", 40.0, TaskStatus::Pending, 0.0),
                        Task::new("T1", "b", 40.0, TaskStatus::Pending, 0.0),
                    ],
                )),
                Objective::new(1, "B"),
            ],
        };

        let warnings = manifest.validate();
        assert_eq!(warnings.len(), 3);
        assert!(matches!(
            warnings[0],
            ContentWarning::AllocationSum { objective: 1, sum, .. } if sum == 80.0
        ));
        assert!(matches!(warnings[1], ContentWarning::DuplicateTaskId { .. }));
        assert_eq!(warnings[2], ContentWarning::DuplicateObjective { number: 1 });
        assert_eq!(
            warnings[2].to_string(),
            "objective number 1 used more than once"
        );
    }
}

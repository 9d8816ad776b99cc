use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::model::StepResult;

/// The challenge flavour, which selects the scoring strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    /// A race to observe the listed taxa before the other participants.
    Race,
    /// A treasure hunt solved step by step at given locations.
    Hunt,
    /// A quiz answered by making the right observation.
    Quiz,
    /// Exploration of the quadrants of a bounding box.
    Explore,
}

/// Calculation lifecycle of an activity.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    /// Never calculated.
    #[default]
    None,
    /// A run is in flight (or was interrupted mid-flight).
    Calculating,
    /// At least one step has a result from the current run.
    Calculated,
    /// The last run ended with a disable reason set.
    Error,
}

/// Why an activity is excluded from calculation until re-enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisableReason {
    AdminDisabled,
    TooManyResults,
    FailedToCalculate,
}

/// One scoring round. The criteria are passed verbatim as upstream query
/// parameters; the reserved geo/taxon keys are also read by the strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStep {
    pub id: Uuid,
    pub description: String,
    pub criteria: BTreeMap<String, String>,
}

impl ActivityStep {
    pub fn new(description: impl Into<String>) -> Self {
        ActivityStep {
            id: Uuid::new_v4(),
            description: description.into(),
            criteria: BTreeMap::new(),
        }
    }

    pub fn with_criterion(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.insert(key.into(), value.into());
        self
    }

    /// Case-insensitive criteria lookup. Criteria arrive from user input with
    /// arbitrary casing but are matched like the upstream API matches them.
    pub fn criterion(&self, key: &str) -> Option<&str> {
        self.criteria
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_criterion(&self, key: &str) -> bool {
        self.criterion(key).is_some()
    }
}

/// A gamified challenge within an event.
///
/// `results[i]` always belongs to `steps[i]`; results never outnumber steps.
/// A calculation run is the only writer of `status`, `disable_reason`,
/// `calculated` and `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    pub disable_reason: Option<DisableReason>,
    /// When the newest step result was produced.
    pub calculated: Option<DateTime<Utc>>,
    pub steps: Vec<ActivityStep>,
    pub results: Vec<StepResult>,
}

impl Activity {
    pub fn new(event_id: Uuid, name: impl Into<String>, activity_type: ActivityType) -> Self {
        Activity {
            id: Uuid::new_v4(),
            event_id,
            name: name.into(),
            description: None,
            activity_type,
            status: ActivityStatus::default(),
            disable_reason: None,
            calculated: None,
            steps: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: ActivityStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Exclude the activity from calculation until [`Activity::enable`].
    pub fn disable(&mut self) {
        self.disable_reason = Some(DisableReason::AdminDisabled);
    }

    /// Clear any disable reason, making the activity calculable again.
    pub fn enable(&mut self) {
        self.disable_reason = None;
    }

    pub fn is_disabled(&self) -> bool {
        self.disable_reason.is_some()
    }

    /// The step a result round belongs to, by position.
    pub fn step_for_result(&self, index: usize) -> Option<&ActivityStep> {
        if index < self.results.len() {
            self.steps.get(index)
        } else {
            None
        }
    }
}

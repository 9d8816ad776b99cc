use thiserror::Error;
use uuid::Uuid;

use super::{explore, hunt, quiz, race};
use crate::inat::Observation;
use crate::model::{ActivityStep, ActivityType, Calculation, StepResult};

/// Rejected before any upstream call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The activity must have between 1 and {max} steps, found {found}")]
    StepCount { found: usize, max: usize },

    #[error("A race is scored as a single step, found {found}")]
    RaceStepCount { found: usize },

    #[error("Step {step} requires the '{key}' criterion")]
    MissingCriterion { step: usize, key: &'static str },

    #[error("Step {step} does not support the '{key}' criterion, use {instead} instead")]
    UnsupportedCriterion {
        step: usize,
        key: &'static str,
        instead: &'static str,
    },
}

/// A scoring failure. Surfaces as a failed run, never as a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Observation {observation} has no usable location")]
    UnusableLocation { observation: u64 },

    #[error("Observation {observation} carries no taxon ancestry")]
    MissingAncestry { observation: u64 },

    #[error("Criterion '{key}' is not numeric: '{value}'")]
    MalformedCriterion { key: &'static str, value: String },
}

/// Scoring strategy, selected by activity type. One variant per type keeps
/// the dispatch exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Race,
    Hunt,
    Quiz,
    Explore,
}

impl Strategy {
    pub fn for_type(activity_type: ActivityType) -> Self {
        match activity_type {
            ActivityType::Race => Strategy::Race,
            ActivityType::Hunt => Strategy::Hunt,
            ActivityType::Quiz => Strategy::Quiz,
            ActivityType::Explore => Strategy::Explore,
        }
    }

    /// Strategy-specific criteria checks, run before any fetch.
    pub fn validate(&self, steps: &[ActivityStep]) -> Result<(), ValidationError> {
        match self {
            Strategy::Race => race::validate(steps),
            Strategy::Hunt => hunt::validate(steps),
            Strategy::Quiz => quiz::validate(steps),
            Strategy::Explore => explore::validate(steps),
        }
    }

    /// Score one step from its fetched observations.
    ///
    /// Pure apart from the error path. The roster is already lowercased and
    /// is authoritative: observations by anyone else are ignored.
    pub fn score(
        &self,
        roster: &[String],
        step: &ActivityStep,
        observations: &[Observation],
    ) -> Result<StepResult, ScoreError> {
        match self {
            Strategy::Race => race::score(roster, step, observations),
            Strategy::Hunt => hunt::score(roster, step, observations),
            Strategy::Quiz => quiz::score(roster, step, observations),
            Strategy::Explore => explore::score(roster, step, observations),
        }
    }
}

pub(crate) fn require(
    step: &ActivityStep,
    position: usize,
    key: &'static str,
) -> Result<(), ValidationError> {
    if step.has_criterion(key) {
        Ok(())
    } else {
        Err(ValidationError::MissingCriterion {
            step: position,
            key,
        })
    }
}

pub(crate) fn forbid(
    step: &ActivityStep,
    position: usize,
    key: &'static str,
    instead: &'static str,
) -> Result<(), ValidationError> {
    if step.has_criterion(key) {
        Err(ValidationError::UnsupportedCriterion {
            step: position,
            key,
            instead,
        })
    } else {
        Ok(())
    }
}

/// A result with a zero entry for every rostered participant. Strategies
/// upgrade entries from there, which doubles as the roster filter.
pub(crate) fn zero_filled(step_id: Uuid, roster: &[String]) -> StepResult {
    let mut result = StepResult::new(step_id);
    for participant in roster {
        result
            .scores
            .insert(participant.clone(), Calculation::zero());
    }
    result
}

/// Binary scoring shared by hunt and quiz steps: a participant's first
/// observation in the feed earns the single point.
pub(crate) fn first_observation_scores(
    step_id: Uuid,
    roster: &[String],
    observations: &[Observation],
) -> StepResult {
    let mut result = zero_filled(step_id, roster);
    for observation in observations {
        if let Some(calculation) = result.scores.get_mut(&observation.handle()) {
            if calculation.score == 0 {
                *calculation = Calculation::new(1, vec![observation.id]);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_activity_type_has_a_strategy() {
        assert_eq!(Strategy::for_type(ActivityType::Race), Strategy::Race);
        assert_eq!(Strategy::for_type(ActivityType::Hunt), Strategy::Hunt);
        assert_eq!(Strategy::for_type(ActivityType::Quiz), Strategy::Quiz);
        assert_eq!(Strategy::for_type(ActivityType::Explore), Strategy::Explore);
    }

    #[test]
    fn zero_fill_covers_the_whole_roster() {
        let roster = vec!["anna".to_string(), "ben".to_string()];
        let result = zero_filled(Uuid::new_v4(), &roster);

        assert_eq!(result.scores.len(), 2);
        assert!(result.scores.values().all(|c| c.score == 0));
        assert!(result.scores.values().all(|c| c.observations.is_none()));
    }

    #[test]
    fn criteria_checks_ignore_key_case() {
        let step = ActivityStep::new("step").with_criterion("TAXON_ID", "1");

        assert!(require(&step, 1, "taxon_id").is_ok());
        assert_eq!(
            forbid(&step, 1, "taxon_id", "'something'"),
            Err(ValidationError::UnsupportedCriterion {
                step: 1,
                key: "taxon_id",
                instead: "'something'",
            })
        );
    }
}

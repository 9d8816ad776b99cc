//! Quiz scoring: answer each step by observing the right taxon, anywhere.
//! Scoring is the same binary rule as the treasure hunt.
//!
//! Recommended upstream query params: `taxon_id` (required), `captive`,
//! `introduced`, `verifiable`, `quality_grade`, `without_taxon_id`.
//! Unsupported: `taxon_name`.

use super::strategy::{first_observation_scores, forbid, require, ScoreError, ValidationError};
use crate::inat::Observation;
use crate::model::{ActivityStep, StepResult};

pub(crate) fn validate(steps: &[ActivityStep]) -> Result<(), ValidationError> {
    for (index, step) in steps.iter().enumerate() {
        let position = index + 1;
        require(step, position, "taxon_id")?;
        forbid(step, position, "taxon_name", "'taxon_id'")?;
    }
    Ok(())
}

pub(crate) fn score(
    roster: &[String],
    step: &ActivityStep,
    observations: &[Observation],
) -> Result<StepResult, ScoreError> {
    Ok(first_observation_scores(step.id, roster, observations))
}

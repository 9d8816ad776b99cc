//! Treasure-hunt scoring: solve each step by observing the right taxon at
//! the right place. The upstream query does the filtering; any returned
//! observation solves the step.
//!
//! Recommended upstream query params: `taxon_id`, `lat`, `lng`, `radius`
//! (all required), `captive`, `introduced`, `threatened`, `verifiable`,
//! `quality_grade`, `preferred_place_id`, `without_taxon_id`.
//! Unsupported: `taxon_name`, `nelat`, `nelng`, `swlat`, `swlng`.

use super::strategy::{first_observation_scores, forbid, require, ScoreError, ValidationError};
use crate::inat::Observation;
use crate::model::{ActivityStep, StepResult};

pub(crate) fn validate(steps: &[ActivityStep]) -> Result<(), ValidationError> {
    for (index, step) in steps.iter().enumerate() {
        let position = index + 1;
        require(step, position, "taxon_id")?;
        require(step, position, "lat")?;
        require(step, position, "lng")?;
        require(step, position, "radius")?;
        forbid(step, position, "taxon_name", "'taxon_id'")?;
        for key in ["nelat", "nelng", "swlat", "swlng"] {
            forbid(step, position, key, "'lat', 'lng' and 'radius'")?;
        }
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

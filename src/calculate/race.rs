//! Race scoring: be among the first to observe each declared taxon.
//!
//! Recommended upstream query params: `taxon_id` (required), `place_id`,
//! `project_id`, `captive`, `introduced`, `threatened`, `verifiable`,
//! `quality_grade`, `preferred_place_id`, `without_taxon_id`.
//! Unsupported: `taxon_name`.

use std::collections::BTreeMap;

use super::strategy::{forbid, require, zero_filled, ScoreError, ValidationError};
use crate::inat::Observation;
use crate::model::{ActivityStep, StepResult};

/// Podium depth: the first three distinct observers of a taxon score.
const POINT_POSITIONS: u32 = 3;

pub(crate) fn validate(steps: &[ActivityStep]) -> Result<(), ValidationError> {
    if steps.len() != 1 {
        return Err(ValidationError::RaceStepCount { found: steps.len() });
    }
    let step = &steps[0];
    require(step, 1, "taxon_id")?;
    forbid(step, 1, "taxon_name", "'taxon_id'")?;
    Ok(())
}

/// Scan the feed once. A taxon qualifies an observation when its id appears
/// in the observation's ancestry chain, so declaring a genus covers all of
/// its species. Each taxon closes after three distinct observers; scores
/// accumulate across taxa.
pub(crate) fn score(
    roster: &[String],
    step: &ActivityStep,
    observations: &[Observation],
) -> Result<StepResult, ScoreError> {
    let mut result = zero_filled(step.id, roster);

    let mut open: Vec<String> = Vec::new();
    for taxon in step.criterion("taxon_id").unwrap_or_default().split(',') {
        let taxon = taxon.trim().to_string();
        if !taxon.is_empty() && !open.contains(&taxon) {
            open.push(taxon);
        }
    }
    let declared = open.clone();

    let mut podiums: BTreeMap<String, Vec<&Observation>> = BTreeMap::new();
    'feed: for observation in observations {
        let handle = observation.handle();
        if !result.scores.contains_key(&handle) {
            continue;
        }
        let ancestry = observation
            .taxon
            .as_ref()
            .and_then(|taxon| taxon.min_species_ancestry.as_deref())
            .ok_or(ScoreError::MissingAncestry {
                observation: observation.id,
            })?;
        for ancestor in ancestry.split(',') {
            let ancestor = ancestor.trim();
            if let Some(position) = open.iter().position(|taxon| taxon == ancestor) {
                let podium = podiums.entry(ancestor.to_string()).or_default();
                if !podium.iter().any(|taken| taken.handle() == handle) {
                    podium.push(observation);
                }
                if podium.len() >= POINT_POSITIONS as usize {
                    open.remove(position);
                }
            }
            if open.is_empty() {
                break 'feed;
            }
        }
    }

    // Emit in declared-taxa order so observation lists are reproducible.
    for taxon in &declared {
        if let Some(podium) = podiums.get(taxon) {
            for (position, observation) in podium.iter().enumerate() {
                if let Some(calculation) = result.scores.get_mut(&observation.handle()) {
                    calculation.score += POINT_POSITIONS - position as u32;
                    calculation
                        .observations
                        .get_or_insert_with(Vec::new)
                        .push(observation.id);
                }
            }
        }
    }
    Ok(result)
}

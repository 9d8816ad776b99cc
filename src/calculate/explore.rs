//! Exploration scoring: one point per quadrant of a bounding box in which a
//! participant has observed something, four at most.
//!
//! Recommended upstream query params: `nelat`, `nelng`, `swlat`, `swlng`
//! (all required), `taxon_id`, `captive`, `introduced`, `threatened`,
//! `verifiable`, `quality_grade`, `without_taxon_id`.
//! Unsupported: `lat`, `lng`, `radius`.

use std::collections::{HashMap, HashSet};

use super::strategy::{forbid, require, zero_filled, ScoreError, ValidationError};
use crate::inat::Observation;
use crate::model::{ActivityStep, StepResult};

pub(crate) fn validate(steps: &[ActivityStep]) -> Result<(), ValidationError> {
    for (index, step) in steps.iter().enumerate() {
        let position = index + 1;
        require(step, position, "nelat")?;
        require(step, position, "nelng")?;
        require(step, position, "swlat")?;
        require(step, position, "swlng")?;
        for key in ["lat", "lng", "radius"] {
            forbid(step, position, key, "'nelat', 'nelng', 'swlat' and 'swlng'")?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

struct BoundingBox {
    ne_lat: f64,
    ne_lng: f64,
    sw_lat: f64,
    sw_lng: f64,
    mid_lat: f64,
    mid_lng: f64,
}

impl BoundingBox {
    fn from_step(step: &ActivityStep) -> Result<Self, ScoreError> {
        let ne_lat = numeric_criterion(step, "nelat")?;
        let ne_lng = numeric_criterion(step, "nelng")?;
        let sw_lat = numeric_criterion(step, "swlat")?;
        let sw_lng = numeric_criterion(step, "swlng")?;
        Ok(BoundingBox {
            ne_lat,
            ne_lng,
            sw_lat,
            sw_lng,
            mid_lat: (ne_lat + sw_lat) / 2.0,
            mid_lng: (ne_lng + sw_lng) / 2.0,
        })
    }

    /// Exactly one quadrant per in-box point. The split is half-open with
    /// the north and east halves inclusive of the midpoint, so a point on
    /// the midpoint or a shared edge is never counted twice.
    fn quadrant(&self, lat: f64, lng: f64) -> Option<Quadrant> {
        if lat > self.ne_lat || lat < self.sw_lat || lng > self.ne_lng || lng < self.sw_lng {
            return None;
        }
        match (lat >= self.mid_lat, lng >= self.mid_lng) {
            (true, true) => Some(Quadrant::NorthEast),
            (true, false) => Some(Quadrant::NorthWest),
            (false, true) => Some(Quadrant::SouthEast),
            (false, false) => Some(Quadrant::SouthWest),
        }
    }
}

fn numeric_criterion(step: &ActivityStep, key: &'static str) -> Result<f64, ScoreError> {
    let value = step.criterion(key).unwrap_or_default();
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ScoreError::MalformedCriterion {
            key,
            value: value.to_string(),
        })
}

fn parse_location(observation: &Observation) -> Result<(f64, f64), ScoreError> {
    let unusable = || ScoreError::UnusableLocation {
        observation: observation.id,
    };
    let location = observation.location.as_deref().ok_or_else(unusable)?;
    let (lat, lng) = location.split_once(',').ok_or_else(unusable)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| unusable())?;
    let lng = lng.trim().parse::<f64>().map_err(|_| unusable())?;
    Ok((lat, lng))
}

/// One point for a participant's first observation in each quadrant, with
/// that observation recorded. Later observations in an already-credited
/// quadrant change nothing.
pub(crate) fn score(
    roster: &[String],
    step: &ActivityStep,
    observations: &[Observation],
) -> Result<StepResult, ScoreError> {
    let bounds = BoundingBox::from_step(step)?;
    let mut result = zero_filled(step.id, roster);
    let mut visited: HashMap<String, HashSet<Quadrant>> = HashMap::new();
    for observation in observations {
        let handle = observation.handle();
        if !result.scores.contains_key(&handle) {
            continue;
        }
        let (lat, lng) = parse_location(observation)?;
        if let Some(quadrant) = bounds.quadrant(lat, lng) {
            let seen = visited.entry(handle.clone()).or_default();
            if seen.insert(quadrant) {
                if let Some(calculation) = result.scores.get_mut(&handle) {
                    calculation.score += 1;
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

use chrono::Utc;

use super::error::CalculateError;
use super::fetch::{collect_observations, FetchOutcome};
use super::strategy::{Strategy, ValidationError};
use super::throttle::RateLimiter;
use crate::config::EngineConfig;
use crate::inat::{ObservationQuery, ObservationSource};
use crate::model::{Activity, ActivityStatus, DisableReason, Event};
use crate::store::ActivityStore;

/// Drive one full calculation run for an activity.
///
/// Transitions are staged on the activity and persisted once each: results,
/// timestamp and disable reason are cleared and CALCULATING saved before any
/// upstream call; every scored step appends its result and saves CALCULATED;
/// a failure after the run has started is converted into a persisted ERROR
/// state with the disable reason set, keeping earlier step results, and is
/// not propagated. Validation failures do propagate and leave the persisted
/// state CALCULATING.
pub fn run(
    mut activity: Activity,
    event: &Event,
    source: &dyn ObservationSource,
    limiter: &RateLimiter,
    store: &dyn ActivityStore,
    config: &EngineConfig,
) -> Result<Activity, CalculateError> {
    let strategy = Strategy::for_type(activity.activity_type);

    activity.results.clear();
    activity.calculated = None;
    activity.disable_reason = None;
    activity.status = ActivityStatus::Calculating;
    store.save_activity(activity.clone())?;

    if activity.steps.is_empty() || activity.steps.len() > config.max_steps {
        return Err(ValidationError::StepCount {
            found: activity.steps.len(),
            max: config.max_steps,
        }
        .into());
    }
    strategy.validate(&activity.steps)?;

    let roster = event.roster();
    let steps = activity.steps.clone();
    for step in &steps {
        let query = ObservationQuery::new(event.start, event.stop, roster.clone())
            .with_criteria(step.criteria.clone());
        let outcome = match collect_observations(source, limiter, &query, config.max_results) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Failed to calculate activity ({}): {}", activity.id, err);
                return Ok(persist_error(
                    activity,
                    DisableReason::FailedToCalculate,
                    store,
                ));
            }
        };
        let observations = match outcome {
            FetchOutcome::Fetched(observations) => observations,
            FetchOutcome::TooManyResults { total } => {
                log::warn!(
                    "Activity ({}) needs {} results, more than the {} allowed",
                    activity.id,
                    total,
                    config.max_results
                );
                return Ok(persist_error(activity, DisableReason::TooManyResults, store));
            }
        };
        log::debug!(
            "Scoring {} observations for activity ({})",
            observations.len(),
            activity.id
        );
        let result = match strategy.score(&roster, step, &observations) {
            Ok(result) => result,
            Err(err) => {
                log::error!("Failed to calculate activity ({}): {}", activity.id, err);
                return Ok(persist_error(
                    activity,
                    DisableReason::FailedToCalculate,
                    store,
                ));
            }
        };
        activity.results.push(result);
        activity.calculated = Some(Utc::now());
        activity.status = ActivityStatus::Calculated;
        if let Err(err) = store.save_activity(activity.clone()) {
            log::error!(
                "Failed to persist a step result for activity ({}): {}",
                activity.id,
                err
            );
            return Ok(persist_error(
                activity,
                DisableReason::FailedToCalculate,
                store,
            ));
        }
    }
    Ok(activity)
}

/// Stage a terminal failure and persist it. When even that save fails, the
/// failure is logged and the in-memory terminal state returned anyway.
fn persist_error(
    mut activity: Activity,
    reason: DisableReason,
    store: &dyn ActivityStore,
) -> Activity {
    activity.calculated = None;
    activity.disable_reason = Some(reason);
    activity.status = ActivityStatus::Error;
    if let Err(err) = store.save_activity(activity.clone()) {
        log::error!(
            "Failed to persist the terminal state of activity ({}): {}",
            activity.id,
            err
        );
    }
    activity
}

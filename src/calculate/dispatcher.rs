use std::sync::{Arc, Mutex, PoisonError};

use super::error::CalculateError;
use super::pipeline;
use super::throttle::{Clock, RateLimiter};
use crate::config::EngineConfig;
use crate::inat::ObservationSource;
use crate::model::Activity;
use crate::store::{ActivityStore, EventStore};

/// Entry point for calculation runs.
///
/// Runs are serialized system-wide: the gate is held for the whole run, so
/// at most one activity is ever calculating. A panic inside a run poisons
/// the gate but never wedges it; the next caller recovers the lock.
pub struct Calculator {
    config: EngineConfig,
    source: Arc<dyn ObservationSource>,
    events: Arc<dyn EventStore>,
    activities: Arc<dyn ActivityStore>,
    limiter: RateLimiter,
    gate: Mutex<()>,
}

impl Calculator {
    pub fn new(
        config: EngineConfig,
        source: Arc<dyn ObservationSource>,
        events: Arc<dyn EventStore>,
        activities: Arc<dyn ActivityStore>,
    ) -> Self {
        let limiter = RateLimiter::new(config.throttle_interval);
        Calculator {
            config,
            source,
            events,
            activities,
            limiter,
            gate: Mutex::new(()),
        }
    }

    /// Replace the wall clock behind the rate limiter.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.limiter = RateLimiter::with_clock(self.config.throttle_interval, clock);
        self
    }

    /// Calculate one activity and return its final state.
    ///
    /// Disabled activities are skipped untouched; an activity whose owning
    /// event is gone is a caller error. Everything else is handed to the
    /// pipeline under the gate.
    pub fn calculate(&self, activity: Activity) -> Result<Activity, CalculateError> {
        if let Some(reason) = activity.disable_reason {
            log::info!(
                "Skipped calculating disabled ({:?}) activity ({})",
                reason,
                activity.id
            );
            return Ok(activity);
        }
        let event = self
            .events
            .get_event(activity.event_id)?
            .ok_or(CalculateError::EventNotFound(activity.event_id))?;

        let _run = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        pipeline::run(
            activity,
            &event,
            self.source.as_ref(),
            &self.limiter,
            self.activities.as_ref(),
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inat::{ObservationPage, ObservationQuery, SourceError};
    use crate::model::{ActivityStatus, ActivityStep, ActivityType, Event};
    use crate::store::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    struct EmptySource;

    impl ObservationSource for EmptySource {
        fn fetch_page(
            &self,
            _query: &ObservationQuery,
            page: u32,
        ) -> Result<ObservationPage, SourceError> {
            Ok(ObservationPage {
                total_results: 0,
                page,
                per_page: 200,
                results: vec![],
            })
        }
    }

    fn calculator(storage: Arc<MemoryStorage>) -> Calculator {
        Calculator::new(
            EngineConfig::default().with_throttle_interval(Duration::ZERO),
            Arc::new(EmptySource),
            storage.clone(),
            storage,
        )
    }

    fn seeded_event(storage: &MemoryStorage) -> Event {
        let event = Event::new(
            "Garden count",
            Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap(),
        )
        .with_participant("anna");
        storage.save_event(event.clone()).unwrap();
        event
    }

    fn quiz(event: &Event) -> Activity {
        Activity::new(event.id, "Garden quiz", ActivityType::Quiz)
            .with_step(ActivityStep::new("q1").with_criterion("taxon_id", "1"))
    }

    #[test]
    fn disabled_activities_are_skipped_untouched() {
        let storage = Arc::new(MemoryStorage::new());
        let calculator = calculator(storage.clone());
        let event = seeded_event(&storage);
        let mut activity = quiz(&event);
        activity.disable();

        let returned = calculator.calculate(activity.clone()).unwrap();

        assert_eq!(returned, activity);
        assert_eq!(returned.status, ActivityStatus::None);
    }

    #[test]
    fn a_missing_event_is_a_caller_error() {
        let storage = Arc::new(MemoryStorage::new());
        let calculator = calculator(storage);
        let orphan = quiz(&Event::new(
            "never saved",
            Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap(),
        ));

        let outcome = calculator.calculate(orphan);

        assert!(matches!(outcome, Err(CalculateError::EventNotFound(_))));
    }

    #[test]
    fn a_full_run_lands_in_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let calculator = calculator(storage.clone());
        let event = seeded_event(&storage);
        let activity = quiz(&event);
        let activity_id = activity.id;

        let calculated = calculator.calculate(activity).unwrap();

        assert_eq!(calculated.status, ActivityStatus::Calculated);
        let persisted = storage.get_activity(activity_id).unwrap().unwrap();
        assert_eq!(persisted, calculated);
    }

    #[test]
    fn a_poisoned_gate_does_not_wedge_the_engine() {
        let storage = Arc::new(MemoryStorage::new());
        let calculator = Arc::new(calculator(storage.clone()));
        let event = seeded_event(&storage);

        let poisoner = Arc::clone(&calculator);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.gate.lock().unwrap();
            panic!("poison the gate");
        })
        .join();

        let calculated = calculator.calculate(quiz(&event)).unwrap();
        assert_eq!(calculated.status, ActivityStatus::Calculated);
    }
}

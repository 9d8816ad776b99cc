use super::throttle::RateLimiter;
use crate::inat::{Observation, ObservationQuery, ObservationSource, SourceError};

/// What a completed per-step collection produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Every page was within bounds; results concatenated in feed order.
    Fetched(Vec<Observation>),
    /// Some page reported more qualifying records than allowed. Nothing
    /// collected so far is kept.
    TooManyResults { total: u64 },
}

/// Collect every qualifying observation for one step, page by page.
///
/// The limiter runs before each request, the first included. Every page's
/// reported total is checked against `max_results`; the first page reporting
/// above it aborts the whole collection, even though a later page might
/// report otherwise. The continuation bound is fixed by the first page so a
/// drifting total cannot keep the loop alive; the reported page size is used
/// as is, since the server may cap the requested one.
pub fn collect_observations(
    source: &dyn ObservationSource,
    limiter: &RateLimiter,
    query: &ObservationQuery,
    max_results: u64,
) -> Result<FetchOutcome, SourceError> {
    let mut observations: Vec<Observation> = Vec::new();
    let mut bound: Option<u64> = None;
    let mut page: u32 = 1;
    loop {
        limiter.throttle();
        log::debug!("Fetching observations page {}", page);
        let fetched = source.fetch_page(query, page)?;
        if fetched.total_results > max_results {
            log::warn!(
                "Aborting fetch on page {}: {} qualifying observations reported, at most {} allowed",
                page,
                fetched.total_results,
                max_results
            );
            return Ok(FetchOutcome::TooManyResults {
                total: fetched.total_results,
            });
        }
        let target = *bound.get_or_insert(fetched.total_results.min(max_results));
        let page_size = u64::from(fetched.per_page);
        let received = fetched.results.len();
        observations.extend(fetched.results);
        log::debug!(
            "Collected {} of {} observations",
            observations.len(),
            target
        );
        if received == 0 || page_size == 0 {
            break;
        }
        if u64::from(page) * page_size >= target {
            break;
        }
        page += 1;
    }
    Ok(FetchOutcome::Fetched(observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inat::{ObservationPage, User};
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedSource {
        pages: Mutex<Vec<Result<ObservationPage, SourceError>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<ObservationPage, SourceError>>) -> Self {
            let mut pages = pages;
            pages.reverse();
            ScriptedSource {
                pages: Mutex::new(pages),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl ObservationSource for ScriptedSource {
        fn fetch_page(
            &self,
            _query: &ObservationQuery,
            page: u32,
        ) -> Result<ObservationPage, SourceError> {
            self.requested.lock().unwrap().push(page);
            self.pages
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(SourceError::Status(404)))
        }
    }

    fn obs(id: u64, login: &str) -> Observation {
        Observation {
            id,
            user: User {
                login: login.to_string(),
            },
            location: None,
            taxon: None,
        }
    }

    fn page(total: u64, number: u32, per_page: u32, results: Vec<Observation>) -> ObservationPage {
        ObservationPage {
            total_results: total,
            page: number,
            per_page,
            results,
        }
    }

    fn query() -> ObservationQuery {
        ObservationQuery::new(
            Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap(),
            vec!["anna".to_string()],
        )
    }

    fn limiter() -> RateLimiter {
        RateLimiter::new(Duration::ZERO)
    }

    #[test]
    fn collects_every_page_in_feed_order() {
        let source = ScriptedSource::new(vec![
            Ok(page(5, 1, 2, vec![obs(1, "anna"), obs(2, "ben")])),
            Ok(page(5, 2, 2, vec![obs(3, "anna"), obs(4, "cara")])),
            Ok(page(5, 3, 2, vec![obs(5, "ben")])),
        ]);

        let outcome = collect_observations(&source, &limiter(), &query(), 100).unwrap();

        match outcome {
            FetchOutcome::Fetched(observations) => {
                let ids: Vec<u64> = observations.iter().map(|o| o.id).collect();
                assert_eq!(ids, vec![1, 2, 3, 4, 5]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[test]
    fn stops_when_the_fetched_page_covers_the_total() {
        let source = ScriptedSource::new(vec![
            Ok(page(4, 1, 2, vec![obs(1, "anna"), obs(2, "ben")])),
            Ok(page(4, 2, 2, vec![obs(3, "anna"), obs(4, "cara")])),
        ]);

        let outcome = collect_observations(&source, &limiter(), &query(), 100).unwrap();

        match outcome {
            FetchOutcome::Fetched(observations) => assert_eq!(observations.len(), 4),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[test]
    fn total_equal_to_the_maximum_is_accepted() {
        let source = ScriptedSource::new(vec![Ok(page(2, 1, 200, vec![
            obs(1, "anna"),
            obs(2, "ben"),
        ]))]);

        let outcome = collect_observations(&source, &limiter(), &query(), 2).unwrap();

        assert!(matches!(outcome, FetchOutcome::Fetched(ref o) if o.len() == 2));
    }

    #[test]
    fn total_above_the_maximum_aborts_before_appending() {
        let source = ScriptedSource::new(vec![Ok(page(2_001, 1, 200, vec![obs(1, "anna")]))]);

        let outcome = collect_observations(&source, &limiter(), &query(), 2_000).unwrap();

        assert_eq!(outcome, FetchOutcome::TooManyResults { total: 2_001 });
        assert_eq!(source.requested(), vec![1]);
    }

    #[test]
    fn a_later_page_reporting_too_many_aborts_the_collection() {
        let source = ScriptedSource::new(vec![
            Ok(page(300, 1, 200, vec![obs(1, "anna")])),
            Ok(page(5_000, 2, 200, vec![obs(2, "ben")])),
        ]);

        let outcome = collect_observations(&source, &limiter(), &query(), 2_000).unwrap();

        assert_eq!(outcome, FetchOutcome::TooManyResults { total: 5_000 });
    }

    #[test]
    fn a_capped_page_size_still_collects_everything() {
        // 200 requested, the server caps at 2 per page.
        let source = ScriptedSource::new(vec![
            Ok(page(3, 1, 2, vec![obs(1, "anna"), obs(2, "ben")])),
            Ok(page(3, 2, 2, vec![obs(3, "cara")])),
        ]);

        let outcome = collect_observations(&source, &limiter(), &query(), 100).unwrap();

        assert!(matches!(outcome, FetchOutcome::Fetched(ref o) if o.len() == 3));
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[test]
    fn an_empty_page_ends_the_collection() {
        let source = ScriptedSource::new(vec![
            Ok(page(10, 1, 2, vec![obs(1, "anna"), obs(2, "ben")])),
            Ok(page(10, 2, 2, vec![])),
        ]);

        let outcome = collect_observations(&source, &limiter(), &query(), 100).unwrap();

        assert!(matches!(outcome, FetchOutcome::Fetched(ref o) if o.len() == 2));
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[test]
    fn no_results_at_all_is_an_empty_fetch() {
        let source = ScriptedSource::new(vec![Ok(page(0, 1, 200, vec![]))]);

        let outcome = collect_observations(&source, &limiter(), &query(), 100).unwrap();

        assert_eq!(outcome, FetchOutcome::Fetched(vec![]));
        assert_eq!(source.requested(), vec![1]);
    }

    #[test]
    fn a_failed_page_fails_the_collection() {
        let source = ScriptedSource::new(vec![
            Ok(page(4, 1, 2, vec![obs(1, "anna"), obs(2, "ben")])),
            Err(SourceError::Transport("connection reset".to_string())),
        ]);

        let result = collect_observations(&source, &limiter(), &query(), 100);

        assert!(matches!(result, Err(SourceError::Transport(_))));
    }
}

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// The parameters of one step's observation search. Step criteria are sent
/// verbatim; the event window and roster narrow the search server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationQuery {
    pub criteria: BTreeMap<String, String>,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
    /// Lowercased participant handles, comma-joined into `user_id`.
    pub user_ids: Vec<String>,
}

impl ObservationQuery {
    pub fn new(start: DateTime<Utc>, stop: DateTime<Utc>, user_ids: Vec<String>) -> Self {
        ObservationQuery {
            criteria: BTreeMap::new(),
            start,
            stop,
            user_ids,
        }
    }

    pub fn with_criteria(mut self, criteria: BTreeMap<String, String>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn user_id_param(&self) -> String {
        self.user_ids.join(",")
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event owns activities and declares the participant roster that every
/// calculation run scores against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    /// Start of the observation window, sent upstream as `d1`.
    pub start: DateTime<Utc>,
    /// End of the observation window, sent upstream as `d2`.
    pub stop: DateTime<Utc>,
    /// Participant handles as registered upstream.
    pub participants: Vec<String>,
}

impl Event {
    pub fn new(name: impl Into<String>, start: DateTime<Utc>, stop: DateTime<Utc>) -> Self {
        Event {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            stop,
            participants: Vec::new(),
        }
    }

    pub fn with_participant(mut self, handle: impl Into<String>) -> Self {
        self.participants.push(handle.into());
        self
    }

    /// Participant handles folded to ASCII lowercase, in declaration order.
    /// All score matching and the `user_id` query parameter use this form.
    pub fn roster(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|handle| handle.to_ascii_lowercase())
            .collect()
    }
}

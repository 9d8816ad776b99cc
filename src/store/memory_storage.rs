use super::{error::StoreError, ActivityStore, EventStore};
use crate::model::{Activity, Event};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// In-memory backend for tests and single-process deployments.
pub struct MemoryStorage {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
    activities: Arc<RwLock<HashMap<Uuid, Activity>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            events: Arc::new(RwLock::new(HashMap::new())),
            activities: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore for MemoryStorage {
    fn get_event(&self, event_id: Uuid) -> Result<Option<Event>, StoreError> {
        let events = self
            .events
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(events.get(&event_id).cloned())
    }

    fn save_event(&self, event: Event) -> Result<(), StoreError> {
        let mut events = self
            .events
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        events.insert(event.id, event);
        Ok(())
    }
}

impl ActivityStore for MemoryStorage {
    fn get_activity(&self, activity_id: Uuid) -> Result<Option<Activity>, StoreError> {
        let activities = self
            .activities
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(activities.get(&activity_id).cloned())
    }

    fn get_activities_for_event(&self, event_id: Uuid) -> Result<Vec<Activity>, StoreError> {
        let activities = self
            .activities
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(activities
            .values()
            .filter(|activity| activity.event_id == event_id)
            .cloned()
            .collect())
    }

    fn save_activity(&self, activity: Activity) -> Result<(), StoreError> {
        let mut activities = self
            .activities
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        activities.insert(activity.id, activity);
        Ok(())
    }
}

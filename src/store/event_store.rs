use super::error::StoreError;
use crate::model::Event;
use uuid::Uuid;

pub trait EventStore: Send + Sync {
    fn get_event(&self, event_id: Uuid) -> Result<Option<Event>, StoreError>;
    fn save_event(&self, event: Event) -> Result<(), StoreError>;
}

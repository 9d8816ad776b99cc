use super::error::StoreError;
use crate::model::Activity;
use uuid::Uuid;

pub trait ActivityStore: Send + Sync {
    fn get_activity(&self, activity_id: Uuid) -> Result<Option<Activity>, StoreError>;
    fn get_activities_for_event(&self, event_id: Uuid) -> Result<Vec<Activity>, StoreError>;
    /// Insert or replace by id. Calculation runs call this after every
    /// lifecycle transition, so interrupted runs stay visible.
    fn save_activity(&self, activity: Activity) -> Result<(), StoreError>;
}

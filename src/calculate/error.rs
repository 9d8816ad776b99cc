use thiserror::Error;
use uuid::Uuid;

use super::strategy::ValidationError;
use crate::store::StoreError;

/// A calculation request the engine refused or could not start. Failures
/// after a run has started are persisted on the activity instead.
#[derive(Error, Debug)]
pub enum CalculateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The event ({0}) owning this activity cannot be found")]
    EventNotFound(Uuid),

    #[error("Storage failure before the run started: {0}")]
    Store(#[from] StoreError),
}

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(Uuid),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub mod activity_store;
pub mod error;
pub mod event_store;
pub mod memory_storage;

pub use activity_store::ActivityStore;
pub use error::StoreError;
pub use event_store::EventStore;
pub use memory_storage::MemoryStorage;

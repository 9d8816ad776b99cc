pub mod calculate;
pub mod config;
pub mod inat;
pub mod model;
pub mod store;

pub mod prelude {
    pub use crate::calculate::CalculateError;
    pub use crate::calculate::Calculator;
    pub use crate::calculate::Clock;
    pub use crate::calculate::RateLimiter;
    pub use crate::calculate::ScoreError;
    pub use crate::calculate::Strategy;
    pub use crate::calculate::SystemClock;
    pub use crate::calculate::ValidationError;
    pub use crate::config::EngineConfig;
    pub use crate::config::SortOrder;
    pub use crate::inat::InatClient;
    pub use crate::inat::Observation;
    pub use crate::inat::ObservationPage;
    pub use crate::inat::ObservationQuery;
    pub use crate::inat::ObservationSource;
    pub use crate::inat::SourceError;
    pub use crate::inat::Taxon;
    pub use crate::inat::User;
    pub use crate::model::Activity;
    pub use crate::model::ActivityStatus;
    pub use crate::model::ActivityStep;
    pub use crate::model::ActivityType;
    pub use crate::model::Calculation;
    pub use crate::model::DisableReason;
    pub use crate::model::Event;
    pub use crate::model::StepResult;
    pub use crate::store::ActivityStore;
    pub use crate::store::EventStore;
    pub use crate::store::MemoryStorage;
    pub use crate::store::StoreError;
}

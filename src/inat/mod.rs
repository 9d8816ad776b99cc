pub mod client;
pub mod error;
pub mod query;
pub mod source;
pub mod types;

pub use client::InatClient;
pub use error::SourceError;
pub use query::ObservationQuery;
pub use source::ObservationSource;
pub use types::{Observation, ObservationPage, Taxon, User};

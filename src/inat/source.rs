use super::{error::SourceError, ObservationPage, ObservationQuery};

/// Read access to the external observation API, one page at a time.
///
/// Implementations do not retry; a failed page fails the whole collection.
pub trait ObservationSource: Send + Sync {
    fn fetch_page(&self, query: &ObservationQuery, page: u32)
        -> Result<ObservationPage, SourceError>;
}

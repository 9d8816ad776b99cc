use super::{error::SourceError, ObservationPage, ObservationQuery, ObservationSource};
use crate::config::{EngineConfig, SortOrder};

/// Blocking client for the observations endpoint.
///
/// One GET per page, no retries. The timeout applies to connect, read and
/// write individually.
pub struct InatClient {
    agent: ureq::Agent,
    base_url: String,
    per_page: u32,
    order: SortOrder,
}

impl InatClient {
    pub fn new(config: &EngineConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.request_timeout)
            .timeout_read(config.request_timeout)
            .timeout_write(config.request_timeout)
            .build();
        InatClient {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
            order: config.order,
        }
    }
}

impl ObservationSource for InatClient {
    fn fetch_page(
        &self,
        query: &ObservationQuery,
        page: u32,
    ) -> Result<ObservationPage, SourceError> {
        let url = format!("{}/observations", self.base_url);
        let mut request = self.agent.get(&url);
        for (key, value) in &query.criteria {
            request = request.query(key, value);
        }
        request = request
            .query("page", &page.to_string())
            .query("per_page", &self.per_page.to_string())
            .query("order", self.order.as_str())
            .query("order_by", "observed_on")
            .query("d1", &query.start.to_rfc3339())
            .query("d2", &query.stop.to_rfc3339())
            .query("user_id", &query.user_id_param());

        log::info!(
            "Requesting observations page {} ({} criteria, {} participants)",
            page,
            query.criteria.len(),
            query.user_ids.len()
        );

        let response = request.call()?;
        let body: ObservationPage = serde_json::from_reader(response.into_reader())?;
        Ok(body)
    }
}

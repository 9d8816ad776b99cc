use std::time::Duration;

/// Upstream sort direction for fetched observations.
///
/// Scoring ranks participants by feed order, so the direction decides whether
/// "first" means earliest or latest observation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub base_url: String,
    /// Requested page size; the server may apply a smaller one.
    pub per_page: u32,
    /// A step whose reported total exceeds this aborts with TooManyResults.
    pub max_results: u64,
    pub max_steps: usize,
    /// Minimum spacing between consecutive upstream calls.
    pub throttle_interval: Duration,
    pub request_timeout: Duration,
    /// Sorted by observation date; `order_by` is fixed to `observed_on`.
    pub order: SortOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.inaturalist.org/v1".to_string(),
            per_page: 200,
            max_results: 2_000,
            max_steps: 10,
            throttle_interval: Duration::from_millis(1_500),
            request_timeout: Duration::from_secs(30),
            order: SortOrder::Asc,
        }
    }
}

impl EngineConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_max_results(mut self, max_results: u64) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_production_api() {
        let config = EngineConfig::default();

        assert_eq!(config.base_url, "https://api.inaturalist.org/v1");
        assert_eq!(config.per_page, 200);
        assert_eq!(config.max_results, 2_000);
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.throttle_interval, Duration::from_millis(1_500));
        assert_eq!(config.order, SortOrder::Asc);
    }

    #[test]
    fn builders_override_fields() {
        let config = EngineConfig::default()
            .with_base_url("http://localhost:4000/v1")
            .with_per_page(30)
            .with_max_results(100)
            .with_throttle_interval(Duration::ZERO);

        assert_eq!(config.base_url, "http://localhost:4000/v1");
        assert_eq!(config.per_page, 30);
        assert_eq!(config.max_results, 100);
        assert_eq!(config.throttle_interval, Duration::ZERO);
    }

    #[test]
    fn order_renders_as_query_value() {
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
    }
}

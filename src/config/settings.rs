use std::time::Duration;

use crate::config::API;

/// Runtime settings, resolved once from the command line at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// REST base, without trailing slash (e.g. `http://localhost:5000/api/v1`).
    pub api_base_url: String,
    /// Push server origin (e.g. `http://localhost:5000`).
    pub push_base_url: String,
    pub api_key: String,
    pub limit: usize,
    pub currency: String,
    pub refresh_interval: Duration,
    pub live_updates: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base_url: API.rest.base_url.to_string(),
            push_base_url: API.push.base_url.to_string(),
            api_key: API.api_key.to_string(),
            limit: API.rest.default_limit,
            currency: API.rest.currency.to_string(),
            refresh_interval: API.rest.refresh_interval,
            live_updates: true,
        }
    }
}

impl DashboardSettings {
    /// Token list endpoint. `limit` and `convert` go on as query parameters.
    pub fn tokens_endpoint(&self) -> String {
        format!("{}/{}", self.api_base_url, API.rest.tokens_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_endpoint_joins_base_and_path() {
        let settings = DashboardSettings::default();
        assert_eq!(
            settings.tokens_endpoint(),
            "http://localhost:5000/api/v1/tokens"
        );
    }
}

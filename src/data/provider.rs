use async_trait::async_trait;

use crate::config::{API, DashboardSettings};
use crate::domain::{ApiEnvelope, Token};
use crate::error::{DashboardError, Result};

/// Abstract interface for fetching the token list.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch up to `limit` tokens, quoted in the provider's currency.
    async fn fetch_tokens(&self, limit: usize) -> Result<Vec<Token>>;
}

/// Token Metrics REST service.
pub struct RestTokenProvider {
    client: reqwest::Client,
    settings: DashboardSettings,
}

impl RestTokenProvider {
    pub fn new(settings: &DashboardSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(API.rest.timeout)
            .build()?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }
}

#[async_trait]
impl TokenProvider for RestTokenProvider {
    async fn fetch_tokens(&self, limit: usize) -> Result<Vec<Token>> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.settings.tokens_endpoint())
            .query(&[
                ("limit", limit.as_str()),
                ("convert", self.settings.currency.as_str()),
            ])
            .header(API.rest.api_key_header, &self.settings.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Error responses still carry the status envelope, so decode first and
        // only fall back to the HTTP status when the body is not an envelope.
        match serde_json::from_str::<ApiEnvelope<Vec<Token>>>(&body) {
            Ok(envelope) => envelope.into_data(),
            Err(_) if !status.is_success() => Err(DashboardError::Api {
                code: i64::from(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected HTTP status")
                    .to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::{Result, SuggestionsError};
use crate::model::{SuggestionsRequest, SuggestionsResponse};

/// Source of suggestion rows for a panel.
#[async_trait]
pub trait SuggestionsBackend: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &str,
        request: &SuggestionsRequest,
    ) -> Result<SuggestionsResponse>;
}

/// POSTs the request as JSON to the panel's endpoint.
#[derive(Debug, Clone, Default)]
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SuggestionsBackend for HttpBackend {
    async fn fetch(
        &self,
        endpoint: &str,
        request: &SuggestionsRequest,
    ) -> Result<SuggestionsResponse> {
        let body = serde_json::to_vec(request)?;

        let resp = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SuggestionsError::Status(resp.status()));
        }

        let bytes = resp.bytes().await?;
        let parsed: SuggestionsResponse = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            endpoint,
            rows = parsed.suggestions.len(),
            count = parsed.count,
            "received suggestions"
        );
        Ok(parsed)
    }
}

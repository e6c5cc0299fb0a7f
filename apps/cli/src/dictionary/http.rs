//! Remote dictionary service client.
//!
//! Queries `GET {base_url}/search?q={word}` and expects a JSON array of
//! dictionary entries in response.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use vocab_core::{Dictionary, DictionaryEntry, LookupError, PipelineError};

pub struct HttpDictionary {
    client: Client,
    base_url: String,
}

impl HttpDictionary {
    /// Build the client. `timeout` bounds each request end to end.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::DictionaryUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check the service answers on `/health`.
    pub async fn check_connectivity(&self) -> Result<(), PipelineError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::DictionaryUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PipelineError::DictionaryUnavailable(format!(
                "{} returned {}",
                url,
                resp.status()
            )));
        }
        tracing::info!(url = %self.base_url, "dictionary service reachable");
        Ok(())
    }
}

impl Dictionary for HttpDictionary {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
        let url = format!("{}/search", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("q", word)])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(word.to_string()));
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(LookupError::Backend { status, message });
        }

        resp.json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Issues one JSON GET with bounded retries and linear backoff. Attempt N
/// failing waits N backoff units before attempt N+1; the error surfaced on
/// exhaustion is the last one encountered.
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    timeout: Duration,
    backoff_unit: Duration,
}

impl Fetcher {
    pub fn new(max_retries: u32, timeout: Duration, backoff_unit: Duration) -> Self {
        Self {
            client: Client::new(),
            max_retries: max_retries.max(1),
            timeout,
            backoff_unit,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.max_retries(),
            config.request_timeout(),
            config.backoff_unit(),
        )
    }

    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        let mut attempt = 1;
        loop {
            match self.attempt(url).await {
                Ok(payload) => return Ok(payload),
                Err(err) if attempt < self.max_retries => {
                    tracing::warn!(url, attempt, error = %err, "request attempt failed; backing off");
                    tokio::time::sleep(self.backoff_unit * attempt).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(EtlError::FetchExhausted {
                        url: url.to_string(),
                        attempts: self.max_retries,
                        source: Box::new(err),
                    });
                }
            }
        }
    }

    /// One GET. Non-2xx statuses, timeouts, and unparseable bodies on a 2xx
    /// all land in the same retryable error class.
    async fn attempt(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

//! Review API adapter (reqwest).
//!
//! This crate implements the `hsb-core` StatusSource port against the
//! homework review-status HTTP endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use hsb_core::{errors::Error, ports::StatusSource, Result};

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    api_token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    /// The timeout bounds the whole request: a hung endpoint must not
    /// stall the polling pipeline.
    pub fn new(
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build");
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            http,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, since: i64) -> Result<serde_json::Value> {
        tracing::debug!("requesting {} with from_date={since}", self.endpoint);

        let resp = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.api_token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(|e| {
                let msg = format!(
                    "request to {} (from_date={since}) failed: {e}",
                    self.endpoint
                );
                tracing::error!("{msg}");
                Error::Transport(msg)
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            // The body may well not be JSON here; keep it raw for diagnostics.
            let body = resp.text().await.unwrap_or_default();
            let err = unexpected_status(status, body);
            tracing::error!("{err} (url={}, from_date={since})", self.endpoint);
            return Err(err);
        }

        resp.json::<serde_json::Value>().await.map_err(|e| {
            let msg = format!("response body is not valid json: {e}");
            tracing::error!("{msg} (url={}, from_date={since})", self.endpoint);
            Error::MalformedPayload(msg)
        })
    }
}

fn unexpected_status(status: StatusCode, body: String) -> Error {
    Error::UnexpectedStatus {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("unknown")
            .to_string(),
        body,
    }
}

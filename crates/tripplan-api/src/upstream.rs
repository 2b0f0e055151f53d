//! Upstream chat-completion client.
//!
//! Returns the raw response text. Interpreting it is the decoder's job.
use crate::config::Config;
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;
use tripplan_prompt::ChatRequest;

/// Longest slice of an upstream error body kept for diagnostics
const ERROR_BODY_LIMIT: usize = 2048;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("upstream returned status {status}")]
    Status { status: StatusCode, body: String },
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    endpoint: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.completions_url(),
        })
    }

    /// POST the request and hand back the body of a 2xx response.
    pub async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
        trace_id: &str,
    ) -> Result<String, UpstreamError> {
        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let body = if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| UpstreamError::Transport(e.to_string()))?
        } else {
            // Diagnostic only, a partial read is still worth reporting
            response.text().await.unwrap_or_default()
        };

        debug!(
            target: "tripplan::upstream",
            trace_id = %trace_id,
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            body_len = body.len(),
            "upstream responded"
        );

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                body: truncate(body, ERROR_BODY_LIMIT),
            });
        }

        Ok(body)
    }
}

fn truncate(mut text: String, limit: usize) -> String {
    if text.len() > limit {
        let mut cut = limit;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

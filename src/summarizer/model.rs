use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::summarizer::{SummarizeError, SummaryModel};

/// Client for a hosted text-summarization inference endpoint
/// (`{"inputs": ..., "parameters": {...}}` in, `[{"summary_text": ...}]` out).
#[derive(Debug, Clone)]
pub struct InferenceApi {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    summary_text: String,
}

impl InferenceApi {
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizeError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

#[async_trait]
impl SummaryModel for InferenceApi {
    #[instrument(skip(self, text), fields(words = text.split_whitespace().count()))]
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, SummarizeError> {
        let payload = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                max_length,
                min_length,
                do_sample: false,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummarizeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Status(status.as_u16()));
        }

        let outputs: Vec<InferenceOutput> = response
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;

        let summary = outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .filter(|s| !s.trim().is_empty())
            .ok_or(SummarizeError::Empty)?;

        debug!(chars = summary.chars().count(), "summary received");
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "inference-api"
    }
}

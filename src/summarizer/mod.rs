pub mod extractive;
pub mod model;

pub use model::InferenceApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::text::collapse_whitespace;

pub const DEFAULT_MAX_LENGTH: usize = 150;
pub const DEFAULT_MIN_LENGTH: usize = 50;

pub(crate) const NO_CONTENT: &str = "No content to summarize";

/// Longest input, in words, forwarded to the model.
const MAX_MODEL_INPUT_WORDS: usize = 1024;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("summarization service returned status {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("empty summary received")]
    Empty,
}

/// An abstractive summarization model. Lengths are in model tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, SummarizeError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    Model,
    Extractive,
    Truncated,
    /// Input was already shorter than the requested minimum.
    Passthrough,
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub text: String,
    pub method: SummaryMethod,
}

#[derive(Clone)]
pub struct SummarizationService {
    model: Option<Arc<dyn SummaryModel>>,
}

impl SummarizationService {
    pub fn new(model: Option<Arc<dyn SummaryModel>>) -> Self {
        match &model {
            Some(m) => info!(model = m.name(), "summarization service ready (model)"),
            None => info!("summarization service ready (extractive)"),
        }
        Self { model }
    }

    pub fn extractive() -> Self {
        Self::new(None)
    }

    pub fn backend_name(&self) -> &'static str {
        self.model.as_ref().map_or("extractive", |m| m.name())
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Summary {
        let Some(model) = &self.model else {
            return heuristic(text, max_length);
        };

        let cleaned = prepare_input(text);
        if cleaned.is_empty() {
            return Summary {
                text: NO_CONTENT.to_string(),
                method: SummaryMethod::Skipped,
            };
        }

        let words = cleaned.split_whitespace().count();
        if words < min_length {
            return Summary {
                text: cleaned,
                method: SummaryMethod::Passthrough,
            };
        }

        let max = max_length.min(words / 2);
        let min = min_length.min(max / 2);

        match model.summarize(&cleaned, max, min).await {
            Ok(summary) => Summary {
                text: polish_summary(&summary),
                method: SummaryMethod::Model,
            },
            Err(e) => {
                warn!(model = model.name(), error = %e, "model summarization failed, using extractive");
                heuristic(text, max_length)
            }
        }
    }
}

impl SummarizationService {
    /// Summarize each text in turn with the same length settings.
    pub async fn summarize_batch(
        &self,
        texts: &[String],
        max_length: usize,
        min_length: usize,
    ) -> Vec<Summary> {
        let mut summaries = Vec::with_capacity(texts.len());
        for text in texts {
            summaries.push(self.summarize(text, max_length, min_length).await);
        }
        summaries
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn key_points(&self, text: &str, num_points: usize) -> Vec<String> {
        extractive::key_points(text, num_points)
    }
}

fn heuristic(text: &str, max_length: usize) -> Summary {
    let (text, method) = extractive::summarize(text, max_length);
    Summary { text, method }
}

fn prepare_input(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.split(' ').count() > MAX_MODEL_INPUT_WORDS {
        collapsed
            .split(' ')
            .take(MAX_MODEL_INPUT_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        collapsed
    }
}

fn polish_summary(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let mut chars = collapsed.chars();
    let mut polished: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return collapsed,
    };
    if !polished.ends_with(['.', '!', '?']) {
        polished.push('.');
    }
    polished
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    extractor::ExtractionResult,
    summarizer::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, SummaryMethod},
    text::TextStatistics,
    translator::{self, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, TranslationMethod},
};

const EMPTY_TEXT: &str = "Text cannot be empty";

/// Most texts accepted by one batch request.
pub const MAX_BATCH_TEXTS: usize = 20;
/// Most URLs accepted by one extraction request.
pub const MAX_BATCH_URLS: usize = 10;
pub const DEFAULT_KEY_POINTS: usize = 5;
pub const MAX_KEY_POINTS: usize = 20;

fn default_source_lang() -> String {
    DEFAULT_SOURCE_LANG.to_string()
}

fn default_target_lang() -> String {
    DEFAULT_TARGET_LANG.to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_key_points() -> usize {
    DEFAULT_KEY_POINTS
}

fn default_input_type() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

fn validate_batch_len(len: usize, max: usize, what: &str) -> Result<(), String> {
    if len == 0 {
        return Err(format!("At least one {what} is required"));
    }
    if len > max {
        return Err(format!("At most {max} {what}s per request"));
    }
    Ok(())
}

fn validate_languages(source: &str, target: &str) -> Result<(), String> {
    if !translator::is_supported_source(source) {
        return Err(format!("Unsupported source language: {source}"));
    }
    if !translator::is_supported_target(target) {
        return Err(format!("Unsupported target language: {target}"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err(EMPTY_TEXT.to_string());
        }
        validate_languages(&self.source_lang, &self.target_lang)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub method: TranslationMethod,
    /// Seconds.
    pub processing_time: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl SummarizeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err(EMPTY_TEXT.to_string());
        }
        if self.max_length == 0 {
            return Err("max_length must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummarizeResponse {
    pub original_text: String,
    pub summary: String,
    /// Summary characters over input characters.
    pub compression_ratio: f64,
    pub method: SummaryMethod,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchTranslateRequest {
    pub texts: Vec<String>,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl BatchTranslateRequest {
    /// Individual blank texts are allowed and come back as `skipped`.
    pub fn validate(&self) -> Result<(), String> {
        validate_batch_len(self.texts.len(), MAX_BATCH_TEXTS, "text")?;
        validate_languages(&self.source_lang, &self.target_lang)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchTranslateResponse {
    pub results: Vec<TranslateResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchSummarizeRequest {
    pub texts: Vec<String>,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl BatchSummarizeRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_batch_len(self.texts.len(), MAX_BATCH_TEXTS, "text")?;
        if self.max_length == 0 {
            return Err("max_length must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchSummarizeResponse {
    pub results: Vec<SummarizeResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct KeyPointsRequest {
    pub text: String,
    #[serde(default = "default_key_points")]
    pub num_points: usize,
}

impl KeyPointsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err(EMPTY_TEXT.to_string());
        }
        if !(1..=MAX_KEY_POINTS).contains(&self.num_points) {
            return Err(format!("num_points must be between 1 and {MAX_KEY_POINTS}"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct KeyPointsResponse {
    pub original_text: String,
    pub key_points: Vec<String>,
    /// Number of points actually found, at most the requested count.
    pub num_points: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
}

impl ExtractRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_batch_len(self.urls.len(), MAX_BATCH_URLS, "url")
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExtractResponse {
    pub results: Vec<ExtractionResult>,
    pub succeeded: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Url,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessRequest {
    pub content: String,
    #[serde(rename = "inputType", default = "default_input_type")]
    pub input_type: String,
    #[serde(default = "default_true")]
    pub translate: bool,
    #[serde(default)]
    pub summarize: bool,
    pub max_length: Option<usize>,
}

impl ProcessRequest {
    pub fn validate(&self) -> Result<InputType, String> {
        let input_type = match self.input_type.as_str() {
            "text" => InputType::Text,
            "url" => InputType::Url,
            other => return Err(format!("Unsupported inputType: {other}")),
        };
        if self.content.trim().is_empty() {
            return Err("No content to process".to_string());
        }
        if self.max_length == Some(0) {
            return Err("max_length must be greater than zero".to_string());
        }
        Ok(input_type)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub url_extracted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
    pub processing_time: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub statistics: TextStatistics,
    pub contains_gujarati: bool,
    pub is_primarily_gujarati: bool,
    pub detected_language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguagesResponse {
    pub source_languages: Vec<String>,
    pub target_languages: Vec<String>,
    pub translation_backend: String,
    pub transliteration_fallback: bool,
    pub summarization_backend: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Number of entries, 1 to 100 (default 10).
    pub limit: Option<i64>,
}

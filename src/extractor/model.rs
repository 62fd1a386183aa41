use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder returned when cleaning leaves nothing worth translating.
pub const NO_MEANINGFUL_CONTENT: &str = "No meaningful content found after aggressive cleaning";
/// Placeholder returned when no candidate text was found at all.
pub const NO_CONTENT_FOUND: &str = "No meaningful content found";
/// Hard cap on the text handed to the rest of the pipeline.
pub const MAX_ARTICLE_CHARS: usize = 5000;

/// Which strategy produced the article text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Publisher-specific selectors and boilerplate stripping.
    Publisher,
    /// Readability scoring over the whole document.
    Readability,
    /// Generic content-area selectors.
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    pub url: String,
    pub source_domain: Option<String>,
    pub title: Option<String>,
    pub text: String,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub top_image: Option<String>,
    pub site_name: Option<String>,
    pub language: Option<String>,
    pub method: Option<ExtractionMethod>,
    pub success: bool,
    pub error: Option<String>,
    pub processing_time: f64,
}

impl ExtractionResult {
    /// A result carrying only a placeholder message in place of article text.
    pub fn failed(url: impl Into<String>, text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_domain: None,
            title: None,
            text: text.into(),
            authors: Vec::new(),
            publish_date: None,
            top_image: None,
            site_name: None,
            language: None,
            method: None,
            success: false,
            error: Some(error.into()),
            processing_time: 0.0,
        }
    }
}

/// Which article fields the extractor fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractionCapabilities {
    pub title: bool,
    pub text: bool,
    pub authors: bool,
    pub publish_date: bool,
    pub images: bool,
    pub site_name: bool,
    pub language: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SupportedSources {
    pub supported_languages: Vec<String>,
    /// Well-known Gujarati news hosts.
    pub common_gujarati_sources: Vec<String>,
    /// Publishers with dedicated extraction rules.
    pub publisher_specific: Vec<String>,
    pub extraction_capabilities: ExtractionCapabilities,
}

/// Page-level metadata read from `<head>` and friends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub top_image: Option<String>,
}

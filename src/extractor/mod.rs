pub mod cleaner;
pub mod dom;
pub mod language;
pub mod metadata;
pub mod model;
pub mod publisher;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::{
    ExtractionCapabilities, ExtractionMethod, ExtractionResult, NO_CONTENT_FOUND,
    NO_MEANINGFUL_CONTENT, SupportedSources,
};
pub use publisher::Publisher;

use scraper::Html;
use std::time::Instant;
use tracing::{info, instrument, warn};
use url::Url;

use crate::{
    fetcher::{self, PageResponse},
    text::{clean_url, take_chars},
};

pub const COMMON_GUJARATI_SOURCES: &[&str] = &[
    "divyabhaskar.co.in",
    "gujaratsamachar.com",
    "sandesh.com",
    "tv9gujarati.com",
];

const EXTRACTED_LANGUAGES: &[&str] = &["gujarati", "hindi", "english"];

/// Fetches article pages and isolates their story text.
#[derive(Debug, Clone, Default)]
pub struct ArticleExtractor;

impl ArticleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Download `url` and extract its article. Never fails: problems are
    /// reported through `success`/`error` with a placeholder in `text`.
    #[instrument(skip(self))]
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        let started = Instant::now();
        let normalized = clean_url(url);

        let parsed = match Url::parse(&normalized) {
            Ok(parsed) if parsed.host_str().is_some() => parsed,
            _ => {
                warn!("rejected invalid url");
                return ExtractionResult::failed(normalized, "Invalid URL format", "Invalid URL format");
            }
        };

        let publisher = Publisher::detect(&parsed);
        if let Some(publisher) = publisher {
            info!(publisher = publisher.name(), "using publisher-specific extraction");
        }

        let mut result = match fetcher::fetch_url(&parsed).await {
            Ok(page) => extract_page(&page, publisher),
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "page download failed");
                let text = match publisher {
                    Some(p) => format!("Failed to extract content from {}: {e}", p.name()),
                    None => format!("Extraction failed: {e}"),
                };
                let mut failed = ExtractionResult::failed(normalized, text, e.to_string());
                failed.source_domain = parsed.host_str().map(str::to_string);
                failed
            }
        };

        result.processing_time = started.elapsed().as_secs_f64();
        info!(
            chars = result.text.chars().count(),
            success = result.success,
            "extraction finished"
        );
        result
    }

    /// Extract each URL in turn. Results line up with `urls`; a failing URL
    /// yields a failed result and does not stop the rest.
    #[instrument(skip_all, fields(count = urls.len()))]
    pub async fn extract_many(&self, urls: &[String]) -> Vec<ExtractionResult> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(self.extract(url).await);
        }
        info!(
            succeeded = results.iter().filter(|r| r.success).count(),
            "batch extraction finished"
        );
        results
    }

    pub fn supported_sources(&self) -> SupportedSources {
        SupportedSources {
            supported_languages: EXTRACTED_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            common_gujarati_sources: COMMON_GUJARATI_SOURCES.iter().map(|s| s.to_string()).collect(),
            publisher_specific: Publisher::ALL.iter().map(|p| p.name().to_string()).collect(),
            extraction_capabilities: ExtractionCapabilities {
                title: true,
                text: true,
                authors: true,
                publish_date: true,
                images: true,
                site_name: true,
                language: true,
            },
        }
    }
}

/// Extract the article from an already downloaded page.
pub fn extract_page(page: &PageResponse, publisher: Option<Publisher>) -> ExtractionResult {
    extract_document(&page.url_final, &page.body_utf8, publisher)
}

/// Synchronous core of extraction. The parsed DOM is not `Send`, so all of
/// the tree work stays inside this function.
pub fn extract_document(url: &Url, html: &str, publisher: Option<Publisher>) -> ExtractionResult {
    let mut document = Html::parse_document(html);
    let meta = metadata::read_metadata(&document, url);

    let (raw_text, method) = match publisher {
        Some(_) => (
            publisher::extract_story_text(&mut document),
            ExtractionMethod::Publisher,
        ),
        None => match reader::readability_text(html, url) {
            Some(text) => (text, ExtractionMethod::Readability),
            None => (reader::fallback_text(&mut document), ExtractionMethod::Fallback),
        },
    };

    let (text, success, error) = if raw_text.trim().is_empty() {
        (NO_CONTENT_FOUND.to_string(), false, Some("no article content found".to_string()))
    } else {
        match cleaner::strip_boilerplate(&raw_text) {
            Some(clean) => (take_chars(&clean, model::MAX_ARTICLE_CHARS).to_string(), true, None),
            None => (
                NO_MEANINGFUL_CONTENT.to_string(),
                false,
                Some("content too short after boilerplate removal".to_string()),
            ),
        }
    };

    let language = success.then(|| language::detect_language(&text)).flatten();

    ExtractionResult {
        url: url.to_string(),
        source_domain: url.host_str().map(str::to_string),
        title: meta.title,
        text,
        authors: meta.authors,
        publish_date: meta.publish_date,
        top_image: meta.top_image,
        site_name: meta.site_name,
        language,
        method: Some(method),
        success,
        error,
        processing_time: 0.0,
    }
}

pub mod google;
pub mod transliterate;

pub use google::{DEFAULT_TRANSLATE_API_URL, GoogleTranslate};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    extractor::language::detect_language,
    text::{char_len, collapse_whitespace, take_chars},
};

pub const SOURCE_LANGUAGES: &[&str] = &["gu", "hi", "auto"];
pub const TARGET_LANGUAGES: &[&str] = &["en"];
pub const DEFAULT_SOURCE_LANG: &str = "gu";
pub const DEFAULT_TARGET_LANG: &str = "en";

/// Longest input forwarded to the translation API.
const MAX_INPUT_CHARS: usize = 5000;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("translation service returned status {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("empty translation received")]
    Empty,
}

/// A machine translation provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;

    fn name(&self) -> &'static str;
}

/// How a translation was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMethod {
    /// The translation API answered.
    Online,
    /// Offline dictionary and transliteration fallback.
    Transliterated,
    /// Nothing worked; the text is an error prefix followed by the original input.
    Failed,
    /// Input was empty.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub method: TranslationMethod,
}

pub fn is_supported_source(lang: &str) -> bool {
    SOURCE_LANGUAGES.contains(&lang)
}

pub fn is_supported_target(lang: &str) -> bool {
    TARGET_LANGUAGES.contains(&lang)
}

/// Translates Gujarati text, degrading to transliteration when the API is unavailable.
#[derive(Clone)]
pub struct TranslationService {
    online: Option<Arc<dyn TranslationBackend>>,
    fallback_enabled: bool,
}

impl TranslationService {
    pub fn new(online: Option<Arc<dyn TranslationBackend>>, fallback_enabled: bool) -> Self {
        match &online {
            Some(backend) => info!(backend = backend.name(), "translation service ready (online)"),
            None => info!(
                dictionary_words = transliterate::dictionary_size(),
                "translation service ready (offline transliteration)"
            ),
        }
        Self {
            online,
            fallback_enabled,
        }
    }

    /// Offline-only service.
    pub fn offline() -> Self {
        Self::new(None, true)
    }

    pub fn backend_name(&self) -> &'static str {
        self.online.as_ref().map_or("transliteration", |b| b.name())
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Translate `text` from `source_lang` (or "auto") into `target_lang`.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Translation {
        let source_lang = resolve_source(text, source_lang);
        let outcome = |text: String, method| Translation {
            text,
            source_lang: source_lang.clone(),
            target_lang: target_lang.to_string(),
            method,
        };

        let cleaned = prepare_input(text);
        if cleaned.is_empty() {
            return outcome("No text to translate".to_string(), TranslationMethod::Skipped);
        }

        let mut last_error = None;
        if let Some(backend) = &self.online {
            match backend.translate(&cleaned, &source_lang, target_lang).await {
                Ok(translated) => {
                    return outcome(polish_output(&translated), TranslationMethod::Online);
                }
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "online translation failed");
                    last_error = Some(e);
                }
            }
        }

        if self.fallback_enabled {
            return outcome(transliterate::transliterate(&cleaned), TranslationMethod::Transliterated);
        }

        let reason = last_error.map_or_else(|| "no translation backend available".to_string(), |e| e.to_string());
        outcome(
            format!("Translation failed: {reason}. Original text: {cleaned}"),
            TranslationMethod::Failed,
        )
    }
}

impl TranslationService {
    /// Translate each text in turn. Results line up with `texts`.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Vec<Translation> {
        let mut translations = Vec::with_capacity(texts.len());
        for text in texts {
            translations.push(self.translate(text, source_lang, target_lang).await);
        }
        translations
    }
}

fn resolve_source(text: &str, requested: &str) -> String {
    if requested != "auto" {
        return requested.to_string();
    }
    detect_language(text).unwrap_or_else(|| {
        warn!("language detection inconclusive, assuming Gujarati");
        DEFAULT_SOURCE_LANG.to_string()
    })
}

fn prepare_input(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    if char_len(&collapsed) > MAX_INPUT_CHARS {
        take_chars(&collapsed, MAX_INPUT_CHARS).to_string()
    } else {
        collapsed
    }
}

fn polish_output(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn service_with(mock: MockTranslationBackend, fallback: bool) -> TranslationService {
        TranslationService::new(Some(Arc::new(mock)), fallback)
    }

    fn mock_named() -> MockTranslationBackend {
        let mut mock = MockTranslationBackend::new();
        mock.expect_name().return_const("mock");
        mock
    }

    #[tokio::test]
    async fn test_online_translation_is_polished() {
        let mut mock = mock_named();
        mock.expect_translate()
            .with(eq("ગુજરાત સમાચાર"), eq("gu"), eq("en"))
            .times(1)
            .returning(|_, _, _| Ok("gujarat   news ".to_string()));

        let result = service_with(mock, true)
            .translate("  ગુજરાત \n સમાચાર ", "gu", "en")
            .await;

        assert_eq!(result.text, "Gujarat news");
        assert_eq!(result.method, TranslationMethod::Online);
        assert_eq!(result.source_lang, "gu");
    }

    #[tokio::test]
    async fn test_falls_back_to_transliteration() {
        let mut mock = mock_named();
        mock.expect_translate()
            .returning(|_, _, _| Err(TranslateError::Status(429)));

        let result = service_with(mock, true).translate("આજે સમાચાર", "gu", "en").await;

        assert_eq!(result.text, "[Transliterated] today news");
        assert_eq!(result.method, TranslationMethod::Transliterated);
    }

    #[tokio::test]
    async fn test_failure_placeholder_without_fallback() {
        let mut mock = mock_named();
        mock.expect_translate()
            .returning(|_, _, _| Err(TranslateError::Request("connection refused".to_string())));

        let result = service_with(mock, false).translate("આજે", "gu", "en").await;

        assert_eq!(result.method, TranslationMethod::Failed);
        assert_eq!(
            result.text,
            "Translation failed: request failed: connection refused. Original text: આજે"
        );
    }

    #[tokio::test]
    async fn test_no_backend_and_no_fallback_keeps_original_text() {
        let service = TranslationService::new(None, false);
        assert_eq!(service.backend_name(), "transliteration");

        let result = service.translate(" ગુજરાત  સમાચાર ", "gu", "en").await;

        assert_eq!(result.method, TranslationMethod::Failed);
        assert_eq!(
            result.text,
            "Translation failed: no translation backend available. Original text: ગુજરાત સમાચાર"
        );
    }

    #[tokio::test]
    async fn test_empty_input_skips_backend() {
        let mut mock = mock_named();
        mock.expect_translate().never();

        let result = service_with(mock, true).translate("   ", "gu", "en").await;

        assert_eq!(result.text, "No text to translate");
        assert_eq!(result.method, TranslationMethod::Skipped);
    }

    #[tokio::test]
    async fn test_auto_source_is_detected() {
        let result = TranslationService::offline()
            .translate("ગુજરાત સરકાર આજે", "auto", "en")
            .await;
        assert_eq!(result.source_lang, "gu");
        assert_eq!(result.text, "[Transliterated] Gujarat government today");
    }

    #[tokio::test]
    async fn test_long_input_is_capped_before_sending() {
        let mut mock = mock_named();
        mock.expect_translate()
            .withf(|text, _, _| text.chars().count() == MAX_INPUT_CHARS)
            .returning(|_, _, _| Ok("ok".to_string()));

        let long = "ખબર ".repeat(3000);
        let result = service_with(mock, true).translate(&long, "gu", "en").await;
        assert_eq!(result.text, "Ok");
    }

    #[tokio::test]
    async fn test_batch_translates_each_text_in_order() {
        let mut mock = mock_named();
        mock.expect_translate()
            .with(eq("સુરત"), eq("gu"), eq("en"))
            .returning(|_, _, _| Ok("surat".to_string()));
        mock.expect_translate()
            .with(eq("વડોદરા"), eq("gu"), eq("en"))
            .returning(|_, _, _| Err(TranslateError::Status(503)));

        let texts = vec!["સુરત".to_string(), " ".to_string(), "વડોદરા".to_string()];
        let results = service_with(mock, false)
            .translate_batch(&texts, "gu", "en")
            .await;

        let methods: Vec<_> = results.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                TranslationMethod::Online,
                TranslationMethod::Skipped,
                TranslationMethod::Failed
            ]
        );
        assert_eq!(results[0].text, "Surat");
        assert!(results[2].text.ends_with("Original text: વડોદરા"));
    }

    #[test]
    fn test_supported_languages() {
        assert!(is_supported_source("auto"));
        assert!(!is_supported_source("fr"));
        assert!(is_supported_target("en"));
        assert!(!is_supported_target("gu"));
    }
}

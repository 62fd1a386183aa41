use std::fs;
use url::Url;

use crate::extractor::{
    ArticleExtractor, ExtractionMethod, NO_CONTENT_FOUND, NO_MEANINGFUL_CONTENT, Publisher, extract_document,
    model::MAX_ARTICLE_CHARS,
};

#[tokio::test]
async fn test_extract_many_keeps_order_and_reports_each_failure() {
    let urls = vec!["not a url at all".to_string(), "   ".to_string()];
    let results = ArticleExtractor::new().extract_many(&urls).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.success));
    assert_eq!(results[0].text, "Invalid URL format");
    assert_eq!(results[1].text, "Invalid URL format");
}

#[test]
fn test_supported_sources_lists_publishers() {
    let sources = ArticleExtractor::new().supported_sources();
    assert!(sources.common_gujarati_sources.contains(&"divyabhaskar.co.in".to_string()));
    assert_eq!(sources.publisher_specific, vec!["Divya Bhaskar".to_string()]);
    assert!(sources.extraction_capabilities.publish_date);
}

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_divya_bhaskar_story() {
    let url = Url::parse("https://www.divyabhaskar.co.in/local/gujarat/surat/news/rain-123.html").unwrap();
    let publisher = Publisher::detect(&url);
    assert_eq!(publisher, Some(Publisher::DivyaBhaskar));

    let result = extract_document(&url, &fixture("divyabhaskar.html"), publisher);

    assert!(result.success);
    assert_eq!(result.method, Some(ExtractionMethod::Publisher));
    assert!(result.text.contains("સુરત શહેરમાં"));
    assert!(result.text.contains("ઓરેન્જ એલર્ટ"));
    assert!(!result.text.contains("Copyright"));
    assert!(!result.text.contains("DB Corp"));
    assert!(!result.text.contains("Share on WhatsApp"));
    assert!(!result.text.contains("Divya Marathi"));

    assert_eq!(
        result.title.as_deref(),
        Some("સુરતમાં ભારે વરસાદ, નીચાણવાળા વિસ્તારોમાં પાણી ભરાયા")
    );
    assert_eq!(result.authors, vec!["ભાસ્કર ન્યૂઝ".to_string()]);
    assert_eq!(
        result.top_image.as_deref(),
        Some("https://www.divyabhaskar.co.in/images/surat-rain.jpg")
    );
    assert_eq!(result.source_domain.as_deref(), Some("www.divyabhaskar.co.in"));
    assert_eq!(result.language.as_deref(), Some("gu"));
    assert!(result.publish_date.is_some());
}

#[test]
fn test_extract_generic_article() {
    let url = Url::parse("https://coastaltimes.example.com/weather/monsoon").unwrap();
    let result = extract_document(&url, &fixture("article.html"), None);

    assert!(result.success);
    assert!(matches!(
        result.method,
        Some(ExtractionMethod::Readability) | Some(ExtractionMethod::Fallback)
    ));
    assert!(result.text.contains("southwest monsoon reached the Gujarat coast"));
    assert!(!result.text.contains("All Rights Reserved"));
    assert_eq!(result.site_name.as_deref(), Some("Coastal Times"));
    assert_eq!(result.authors, vec!["Meera Joshi".to_string()]);
    assert_eq!(result.language.as_deref(), Some("en"));
}

#[test]
fn test_reject_empty_page() {
    let url = Url::parse("https://example.com/empty").unwrap();
    let result = extract_document(&url, &fixture("empty.html"), None);

    assert!(!result.success);
    assert!(result.error.is_some());
    assert!(result.text == NO_MEANINGFUL_CONTENT || result.text == NO_CONTENT_FOUND);
    assert_eq!(result.language, None);
}

#[test]
fn test_short_publisher_story_replaced_by_placeholder() {
    let url = Url::parse("https://divyabhaskar.co.in/news/short").unwrap();
    let html = r#"<html><body><article><div class="story-body"><p>ટૂંકા સમાચાર અહીં છે।</p></div></article></body></html>"#;

    let result = extract_document(&url, html, Publisher::detect(&url));

    assert!(!result.success);
    assert_eq!(result.text, NO_MEANINGFUL_CONTENT);
}

#[test]
fn test_long_article_is_capped() {
    let paragraph = "<p>The district collector reviewed relief work in flood affected villages and ordered faster payments to families.</p>";
    let html = format!(
        "<html><head><title>Relief</title></head><body><article>{}</article></body></html>",
        paragraph.repeat(120)
    );
    let url = Url::parse("https://example.com/relief").unwrap();

    let result = extract_document(&url, &html, None);

    assert!(result.success);
    assert!(result.text.chars().count() <= MAX_ARTICLE_CHARS);
}

#[test]
fn test_malformed_html() {
    let url = Url::parse("https://example.com/broken").unwrap();
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    // Must not panic; whatever comes out is a placeholder or text
    let result = extract_document(&url, html, None);
    assert_eq!(result.title.as_deref(), Some("Broken"));
    assert!(!result.text.is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            path in "[a-z]{0,12}",
            publisher in proptest::option::of(Just(Publisher::DivyaBhaskar)),
        ) {
            let url = Url::parse(&format!("https://divyabhaskar.co.in/{path}")).unwrap();
            let result = extract_document(&url, &html, publisher);
            prop_assert!(result.text.chars().count() <= MAX_ARTICLE_CHARS);
        }
    }
}

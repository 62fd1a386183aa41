use readability::extractor;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

use crate::extractor::{
    dom::{compile, document_text, first_match_text, remove_matching},
    publisher::UNWANTED_TAGS,
};

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    r#"[class*="story-content"]"#,
    r#"[class*="article-content"]"#,
    r#"[class*="post-content"]"#,
    r#"[class*="entry-content"]"#,
    r#"[class*="content-body"]"#,
    r#"[class*="article-body"]"#,
    "main",
    ".main-content",
    r#"[role="main"]"#,
];

// The generic path keeps related-article and more-news blocks; they rarely
// appear as custom tags outside the publisher-specific markup.
static TAG_SELECTORS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&UNWANTED_TAGS[..UNWANTED_TAGS.len() - 2]));
static CONTENT: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(CONTENT_SELECTORS));

/// Article text according to readability scoring, if it finds any.
pub fn readability_text(html: &str, url: &Url) -> Option<String> {
    match extractor::extract(&mut html.as_bytes(), url) {
        Ok(article) => {
            let text = article.text.trim().to_string();
            if text.is_empty() {
                debug!("readability found no article text");
                None
            } else {
                Some(text)
            }
        }
        Err(e) => {
            warn!(error = %e, "readability extraction failed, trying content selectors");
            None
        }
    }
}

/// Text of the first generic content area, or of the whole page.
pub fn fallback_text(document: &mut Html) -> String {
    remove_matching(document, &TAG_SELECTORS);

    first_match_text(document, &CONTENT)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| document_text(document))
}

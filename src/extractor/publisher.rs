//! Publisher-specific extraction.
//!
//! Divya Bhaskar pages wrap every story in a large legal footer and corporate
//! navigation that the generic reader happily includes. For those pages the
//! page is pruned aggressively before any content area is looked up.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::extractor::dom::{compile, first_match_text, remove_matching, stripped_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publisher {
    DivyaBhaskar,
}

impl Publisher {
    pub const ALL: &'static [Self] = &[Self::DivyaBhaskar];

    /// Detect a known publisher by substring match on the URL host.
    pub fn detect(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_lowercase();
        host.contains("divyabhaskar").then_some(Self::DivyaBhaskar)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DivyaBhaskar => "Divya Bhaskar",
        }
    }
}

/// Tag types removed before looking for content. The generic reader uses the
/// same list minus the last two entries.
pub const UNWANTED_TAGS: &[&str] = &[
    "script",
    "style",
    "nav",
    "header",
    "footer",
    "aside",
    "form",
    "button",
    "input",
    "select",
    "textarea",
    "iframe",
    "advertisement",
    "ads",
    "social-share",
    "comments",
    "related-articles",
    "more-news",
];

const UNWANTED_CLASS_FRAGMENTS: &[&str] = &[
    "footer",
    "header",
    "nav",
    "menu",
    "sidebar",
    "ad",
    "social",
    "share",
    "comment",
    "copyright",
    "disclaimer",
    "terms",
    "division",
    "corp",
    "dnpa",
    "ethics",
    "reserved",
];

const CONTENT_SELECTORS: &[&str] = &[
    "article .story-content",
    "article .article-content",
    ".story-body",
    ".article-body",
    ".post-content",
    ".entry-content",
    r#"[class*="story-text"]"#,
    r#"[class*="article-text"]"#,
];

const ARTICLE_PARAGRAPH_MIN_CHARS: usize = 20;
const PAGE_PARAGRAPH_MIN_CHARS: usize = 30;
const PAGE_PARAGRAPH_LIMIT: usize = 10;
const PARAGRAPH_STOP_WORDS: &[&str] = &["copyright", "division", "corp", "reserved", "ethics"];

static TAG_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(UNWANTED_TAGS));

static CLASS_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    UNWANTED_CLASS_FRAGMENTS
        .iter()
        .filter_map(|fragment| Selector::parse(&format!(r#"[class*="{fragment}"]"#)).ok())
        .collect()
});

static CONTENT: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(CONTENT_SELECTORS));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Raw (uncleaned) story text from a Divya Bhaskar page.
pub fn extract_story_text(document: &mut Html) -> String {
    remove_matching(document, &TAG_SELECTORS);
    remove_matching(document, &CLASS_SELECTORS);

    if let Some(text) = first_match_text(document, &CONTENT).filter(|t| !t.is_empty()) {
        return text;
    }

    let from_article = article_paragraphs(document);
    if !from_article.is_empty() {
        return from_article;
    }

    page_paragraphs(document)
}

fn article_paragraphs(document: &Html) -> String {
    let Some(article) = document.select(&ARTICLE).next() else {
        return String::new();
    };
    article
        .select(&PARAGRAPH)
        .map(|p| stripped_text(p, ""))
        .filter(|t| t.chars().count() > ARTICLE_PARAGRAPH_MIN_CHARS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn page_paragraphs(document: &Html) -> String {
    document
        .select(&PARAGRAPH)
        .map(|p| stripped_text(p, ""))
        .filter(|t| t.chars().count() > PAGE_PARAGRAPH_MIN_CHARS)
        .filter(|t| {
            let lower = t.to_lowercase();
            !PARAGRAPH_STOP_WORDS.iter().any(|w| lower.contains(w))
        })
        .take(PAGE_PARAGRAPH_LIMIT)
        .collect::<Vec<_>>()
        .join(" ")
}

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::extractor::{dom::compile, model::PageMetadata};

static TITLE_META: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&["meta[property='og:title']", "meta[name='twitter:title']"]));
static TITLE_TAG: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(&["title", "h1"]));
static SITE_NAME: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&["meta[property='og:site_name']"]));
static AUTHORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "meta[name='author']",
        "meta[property='article:author']",
        "meta[name='article:author']",
    ])
});
static PUBLISHED: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    compile(&[
        "meta[property='article:published_time']",
        "meta[property='og:published_time']",
        "meta[name='publish-date']",
        "meta[name='date']",
        "meta[itemprop='datePublished']",
    ])
});
static TIME_TAG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("time[datetime]").unwrap());
static TOP_IMAGE: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(&["meta[property='og:image']", "meta[name='twitter:image']"]));

pub fn read_metadata(document: &Html, base_url: &Url) -> PageMetadata {
    let title = meta_content(document, &TITLE_META).or_else(|| element_text(document, &TITLE_TAG));

    PageMetadata {
        site_name: meta_content(document, &SITE_NAME)
            .or_else(|| title.as_deref().and_then(site_name_from_title)),
        title,
        authors: authors(document),
        publish_date: publish_date(document),
        top_image: meta_content(document, &TOP_IMAGE)
            .and_then(|src| base_url.join(&src).ok())
            .map(|u| u.to_string()),
    }
}

fn meta_content(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|c| !c.is_empty())
            .map(str::to_string)
    })
}

fn element_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|t| !t.is_empty())
    })
}

// "Story headline - Site Name" or "Story headline | Site Name"
fn site_name_from_title(title: &str) -> Option<String> {
    [" - ", " | "]
        .iter()
        .find_map(|sep| title.rfind(sep).map(|pos| title[pos + sep.len()..].trim().to_string()))
        .filter(|s| !s.is_empty())
}

fn authors(document: &Html) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for selector in AUTHORS.iter() {
        for content in document.select(selector).filter_map(|el| el.value().attr("content")) {
            for name in content.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                // article:author is often a profile URL rather than a name
                if name.starts_with("http") || found.iter().any(|f| f == name) {
                    continue;
                }
                found.push(name.to_string());
            }
        }
    }
    found
}

fn publish_date(document: &Html) -> Option<DateTime<Utc>> {
    meta_content(document, &PUBLISHED)
        .and_then(|raw| parse_date(&raw))
        .or_else(|| {
            document
                .select(&TIME_TAG)
                .filter_map(|el| el.value().attr("datetime"))
                .find_map(parse_date)
        })
}

pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

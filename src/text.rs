//! Small text helpers shared by the extractor, translator and summarizer.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use utoipa::ToSchema;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?।]+").unwrap());

/// Gujarati Unicode block.
const GUJARATI_RANGE: std::ops::RangeInclusive<char> = '\u{0A80}'..='\u{0AFF}';

pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

pub fn is_gujarati_char(c: char) -> bool {
    GUJARATI_RANGE.contains(&c)
}

pub fn contains_gujarati(text: &str) -> bool {
    text.chars().any(is_gujarati_char)
}

/// True when at least `threshold` of the non-whitespace characters are Gujarati.
pub fn is_gujarati_heavy(text: &str, threshold: f64) -> bool {
    let (gujarati, total) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(g, t), c| {
            (g + usize::from(is_gujarati_char(c)), t + 1)
        });

    if total == 0 {
        return false;
    }
    gujarati as f64 / total as f64 >= threshold
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// First `max_chars` characters of `text`, on a char boundary.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate so the result, suffix included, is at most `max_length` characters.
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if char_len(text) <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(char_len(suffix));
    format!("{}{}", take_chars(text, keep), suffix)
}

/// Cut to `max_length` characters and append "..." when anything was dropped.
pub fn preview(text: &str, max_length: usize) -> String {
    if char_len(text) > max_length {
        format!("{}...", take_chars(text, max_length))
    } else {
        text.to_string()
    }
}

/// Trim and default the scheme to https.
pub fn clean_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Split on sentence terminators (including the danda), dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Estimated minutes to read, never less than one.
pub fn estimate_reading_time(text: &str, words_per_minute: usize) -> usize {
    let words = text.split_whitespace().count();
    (words / words_per_minute.max(1)).max(1)
}

pub fn format_processing_time(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{seconds:.2}s")
    } else {
        let minutes = (seconds / 60.0).floor();
        format!("{}m {:.2}s", minutes as u64, seconds - minutes * 60.0)
    }
}

/// MD5 hex digest of the text, used to spot repeated submissions.
pub fn text_checksum(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TextStatistics {
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub average_word_length: f64,
    pub average_sentence_length: f64,
    pub estimated_reading_time: usize,
}

pub fn text_statistics(text: &str) -> TextStatistics {
    let words: Vec<&str> = text.split_whitespace().collect();
    let sentence_count = split_sentences(text).len();
    let word_count = words.len();

    let average_word_length = if word_count > 0 {
        words.iter().map(|w| char_len(w)).sum::<usize>() as f64 / word_count as f64
    } else {
        0.0
    };
    let average_sentence_length = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };

    TextStatistics {
        character_count: char_len(text),
        character_count_no_spaces: text.chars().filter(|c| *c != ' ').count(),
        word_count,
        sentence_count,
        average_word_length: round_to(average_word_length, 2),
        average_sentence_length: round_to(average_sentence_length, 2),
        estimated_reading_time: estimate_reading_time(text, DEFAULT_WORDS_PER_MINUTE),
    }
}

//! Boilerplate stripping for scraped article text.
//!
//! Works at sentence granularity: any sentence mentioning a legal notice or
//! dominated by corporate boilerplate words is dropped outright, then a few
//! known footer blocks are cut by pattern.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::text::{char_len, collapse_whitespace};

/// Cleaned text must be longer than this to be kept.
pub const MIN_CLEAN_CHARS: usize = 50;
const MIN_SENTENCE_CHARS: usize = 15;
const MAX_BAD_WORD_RATIO: f64 = 0.2;

/// A sentence containing any of these (case-insensitively) is dropped.
pub const LEGAL_PHRASES: &[&str] = &[
    "Our Divisions Copyright",
    "DB Corp ltd",
    "All Rights Reserved",
    "DNPA Code of Ethics",
    "This website follows",
    "Our Divisions",
    "Copyright ©",
    "2024-25",
    "2023-24",
    "2025-26",
];

const BAD_WORDS: &[&str] = &["copyright", "corp", "division", "reserved", "ethics", "dnpa"];

static SENTENCE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?।]").unwrap());

static FOOTER_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)Our Divisions.*?Ethics\.?",
        r"(?is)Copyright.*?Reserved",
        r"(?is)DB Corp.*?Ethics",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static DOT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

static LEGAL_PHRASES_LOWER: LazyLock<Vec<String>> =
    LazyLock::new(|| LEGAL_PHRASES.iter().map(|p| p.to_lowercase()).collect());

pub fn contains_legal_phrase(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    LEGAL_PHRASES_LOWER.iter().any(|p| lower.contains(p.as_str()))
}

pub fn bad_word_ratio(sentence: &str) -> f64 {
    let lower = sentence.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let bad = words.iter().filter(|w| BAD_WORDS.contains(w)).count();
    bad as f64 / words.len() as f64
}

/// Sentences that survive the legal-phrase and bad-word filters, in order.
pub fn filter_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|sentence| {
            if char_len(sentence) < MIN_SENTENCE_CHARS {
                return false;
            }
            if contains_legal_phrase(sentence) {
                debug!(sentence = %preview(sentence), "rejected legal sentence");
                return false;
            }
            if bad_word_ratio(sentence) > MAX_BAD_WORD_RATIO {
                debug!(sentence = %preview(sentence), "rejected boilerplate-heavy sentence");
                return false;
            }
            true
        })
        .collect()
}

/// Strip boilerplate from `text`. `None` when too little survives.
pub fn strip_boilerplate(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let mut result = filter_sentences(text).join(". ");
    for pattern in FOOTER_BLOCKS.iter() {
        result = pattern.replace_all(&result, "").into_owned();
    }
    let result = collapse_whitespace(&result);
    let result = DOT_RUN.replace_all(&result, ".").into_owned();

    info!(chars = char_len(&result), "cleaned article text");
    (char_len(&result) > MIN_CLEAN_CHARS).then_some(result)
}

fn preview(sentence: &str) -> &str {
    crate::text::take_chars(sentence, 50)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY: &str = "The state government announced a new water scheme for farmers today. \
        Officials said the project will cover more than two hundred villages";

    #[test]
    fn test_legal_phrase_rejected_case_insensitively() {
        let text = format!("{STORY}. COPYRIGHT © all content belongs to the publisher group");
        let cleaned = strip_boilerplate(&text).unwrap();
        assert!(!cleaned.to_lowercase().contains("copyright"));
        assert!(cleaned.contains("water scheme"));
    }

    #[test]
    fn test_every_legal_phrase_is_detected() {
        for phrase in LEGAL_PHRASES {
            let sentence = format!("some surrounding words {} more words", phrase.to_uppercase());
            assert!(contains_legal_phrase(&sentence), "{phrase}");
        }
    }

    #[test]
    fn test_bad_word_density() {
        assert!(bad_word_ratio("corp division reserved news item") > MAX_BAD_WORD_RATIO);
        assert_eq!(bad_word_ratio("a perfectly ordinary sentence"), 0.0);
        let kept = filter_sentences("corp division reserved news item here. An ordinary sentence about rain");
        assert_eq!(kept, vec!["An ordinary sentence about rain"]);
    }

    #[test]
    fn test_short_sentences_dropped() {
        let kept = filter_sentences("Too short. Also tiny! This sentence is long enough to stay");
        assert_eq!(kept, vec!["This sentence is long enough to stay"]);
    }

    #[test]
    fn test_gujarati_danda_splits_sentences() {
        let text = "ગુજરાત સરકારે આજે નવી યોજના જાહેર કરી। Copyright © DB Corp ltd";
        assert_eq!(filter_sentences(text), vec!["ગુજરાત સરકારે આજે નવી યોજના જાહેર કરી"]);
    }

    #[test]
    fn test_short_result_rejected() {
        assert_eq!(strip_boilerplate("A single sentence of modest size"), None);
        assert_eq!(strip_boilerplate("   "), None);
    }

    #[test]
    fn test_output_is_joined_and_normalized() {
        let cleaned = strip_boilerplate(STORY).unwrap();
        assert_eq!(
            cleaned,
            "The state government announced a new water scheme for farmers today. \
             Officials said the project will cover more than two hundred villages"
        );
    }
}

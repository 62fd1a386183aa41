//! Offline sentence-scoring summarizer.
//!
//! Works on any script: sentences are split on Latin terminators and the
//! danda, scored by position, length and a small news keyword list, and the
//! best ones that fit the character budget are stitched back together in
//! reading order.

use tracing::debug;

use super::SummaryMethod;
use crate::text::{char_len, collapse_whitespace, preview, split_sentences};

/// Sentences at or under this many characters are ignored.
const MIN_SENTENCE_CHARS: usize = 10;
const MAX_SELECTED: usize = 3;
/// Key points need more words than this.
const MIN_KEY_POINT_WORDS: usize = 5;

const KEYWORDS: &[&str] = &[
    "સમાચાર",
    "ખબર",
    "મહત્વપૂર્ણ",
    "મુખ્ય",
    "પ્રમુખ",
    "સરકાર",
    "આજે",
    "news",
    "important",
    "main",
    "today",
];

#[derive(Debug)]
struct Scored<'a> {
    sentence: &'a str,
    position: usize,
    score: u32,
}

/// Summarize `text` into at most `max_chars` characters of selected sentences.
///
/// Returns the summary and whether it came from sentence selection or plain
/// truncation.
pub fn summarize(text: &str, max_chars: usize) -> (String, SummaryMethod) {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        return (super::NO_CONTENT.to_string(), SummaryMethod::Skipped);
    }

    let sentences: Vec<&str> = split_sentences(&text)
        .into_iter()
        .filter(|s| char_len(s) > MIN_SENTENCE_CHARS)
        .collect();

    if sentences.len() <= 2 {
        return truncate(&text, max_chars);
    }

    let mut scored: Vec<Scored> = sentences
        .iter()
        .copied()
        .enumerate()
        .map(|(position, sentence)| Scored {
            sentence,
            position,
            score: score_sentence(sentence, position, sentences.len()),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));

    let mut selected: Vec<&Scored> = Vec::with_capacity(MAX_SELECTED);
    let mut used = 0;
    for candidate in &scored {
        let len = char_len(candidate.sentence);
        if used + len <= max_chars {
            selected.push(candidate);
            used += len;
        }
        if selected.len() >= MAX_SELECTED {
            break;
        }
    }

    if selected.is_empty() {
        debug!(max_chars, "no sentence fits the budget, truncating");
        return truncate(&text, max_chars);
    }

    selected.sort_by_key(|s| s.position);
    let mut summary = selected
        .iter()
        .map(|s| s.sentence)
        .collect::<Vec<_>>()
        .join(". ");
    if !summary.ends_with(['.', '!', '?', '।']) {
        summary.push('.');
    }

    (summary, SummaryMethod::Extractive)
}

fn truncate(text: &str, max_chars: usize) -> (String, SummaryMethod) {
    if char_len(text) > max_chars {
        (preview(text, max_chars), SummaryMethod::Truncated)
    } else {
        (text.to_string(), SummaryMethod::Extractive)
    }
}

fn score_sentence(sentence: &str, position: usize, total: usize) -> u32 {
    let mut score = if position == 0 {
        3
    } else if position == total - 1 {
        2
    } else if position < total / 3 {
        1
    } else {
        0
    };

    score += match char_len(sentence) {
        50..=200 => 2,
        20..=49 => 1,
        _ => 0,
    };

    let lowered = sentence.to_lowercase();
    score += KEYWORDS.iter().filter(|k| lowered.contains(*k)).count() as u32;
    score
}

/// The `num_points` most substantial sentences, best first.
///
/// Sentences are split on ". " only and ranked by word count, with a bonus of
/// `1 / (position + 1)` so earlier sentences win ties.
pub fn key_points(text: &str, num_points: usize) -> Vec<String> {
    let text = collapse_whitespace(text);
    let mut ranked: Vec<(f64, &str)> = text
        .split(". ")
        .enumerate()
        .filter_map(|(position, sentence)| {
            let words = sentence.split_whitespace().count();
            (words > MIN_KEY_POINT_WORDS)
                .then(|| (words as f64 + 1.0 / (position + 1) as f64, sentence.trim()))
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    ranked
        .into_iter()
        .take(num_points)
        .map(|(_, sentence)| sentence.to_string())
        .collect()
}

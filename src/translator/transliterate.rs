//! Offline Gujarati → Latin fallback used when the translation API is out of reach.
//!
//! Known words are swapped for their English meaning; everything else is
//! transliterated one character at a time. Characters without a mapping
//! (vowel signs, digits, Latin text) pass through unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const TRANSLITERATED_PREFIX: &str = "[Transliterated] ";

static CHARACTER_MAP: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ('અ', "a"), ('આ', "aa"), ('ઇ', "i"), ('ઈ', "ii"), ('ઉ', "u"), ('ઊ', "uu"),
        ('એ', "e"), ('ઐ', "ai"), ('ઓ', "o"), ('ઔ', "au"),
        ('ક', "ka"), ('ખ', "kha"), ('ગ', "ga"), ('ઘ', "gha"), ('ઙ', "nga"),
        ('ચ', "cha"), ('છ', "chha"), ('જ', "ja"), ('ઝ', "jha"), ('ઞ', "nja"),
        ('ટ', "ta"), ('ઠ', "tha"), ('ડ', "da"), ('ઢ', "dha"), ('ણ', "na"),
        ('ત', "ta"), ('થ', "tha"), ('દ', "da"), ('ધ', "dha"), ('ન', "na"),
        ('પ', "pa"), ('ફ', "pha"), ('બ', "ba"), ('ભ', "bha"), ('મ', "ma"),
        ('ય', "ya"), ('ર', "ra"), ('લ', "la"), ('વ', "va"),
        ('શ', "sha"), ('ષ', "sha"), ('સ', "sa"), ('હ', "ha"),
        ('।', "."), ('?', "?"), ('!', "!"), (',', ","), (';', ";"), (':', ":"),
    ])
});

static WORD_MAP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("સમાચાર", "news"),
        ("ખબર", "news"),
        ("આજ", "today"),
        ("આજે", "today"),
        ("ગુજરાત", "Gujarat"),
        ("ભારત", "India"),
        ("અહીં", "here"),
        ("ત્યાં", "there"),
        ("લોકો", "people"),
        ("જનતા", "public"),
        ("સરકાર", "government"),
        ("મુખ્યમંત્રી", "Chief Minister"),
        ("પ્રધાનમંત્રી", "Prime Minister"),
        ("વર્ષ", "year"),
        ("મહિનો", "month"),
        ("દિવસ", "day"),
        ("સમય", "time"),
        ("પૈસા", "money"),
        ("રૂપિયા", "rupees"),
        ("હજાર", "thousand"),
        ("લાખ", "lakh"),
        ("કરોડ", "crore"),
        ("અબજ", "billion"),
        ("શહેર", "city"),
        ("ગામ", "village"),
        ("રાજ્ય", "state"),
        ("કોર્ટ", "court"),
        ("ન્યાય", "justice"),
        ("કાયદો", "law"),
        ("પોલીસ", "police"),
        ("ચૂંટણી", "election"),
        ("પાર્ટી", "party"),
    ])
});

/// Dictionary translation of a single word, if it is a known one.
pub fn translate_word(word: &str) -> Option<&'static str> {
    WORD_MAP.get(word).copied()
}

/// Character-by-character Latin rendering of `word`.
pub fn transliterate_word(word: &str) -> String {
    word.chars().fold(String::with_capacity(word.len()), |mut out, c| {
        match CHARACTER_MAP.get(&c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
        out
    })
}

/// Whitespace-separated words, each translated or transliterated, joined by single spaces.
pub fn transliterate(text: &str) -> String {
    let body = text
        .split_whitespace()
        .map(|word| match translate_word(word) {
            Some(english) => english.to_string(),
            None => transliterate_word(word),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{TRANSLITERATED_PREFIX}{body}")
}

pub fn dictionary_size() -> usize {
    WORD_MAP.len()
}

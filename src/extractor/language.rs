use whatlang::{Lang, detect};

use crate::text::is_gujarati_heavy;

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 20;
/// Share of Gujarati-script characters above which text is taken to be Gujarati.
pub const GUJARATI_SCRIPT_THRESHOLD: f64 = 0.3;

/// ISO 639-1 code of the dominant language, if it can be told with confidence.
pub fn detect_language(text: &str) -> Option<String> {
    // Script share settles it for Gujarati before the statistical detector runs
    if is_gujarati_heavy(text, GUJARATI_SCRIPT_THRESHOLD) {
        return Some("gu".to_string());
    }

    if text.trim().chars().count() < MIN_TEXT_LENGTH {
        return None;
    }

    detect(text)
        .filter(|info| info.confidence() >= MIN_CONFIDENCE)
        .map(|info| lang_to_code(info.lang()))
}

fn lang_to_code(lang: Lang) -> String {
    match lang {
        Lang::Guj => "gu",
        Lang::Hin => "hi",
        Lang::Mar => "mr",
        Lang::Ben => "bn",
        Lang::Pan => "pa",
        Lang::Urd => "ur",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Kan => "kn",
        Lang::Mal => "ml",
        Lang::Eng => "en",
        _ => return lang.code().to_string(),
    }
    .to_string()
}

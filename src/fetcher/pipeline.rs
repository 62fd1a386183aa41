use crate::fetcher::{
    errors::FetchError,
    types::{Charset, PageResponse},
};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

// Only the first few KB are scanned for a <meta charset>
const SNIFF_LEN: usize = 4096;

pub fn decode_page(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, charset)?;

    Ok(PageResponse {
        url_final,
        status,
        body_utf8,
        charset,
        byte_len: body_bytes.len(),
        fetched_at: Utc::now(),
    })
}

fn charset_from_label(regex: &Regex, haystack: &str) -> Option<Charset> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}

pub(crate) fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(charset) = charset_from_label(&CHARSET_REGEX, content_type) {
        return charset;
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(charset) = charset_from_label(&META_CHARSET_REGEX, &head_str) {
        return charset;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body_bytes.len() <= SNIFF_LEN);
    Charset::from_encoding(detector.guess(None, true))
}

pub(crate) fn decode_to_utf8(body_bytes: &[u8], charset: Charset) -> Result<String, FetchError> {
    let encoding = charset.encoding();
    let (decoded, used, had_errors) = encoding.decode(body_bytes);

    if decoded.trim().is_empty() && !body_bytes.is_empty() {
        return Err(FetchError::Charset(format!(
            "page decoded to nothing with encoding {}",
            used.name()
        )));
    }
    if had_errors {
        // Malformed sequences become U+FFFD; the remaining text is still usable
        warn!(encoding = used.name(), "page contained malformed byte sequences");
    }

    Ok(decoded.into_owned())
}

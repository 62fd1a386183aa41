use crate::fetcher::{errors::FetchError, pipeline::decode_page, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// News sites serve stripped-down or blocked pages to obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("gu,en;q=0.8"),
    );

    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(FETCH_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Parse `url` and download it as an HTML page.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = Url::parse(url)?;
    fetch_url(&parsed_url).await
}

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_url(url: &Url) -> Result<PageResponse, FetchError> {
    let response = HTTP_CLIENT
        .get(url.clone())
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    if let Some(content_length) = response.content_length() {
        if content_length > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(content_length));
        }
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Content-Length may be missing or wrong for chunked responses
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    debug!(
        final_url = %final_url,
        bytes = body_bytes.len(),
        "downloaded page"
    );

    decode_page(final_url, status, body_bytes, &content_type)
}

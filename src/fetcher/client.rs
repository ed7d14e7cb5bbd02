use crate::fetcher::{decode::process_response, errors::FetchError, types::PageResponse};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "newsclip/0.1";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = header::HeaderMap::new();
            headers.insert(
                header::ACCEPT,
                header::HeaderValue::from_static(
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                ),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

/// Retrieves a page and hands back its raw bytes and decoded markup.
///
/// The whole retrieval is bounded by `timeout`; running out of time is an
/// error, never a retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<PageResponse, FetchError>;
}

/// `PageSource` backed by the shared reqwest client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSource;

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<PageResponse, FetchError> {
        fetch_with_timeout(url.as_str(), timeout).await
    }
}

/// Fetch with the default one minute bound.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with_timeout(url, crate::config::DEFAULT_TIMEOUT).await
}

#[instrument(skip_all, fields(url = %url, timeout = ?timeout))]
pub async fn fetch_with_timeout(url: &str, timeout: Duration) -> Result<PageResponse, FetchError> {
    let parsed_url = Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .timeout(timeout)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();
    let headers = response.headers().clone();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = headers
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
        .map_err(FetchError::from_reqwest_error)?;

    // Content-Length may be missing or wrong
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    debug!(status = %status, size = body_bytes.len(), "page retrieved");
    Ok(process_response(
        final_url,
        status,
        headers,
        body_bytes,
        &content_type,
    ))
}

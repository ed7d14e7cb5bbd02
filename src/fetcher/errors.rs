use std::error::Error as StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server answered with a response head the transport could not
    /// parse. Callers treat this as a degraded fetch, not a failure.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("dns failure: {0}")]
    Dns(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn is_invalid_header(&self) -> bool {
        matches!(self, Self::InvalidHeader(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectTimeout | Self::RequestTimeout)
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if let Some(message) = invalid_header_message(&err) {
            Self::InvalidHeader(message)
        } else if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_request() || err.is_connect() {
            Self::Dns(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Walk the source chain looking for a header parse failure reported by the
/// HTTP stack, e.g. hyper's "invalid HTTP header parsed".
fn invalid_header_message(err: &(dyn StdError + 'static)) -> Option<String> {
    let mut current = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        if mentions_invalid_header(&message) {
            return Some(message);
        }
        current = e.source();
    }
    None
}

pub(crate) fn mentions_invalid_header(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("header") && (lower.contains("invalid") || lower.contains("malformed"))
}

use thiserror::Error;

use crate::extractor::ExtractError;
use crate::fetcher::FetchError;

/// Fatal pipeline failures, tagged with the site title and offending URL.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("[{site}] invalid url {url:?}: {source}")]
    InvalidUrl {
        site: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("[{site}] fetch failed: {url}: {source}")]
    FetchFailed {
        site: String,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("[{site}] {source}: {url}")]
    Extract {
        site: String,
        url: String,
        #[source]
        source: ExtractError,
    },
}

impl PipelineError {
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::FetchFailed { url, .. }
            | Self::Extract { url, .. } => url,
        }
    }

    pub fn site(&self) -> &str {
        match self {
            Self::InvalidUrl { site, .. }
            | Self::FetchFailed { site, .. }
            | Self::Extract { site, .. } => site,
        }
    }
}

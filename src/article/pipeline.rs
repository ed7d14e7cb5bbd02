use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::article::{
    errors::PipelineError,
    model::{Article, article_id},
};
use crate::config::SiteConfig;
use crate::extractor::{
    ExtractError, extract_content, extract_publish_time, extract_title, rewrite,
};
use crate::fetcher::{HttpSource, PageResponse, PageSource};

/// Non-fatal condition attached to a successfully built article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Published before the staleness window; callers usually skip it.
    Stale,
    /// The server sent a malformed response header; the article carries
    /// only the URL path as title and an empty body.
    DegradedFetch,
}

/// A built article plus an optional advisory.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    article: Article,
    advisory: Option<Advisory>,
}

impl FetchOutcome {
    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn into_article(self) -> Article {
        self.article
    }

    pub fn advisory(&self) -> Option<Advisory> {
        self.advisory
    }

    pub fn is_stale(&self) -> bool {
        self.advisory == Some(Advisory::Stale)
    }
}

/// Fetches one article page of a site and turns it into an `Article`.
///
/// Each call is independent: retrieve, title, publish time, body, rewrite,
/// assemble.
#[derive(Clone)]
pub struct ArticlePipeline {
    site: SiteConfig,
    source: Arc<dyn PageSource>,
}

impl ArticlePipeline {
    pub fn new(site: SiteConfig, source: Arc<dyn PageSource>) -> Self {
        Self { site, source }
    }

    /// Pipeline retrieving pages over HTTP.
    pub fn http(site: SiteConfig) -> Self {
        Self::new(site, Arc::new(HttpSource))
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<FetchOutcome, PipelineError> {
        self.fetch_at(raw_url, Utc::now()).await
    }

    /// Like `fetch`, with staleness and fallback times judged against `now`.
    #[instrument(skip(self, now), fields(site = %self.site.title()))]
    pub async fn fetch_at(
        &self,
        raw_url: &str,
        now: DateTime<Utc>,
    ) -> Result<FetchOutcome, PipelineError> {
        let url = Url::parse(raw_url).map_err(|source| PipelineError::InvalidUrl {
            site: self.site.title().to_string(),
            url: raw_url.to_string(),
            source,
        })?;
        let id = article_id(raw_url);

        let fetched = self.source.fetch(&url, self.site.timeout()).await;
        let page = match fetched {
            Ok(page) => page,
            Err(err) if err.is_invalid_header() => {
                warn!("[{}] degraded fetch of {}: {}", self.site.title(), url, err);
                return Ok(self.degraded(id, url, now));
            }
            Err(source) => {
                return Err(PipelineError::FetchFailed {
                    site: self.site.title().to_string(),
                    url: raw_url.to_string(),
                    source,
                });
            }
        };

        let outcome = self
            .build(id, url, &page, now)
            .map_err(|source| PipelineError::Extract {
                site: self.site.title().to_string(),
                url: raw_url.to_string(),
                source,
            })?;

        if outcome.is_stale() {
            warn!(
                "[{}] article update time out of range: {} ({})",
                self.site.title(),
                raw_url,
                outcome.article().update_time()
            );
        } else {
            info!(
                "[{}] fetched {}: {}",
                self.site.title(),
                outcome.article().id(),
                outcome.article().title()
            );
        }
        Ok(outcome)
    }

    fn build(
        &self,
        id: String,
        url: Url,
        page: &PageResponse,
        now: DateTime<Utc>,
    ) -> Result<FetchOutcome, ExtractError> {
        let document = page.document();

        let title = extract_title(&document, self.site.title_noise())?;
        let published = extract_publish_time(&url, now)?;
        let markup = extract_content(&document, self.site.content_id())?;
        debug!(
            charset = ?page.charset,
            fetched_at = %page.fetched_at,
            markup_len = markup.len(),
            "content matched"
        );
        let body = rewrite(&markup);

        let advisory = published.is_stale().then_some(Advisory::Stale);
        let article = Article::new(id, &self.site, url, title, published.time, &body);
        Ok(FetchOutcome { article, advisory })
    }

    fn degraded(&self, id: String, url: Url, now: DateTime<Utc>) -> FetchOutcome {
        let title = url.path().to_string();
        FetchOutcome {
            article: Article::new(id, &self.site, url, title, now, ""),
            advisory: Some(Advisory::DegradedFetch),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::article::assemble::assemble;
use crate::config::SiteConfig;

/// One fetched news article as stored in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    id: String,
    title: String,
    content: String,
    #[serde(rename = "websiteId")]
    site_id: String,
    #[serde(rename = "websiteDomain")]
    site_domain: String,
    #[serde(rename = "websiteTitle")]
    site_title: String,
    update_time: DateTime<Utc>,
    source_url: Url,
}

impl Article {
    /// Build an article; the document content is assembled last from the
    /// other fields and the rewritten body.
    pub fn new(
        id: String,
        site: &SiteConfig,
        source_url: Url,
        title: String,
        update_time: DateTime<Utc>,
        body: &str,
    ) -> Self {
        let mut article = Self {
            id,
            title,
            content: String::new(),
            site_id: site.site_id(),
            site_domain: site.domain().to_string(),
            site_title: site.title().to_string(),
            update_time,
            source_url,
        };
        article.content = assemble(&article, body);
        article
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn content(&self) -> &str {
        &self.content
    }
    pub fn site_id(&self) -> &str {
        &self.site_id
    }
    pub fn site_domain(&self) -> &str {
        &self.site_domain
    }
    pub fn site_title(&self) -> &str {
        &self.site_title
    }
    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }
    pub fn source_url(&self) -> &Url {
        &self.source_url
    }
}

/// Corpus key of the article fetched from `raw_url`: MD5 hex digest of the
/// URL text exactly as given.
pub fn article_id(raw_url: &str) -> String {
    format!("{:x}", md5::compute(raw_url.as_bytes()))
}

/// Order articles by update time, oldest first.
pub fn sort_by_update_time(articles: &mut [Article]) {
    articles.sort_by_key(|a| a.update_time);
}

//! The persisted article collection.
//!
//! Reads load the whole corpus, writes replace it. `Corpus::append` runs its
//! load-modify-save cycle under a mutex, so writers sharing one `Corpus` do
//! not lose each other's articles; separate processes writing the same file
//! still race.

pub mod errors;
pub mod store;

pub use errors::CorpusError;
pub use store::{ArticleStore, JsonFileStore, MemoryStore};

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::article::Article;

pub struct Corpus {
    store: Arc<dyn ArticleStore>,
    site: String,
    write_lock: Mutex<()>,
}

impl Corpus {
    pub fn new(store: Arc<dyn ArticleStore>, site: impl Into<String>) -> Self {
        Self {
            store,
            site: site.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Corpus backed by a JSON file at `path`.
    pub fn json_file(path: impl Into<PathBuf>, site: impl Into<String>) -> Self {
        let site = site.into();
        let store = JsonFileStore::new(path, site.clone());
        Self::new(Arc::new(store), site)
    }

    pub async fn list(&self) -> Result<Vec<Article>, CorpusError> {
        self.store.load_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Article, CorpusError> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|a| a.id() == id)
            .ok_or_else(|| CorpusError::NotFound {
                site: self.site.clone(),
                id: id.to_string(),
            })
    }

    pub async fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Vec<Article>, CorpusError> {
        let articles = self.store.load_all().await?;
        Ok(search(&articles, keywords))
    }

    /// Replace the stored corpus with `articles`.
    pub async fn save(&self, articles: &[Article]) -> Result<(), CorpusError> {
        let _guard = self.write_lock.lock().await;
        self.store.save_all(articles).await
    }

    /// Add `articles` to the stored corpus, returning the new corpus size.
    pub async fn append(&self, articles: Vec<Article>) -> Result<usize, CorpusError> {
        let _guard = self.write_lock.lock().await;
        let mut stored = self.store.load_all().await?;
        debug!(stored = stored.len(), incoming = articles.len(), "appending to corpus");
        stored.extend(articles);
        self.store.save_all(&stored).await?;
        Ok(stored.len())
    }
}

/// Articles matching any keyword, case-insensitively.
///
/// A keyword matches when it equals the article id or site id, or occurs in
/// the title, content, site domain or site title. An article is listed once
/// per keyword it matches.
pub fn search<S: AsRef<str>>(articles: &[Article], keywords: &[S]) -> Vec<Article> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .collect();

    let mut found = Vec::new();
    for article in articles {
        for keyword in &keywords {
            if matches_keyword(article, keyword) {
                found.push(article.clone());
            }
        }
    }
    found
}

fn matches_keyword(article: &Article, keyword: &str) -> bool {
    article.id() == keyword
        || article.site_id() == keyword
        || [
            article.title(),
            article.content(),
            article.site_domain(),
            article.site_title(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(keyword))
}

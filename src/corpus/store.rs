use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::article::Article;
use crate::corpus::errors::CorpusError;

/// Whole-corpus persistence: every save replaces what was stored.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Article>, CorpusError>;
    async fn save_all(&self, articles: &[Article]) -> Result<(), CorpusError>;
}

/// Corpus kept as a JSON array in a single file.
///
/// A missing file reads as an empty corpus.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    site: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, site: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            site: site.into(),
        }
    }

    fn io_error(&self, op: &'static str, source: std::io::Error) -> CorpusError {
        CorpusError::Io {
            op,
            site: self.site.clone(),
            source,
        }
    }

    fn serde_error(&self, op: &'static str, source: serde_json::Error) -> CorpusError {
        CorpusError::Serde {
            op,
            site: self.site.clone(),
            source,
        }
    }
}

#[async_trait]
impl ArticleStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Article>, CorpusError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "corpus file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error("load read", e)),
        };
        serde_json::from_slice(&data).map_err(|e| self.serde_error("load unmarshal", e))
    }

    async fn save_all(&self, articles: &[Article]) -> Result<(), CorpusError> {
        info!("[{}] Storage ...", self.site);
        let data = serde_json::to_vec(articles).map_err(|e| self.serde_error("storage marshal", e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("storage mkdir", e))?;
        }
        fs::write(&self.path, data)
            .await
            .map_err(|e| self.io_error("storage write", e))?;

        info!("[{}] Storage Done.", self.site);
        Ok(())
    }
}

/// In-process store, handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<Article>>,
}

impl MemoryStore {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Article>, CorpusError> {
        Ok(self.articles.read().await.clone())
    }

    async fn save_all(&self, articles: &[Article]) -> Result<(), CorpusError> {
        *self.articles.write().await = articles.to_vec();
        Ok(())
    }
}

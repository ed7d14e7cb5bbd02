use thiserror::Error;

/// Corpus failures, prefixed with the operation and the site they ran for.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("[{site}] {op} error: {source}")]
    Io {
        op: &'static str,
        site: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[{site}] {op} error: {source}")]
    Serde {
        op: &'static str,
        site: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("[{site}] no article with id: {id}")]
    NotFound { site: String, id: String },
}

impl CorpusError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

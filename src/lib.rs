pub mod article;
pub mod config;
pub mod corpus;
pub mod extractor;
pub mod fetcher;

pub use article::{Advisory, Article, ArticlePipeline, FetchOutcome, PipelineError};
pub use config::{Config, SiteConfig};
pub use corpus::{Corpus, CorpusError};

pub mod assemble;
pub mod errors;
pub mod model;
pub mod pipeline;

pub use errors::PipelineError;
pub use model::{Article, article_id, sort_by_update_time};
pub use pipeline::{Advisory, ArticlePipeline, FetchOutcome};

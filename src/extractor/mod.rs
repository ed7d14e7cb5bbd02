pub mod content;
pub mod errors;
pub mod markup;
pub mod sanitize;
pub mod time;
pub mod title;

pub use content::extract_content;
pub use errors::ExtractError;
pub use markup::rewrite;
pub use time::{Freshness, PublishTime, extract_publish_time};
pub use title::extract_title;

pub mod client;
pub mod decode;
pub mod errors;
pub mod types;

pub use client::{HttpSource, PageSource, fetch, fetch_with_timeout};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};

#[cfg(test)]
pub use client::MockPageSource;

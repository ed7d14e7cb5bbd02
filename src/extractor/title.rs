use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::{
    errors::ExtractError,
    sanitize::{strip_illegal_chars, strip_noise},
};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").unwrap());

/// Text of the first `<title>` element with site noise and illegal
/// characters removed.
pub fn extract_title(document: &Html, noise: &[String]) -> Result<String, ExtractError> {
    let element = document
        .select(&TITLE_SELECTOR)
        .next()
        .ok_or(ExtractError::NoTitleElement)?;

    let raw = element.text().collect::<String>();
    let title = strip_noise(&raw, noise);
    Ok(strip_illegal_chars(title.trim()))
}

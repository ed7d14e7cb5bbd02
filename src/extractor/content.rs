use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::errors::ExtractError;

static DIV_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());

/// Render the `div` whose id is `content_id` back to markup.
///
/// When several elements carry the id, the last one in document order wins.
pub fn extract_content(document: &Html, content_id: &str) -> Result<String, ExtractError> {
    document
        .select(&DIV_SELECTOR)
        .filter(|element| element.value().id() == Some(content_id))
        .map(|element| element.html())
        .last()
        .ok_or_else(|| ExtractError::NoContentMatched(content_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_matched_container() {
        let doc = Html::parse_document(
            r#"<html><body><div id="nav">menu</div>
            <div id="contentDiv"><p>Body</p></div></body></html>"#,
        );
        let html = extract_content(&doc, "contentDiv").unwrap();
        assert_eq!(html, r#"<div id="contentDiv"><p>Body</p></div>"#);
    }

    #[test]
    fn last_matched_container_wins() {
        let doc = Html::parse_document(
            r#"<div id="contentDiv"><p>first</p></div><div id="contentDiv"><p>second</p></div>"#,
        );
        let html = extract_content(&doc, "contentDiv").unwrap();
        assert!(html.contains("second"));
        assert!(!html.contains("first"));
    }

    #[test]
    fn no_container_is_an_error() {
        let doc = Html::parse_document(r#"<section id="contentDiv">text</section>"#);
        let err = extract_content(&doc, "contentDiv").unwrap_err();
        assert!(matches!(err, ExtractError::NoContentMatched(id) if id == "contentDiv"));
    }
}

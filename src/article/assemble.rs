use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::article::model::Article;

/// Marker placed before the link back to the original page.
pub const SOURCE_LINK_LABEL: &str = "原文链接：";

const DISPLAY_OFFSET_SECS: i32 = 8 * 60 * 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
}

/// Compose the stored document around a rewritten body:
///
/// ```text
/// # <title>
///
/// LastUpdate: <time at UTC+8> @ [<site title>](/list/?v=<domain>): [<domain>](http://<domain>)
///
/// ---
/// <body>
///
/// 原文链接：[<source url>](<source url>)
/// ```
///
/// Formatting never fails; an unescapable source URL is shown raw with the
/// error appended.
pub fn assemble(article: &Article, body: &str) -> String {
    let source = source_link(article.source_url().as_str());
    format!(
        "# {title}\n\nLastUpdate: {updated} @ [{site}](/list/?v={domain}): [{domain}](http://{domain})\n\n---\n{body}\n\n{SOURCE_LINK_LABEL}[{source}]({source})",
        title = article.title(),
        updated = display_time(article.update_time()),
        site = article.site_title(),
        domain = article.site_domain(),
    )
}

/// RFC3339 at the fixed UTC+8 display offset.
pub fn display_time(time: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(DISPLAY_OFFSET_SECS) {
        Some(offset) => time
            .with_timezone(&offset)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        None => time.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// Unescaped source URL with any `?tmpl=` suffix cut off.
fn source_link(raw: &str) -> String {
    let unescaped = query_unescape(raw)
        .unwrap_or_else(|err| format!("{raw}\n\nunescape url error:\n{err}"));
    match unescaped.split_once("?tmpl=") {
        Some((head, _)) => head.to_string(),
        None => unescaped,
    }
}

/// Decode a query-escaped string: `+` becomes a space, `%XX` its byte.
pub fn query_unescape(raw: &str) -> Result<String, UnescapeError> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            let end = (i + 3).min(raw.len());
            return Err(UnescapeError::InvalidEscape(
                String::from_utf8_lossy(&bytes[i..end]).into_owned(),
            ));
        }
    }
    let spaced = raw.replace('+', " ");
    Ok(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::extractor::errors::ExtractError;

/// Layout of the date-time token embedded in article URLs.
pub const URL_TIME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Articles published before `now - STALE_AFTER_DAYS` are stale.
pub const STALE_AFTER_DAYS: i64 = 3;

// e.g. https://cn.nikkei.com/china/56789-2024-05-01-09-30-00.html?start=0
// The dot before `html` is unescaped and matches any character.
static URL_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+?/\d+-(.+?).html\?.+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Publish time of an article together with its staleness verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishTime {
    pub time: DateTime<Utc>,
    pub freshness: Freshness,
}

impl PublishTime {
    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }
}

/// Derive the publish time from the URL, judged against `now`.
///
/// A URL without the embedded token yields `now` itself. A token that is
/// present but malformed is an error.
pub fn extract_publish_time(url: &Url, now: DateTime<Utc>) -> Result<PublishTime, ExtractError> {
    let time = match URL_TIME_REGEX.captures(url.as_str()).and_then(|c| c.get(1)) {
        Some(token) => parse_token(token.as_str())?,
        None => now,
    };

    Ok(PublishTime {
        time,
        freshness: freshness(time, now),
    })
}

/// Stale when strictly earlier than `now` minus the staleness window.
pub fn freshness(time: DateTime<Utc>, now: DateTime<Utc>) -> Freshness {
    if time < now - TimeDelta::days(STALE_AFTER_DAYS) {
        Freshness::Stale
    } else {
        Freshness::Fresh
    }
}

fn parse_token(token: &str) -> Result<DateTime<Utc>, ExtractError> {
    NaiveDateTime::parse_from_str(token, URL_TIME_FORMAT)
        .map(|t| t.and_utc())
        .map_err(|source| ExtractError::TimeParse {
            token: token.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_token_from_url() {
        let url =
            Url::parse("https://cn.nikkei.com/china/56789-2024-05-01-09-30-00.html?start=0")
                .unwrap();
        let published = extract_publish_time(&url, now()).unwrap();
        assert_eq!(
            published.time,
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
        );
        assert!(!published.is_stale());
    }

    #[test]
    fn url_without_token_falls_back_to_now() {
        let url = Url::parse("https://cn.nikkei.com/china/about.html").unwrap();
        let published = extract_publish_time(&url, now()).unwrap();
        assert_eq!(published.time, now());
        assert_eq!(published.freshness, Freshness::Fresh);
    }

    #[test]
    fn url_without_query_does_not_match() {
        let url = Url::parse("https://cn.nikkei.com/china/1-2024-05-01-09-30-00.html").unwrap();
        assert_eq!(extract_publish_time(&url, now()).unwrap().time, now());
    }

    #[test]
    fn any_character_may_precede_html() {
        let url =
            Url::parse("https://cn.nikkei.com/china/56789-2024-05-01-09-30-00xhtml?start=0")
                .unwrap();
        let published = extract_publish_time(&url, now()).unwrap();
        assert_eq!(
            published.time,
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn malformed_token_is_an_error() {
        let url = Url::parse("https://cn.nikkei.com/china/56789-2024-13-45.html?start=0").unwrap();
        let err = extract_publish_time(&url, now()).unwrap_err();
        match err {
            ExtractError::TimeParse { token, .. } => assert_eq!(token, "2024-13-45"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn staleness_boundary_at_three_days() {
        let window = TimeDelta::days(3);
        let just_over = now() - window - TimeDelta::seconds(1);
        let just_under = now() - window + TimeDelta::seconds(1);

        assert_eq!(freshness(just_over, now()), Freshness::Stale);
        assert_eq!(freshness(just_under, now()), Freshness::Fresh);
        assert_eq!(freshness(now() - window, now()), Freshness::Fresh);
    }

    #[test]
    fn old_token_is_flagged_stale() {
        let url =
            Url::parse("https://cn.nikkei.com/china/1-2024-04-01-00-00-00.html?start=0").unwrap();
        let published = extract_publish_time(&url, now()).unwrap();
        assert!(published.is_stale());
    }
}

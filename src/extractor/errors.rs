use thiserror::Error;

/// Failures while pulling fields out of a retrieved page.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("there is no element <title>")]
    NoTitleElement,

    #[error("no article content matched: div#{0}")]
    NoContentMatched(String),

    /// A matched body node could not be serialized back to markup.
    #[error("node render to markup failed: {0}")]
    RenderFailed(String),

    #[error("cannot parse publish time {token:?} from url: {source}")]
    TimeParse {
        token: String,
        #[source]
        source: chrono::ParseError,
    },
}

use thiserror::Error;

/// Errors that can end a run
#[derive(Error, Debug)]
pub enum WatchError {
    /// A solicitation entry without the `no:name` separator
    #[error("malformed solicitation entry {0:?}: expected \"number:name\"")]
    Entry(String),

    /// The search page answered with something other than 200
    #[error("received HTTP {status} from {url}")]
    Upstream { status: u16, url: String },

    #[error("teaser {0} has no detail page link")]
    MissingLink(usize),

    #[error("webdriver error: {0}")]
    WebDriver(String),

    #[error("invalid selector {0:?}")]
    Selector(String),

    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Notify { status: u16, body: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<fantoccini::error::CmdError> for WatchError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        WatchError::WebDriver(e.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for WatchError {
    fn from(e: fantoccini::error::NewSessionError) -> Self {
        WatchError::WebDriver(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single HTTP exchange with the site.
///
/// At the catalog level this is fatal; at the channel level the caller logs
/// it and moves on.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(StatusCode),
    #[error("invalid json: {0}")]
    InvalidJson(#[source] reqwest::Error),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("response missing {0}")]
    Missing(&'static str),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidJson(err)
        } else {
            Self::Network(err)
        }
    }
}

/// Why one channel could not be turned into a [`super::ChannelRecord`].
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] ApiError),
    #[error("no `{0}` anywhere in the channel response")]
    FieldNotFound(&'static str),
}

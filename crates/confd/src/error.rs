//! Error types shared across the crate.

use thiserror::Error;

use crate::err_list::ErrDescription;

pub type Result<T> = std::result::Result<T, Error>;

/// Canonical error enum for confd calls.
///
/// `EmptyResponse` and `ReturnCode` are markers: the daemon answered, but
/// either the method is not exported (no result at all) or the call failed
/// with the bare-zero convention. With automatic error handling enabled the
/// connection replaces those markers with the first `err_list` entry when
/// one exists.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("decode failure: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-null `error` field in a response envelope.
    #[error("confd error: {0}")]
    Remote(String),

    /// The response carried no result, likely an unexported method.
    #[error("empty response")]
    EmptyResponse,

    /// The result was a bare `0`, check the error list.
    #[error("returned 0, check errors")]
    ReturnCode,

    /// Structured entry recovered from `err_list`.
    #[error("{0}")]
    Description(Box<ErrDescription>),
}

impl Error {
    pub(crate) fn worker_gone() -> Error {
        Error::Transport(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "connection worker is gone",
        ))
    }

    /// Whether this error is one of the two marker values that automatic
    /// error handling may resolve through `err_list`.
    pub fn is_marker(&self) -> bool {
        matches!(self, Error::EmptyResponse | Error::ReturnCode)
    }
}

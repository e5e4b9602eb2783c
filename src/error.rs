//! Error taxonomy for the search pipeline.
//!
//! Three terminal classes, matching how failures are surfaced to the user:
//! validation blocks the submission before any request is made, transport
//! covers network and decode failures, and application carries the server's
//! optional `detail` message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid search input; no request was made.
    #[error("{0}")]
    Validation(String),

    /// Network failure or a body that could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an error status, optionally carrying a
    /// `detail` field describing the rejection.
    #[error("server error: {}", detail.as_deref().unwrap_or("no detail provided"))]
    Application { detail: Option<String> },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_displays_detail() {
        let err = SearchError::Application {
            detail: Some("Invalid artist name: !!".to_string()),
        };
        assert_eq!(err.to_string(), "server error: Invalid artist name: !!");
    }

    #[test]
    fn application_error_without_detail_has_fallback() {
        let err = SearchError::Application { detail: None };
        assert_eq!(err.to_string(), "server error: no detail provided");
    }
}

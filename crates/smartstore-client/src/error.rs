//! Error types for the store API client.
//!
//! [`ClientError::Connectivity`] is kept apart from the other variants so
//! a dashboard can tell "the backend is not up" from "the backend said no".
//! The no-work answer of `decide` is a normal response and never an error.

/// Errors that can occur when talking to the store API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend could not be reached or did not answer in time.
    #[error("backend not reachable at {url}: {message}")]
    Connectivity {
        /// The URL that was requested.
        url: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{url} returned {status}: {message}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error text from the response body.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// The URL that was requested.
        url: String,
        /// Description of the decode failure.
        message: String,
    },

    /// The configured base URL is unusable.
    #[error("invalid backend URL {url}: {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// What was wrong with it.
        message: String,
    },
}

impl ClientError {
    /// Whether this is a transport failure rather than an answer.
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Classify a `reqwest` error raised while sending or reading.
    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                url: url.to_owned(),
                message: format!("{err}"),
            }
        } else if err.is_builder() {
            Self::InvalidUrl {
                url: url.to_owned(),
                message: format!("{err}"),
            }
        } else {
            Self::Connectivity {
                url: url.to_owned(),
                message: format!("{err}"),
            }
        }
    }
}

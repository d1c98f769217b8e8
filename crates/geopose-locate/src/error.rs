//! Error types for location lookups.

use std::fmt;

/// Result type for location lookups.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a location lookup can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No device position can be obtained.
    Unavailable {
        /// Why the position is unavailable.
        reason: String,
    },
    /// HTTP request failed.
    Http {
        /// The URL that failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// HTTP response had a non-success status code.
    HttpStatus {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The geocoding response could not be used.
    InvalidResponse {
        /// The URL that returned the response.
        url: String,
        /// Description of what was wrong.
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unavailable { reason } => write!(f, "position unavailable: {reason}"),
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::HttpStatus { url, status } => {
                write!(f, "http request to {url} returned status {status}")
            }
            Error::InvalidResponse { url, detail } => {
                write!(f, "invalid response from {url}: {detail}")
            }
        }
    }
}

impl std::error::Error for Error {}

//! Errors raised by the request pipeline.
//!
//! Only failures that prevent a response from being obtained are errors.
//! Non-2xx statuses, including a 429 left over after retries are exhausted,
//! come back as an ordinary [`HttpResponse`](super::HttpResponse).

use thiserror::Error;

/// Unified error type for pipeline failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport failed before a response arrived.
    ///
    /// Connection, DNS and TLS failures land here. They are never retried.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The request path or pagination link could not be turned into a URL.
    #[error("Invalid request path '{path}'")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// The client owning a record has been dropped.
    #[error("The client that loaded this record has been dropped")]
    ClientDropped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_message_includes_path() {
        let error = HttpError::InvalidPath {
            path: "orders.json".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid request path 'orders.json'");
    }

    #[test]
    fn test_http_error_implements_std_error() {
        let error: &dyn std::error::Error = &HttpError::ClientDropped;
        assert!(error.source().is_none());
    }
}

//! Error types for resource operations.
//!
//! The pipeline hands back any status it receives. Resource operations know
//! which status they expect (200, or 201 for creates and some updates) and
//! turn anything else into [`ResourceError::Status`], carrying the decoded
//! `errors` payload when the body has one.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::{ResourceError, RestResource};
//! use shopify_rest::rest::resources::Page;
//!
//! match Page::find(&client, 42).await {
//!     Ok(page) => println!("Found: {:?}", page.title),
//!     Err(ResourceError::Status { code: 404, .. }) => println!("No such page"),
//!     Err(ResourceError::Status { code, errors }) => println!("{code}: {errors}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse};

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server answered with an unexpected status and an `errors` payload.
    #[error("Status {code}: {errors}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The value of the `errors` key, in whatever shape the API sent.
        errors: Value,
    },

    /// The server answered with an unexpected status and a body that is not
    /// an `{"errors": ...}` object.
    #[error("Status {code}, and error parsing body: {source}")]
    UndecodableStatus {
        /// The HTTP status code.
        code: u16,
        /// Why the body could not be decoded.
        #[source]
        source: serde_json::Error,
    },

    /// A successful response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The record or parameters could not be serialized.
    #[error("Failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No path matches the operation with the IDs at hand.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "all", "delete").
        operation: &'static str,
    },

    /// `next_page` was called on a response without a next link.
    #[error("No next page")]
    NoNextPage,

    /// The request could not be completed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: Value,
}

impl ResourceError {
    /// Builds the error for a response whose status was not `expected`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_rest::clients::{ApiCallLimit, HttpResponse, PaginationInfo};
    /// use shopify_rest::rest::ResourceError;
    ///
    /// let response = HttpResponse {
    ///     code: 422,
    ///     body: br#"{"errors":{"title":["can't be blank"]}}"#.to_vec(),
    ///     pagination: PaginationInfo::default(),
    ///     api_call_limit: ApiCallLimit::default(),
    /// };
    ///
    /// let error = ResourceError::from_response(&response);
    /// assert!(matches!(error, ResourceError::Status { code: 422, .. }));
    /// ```
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        match serde_json::from_slice::<ErrorBody>(&response.body) {
            Ok(body) => Self::Status {
                code: response.code,
                errors: body.errors,
            },
            Err(source) => Self::UndecodableStatus {
                code: response.code,
                source,
            },
        }
    }

    /// Returns the HTTP status code for status errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } | Self::UndecodableStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Returns `Ok(())` if the response status is `expected`.
pub(crate) fn expect_status(response: &HttpResponse, expected: u16) -> Result<(), ResourceError> {
    if response.code == expected {
        Ok(())
    } else {
        Err(ResourceError::from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiCallLimit, PaginationInfo};
    use serde_json::json;

    fn response(code: u16, body: &[u8]) -> HttpResponse {
        HttpResponse {
            code,
            body: body.to_vec(),
            pagination: PaginationInfo::default(),
            api_call_limit: ApiCallLimit::default(),
        }
    }

    #[test]
    fn test_errors_payload_is_decoded() {
        let error = ResourceError::from_response(&response(
            422,
            br#"{"errors":{"title":["can't be blank"]}}"#,
        ));

        match error {
            ResourceError::Status { code, errors } => {
                assert_eq!(code, 422);
                assert_eq!(errors, json!({"title": ["can't be blank"]}));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_string_errors_payload_is_kept() {
        let error = ResourceError::from_response(&response(404, br#"{"errors":"Not Found"}"#));
        assert_eq!(error.to_string(), r#"Status 404: "Not Found""#);
    }

    #[test]
    fn test_undecodable_body_falls_back() {
        let error = ResourceError::from_response(&response(502, b"<html>Bad Gateway</html>"));
        assert!(matches!(
            error,
            ResourceError::UndecodableStatus { code: 502, .. }
        ));
        assert!(error.to_string().starts_with("Status 502, and error parsing body"));
        assert_eq!(error.status_code(), Some(502));
    }

    #[test]
    fn test_expect_status() {
        assert!(expect_status(&response(201, b"{}"), 201).is_ok());
        let error = expect_status(&response(200, b"{}"), 201).unwrap_err();
        assert_eq!(error.status_code(), Some(200));
    }

    #[test]
    fn test_http_error_converts() {
        let error: ResourceError = HttpError::ClientDropped.into();
        assert!(matches!(error, ResourceError::Http(HttpError::ClientDropped)));
        assert!(error.status_code().is_none());
    }
}

//! Response wrapper for resource operations.
//!
//! [`ResourceResponse<T>`] pairs decoded data with the pagination links and
//! call-limit counters of the response it came from. It derefs to `T`, so a
//! page of records can be iterated directly:
//!
//! ```rust,ignore
//! let page = Order::all(&client, None).await?;
//! for order in page.iter() {
//!     println!("{:?}", order.name);
//! }
//! if page.has_next_page() {
//!     let next = Order::next_page(&client, page.pagination()).await?;
//! }
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::clients::{ApiCallLimit, HttpResponse, PaginationInfo};
use crate::rest::ResourceError;

/// Decoded data plus response metadata.
///
/// # Example
///
/// ```rust
/// use shopify_rest::rest::ResourceResponse;
/// use shopify_rest::clients::{ApiCallLimit, PaginationInfo};
///
/// let response = ResourceResponse::new(
///     vec!["a", "b"],
///     PaginationInfo { previous: None, next: Some("https://x/a".to_string()) },
///     ApiCallLimit { calls_made: 1, call_limit: 40 },
/// );
///
/// assert_eq!(response.len(), 2);
/// assert!(response.has_next_page());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse<T> {
    data: T,
    pagination: PaginationInfo,
    rate_limit: ApiCallLimit,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse` with the given data and metadata.
    #[must_use]
    pub const fn new(data: T, pagination: PaginationInfo, rate_limit: ApiCallLimit) -> Self {
        Self {
            data,
            pagination,
            rate_limit,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns `true` if the response links to a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next_page()
    }

    /// Returns `true` if the response links to a previous page.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.pagination.has_previous_page()
    }

    /// Returns the pagination links.
    #[must_use]
    pub const fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    /// Returns the call-limit counters.
    #[must_use]
    pub const fn rate_limit(&self) -> &ApiCallLimit {
        &self.rate_limit
    }

    /// Transforms the inner data, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            pagination: self.pagination,
            rate_limit: self.rate_limit,
        }
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes the value under `key` of a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the body is not JSON, lacks
    /// `key`, or the value does not fit `T`.
    pub fn from_http_response(response: &HttpResponse, key: &str) -> Result<Self, ResourceError> {
        Ok(Self {
            data: decode_key(&response.body, key)?,
            pagination: response.pagination.clone(),
            rate_limit: response.api_call_limit,
        })
    }
}

/// Decodes `{"<key>": <T>}`.
pub(crate) fn decode_key<T: DeserializeOwned>(body: &[u8], key: &str) -> Result<T, ResourceError> {
    let mut value: Value = serde_json::from_slice(body).map_err(ResourceError::Decode)?;
    let inner = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| serde_json::Error::custom(format!("missing field `{key}`")))
        .map_err(ResourceError::Decode)?;
    serde_json::from_value(inner).map_err(ResourceError::Decode)
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    fn http_response(body: &str, link: &str) -> HttpResponse {
        HttpResponse {
            code: 200,
            body: body.as_bytes().to_vec(),
            pagination: PaginationInfo::parse_link_header(link),
            api_call_limit: ApiCallLimit::parse("3/40"),
        }
    }

    #[test]
    fn test_decodes_value_under_key_with_metadata() {
        let response = ResourceResponse::<Vec<Item>>::from_http_response(
            &http_response(
                r#"{"items":[{"id":1},{"id":2}]}"#,
                r#"<https://x/next>; rel="next""#,
            ),
            "items",
        )
        .unwrap();

        assert_eq!(response.len(), 2);
        assert_eq!(response[1], Item { id: 2 });
        assert!(response.has_next_page());
        assert!(!response.has_prev_page());
        assert_eq!(response.rate_limit().calls_made, 3);
    }

    #[test]
    fn test_missing_key_is_decode_error() {
        let result =
            ResourceResponse::<Item>::from_http_response(&http_response(r#"{"other":{}}"#, ""), "item");
        match result {
            Err(ResourceError::Decode(e)) => assert!(e.to_string().contains("missing field `item`")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let result = ResourceResponse::<Item>::from_http_response(&http_response("{not json", ""), "item");
        assert!(matches!(result, Err(ResourceError::Decode(_))));
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = ResourceResponse::new(
            vec![1, 2, 3],
            PaginationInfo {
                previous: Some("https://x/prev".to_string()),
                next: None,
            },
            ApiCallLimit::default(),
        );
        let mapped = response.map(|v| v.len());
        assert_eq!(*mapped, 3);
        assert!(mapped.has_prev_page());
    }

    #[test]
    fn test_deref_mut_allows_mutation() {
        let mut response =
            ResourceResponse::new(vec![1], PaginationInfo::default(), ApiCallLimit::default());
        response.push(2);
        assert_eq!(response.into_inner(), vec![1, 2]);
    }
}

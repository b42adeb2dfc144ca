//! Request types for the pipeline.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::clients::errors::HttpError;

/// HTTP methods used by the Admin REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A single logical request: endpoint, method, query parameters and body.
///
/// The body is held as bytes so the same request can be resent unchanged
/// when the server throttles it.
///
/// # Example
///
/// ```rust
/// use shopify_rest::clients::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = ApiRequest::builder(HttpMethod::Post, "/admin/api/2025-10/blogs.json")
///     .json(&json!({"blog": {"title": "News"}}))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(request.cache_key(), "/admin/api/2025-10/blogs.json:POST");
/// assert!(!request.is_cacheable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Absolute path on the shop host, e.g. `/admin/api/2025-10/orders.json`.
    pub endpoint: String,
    /// Query parameters appended to the URL.
    pub query: Option<HashMap<String, String>>,
    /// The raw request body.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, endpoint)
    }

    /// Shorthand for a GET without parameters or body.
    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            query: None,
            body: None,
        }
    }

    /// Returns the key under which responses to this request are cached.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.endpoint, self.method)
    }

    /// Returns `true` if query parameters are present.
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.query.as_ref().is_some_and(|q| !q.is_empty())
    }

    /// Returns `true` if the response to this request may be cached.
    ///
    /// Only requests without parameters and without a body qualify.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        !self.has_params() && self.body.is_none()
    }

    /// Checks the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if the endpoint is not an absolute
    /// path.
    pub fn verify(&self) -> Result<(), HttpError> {
        if self.endpoint.is_empty() || !self.endpoint.starts_with('/') {
            return Err(HttpError::InvalidPath {
                path: self.endpoint.clone(),
            });
        }
        Ok(())
    }
}

/// Builder for [`ApiRequest`].
#[derive(Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    endpoint: String,
    query: Option<HashMap<String, String>>,
    body: Option<Vec<u8>>,
}

impl ApiRequestBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: None,
            body: None,
        }
    }

    /// Sets all query parameters at once. An empty map is ignored.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if the endpoint is not an absolute
    /// path.
    pub fn build(self) -> Result<ApiRequest, HttpError> {
        let request = ApiRequest {
            method: self.method,
            endpoint: self.endpoint,
            query: self.query,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_names_are_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
    }

    #[test]
    fn test_cache_key_combines_endpoint_and_method() {
        let request = ApiRequest::get("/admin/api/2025-10/blogs.json");
        assert_eq!(request.cache_key(), "/admin/api/2025-10/blogs.json:GET");
        assert!(request.is_cacheable());
    }

    #[test]
    fn test_params_disable_caching() {
        let request = ApiRequest::builder(HttpMethod::Get, "/admin/api/2025-10/orders.json")
            .query_param("limit", "50")
            .build()
            .unwrap();
        assert!(request.has_params());
        assert!(!request.is_cacheable());
    }

    #[test]
    fn test_empty_query_map_is_ignored() {
        let request = ApiRequest::builder(HttpMethod::Get, "/admin/api/2025-10/orders.json")
            .query(HashMap::new())
            .build()
            .unwrap();
        assert!(request.query.is_none());
        assert!(request.is_cacheable());
    }

    #[test]
    fn test_body_disables_caching() {
        let request = ApiRequest::builder(HttpMethod::Get, "/admin/api/2025-10/orders.json")
            .json(&json!({"order": {}}))
            .unwrap()
            .build()
            .unwrap();
        assert!(!request.is_cacheable());
        assert_eq!(request.body.as_deref(), Some(br#"{"order":{}}"#.as_slice()));
    }

    #[test]
    fn test_relative_endpoint_is_rejected() {
        let result = ApiRequest::builder(HttpMethod::Get, "orders.json").build();
        assert!(matches!(result, Err(HttpError::InvalidPath { path }) if path == "orders.json"));

        assert!(ApiRequest::get("").verify().is_err());
    }
}

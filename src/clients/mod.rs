//! HTTP layer: the request pipeline and its building blocks.
//!
//! - [`HttpClient`]: the async pipeline every resource call goes through
//! - [`ApiRequest`] / [`HttpResponse`]: what goes in and what comes out
//! - [`PaginationInfo`] / [`ApiCallLimit`]: parsed `Link` and call-limit headers
//! - [`Backoff`]: delay policy for throttled requests
//! - [`RequestCache`] / [`MemoryCache`]: pluggable cache for plain GETs
//!
//! # Throttling
//!
//! A 429 response is retried up to the configured retry limit (3 by default),
//! sleeping for [`Backoff::duration`] between attempts. When the limit is
//! reached the 429 response is returned as-is. Every other status is returned
//! without retry, and transport failures surface immediately as
//! [`HttpError::Network`].

mod backoff;
mod cache;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use backoff::{Backoff, DEFAULT_FACTOR, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY};
pub use cache::{MemoryCache, RequestCache};
pub use errors::HttpError;
pub use http_client::{
    ClientRef, HttpClient, RateLimitState, ACCESS_TOKEN_HEADER, CALL_LIMIT_HEADER, SDK_VERSION,
};
pub use http_request::{ApiRequest, ApiRequestBuilder, HttpMethod};
pub use http_response::{ApiCallLimit, HttpResponse, PaginationInfo};

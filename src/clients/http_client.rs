//! The request pipeline.
//!
//! [`HttpClient::request`] is the single path every resource operation goes
//! through. It serves cached GETs, authenticates, sends, records the
//! call-limit header, retries throttled requests with backoff, parses the
//! `Link` header and populates the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, HOST, LINK, USER_AGENT};

use crate::clients::errors::HttpError;
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{ApiCallLimit, HttpResponse, PaginationInfo};
use crate::config::{ApiConfig, ApiVersion, Credentials, DEFAULT_RETRY_LIMIT};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Header carrying the `"calls/limit"` rate-limit counters.
pub const CALL_LIMIT_HEADER: &str = "X-Shopify-Shop-Api-Call-Limit";

const DEPRECATION_HEADER: &str = "X-Shopify-API-Deprecated-Reason";

/// Rate-limit bookkeeping updated by every response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimitState {
    /// Calls made in the current bucket, from the last response.
    pub calls_made: u32,
    /// Bucket size, from the last response or the configured default.
    pub call_limit: u32,
    /// Throttling retries used by the most recent request.
    pub retry_count: u32,
}

pub(crate) struct ClientInner {
    config: ApiConfig,
    transport: OnceCell<reqwest::Client>,
    api_version: OnceCell<ApiVersion>,
    state: Mutex<RateLimitState>,
}

impl ClientInner {
    fn state(&self) -> MutexGuard<'_, RateLimitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Async client for the Shopify Admin REST API.
///
/// Cloning is cheap and clones share the transport, the resolved API version
/// and the rate-limit bookkeeping. Records returned by resource operations
/// hold a [`ClientRef`] to the client that loaded them.
///
/// Rate-limit state is shared by every request made through the client; with
/// concurrent requests [`rate_limit_state`](Self::rate_limit_state) reflects
/// whichever response was recorded last.
///
/// # Example
///
/// ```rust,no_run
/// use shopify_rest::{AccessToken, ApiConfig, HttpClient, ShopDomain};
/// use shopify_rest::clients::ApiRequest;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig::builder()
///     .shop(ShopDomain::new("demo-3")?)
///     .access_token(AccessToken::new("shpat_123")?)
///     .build()?;
/// let client = HttpClient::new(config);
///
/// let endpoint = client.endpoint("blogs")?;
/// let response = client.request(ApiRequest::get(endpoint)).await?;
/// println!("{} {}", response.code, response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
    assert_send_sync::<ClientRef>();
};

impl HttpClient {
    /// Creates a client. No I/O happens until the first request.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport: OnceCell::new(),
                api_version: OnceCell::new(),
                state: Mutex::new(RateLimitState::default()),
            }),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Returns the API version, resolving it on first use.
    pub fn api_version(&self) -> &ApiVersion {
        self.inner
            .api_version
            .get_or_init(|| ApiVersion::resolve(self.inner.config.api_version()))
    }

    /// Returns a snapshot of the rate-limit bookkeeping.
    #[must_use]
    pub fn rate_limit_state(&self) -> RateLimitState {
        *self.inner.state()
    }

    /// Returns a non-owning handle to this client.
    #[must_use]
    pub fn downgrade(&self) -> ClientRef {
        ClientRef(Arc::downgrade(&self.inner))
    }

    /// Returns the origin every request is sent to.
    #[must_use]
    pub fn base_uri(&self) -> String {
        let config = &self.inner.config;
        config.api_host().map_or_else(
            || format!("https://{}", config.shop()),
            |host| host.origin().to_string(),
        )
    }

    /// Builds the versioned Admin API endpoint for a resource path.
    ///
    /// A leading `/` and a trailing `.json` are stripped before the path is
    /// placed under `/admin/api/<version>/` and suffixed with `.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if nothing is left of the path.
    pub fn endpoint(&self, path: &str) -> Result<String, HttpError> {
        let normalized = path.trim_start_matches('/');
        let normalized = normalized.strip_suffix(".json").unwrap_or(normalized);
        if normalized.is_empty() {
            return Err(HttpError::InvalidPath {
                path: path.to_string(),
            });
        }
        Ok(format!(
            "/admin/api/{}/{normalized}.json",
            self.api_version()
        ))
    }

    /// Fetches an absolute pagination link from a previous response.
    ///
    /// Only the path and query of `link` are used; the request goes to this
    /// client's origin like any other.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidPath`] if `link` is not an absolute URL,
    /// and otherwise the errors of [`request`](Self::request).
    pub async fn get_page(&self, link: &str) -> Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(link).map_err(|_| HttpError::InvalidPath {
            path: link.to_string(),
        })?;

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let mut request = ApiRequest::get(url.path());
        if !query.is_empty() {
            request.query = Some(query);
        }
        self.request(request).await
    }

    /// Sends a request through the pipeline.
    ///
    /// Any status, including a 429 that outlived its retries, comes back as
    /// an [`HttpResponse`]; interpreting it is up to the caller.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidPath`] if the request endpoint is not absolute
    /// - [`HttpError::Network`] if the transport fails (never retried)
    /// - [`HttpError::Body`] if the response body cannot be read
    pub async fn request(&self, request: ApiRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let config = &self.inner.config;
        let cache_key = request.cache_key();

        if let Some(cache) = config.cache().filter(|_| request.is_cacheable()) {
            if cache.contains(&cache_key) {
                if let Some(body) = cache.get(&cache_key).filter(|body| !body.is_empty()) {
                    tracing::debug!(key = %cache_key, "Serving response from cache");
                    return Ok(HttpResponse::from_cache(body));
                }
            }
        }

        let transport = self.transport()?;
        {
            let mut state = self.inner.state();
            if state.call_limit == 0 {
                state.call_limit = config.bucket_limit();
            }
            state.retry_count = 0;
        }
        let api_version = self.api_version();

        let url = format!("{}{}", self.base_uri(), request.endpoint);
        let retry_limit = config.retry_limit().unwrap_or(DEFAULT_RETRY_LIMIT);
        let mut retries: u32 = 0;

        loop {
            tracing::debug!(
                method = %request.method,
                endpoint = %request.endpoint,
                %api_version,
                attempt = retries + 1,
                "Sending Shopify API request"
            );

            let response = self
                .build_request(transport, &url, &request)
                .send()
                .await
                .map_err(HttpError::Network)?;

            let code = response.status().as_u16();
            let headers = response.headers();
            let pagination = headers
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .map(PaginationInfo::parse_link_header)
                .unwrap_or_default();
            let api_call_limit = headers
                .get(CALL_LIMIT_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(ApiCallLimit::parse)
                .unwrap_or_default();
            Self::log_deprecation(headers, &request);
            self.record_call_limit(api_call_limit);

            if code == 429 {
                if retries < retry_limit {
                    retries += 1;
                    self.inner.state().retry_count = retries;
                    let delay = config.backoff().duration(retries - 1);
                    tracing::debug!(
                        endpoint = %request.endpoint,
                        retry = retries,
                        retry_limit,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Throttled by Shopify, retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }

                if config.log_retry_failure() {
                    tracing::warn!(
                        shop = %config.shop(),
                        endpoint = %request.endpoint,
                        calls_made = api_call_limit.calls_made,
                        call_limit = api_call_limit.call_limit,
                        retries,
                        "Shopify throttling retries exhausted"
                    );
                }
            }

            let body = response.bytes().await.map_err(HttpError::Body)?.to_vec();

            if code == 200 && !body.is_empty() && request.is_cacheable() {
                if let Some(cache) = config.cache() {
                    cache.set(&cache_key, body.clone());
                }
            }

            return Ok(HttpResponse {
                code,
                body,
                pagination,
                api_call_limit,
            });
        }
    }

    fn transport(&self) -> Result<&reqwest::Client, HttpError> {
        self.inner.transport.get_or_try_init(|| {
            reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(HttpError::Network)
        })
    }

    fn build_request(
        &self,
        transport: &reqwest::Client,
        url: &str,
        request: &ApiRequest,
    ) -> reqwest::RequestBuilder {
        let config = &self.inner.config;
        let mut builder = transport
            .request(reqwest::Method::from(request.method), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent());

        if config.api_host().is_some() {
            builder = builder.header(HOST, config.shop().as_ref());
        }

        builder = match config.credentials() {
            Credentials::AccessToken(token) => builder.header(ACCESS_TOKEN_HEADER, token.as_ref()),
            Credentials::Basic {
                api_key,
                api_secret_key,
            } => builder.basic_auth(api_key.as_ref(), Some(api_secret_key.as_ref())),
        };

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        } else if matches!(request.method, HttpMethod::Post | HttpMethod::Put) {
            builder = builder.body(Vec::new());
        }

        builder
    }

    fn user_agent(&self) -> String {
        let prefix = self
            .inner
            .config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        format!("{prefix}Shopify REST Library v{SDK_VERSION} | Rust {rust_version}")
    }

    fn record_call_limit(&self, limit: ApiCallLimit) {
        let mut state = self.inner.state();
        state.calls_made = limit.calls_made;
        state.call_limit = limit.call_limit;
    }

    fn log_deprecation(headers: &HeaderMap, request: &ApiRequest) {
        if let Some(reason) = headers
            .get(DEPRECATION_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            tracing::warn!(
                endpoint = %request.endpoint,
                reason,
                "Deprecated request to Shopify API"
            );
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("shop", self.inner.config.shop())
            .field("api_version", &self.inner.api_version.get())
            .field("state", &*self.inner.state())
            .finish_non_exhaustive()
    }
}

/// A non-owning handle from a record back to the client that loaded it.
///
/// Records never keep the client alive. Once every [`HttpClient`] clone is
/// dropped, operations on the record fail with [`HttpError::ClientDropped`].
/// A record built by hand starts detached.
#[derive(Clone, Default)]
pub struct ClientRef(Weak<ClientInner>);

impl ClientRef {
    /// Returns the client if it is still alive.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientDropped`] if the record is detached or the
    /// client is gone.
    pub fn upgrade(&self) -> Result<HttpClient, HttpError> {
        self.0
            .upgrade()
            .map(|inner| HttpClient { inner })
            .ok_or(HttpError::ClientDropped)
    }

    /// Returns `true` if the client is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl std::fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClientRef")
            .field(&if self.is_attached() { "attached" } else { "detached" })
            .finish()
    }
}

// Records compare by field values alone.
impl PartialEq for ClientRef {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ClientRef {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, HostUrl, ShopDomain};

    fn client_with(builder: crate::config::ApiConfigBuilder) -> HttpClient {
        HttpClient::new(
            builder
                .shop(ShopDomain::new("demo-3").unwrap())
                .access_token(AccessToken::new("shpat_test").unwrap())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_base_uri_defaults_to_shop() {
        let client = client_with(ApiConfig::builder());
        assert_eq!(client.base_uri(), "https://demo-3.myshopify.com");
    }

    #[test]
    fn test_base_uri_uses_api_host_origin() {
        let client = client_with(
            ApiConfig::builder().api_host(HostUrl::new("http://127.0.0.1:9000/proxy").unwrap()),
        );
        assert_eq!(client.base_uri(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_endpoint_normalizes_paths() {
        let client = client_with(ApiConfig::builder().api_version("2025-07"));
        assert_eq!(
            client.endpoint("/blogs/241253187/articles.json").unwrap(),
            "/admin/api/2025-07/blogs/241253187/articles.json"
        );
        assert_eq!(
            client.endpoint("orders").unwrap(),
            "/admin/api/2025-07/orders.json"
        );
    }

    #[test]
    fn test_endpoint_rejects_empty_path() {
        let client = client_with(ApiConfig::builder());
        assert!(matches!(
            client.endpoint("/.json"),
            Err(HttpError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_api_version_defaults_to_latest() {
        let client = client_with(ApiConfig::builder());
        assert_eq!(client.api_version(), &ApiVersion::latest());
    }

    #[test]
    fn test_unknown_api_version_is_kept() {
        let client = client_with(ApiConfig::builder().api_version("2019-10"));
        assert_eq!(
            client.api_version(),
            &ApiVersion::Custom("2019-10".to_string())
        );
        assert_eq!(
            client.endpoint("pages").unwrap(),
            "/admin/api/2019-10/pages.json"
        );
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = client_with(ApiConfig::builder().user_agent_prefix("MyApp/1.0"));
        let user_agent = client.user_agent();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Shopify REST Library v"));
    }

    #[test]
    fn test_client_ref_does_not_keep_client_alive() {
        let client = client_with(ApiConfig::builder());
        let handle = client.downgrade();
        assert!(handle.is_attached());
        assert!(handle.upgrade().is_ok());

        drop(client);
        assert!(!handle.is_attached());
        assert!(matches!(handle.upgrade(), Err(HttpError::ClientDropped)));
    }

    #[test]
    fn test_default_client_ref_is_detached() {
        let handle = ClientRef::default();
        assert!(!handle.is_attached());
        assert_eq!(format!("{handle:?}"), r#"ClientRef("detached")"#);
    }

    #[test]
    fn test_initial_rate_limit_state_is_empty() {
        let client = client_with(ApiConfig::builder());
        assert_eq!(client.rate_limit_state(), RateLimitState::default());
    }
}

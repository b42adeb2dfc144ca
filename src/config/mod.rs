//! Client configuration.
//!
//! [`ApiConfig`] holds everything the request pipeline needs: the shop to
//! talk to, credentials, the API version, the throttling policy and an
//! optional response cache.
//!
//! # Example
//!
//! ```rust
//! use shopify_rest::{AccessToken, ApiConfig, ShopDomain};
//!
//! let config = ApiConfig::builder()
//!     .shop(ShopDomain::new("demo-3").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version("2025-07")
//!     .retry_limit(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "demo-3.myshopify.com");
//! assert_eq!(config.retry_limit(), Some(5));
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ApiKey, ApiSecretKey, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::clients::{Backoff, RequestCache};
use crate::error::ConfigError;
use std::fmt;
use std::sync::Arc;

/// Retry limit used for throttled requests when none is configured.
pub const DEFAULT_RETRY_LIMIT: u32 = 3;

/// Call-limit bucket size assumed before the first response reports one.
pub const DEFAULT_BUCKET_LIMIT: u32 = 40;

/// How requests authenticate against the shop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// A permanent access token, sent as `X-Shopify-Access-Token`.
    AccessToken(AccessToken),
    /// Private app key and password, sent as HTTP basic auth.
    Basic {
        /// The basic auth user.
        api_key: ApiKey,
        /// The basic auth password.
        api_secret_key: ApiSecretKey,
    },
}

/// Configuration for an [`HttpClient`](crate::HttpClient).
///
/// `ApiConfig` is cheap to clone; the cache, if any, is shared between clones.
#[derive(Clone)]
pub struct ApiConfig {
    shop: ShopDomain,
    credentials: Credentials,
    api_version: Option<String>,
    retry_limit: Option<u32>,
    log_retry_failure: bool,
    cache: Option<Arc<dyn RequestCache>>,
    backoff: Backoff,
    bucket_limit: u32,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the configured API version string, if any.
    ///
    /// The string is resolved lazily by the client; see [`ApiVersion::resolve`].
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Returns the configured retry limit for throttled requests.
    ///
    /// `None` means [`DEFAULT_RETRY_LIMIT`].
    #[must_use]
    pub const fn retry_limit(&self) -> Option<u32> {
        self.retry_limit
    }

    /// Returns whether exhausted retries are logged.
    #[must_use]
    pub const fn log_retry_failure(&self) -> bool {
        self.log_retry_failure
    }

    /// Returns the response cache, if configured.
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<dyn RequestCache>> {
        self.cache.as_ref()
    }

    /// Returns the backoff policy.
    #[must_use]
    pub const fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// Returns the initial call-limit bucket size.
    #[must_use]
    pub const fn bucket_limit(&self) -> u32 {
        self.bucket_limit
    }

    /// Returns the host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("shop", &self.shop)
            .field("credentials", &self.credentials)
            .field("api_version", &self.api_version)
            .field("retry_limit", &self.retry_limit)
            .field("log_retry_failure", &self.log_retry_failure)
            .field("cache", &self.cache.is_some())
            .field("backoff", &self.backoff)
            .field("bucket_limit", &self.bucket_limit)
            .field("api_host", &self.api_host)
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for [`ApiConfig`].
///
/// `shop` and credentials are required. Everything else defaults:
///
/// - `api_version`: unset, resolved to the latest stable release
/// - `retry_limit`: unset, treated as [`DEFAULT_RETRY_LIMIT`]
/// - `log_retry_failure`: `false`
/// - `cache`: none
/// - `backoff`: 100ms to 2s with jitter
/// - `bucket_limit`: [`DEFAULT_BUCKET_LIMIT`]
#[derive(Default)]
pub struct ApiConfigBuilder {
    shop: Option<ShopDomain>,
    credentials: Option<Credentials>,
    api_version: Option<String>,
    retry_limit: Option<u32>,
    log_retry_failure: bool,
    cache: Option<Arc<dyn RequestCache>>,
    backoff: Option<Backoff>,
    bucket_limit: Option<u32>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Authenticates with an access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.credentials = Some(Credentials::AccessToken(token));
        self
    }

    /// Authenticates with basic auth.
    #[must_use]
    pub fn basic_auth(mut self, api_key: ApiKey, api_secret_key: ApiSecretKey) -> Self {
        self.credentials = Some(Credentials::Basic {
            api_key,
            api_secret_key,
        });
        self
    }

    /// Sets the credentials directly.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the API version string, e.g. `"2025-07"`.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets how many times a throttled request is retried.
    #[must_use]
    pub const fn retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = Some(limit);
        self
    }

    /// Logs a warning when throttling retries are exhausted.
    #[must_use]
    pub const fn log_retry_failure(mut self, enabled: bool) -> Self {
        self.log_retry_failure = enabled;
        self
    }

    /// Sets a cache for plain GET responses.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn RequestCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the backoff policy for throttled requests.
    #[must_use]
    pub const fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Sets the call-limit bucket size assumed before any response.
    #[must_use]
    pub const fn bucket_limit(mut self, limit: u32) -> Self {
        self.bucket_limit = Some(limit);
        self
    }

    /// Sends requests to `host` instead of `https://<shop>`.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the shop or the
    /// credentials are missing, and [`ConfigError::InvalidBackoff`] if the
    /// backoff minimum exceeds its maximum.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let credentials = self
            .credentials
            .ok_or(ConfigError::MissingRequiredField {
                field: "credentials",
            })?;

        let backoff = self.backoff.unwrap_or_default();
        if backoff.min() > backoff.max() {
            return Err(ConfigError::InvalidBackoff {
                min_ms: backoff.min().as_millis(),
                max_ms: backoff.max().as_millis(),
            });
        }

        Ok(ApiConfig {
            shop,
            credentials,
            api_version: self.api_version,
            retry_limit: self.retry_limit,
            log_retry_failure: self.log_retry_failure,
            cache: self.cache,
            backoff,
            bucket_limit: self.bucket_limit.unwrap_or(DEFAULT_BUCKET_LIMIT),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

impl fmt::Debug for ApiConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfigBuilder")
            .field("shop", &self.shop)
            .field("credentials", &self.credentials)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MemoryCache;
    use std::time::Duration;

    fn shop() -> ShopDomain {
        ShopDomain::new("demo-3").unwrap()
    }

    fn token() -> AccessToken {
        AccessToken::new("shpat_test").unwrap()
    }

    #[test]
    fn test_builder_requires_shop() {
        let result = ApiConfigBuilder::new().access_token(token()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = ApiConfigBuilder::new().shop(shop()).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "credentials"
            })
        ));
    }

    #[test]
    fn test_builder_provides_defaults() {
        let config = ApiConfig::builder()
            .shop(shop())
            .access_token(token())
            .build()
            .unwrap();

        assert!(config.api_version().is_none());
        assert!(config.retry_limit().is_none());
        assert!(!config.log_retry_failure());
        assert!(config.cache().is_none());
        assert_eq!(config.backoff(), &Backoff::default());
        assert_eq!(config.bucket_limit(), DEFAULT_BUCKET_LIMIT);
        assert!(config.api_host().is_none());
    }

    #[test]
    fn test_basic_auth_credentials() {
        let config = ApiConfig::builder()
            .shop(shop())
            .basic_auth(
                ApiKey::new("key").unwrap(),
                ApiSecretKey::new("secret").unwrap(),
            )
            .build()
            .unwrap();

        match config.credentials() {
            Credentials::Basic {
                api_key,
                api_secret_key,
            } => {
                assert_eq!(api_key.as_ref(), "key");
                assert_eq!(api_secret_key.as_ref(), "secret");
            }
            Credentials::AccessToken(_) => panic!("expected basic credentials"),
        }
    }

    #[test]
    fn test_builder_rejects_inverted_backoff() {
        let result = ApiConfig::builder()
            .shop(shop())
            .access_token(token())
            .backoff(Backoff::new(Duration::from_secs(5), Duration::from_secs(1)))
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidBackoff {
                min_ms: 5000,
                max_ms: 1000
            })
        ));
    }

    #[test]
    fn test_debug_masks_token_and_hides_cache() {
        let config = ApiConfig::builder()
            .shop(shop())
            .access_token(AccessToken::new("shpat_secret").unwrap())
            .cache(Arc::new(MemoryCache::new()))
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ApiConfig"));
        assert!(debug_str.contains("cache: true"));
        assert!(!debug_str.contains("shpat_secret"));
    }
}

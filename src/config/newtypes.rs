//! Validated newtype wrappers for credentials and hosts.
//!
//! Each type checks its contents on construction, so an [`ApiConfig`](super::ApiConfig)
//! can never hold an empty token or a malformed shop domain.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declares a non-empty credential string.
///
/// `masked` credentials print as `Name(*****)` in `Debug` output.
macro_rules! credential {
    ($(#[$meta:meta])* $name:ident, $empty:ident, masked) => {
        credential!(@define $(#[$meta])* $name, $empty);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }
    };
    ($(#[$meta:meta])* $name:ident, $empty:ident, plain) => {
        credential!(@define $(#[$meta])* $name, $empty);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
    (@define $(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Wraps `value`, rejecting the empty string.
            ///
            /// # Errors
            ///
            #[doc = concat!("Returns [`ConfigError::", stringify!($empty), "`] for an empty value.")]
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ConfigError::$empty);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

credential!(
    /// A permanent store access token, sent as `X-Shopify-Access-Token`.
    ///
    /// ```rust
    /// use shopify_rest::AccessToken;
    ///
    /// let token = AccessToken::new("shpat_123").unwrap();
    /// assert_eq!(token.as_ref(), "shpat_123");
    /// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
    /// ```
    AccessToken,
    EmptyAccessToken,
    masked
);

credential!(
    /// Private app API key, the user half of basic auth.
    ApiKey,
    EmptyApiKey,
    plain
);

credential!(
    /// Private app password, the secret half of basic auth.
    ApiSecretKey,
    EmptyApiSecretKey,
    masked
);

/// A validated Shopify shop domain.
///
/// Short names are normalized to the full `shop.myshopify.com` form.
///
/// # Example
///
/// ```rust
/// use shopify_rest::ShopDomain;
///
/// let domain = ShopDomain::new("demo-3").unwrap();
/// assert_eq!(domain.as_ref(), "demo-3.myshopify.com");
/// assert_eq!(domain.shop_name(), "demo-3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Accepts `name` or `name.myshopify.com`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] for any other host, or a
    /// name that is not lowercase ASCII letters, digits and inner hyphens.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = domain.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix(Self::SUFFIX)
            .unwrap_or(&normalized);

        if !is_shop_name(name) {
            return Err(ConfigError::InvalidShopDomain { domain: raw });
        }

        Ok(Self {
            shop_name_end: name.len(),
            full_domain: format!("{name}{}", Self::SUFFIX),
        })
    }

    /// The part before `.myshopify.com`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }
}

fn is_shop_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated origin that replaces `https://<shop>` for every request.
///
/// Used when requests go through a proxy, or at a local mock server.
///
/// # Example
///
/// ```rust
/// use shopify_rest::HostUrl;
///
/// let url = HostUrl::new("http://127.0.0.1:8080/ignored").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), Some("127.0.0.1"));
/// assert_eq!(url.origin(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    authority_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidHostUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        let authority_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            authority_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Returns scheme, host and port, without any path.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.authority_end]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

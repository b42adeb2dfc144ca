//! Admin API version handling.
//!
//! The pipeline resolves the configured version string once per client:
//! nothing configured means [`ApiVersion::latest`], a known release is used
//! as-is, and anything else is still sent but logged as a warning.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version.
///
/// # Example
///
/// ```rust
/// use shopify_rest::ApiVersion;
///
/// let version: ApiVersion = "2025-07".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_07);
/// assert_eq!(ApiVersion::resolve(None), ApiVersion::latest());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2024-10.
    V2024_10,
    /// API version 2025-01.
    V2025_01,
    /// API version 2025-04.
    V2025_04,
    /// API version 2025-07.
    V2025_07,
    /// API version 2025-10.
    V2025_10,
    /// The unstable development version.
    Unstable,
    /// A version string outside the known set, sent verbatim.
    Custom(String),
}

impl ApiVersion {
    /// Returns the stable version used when none is configured.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns `true` for versions in the known set.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Resolves a configured version string.
    ///
    /// Unrecognized values are not rejected: a warning is logged and the
    /// value is used as a [`ApiVersion::Custom`] path segment.
    #[must_use]
    pub fn resolve(configured: Option<&str>) -> Self {
        let Some(raw) = configured.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::latest();
        };

        match raw.parse::<Self>() {
            Ok(version) if version.is_known() => version,
            _ => {
                tracing::warn!(
                    version = raw,
                    latest = %Self::latest(),
                    "Unrecognized Shopify API version, sending request anyway"
                );
                Self::Custom(raw.to_string())
            }
        }
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2024_10 => "2024-10",
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2024-10" => Ok(Self::V2024_10),
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_latest() {
        assert_eq!(ApiVersion::resolve(None), ApiVersion::V2025_10);
        assert_eq!(ApiVersion::resolve(Some("  ")), ApiVersion::V2025_10);
    }

    #[test]
    fn test_resolve_accepts_known_versions() {
        assert_eq!(ApiVersion::resolve(Some("2025-04")), ApiVersion::V2025_04);
        assert_eq!(ApiVersion::resolve(Some("unstable")), ApiVersion::Unstable);
    }

    #[test]
    fn test_resolve_keeps_unknown_versions() {
        assert_eq!(
            ApiVersion::resolve(Some("2019-04")),
            ApiVersion::Custom("2019-04".to_string())
        );
        assert_eq!(
            ApiVersion::resolve(Some("not-a-version")),
            ApiVersion::Custom("not-a-version".to_string())
        );
    }

    #[test]
    fn test_display_round_trips_parse() {
        for version in [
            ApiVersion::V2024_10,
            ApiVersion::V2025_01,
            ApiVersion::V2025_04,
            ApiVersion::V2025_07,
            ApiVersion::V2025_10,
            ApiVersion::Unstable,
        ] {
            assert_eq!(version.to_string().parse::<ApiVersion>().unwrap(), version);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("invalid".parse::<ApiVersion>().is_err());
        assert!("2024".parse::<ApiVersion>().is_err());
        assert!("2024-02".parse::<ApiVersion>().is_err());
        assert!("24-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_future_release_is_custom() {
        let version: ApiVersion = "2026-01".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2026-01".to_string()));
        assert!(!version.is_known());
    }
}

//! Shopify Admin API version selection.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version used to build request paths.
///
/// The catalog endpoints this crate reads have been stable across versions,
/// so the default stays at `2023-04`. Newer versions can be selected by
/// variant or parsed from a `YYYY-MM` string.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::ApiVersion;
///
/// assert_eq!(ApiVersion::default().to_string(), "2023-04");
///
/// let version: ApiVersion = "2024-10".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2024_10);
///
/// let version: ApiVersion = "2026-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::Custom("2026-01".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2023-04 (April 2023)
    #[default]
    V2023_04,
    /// API version 2023-10 (October 2023)
    V2023_10,
    /// API version 2024-04 (April 2024)
    V2024_04,
    /// API version 2024-10 (October 2024)
    V2024_10,
    /// API version 2025-04 (April 2025)
    V2025_04,
    /// API version 2025-10 (October 2025)
    V2025_10,
    /// Unstable API version for development and testing.
    Unstable,
    /// Any other well-formed `YYYY-MM` version.
    Custom(String),
}

impl ApiVersion {
    /// Returns the path prefix for Admin REST requests, e.g. `/admin/api/2023-04`.
    #[must_use]
    pub fn admin_base_path(&self) -> String {
        format!("/admin/api/{self}")
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };
        if year.len() != 4 || month.len() != 2 {
            return false;
        }
        if !year.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        month.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2023_04 => "2023-04",
            Self::V2023_10 => "2023-10",
            Self::V2024_04 => "2024-04",
            Self::V2024_10 => "2024-10",
            Self::V2025_04 => "2025-04",
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
            "2023-04" => Ok(Self::V2023_04),
            "2023-10" => Ok(Self::V2023_10),
            "2024-04" => Ok(Self::V2024_04),
            "2024-10" => Ok(Self::V2024_10),
            "2025-04" => Ok(Self::V2025_04),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

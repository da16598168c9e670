//! Validated newtype wrappers for credential values.
//!
//! Both types validate on construction. [`AccessToken`] additionally masks its
//! value in debug output so it cannot leak into logs.

use crate::error::ConfigError;
use reqwest::Url;
use std::fmt;

/// The base URL of a Shopify store, e.g. `https://my-store.myshopify.com`.
///
/// A bare host such as `my-store.myshopify.com` is normalized to `https://`.
/// Trailing slashes are stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::ShopUrl;
///
/// let url = ShopUrl::new("https://my-store.myshopify.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://my-store.myshopify.com");
///
/// let url = ShopUrl::new("my-store.myshopify.com").unwrap();
/// assert_eq!(url.as_ref(), "https://my-store.myshopify.com");
/// assert_eq!(url.host_name(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopUrl {
    url: String,
    host: String,
}

impl ShopUrl {
    /// Creates a new validated shop URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingShopUrl`] if the value is blank, or
    /// [`ConfigError::InvalidShopUrl`] if it is not an http(s) URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(ConfigError::MissingShopUrl);
        }

        let normalized = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let parsed = Url::parse(&normalized)
            .map_err(|_| ConfigError::InvalidShopUrl { url: url.clone() })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidShopUrl { url });
        }

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::InvalidShopUrl { url: url.clone() })?
            .to_string();

        Ok(Self {
            url: normalized,
            host,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host
    }
}

impl AsRef<str> for ShopUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ShopUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A Shopify Admin API access token.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::AccessToken;
///
/// let token = AccessToken::new("shpat_secret").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessToken`] if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

//! Configuration types for the catalog facade.
//!
//! # Overview
//!
//! - [`CatalogConfig`]: immutable settings shared by every catalog operation
//! - [`CatalogConfigBuilder`]: builder for [`CatalogConfig`]
//! - [`Credentials`]: the validated shop URL and access token pair
//! - [`ShopUrl`], [`AccessToken`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version used in request paths
//!
//! Credentials are resolved lazily. A config without a shop URL or token
//! builds fine; every operation that needs them fails with a
//! [`ConfigError`] before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use shopify_catalog::{ApiVersion, CatalogConfig};
//!
//! let config = CatalogConfig::builder()
//!     .shop_url("https://my-store.myshopify.com")
//!     .access_token("shpat_example")
//!     .api_version(ApiVersion::V2024_10)
//!     .build()
//!     .unwrap();
//!
//! let credentials = config.credentials().unwrap();
//! assert_eq!(credentials.shop_url.as_ref(), "https://my-store.myshopify.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ShopUrl};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Environment variable holding the store base URL.
pub const SHOP_URL_ENV: &str = "SHOPIFY_SHOP_URL";
/// Environment variable holding the Admin API access token.
pub const ACCESS_TOKEN_ENV: &str = "SHOPIFY_ACCESS_TOKEN";
/// Environment variable optionally overriding the API version.
pub const API_VERSION_ENV: &str = "SHOPIFY_API_VERSION";

/// A validated shop URL and access token, resolved from [`CatalogConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The store base URL.
    pub shop_url: ShopUrl,
    /// The Admin API access token.
    pub access_token: AccessToken,
}

/// Configuration for the catalog facade.
///
/// `CatalogConfig` is `Clone + Send + Sync` and is intended to be built once
/// at startup and shared read-only.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    shop_url: Option<String>,
    access_token: Option<String>,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    max_pages: Option<usize>,
}

impl CatalogConfig {
    /// Creates a new builder for constructing a `CatalogConfig`.
    #[must_use]
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::new()
    }

    /// Builds a configuration from `SHOPIFY_SHOP_URL`, `SHOPIFY_ACCESS_TOKEN`
    /// and the optional `SHOPIFY_API_VERSION`.
    ///
    /// Missing credentials are not an error here; they surface when an
    /// operation runs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if `SHOPIFY_API_VERSION` is
    /// set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] for a malformed version value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(shop_url) = lookup(SHOP_URL_ENV) {
            builder = builder.shop_url(shop_url);
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV) {
            builder = builder.access_token(token);
        }
        if let Some(version) = lookup(API_VERSION_ENV) {
            builder = builder.api_version(version.parse()?);
        }
        builder.build()
    }

    /// Resolves the credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingShopUrl`] or
    /// [`ConfigError::MissingAccessToken`] when either value is absent or
    /// blank, and [`ConfigError::InvalidShopUrl`] for an unusable URL. The
    /// shop URL is checked first, so a config missing both always reports the
    /// same error.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let shop_url = ShopUrl::new(self.shop_url.clone().unwrap_or_default())?;
        let access_token = AccessToken::new(self.access_token.clone().unwrap_or_default())?;
        Ok(Credentials {
            shop_url,
            access_token,
        })
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the pagination ceiling, if configured. `None` means unbounded.
    #[must_use]
    pub const fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }
}

// Verify CatalogConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogConfig>();
};

/// Builder for constructing [`CatalogConfig`] instances.
///
/// # Defaults
///
/// - `api_version`: `2023-04`
/// - `user_agent_prefix`: `None`
/// - `max_pages`: `None` (follow next links until Shopify stops sending them)
#[derive(Debug, Default)]
pub struct CatalogConfigBuilder {
    shop_url: Option<String>,
    access_token: Option<String>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    max_pages: Option<usize>,
}

impl CatalogConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store base URL.
    #[must_use]
    pub fn shop_url(mut self, url: impl Into<String>) -> Self {
        self.shop_url = Some(url.into());
        self
    }

    /// Sets the Admin API access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Caps how many listing pages a single walk may request.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Builds the [`CatalogConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageLimit`] if `max_pages` is zero.
    pub fn build(self) -> Result<CatalogConfig, ConfigError> {
        if let Some(0) = self.max_pages {
            return Err(ConfigError::InvalidPageLimit { max_pages: 0 });
        }

        Ok(CatalogConfig {
            shop_url: self.shop_url,
            access_token: self.access_token,
            api_version: self.api_version.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            max_pages: self.max_pages,
        })
    }
}

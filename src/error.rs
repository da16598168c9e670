//! Configuration error types for the catalog facade.
//!
//! Configuration is deliberately lenient at build time: a missing shop URL or
//! access token is only reported when an operation actually needs them. The
//! variants below are what those call-time checks produce.
//!
//! # Example
//!
//! ```rust
//! use shopify_catalog::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::MissingAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or resolving catalog configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The shop URL is not configured or is empty.
    #[error("Shopify credentials not configured: shop URL is missing. Set SHOPIFY_SHOP_URL or call `shop_url` on the builder.")]
    MissingShopUrl,

    /// The access token is not configured or is empty.
    #[error("Shopify credentials not configured: access token is missing. Set SHOPIFY_ACCESS_TOKEN or call `access_token` on the builder.")]
    MissingAccessToken,

    /// The shop URL is present but not a usable absolute URL.
    #[error("Invalid shop URL '{url}'. Expected an absolute URL such as 'https://my-store.myshopify.com'.")]
    InvalidShopUrl {
        /// The URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2023-04') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// The page ceiling must allow at least one page.
    #[error("Invalid page limit {max_pages}. A pagination ceiling must be at least 1.")]
    InvalidPageLimit {
        /// The rejected ceiling.
        max_pages: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_messages_name_the_env_var() {
        assert!(ConfigError::MissingShopUrl
            .to_string()
            .contains("SHOPIFY_SHOP_URL"));
        assert!(ConfigError::MissingAccessToken
            .to_string()
            .contains("SHOPIFY_ACCESS_TOKEN"));
    }

    #[test]
    fn test_invalid_shop_url_error_message() {
        let error = ConfigError::InvalidShopUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("absolute URL"));
    }

    #[test]
    fn test_invalid_page_limit_error_message() {
        let error = ConfigError::InvalidPageLimit { max_pages: 0 };
        assert!(error.to_string().contains("at least 1"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingShopUrl;
        let _: &dyn std::error::Error = &error;
    }
}

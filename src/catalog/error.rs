//! Error types for catalog operations.
//!
//! Every public operation fails with a [`CatalogError`], whose variant tells
//! the caller which class of failure happened:
//!
//! - [`CatalogError::Configuration`]: credentials missing, nothing was sent
//! - [`CatalogError::Upstream`]: Shopify answered with a non-2xx status
//! - [`CatalogError::MalformedUpstreamData`]: a 2xx payload failed validation
//! - [`CatalogError::Resolution`]: a URL or handle did not map to a product
//! - [`CatalogError::Transport`]: the request never got an answer
//! - [`CatalogError::PageLimitExceeded`]: the configured page ceiling was hit
//!
//! # Example
//!
//! ```rust,ignore
//! match service.product_by_url(url).await {
//!     Ok(product) => println!("{}", product.title),
//!     Err(CatalogError::Upstream { status, message, .. }) => {
//!         println!("Shopify said {status}: {message}");
//!     }
//!     Err(err) => println!("{} -> HTTP {}", err, err.status_code()),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError};
use crate::error::ConfigError;

/// Reasons a URL or handle could not be turned into a product id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No rule extracted an identifier or handle from the input.
    #[error("Could not extract a product ID or handle from URL '{input}'")]
    NoIdentifier {
        /// The URL that was provided.
        input: String,
    },

    /// The handle lookup returned no products.
    #[error("No product found with handle '{handle}'")]
    HandleNotFound {
        /// The handle that was looked up.
        handle: String,
    },
}

/// Error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required configuration is missing or invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Shopify returned a non-success status.
    #[error("{message} (status {status})")]
    Upstream {
        /// The upstream status code, forwarded verbatim.
        status: u16,
        /// Fixed message naming the endpoint that failed.
        message: &'static str,
        /// The `X-Request-Id` of the failed response, if any.
        request_id: Option<String>,
    },

    /// A successful response did not match the expected shape.
    #[error("Malformed data from Shopify in {context}: {reason}")]
    MalformedUpstreamData {
        /// What was being read (e.g. "product 42" or "inventory levels").
        context: String,
        /// Why validation failed.
        reason: String,
    },

    /// The input could not be mapped to a product identifier.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The request failed before a response arrived.
    #[error("Failed to reach Shopify: {0}")]
    Transport(#[source] reqwest::Error),

    /// The listing kept supplying next links past the configured ceiling.
    #[error("Pagination stopped after {max_pages} pages; Shopify is still supplying next links")]
    PageLimitExceeded {
        /// The configured ceiling.
        max_pages: usize,
    },
}

impl CatalogError {
    /// Maps an [`HttpError`] from one endpoint into a catalog error.
    ///
    /// Non-2xx responses become [`CatalogError::Upstream`] carrying `message`;
    /// undecodable bodies become [`CatalogError::MalformedUpstreamData`].
    #[must_use]
    pub fn from_http(error: HttpError, message: &'static str) -> Self {
        match error {
            HttpError::Response(e) => Self::Upstream {
                status: e.code,
                message,
                request_id: e.error_reference,
            },
            HttpError::Decode { path, source } => Self::MalformedUpstreamData {
                context: path,
                reason: source.to_string(),
            },
            HttpError::InvalidRequest(InvalidHttpRequestError::InvalidUrl { url }) => {
                Self::MalformedUpstreamData {
                    context: "next page link".to_string(),
                    reason: format!("'{url}' is not a valid URL"),
                }
            }
            HttpError::InvalidRequest(e) => Self::MalformedUpstreamData {
                context: "request".to_string(),
                reason: e.to_string(),
            },
            HttpError::Network(e) => Self::Transport(e),
        }
    }

    /// Builds a [`CatalogError::MalformedUpstreamData`].
    #[must_use]
    pub fn malformed(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedUpstreamData {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the HTTP status a request-handling layer should answer with.
    ///
    /// - configuration: 500
    /// - upstream: the upstream status, verbatim
    /// - resolution: 400
    /// - malformed data, transport, page limit: 502
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Configuration(_) => 500,
            Self::Upstream { status, .. } => *status,
            Self::Resolution(_) => 400,
            Self::MalformedUpstreamData { .. }
            | Self::Transport(_)
            | Self::PageLimitExceeded { .. } => 502,
        }
    }

    /// Returns `true` if the failure was caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_upstream_status_is_forwarded_verbatim() {
        let error = CatalogError::from_http(
            HttpError::Response(HttpResponseError {
                code: 404,
                message: r#"{"errors":"Not Found"}"#.to_string(),
                error_reference: Some("req-1".to_string()),
            }),
            "Failed to fetch products from Shopify",
        );

        match &error {
            CatalogError::Upstream {
                status,
                message,
                request_id,
            } => {
                assert_eq!(*status, 404);
                assert_eq!(*message, "Failed to fetch products from Shopify");
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
        assert_eq!(error.status_code(), 404);
        assert_eq!(
            error.to_string(),
            "Failed to fetch products from Shopify (status 404)"
        );
    }

    #[test]
    fn test_decode_error_becomes_malformed_data() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = CatalogError::from_http(
            HttpError::Decode {
                path: "products.json".to_string(),
                source,
            },
            "Failed to fetch products from Shopify",
        );
        assert!(matches!(
            error,
            CatalogError::MalformedUpstreamData { ref context, .. } if context == "products.json"
        ));
        assert_eq!(error.status_code(), 502);
    }

    #[test]
    fn test_invalid_next_link_becomes_malformed_data() {
        let error = CatalogError::from_http(
            HttpError::InvalidRequest(InvalidHttpRequestError::InvalidUrl {
                url: "page_info=abc".to_string(),
            }),
            "Failed to fetch products from Shopify",
        );
        assert!(matches!(error, CatalogError::MalformedUpstreamData { .. }));
    }

    #[test]
    fn test_status_code_per_class() {
        assert_eq!(
            CatalogError::from(ConfigError::MissingShopUrl).status_code(),
            500
        );
        assert_eq!(
            CatalogError::from(ResolutionError::NoIdentifier {
                input: "https://example.com".to_string()
            })
            .status_code(),
            400
        );
        assert_eq!(
            CatalogError::PageLimitExceeded { max_pages: 3 }.status_code(),
            502
        );
        assert_eq!(CatalogError::malformed("product 1", "bad").status_code(), 502);
    }

    #[test]
    fn test_only_resolution_is_client_error() {
        assert!(CatalogError::from(ResolutionError::HandleNotFound {
            handle: "x".to_string()
        })
        .is_client_error());
        assert!(!CatalogError::from(ConfigError::MissingAccessToken).is_client_error());
    }

    #[test]
    fn test_resolution_messages() {
        let error = ResolutionError::HandleNotFound {
            handle: "blue-denim-jacket".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No product found with handle 'blue-denim-jacket'"
        );
    }
}

//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: non-2xx responses from Shopify
//! - [`InvalidHttpRequestError`]: a request that fails validation before sending
//! - [`HttpError`]: unified error for everything the transport layer can report
//!
//! Nothing at this layer is retried. The catalog layer maps these into
//! [`CatalogError`](crate::catalog::CatalogError) classes.

use thiserror::Error;

/// Error returned when Shopify answers with a non-successful status.
///
/// The message is a JSON serialization of whatever `errors` / `error` fields
/// the response carried, plus an error reference when `X-Request-Id` was set.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"errors":"Not Found"}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.code, 404);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A relative request path was empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// An absolute request URL (such as a next-page link) did not parse.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A successful response whose body was not valid JSON.
    #[error("Response body from {path} is not valid JSON: {source}")]
    Decode {
        /// The request path or URL.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

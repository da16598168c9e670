//! HTTP request types.
//!
//! The catalog facade is read-only, so every request is a GET. A request
//! either names a path relative to the Admin API base path, or carries an
//! absolute URL handed back by Shopify (the `rel="next"` page link).

use reqwest::Url;

use crate::clients::errors::InvalidHttpRequestError;

/// Where a request is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestTarget {
    /// A path relative to the client's base path, e.g. `products.json`.
    Path(String),
    /// An absolute URL supplied by the server, used verbatim.
    Url(String),
}

/// A GET request to be sent to the Shopify Admin API.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::clients::{HttpRequest, RequestTarget};
///
/// let request = HttpRequest::builder("inventory_levels.json")
///     .query_param("inventory_item_ids", "1,2,3")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.target, RequestTarget::Path("inventory_levels.json".to_string()));
/// assert_eq!(request.query, vec![("inventory_item_ids".to_string(), "1,2,3".to_string())]);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Where to send the request.
    pub target: RequestTarget,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a new builder for a request relative to the base path.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(RequestTarget::Path(path.into()))
    }

    /// Creates a request for an absolute URL, such as a next-page link.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the URL does not parse.
    pub fn follow(url: impl Into<String>) -> Result<Self, InvalidHttpRequestError> {
        HttpRequestBuilder::new(RequestTarget::Url(url.into())).build()
    }

    /// Returns a short description of the target for logs and errors.
    #[must_use]
    pub fn describe(&self) -> &str {
        match &self.target {
            RequestTarget::Path(path) | RequestTarget::Url(path) => path,
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is empty or the
    /// absolute URL does not parse.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match &self.target {
            RequestTarget::Path(path) if path.trim_matches('/').is_empty() => {
                Err(InvalidHttpRequestError::EmptyPath)
            }
            RequestTarget::Url(url) if Url::parse(url).is_err() => {
                Err(InvalidHttpRequestError::InvalidUrl { url: url.clone() })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    target: RequestTarget,
    query: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    const fn new(target: RequestTarget) -> Self {
        Self {
            target,
            query: Vec::new(),
        }
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            target: self.target,
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}

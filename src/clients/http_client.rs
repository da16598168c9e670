//! HTTP client for Shopify Admin API communication.
//!
//! [`HttpClient`] binds one set of [`Credentials`] to a base path and sends
//! authenticated GET requests. The underlying `reqwest::Client` (connection
//! pool, TLS) is passed in so a whole process can share one transport while
//! each call builds its own `HttpClient`.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpRequest, RequestTarget};
use crate::clients::http_response::HttpResponse;
use crate::config::{CatalogConfig, Credentials};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP client for making requests to the Shopify Admin API.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::clients::HttpClient;
/// use shopify_catalog::CatalogConfig;
///
/// let config = CatalogConfig::builder()
///     .shop_url("https://my-store.myshopify.com")
///     .access_token("shpat_example")
///     .build()
///     .unwrap();
/// let credentials = config.credentials().unwrap();
///
/// let client = HttpClient::new(
///     "/admin/api/2023-04",
///     &credentials,
///     &config,
///     reqwest::Client::new(),
/// );
/// assert_eq!(client.base_uri(), "https://my-store.myshopify.com");
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The shared reqwest transport.
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., "/admin/api/2023-04").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client bound to the given credentials.
    #[must_use]
    pub fn new(
        base_path: impl Into<String>,
        credentials: &Credentials,
        config: &CatalogConfig,
        transport: reqwest::Client,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Shopify Catalog Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(
            ACCESS_TOKEN_HEADER.to_string(),
            credentials.access_token.as_ref().to_string(),
        );

        Self {
            client: transport,
            base_uri: credentials.shop_url.as_ref().to_string(),
            base_path: base_path.into(),
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL a request will be sent to, without query parameters.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        match &request.target {
            RequestTarget::Path(path) => format!(
                "{}{}/{}",
                self.base_uri,
                self.base_path,
                path.trim_start_matches('/')
            ),
            RequestTarget::Url(url) => url.clone(),
        }
    }

    /// Sends a GET request. Exactly one attempt is made.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx body is not JSON (`Decode`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        tracing::debug!("GET {}", request.describe());

        let mut req_builder = self.client.get(&url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        if !(200..=299).contains(&code) {
            let body = serde_json::from_str(&body_text).unwrap_or_else(|_| serde_json::json!({}));
            let response = HttpResponse::new(code, res_headers, body);
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: Self::serialize_error(&response),
                error_reference: response.request_id().map(String::from),
            }));
        }

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).map_err(|source| HttpError::Decode {
                path: request.describe().to_string(),
                source,
            })?
        };

        let response = HttpResponse::new(code, res_headers, body);

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.describe(),
                reason
            );
        }

        if let Some(limit) = response.api_call_limit {
            tracing::debug!(
                "Shopify API call limit {}/{}",
                limit.request_count,
                limit.bucket_size
            );
        }

        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes the error fields of a response body to JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = response.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

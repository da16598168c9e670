//! HTTP response types.
//!
//! [`HttpResponse`] carries the parsed JSON body plus the Shopify headers the
//! catalog pipeline cares about: the `Link` header (next page), the call-limit
//! header, `X-Request-Id`, and the deprecation notice.

use std::collections::HashMap;

/// Rate limit information parsed from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header format is "X/Y" where X is the current request count and Y is
/// the bucket size.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("40/80").unwrap();
/// assert_eq!(limit.request_count, 40);
/// assert_eq!(limit.bucket_size, 80);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// The current number of requests made in this bucket.
    pub request_count: u32,
    /// The maximum number of requests allowed in this bucket.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses the rate limit header value. Returns `None` for anything but "X/Y".
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (count, size) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: count.parse().ok()?,
            bucket_size: size.parse().ok()?,
        })
    }
}

/// Page links parsed from the `Link` header.
///
/// Shopify hands out full URLs for adjacent pages; they are kept verbatim so
/// the next request goes exactly where the server pointed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// URL of the next page, if any.
    pub next: Option<String>,
}

impl PageLinks {
    /// Parses a Link header value of the form
    /// `<url>; rel="next", <url>; rel="previous"`.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for link in header_value.split(',') {
            let mut parts = link.split(';').map(str::trim);

            let url = parts
                .next()
                .and_then(|s| s.strip_prefix('<'))
                .and_then(|s| s.strip_suffix('>'))
                .filter(|s| !s.is_empty());

            let rel = parts.find_map(|part| {
                part.strip_prefix("rel=")
                    .map(|value| value.trim_matches('"'))
            });

            if let (Some(url), Some(rel)) = (url, rel) {
                match rel {
                    "previous" => result.previous = Some(url.to_string()),
                    "next" => result.next = Some(url.to_string()),
                    _ => {}
                }
            }
        }

        result
    }
}

/// An HTTP response from the Shopify API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased names (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Previous/next page links (from the Link header).
    pub links: PageLinks,
    /// Rate limit information (from `X-Shopify-Shop-Api-Call-Limit`).
    pub api_call_limit: Option<ApiCallLimit>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the Link and call-limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let links = headers
            .get("link")
            .map(|values| PageLinks::parse_link_header(&values.join(", ")))
            .unwrap_or_default();

        let api_call_limit = headers
            .get("x-shopify-shop-api-call-limit")
            .and_then(|values| values.first())
            .and_then(|value| ApiCallLimit::parse(value));

        Self {
            code,
            headers,
            body,
            links,
            api_call_limit,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the next page URL, if Shopify supplied one.
    #[must_use]
    pub fn next_page_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

//! HTTP client types for Shopify Admin API communication.
//!
//! This is the transport layer underneath the catalog pipeline. It knows how
//! to authenticate, build URLs, and read Shopify's response headers; it knows
//! nothing about products or inventory.
//!
//! # Overview
//!
//! - [`HttpClient`]: sends authenticated GET requests
//! - [`HttpRequest`]: a relative path or absolute next-page URL plus query
//! - [`HttpResponse`]: parsed JSON body, page links, call limit, request id
//! - [`HttpError`]: everything that can go wrong at this layer
//!
//! # Retry Behavior
//!
//! None. A failed request is reported once, to the caller.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, ACCESS_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder, RequestTarget};
pub use http_response::{ApiCallLimit, HttpResponse, PageLinks};

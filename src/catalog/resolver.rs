//! Storefront URL to product id resolution.
//!
//! Extraction runs an ordered rule table over the input; the first rule that
//! matches wins:
//!
//! 1. `/products/<digits>`
//! 2. `/products/<handle>/<digits>` (the trailing number)
//! 3. a `variant=<digits>` query parameter
//! 4. `/product/<digits>`
//! 5. `/products/<handle>`, resolved by looking the handle up in Shopify
//!
//! Only the last rule costs a request.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{CatalogError, ResolutionError};
use super::source::CatalogSource;

/// What a URL rule pulled out of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// A numeric product id, usable directly.
    ProductId(u64),
    /// A product handle that still needs a lookup.
    Handle(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Capture {
    ProductId,
    Handle,
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    capture: Capture,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, capture: Capture) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            capture,
        }
    }

    fn apply(&self, input: &str) -> Option<Extraction> {
        let value = self.pattern.captures(input)?.get(1)?.as_str();
        match self.capture {
            Capture::ProductId => value.parse().ok().map(Extraction::ProductId),
            // Storefront links percent-encode non-ASCII handles; invalid
            // UTF-8 is kept as captured.
            Capture::Handle => Some(Extraction::Handle(
                urlencoding::decode(value).map_or_else(|_| value.to_string(), Cow::into_owned),
            )),
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "product path id",
            r"/products/(\d+)(?:[/?#]|$)",
            Capture::ProductId,
        ),
        Rule::new(
            "handle with trailing id",
            r"/products/[^/?#]+/(\d+)(?:[/?#]|$)",
            Capture::ProductId,
        ),
        Rule::new(
            "variant query parameter",
            r"[?&]variant=(\d+)(?:[&#]|$)",
            Capture::ProductId,
        ),
        Rule::new(
            "singular product path id",
            r"/product/(\d+)(?:[/?#]|$)",
            Capture::ProductId,
        ),
        Rule::new("product handle", r"/products/([^/?#]+)", Capture::Handle),
    ]
});

/// Pulls a product id or handle out of a URL without touching the network.
///
/// # Errors
///
/// Returns [`ResolutionError::NoIdentifier`] if no rule matches.
///
/// # Example
///
/// ```rust
/// use shopify_catalog::catalog::{extract, Extraction};
///
/// assert_eq!(
///     extract("https://shop.example.com/products/8675309").unwrap(),
///     Extraction::ProductId(8675309)
/// );
/// assert_eq!(
///     extract("https://shop.example.com/products/blue-denim-jacket").unwrap(),
///     Extraction::Handle("blue-denim-jacket".to_string())
/// );
/// ```
pub fn extract(url: &str) -> Result<Extraction, ResolutionError> {
    let input = url.trim();
    RULES
        .iter()
        .find_map(|rule| {
            rule.apply(input).inspect(|_| {
                tracing::debug!("URL '{}' matched rule '{}'", input, rule.name);
            })
        })
        .ok_or_else(|| ResolutionError::NoIdentifier {
            input: input.to_string(),
        })
}

/// Resolves storefront URLs to product ids, looking handles up when needed.
#[derive(Debug)]
pub struct UrlResolver<'a, S> {
    source: &'a S,
}

impl<'a, S: CatalogSource> UrlResolver<'a, S> {
    /// Creates a resolver that looks handles up through `source`.
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolves `url` to a product id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Resolution`] if nothing could be extracted or
    /// the handle matches no product, and propagates any error from the handle
    /// lookup request.
    pub async fn resolve(&self, url: &str) -> Result<u64, CatalogError> {
        match extract(url)? {
            Extraction::ProductId(id) => Ok(id),
            Extraction::Handle(handle) => self
                .source
                .find_product_id_by_handle(&handle)
                .await?
                .ok_or_else(|| ResolutionError::HandleNotFound { handle }.into()),
        }
    }
}

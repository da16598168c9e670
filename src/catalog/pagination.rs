//! Link-header pagination over the product listing.
//!
//! [`PaginationWalker`] requests `products.json`, then follows each
//! `rel="next"` URL Shopify hands back, verbatim, until none is supplied. The
//! walk is lazy: nothing is sent until a page is asked for. It is also
//! single-use; once it ends (or fails) it yields nothing more.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use shopify_catalog::{CatalogConfig, PaginationWalker, RemoteCatalogClient};
//!
//! # async fn example() -> Result<(), shopify_catalog::CatalogError> {
//! let config = CatalogConfig::from_env()?;
//! let client = RemoteCatalogClient::new(config.clone())?;
//!
//! let titles: Vec<String> = PaginationWalker::new(&client, config.max_pages())
//!     .into_stream()
//!     .map_ok(|raw| raw.as_value()["title"].to_string())
//!     .try_collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, Stream, TryStreamExt};

use super::error::CatalogError;
use super::model::RawProduct;
use super::source::{CatalogSource, ProductPage};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Cursor {
    First,
    Next(String),
    Done,
}

/// Walks every page of the product listing in cursor order.
#[derive(Debug)]
pub struct PaginationWalker<'a, S> {
    source: &'a S,
    cursor: Cursor,
    pages_fetched: usize,
    max_pages: Option<usize>,
}

impl<'a, S: CatalogSource> PaginationWalker<'a, S> {
    /// Creates a walker. `max_pages` of `None` follows next links for as long
    /// as Shopify supplies them.
    #[must_use]
    pub const fn new(source: &'a S, max_pages: Option<usize>) -> Self {
        Self {
            source,
            cursor: Cursor::First,
            pages_fetched: 0,
            max_pages,
        }
    }

    /// Returns how many pages have been requested so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns `true` once the walk has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Fetches the next page, or `None` when the listing is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any [`CatalogError`] from the listing request, and returns
    /// [`CatalogError::PageLimitExceeded`] when a next link is still present
    /// after `max_pages` pages. Either way the walk ends.
    pub async fn next_page(&mut self) -> Result<Option<ProductPage>, CatalogError> {
        let cursor_url = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Done => return Ok(None),
            Cursor::First => None,
            Cursor::Next(url) => Some(url),
        };

        if let Some(max_pages) = self.max_pages {
            if self.pages_fetched >= max_pages {
                tracing::warn!(
                    "Stopping product listing after {} pages; Shopify still supplied a next link",
                    max_pages
                );
                return Err(CatalogError::PageLimitExceeded { max_pages });
            }
        }

        let page = self.source.list_products(cursor_url.as_deref()).await?;
        self.pages_fetched += 1;
        tracing::debug!(
            "Fetched product page {} ({} products)",
            self.pages_fetched,
            page.products.len()
        );

        if let Some(next) = &page.next_page_url {
            self.cursor = Cursor::Next(next.clone());
        }

        Ok(Some(page))
    }

    /// Drains the walk and returns every product in order.
    ///
    /// All or nothing: a failure on any page discards what was already read.
    ///
    /// # Errors
    ///
    /// See [`PaginationWalker::next_page`].
    pub async fn collect_all(mut self) -> Result<Vec<RawProduct>, CatalogError> {
        let mut products = Vec::new();
        while let Some(page) = self.next_page().await? {
            products.extend(page.products);
        }
        Ok(products)
    }

    /// Turns the walk into a stream of pages.
    pub fn into_page_stream(self) -> impl Stream<Item = Result<ProductPage, CatalogError>> + 'a {
        stream::try_unfold(self, |mut walker| async move {
            let page = walker.next_page().await?;
            Ok::<_, CatalogError>(page.map(|page| (page, walker)))
        })
    }

    /// Turns the walk into a stream of individual products.
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<RawProduct, CatalogError>> + 'a {
        self.into_page_stream()
            .map_ok(|page| stream::iter(page.products.into_iter().map(Ok::<_, CatalogError>)))
            .try_flatten()
    }
}

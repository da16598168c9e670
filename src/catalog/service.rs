//! The four public catalog operations.

use crate::config::CatalogConfig;

use super::assembler::ProductAssembler;
use super::error::CatalogError;
use super::inventory::InventoryEnricher;
use super::model::{ProductDetails, ProductSummary};
use super::pagination::PaginationWalker;
use super::remote::RemoteCatalogClient;
use super::resolver::UrlResolver;
use super::source::CatalogSource;

/// Read-only catalog facade.
///
/// Each operation is independent: nothing is cached between calls and a
/// failure anywhere fails the whole operation.
///
/// # Example
///
/// ```rust,no_run
/// use shopify_catalog::{CatalogConfig, CatalogService};
///
/// # async fn example() -> Result<(), shopify_catalog::CatalogError> {
/// let service = CatalogService::new(CatalogConfig::from_env()?)?;
///
/// for product in service.detailed_products().await? {
///     let in_stock = product.variants.iter().filter(|v| v.available).count();
///     println!("{}: {in_stock} variants in stock", product.title);
/// }
///
/// let jacket = service
///     .product_by_url("https://my-store.com/products/blue-denim-jacket")
///     .await?;
/// println!("{}", jacket.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CatalogService<S = RemoteCatalogClient> {
    source: S,
    assembler: ProductAssembler,
    max_pages: Option<usize>,
}

impl CatalogService<RemoteCatalogClient> {
    /// Creates a service backed by Shopify.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the HTTP transport cannot be
    /// built. Missing credentials are not reported here.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let max_pages = config.max_pages();
        Ok(Self::with_source(RemoteCatalogClient::new(config)?, max_pages))
    }
}

impl<S: CatalogSource> CatalogService<S> {
    /// Creates a service reading from any [`CatalogSource`].
    #[must_use]
    pub const fn with_source(source: S, max_pages: Option<usize>) -> Self {
        Self {
            source,
            assembler: ProductAssembler::new(),
            max_pages,
        }
    }

    /// Returns the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the first listing page, without inventory.
    ///
    /// # Errors
    ///
    /// Fails with [`CatalogError::Configuration`], [`CatalogError::Upstream`],
    /// [`CatalogError::MalformedUpstreamData`] or [`CatalogError::Transport`].
    pub async fn products(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        let page = self.source.list_products(None).await?;
        self.assembler.assemble_summaries(page.products)
    }

    /// Returns every product across all listing pages, with inventory.
    ///
    /// Pages are walked in cursor order and each page is enriched with a
    /// single inventory call before the next page is requested.
    ///
    /// # Errors
    ///
    /// As [`CatalogService::products`], plus
    /// [`CatalogError::PageLimitExceeded`] when a page ceiling is configured.
    pub async fn detailed_products(&self) -> Result<Vec<ProductDetails>, CatalogError> {
        let mut walker = PaginationWalker::new(&self.source, self.max_pages);
        let enricher = InventoryEnricher::new(&self.source);
        let mut products = Vec::new();

        while let Some(page) = walker.next_page().await? {
            let levels = enricher.levels_for(&page.products).await?;
            products.extend(self.assembler.assemble_all_details(page.products, &levels)?);
        }

        tracing::debug!(
            "Assembled {} products from {} pages",
            products.len(),
            walker.pages_fetched()
        );
        Ok(products)
    }

    /// Returns one product with inventory.
    ///
    /// # Errors
    ///
    /// Fails with [`CatalogError::Configuration`], [`CatalogError::Upstream`]
    /// (e.g. 404 for an unknown id), [`CatalogError::MalformedUpstreamData`]
    /// or [`CatalogError::Transport`].
    pub async fn product(&self, id: u64) -> Result<ProductDetails, CatalogError> {
        let raw = self.source.get_product(id).await?;
        let levels = InventoryEnricher::new(&self.source)
            .levels_for([&raw])
            .await?;
        self.assembler.assemble_details(raw, &levels)
    }

    /// Resolves a storefront URL, then behaves as [`CatalogService::product`].
    ///
    /// # Errors
    ///
    /// As [`CatalogService::product`], plus [`CatalogError::Resolution`]
    /// when the URL names no product.
    pub async fn product_by_url(&self, url: &str) -> Result<ProductDetails, CatalogError> {
        self.source.check_ready()?;
        let id = UrlResolver::new(&self.source).resolve(url).await?;
        self.product(id).await
    }
}

//! The seam between the catalog pipeline and Shopify.
//!
//! [`CatalogSource`] is implemented by
//! [`RemoteCatalogClient`](super::RemoteCatalogClient) for real traffic. The
//! walker, enricher, resolver, and service are generic over it, so they can be
//! driven by in-memory sources in tests.

use std::collections::BTreeSet;

use super::error::CatalogError;
use super::inventory::InventoryLevels;
use super::model::RawProduct;

/// One page of the product listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPage {
    /// Products on this page, in Shopify's order.
    pub products: Vec<RawProduct>,
    /// The URL of the next page, when Shopify supplied one.
    pub next_page_url: Option<String>,
}

/// Read access to a remote catalog.
///
/// Every method issues at most one upstream request.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetches one listing page: the first page when `cursor_url` is `None`,
    /// otherwise exactly the URL given.
    async fn list_products(&self, cursor_url: Option<&str>) -> Result<ProductPage, CatalogError>;

    /// Fetches a single product by id.
    async fn get_product(&self, id: u64) -> Result<RawProduct, CatalogError>;

    /// Fetches inventory quantities for the given inventory item ids in one call.
    async fn inventory_levels(
        &self,
        item_ids: &BTreeSet<u64>,
    ) -> Result<InventoryLevels, CatalogError>;

    /// Looks up the id of the product with the given handle.
    async fn find_product_id_by_handle(&self, handle: &str) -> Result<Option<u64>, CatalogError>;

    /// Checks, without any I/O, that the source could serve a request.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when required settings are
    /// missing.
    fn check_ready(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

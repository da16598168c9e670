//! The read-only catalog pipeline.
//!
//! # Overview
//!
//! - [`CatalogService`]: the four public operations
//! - [`CatalogSource`]: one-request-per-call access to a remote catalog
//! - [`RemoteCatalogClient`]: the Shopify implementation of [`CatalogSource`]
//! - [`PaginationWalker`]: follows `Link` header next URLs across the listing
//! - [`InventoryEnricher`] and [`InventoryLevels`]: one inventory call per batch
//! - [`ProductAssembler`]: strict validation into [`ProductSummary`] and
//!   [`ProductDetails`]
//! - [`UrlResolver`] and [`extract`]: storefront URL to product id
//!
//! # Request Flow
//!
//! | Operation | Requests |
//! |-----------|----------|
//! | `products()` | 1 listing page |
//! | `detailed_products()` | N listing pages + at most N inventory calls |
//! | `product(id)` | 1 product + at most 1 inventory call |
//! | `product_by_url(url)` | as `product(id)`, plus 1 handle lookup for handle URLs |

mod assembler;
mod error;
mod inventory;
mod model;
mod pagination;
mod remote;
mod resolver;
mod service;
mod source;

pub use assembler::ProductAssembler;
pub use error::{CatalogError, ResolutionError};
pub use inventory::{InventoryEnricher, InventoryLevelRecord, InventoryLevels};
pub use model::{
    Image, Product, ProductDetails, ProductSummary, RawProduct, Variant, VariantDetails,
};
pub use pagination::PaginationWalker;
pub use remote::RemoteCatalogClient;
pub use resolver::{extract, Extraction, UrlResolver};
pub use service::CatalogService;
pub use source::{CatalogSource, ProductPage};

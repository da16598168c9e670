//! # Shopify Catalog
//!
//! A read-only product catalog facade over the Shopify Admin REST API: list
//! products, walk every page with inventory attached, fetch one product, and
//! resolve storefront URLs to products.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`CatalogConfig`] and [`CatalogConfigBuilder`]
//! - Validated newtypes for the shop URL and access token
//! - Link-header pagination via [`PaginationWalker`]
//! - Batched inventory lookup via [`InventoryEnricher`]
//! - Strict validation of Shopify payloads via [`ProductAssembler`]
//! - Storefront URL and handle resolution via [`UrlResolver`]
//! - The four public operations on [`CatalogService`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_catalog::{ApiVersion, CatalogConfig};
//!
//! let config = CatalogConfig::builder()
//!     .shop_url("https://my-store.myshopify.com")
//!     .access_token("shpat_example")
//!     .api_version(ApiVersion::V2023_04)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Fetching Products
//!
//! ```rust,no_run
//! use shopify_catalog::{CatalogConfig, CatalogService};
//!
//! # async fn example() -> Result<(), shopify_catalog::CatalogError> {
//! let service = CatalogService::new(CatalogConfig::from_env()?)?;
//!
//! // First listing page, no inventory
//! let products = service.products().await?;
//!
//! // Every page, with availability and quantities
//! let detailed = service.detailed_products().await?;
//!
//! // One product, by id or by storefront URL
//! let product = service.product(632910392).await?;
//! let same = service
//!     .product_by_url("https://my-store.com/products/ipod-nano")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`CatalogError`]. Use
//! [`CatalogError::status_code`] to pick the HTTP status an HTTP layer should
//! answer with.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Lazy credentials**: missing credentials fail at call time, before any request
//! - **No caching, no retries**: every operation reflects Shopify at call time
//! - **Thread-safe**: all public types are `Send + Sync`

pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiVersion, CatalogConfig, CatalogConfigBuilder, Credentials, ShopUrl,
};
pub use error::ConfigError;

// Re-export catalog types
pub use catalog::{
    CatalogError, CatalogService, CatalogSource, Image, InventoryEnricher, InventoryLevels,
    PaginationWalker, Product, ProductAssembler, ProductDetails, ProductPage, ProductSummary,
    RawProduct, RemoteCatalogClient, ResolutionError, UrlResolver, Variant, VariantDetails,
};

//! Catalog data model.
//!
//! [`RawProduct`] is a product exactly as Shopify sent it. [`Product`] is the
//! validated public shape, generic over its variant type:
//!
//! - [`ProductSummary`] (`Product<Variant>`): id, title, price, SKU per variant
//! - [`ProductDetails`] (`Product<VariantDetails>`): plus availability and
//!   inventory quantity
//!
//! All of these are request-scoped values; nothing here is cached.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A product record as returned by Shopify, before validation.
///
/// Only the few fields the pipeline needs before assembly are read from it
/// directly; everything else is left for [`ProductAssembler`](super::ProductAssembler).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(serde_json::Value);

impl RawProduct {
    /// Wraps a raw JSON value.
    #[must_use]
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the record and returns the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Returns the product id, if the record carries a numeric one.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(serde_json::Value::as_u64)
    }

    /// Returns the inventory item ids of this product's variants.
    ///
    /// Variants without a numeric `inventory_item_id` are skipped; they
    /// resolve to quantity 0 during assembly.
    pub fn inventory_item_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.0
            .get("variants")
            .and_then(serde_json::Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|variant| {
                variant
                    .get("inventory_item_id")
                    .and_then(serde_json::Value::as_u64)
            })
    }
}

impl From<serde_json::Value> for RawProduct {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

/// A product image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute `http(s)` URL of the image.
    pub src: String,
    /// Alternative text, if set.
    #[serde(default)]
    pub alt: Option<String>,
}

/// A product variant without inventory data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// The unique identifier of the variant.
    pub id: u64,
    /// The title of the variant.
    pub title: String,
    /// The price, exactly as Shopify formatted it (e.g. `"19.99"`).
    pub price: String,
    /// The stock keeping unit, if any.
    #[serde(default)]
    pub sku: Option<String>,
}

/// A product variant enriched with inventory data.
///
/// `available` is always `inventory_quantity > 0`; build values with
/// [`VariantDetails::new`] to keep it that way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDetails {
    /// The unique identifier of the variant.
    pub id: u64,
    /// The title of the variant.
    pub title: String,
    /// The price, exactly as Shopify formatted it.
    pub price: String,
    /// The stock keeping unit, if any.
    #[serde(default)]
    pub sku: Option<String>,
    /// Whether any stock is on hand.
    pub available: bool,
    /// Units on hand across all locations; 0 when unknown.
    pub inventory_quantity: u64,
}

impl VariantDetails {
    /// Enriches a variant with its inventory quantity.
    #[must_use]
    pub fn new(variant: Variant, inventory_quantity: u64) -> Self {
        Self {
            id: variant.id,
            title: variant.title,
            price: variant.price,
            sku: variant.sku,
            available: inventory_quantity > 0,
            inventory_quantity,
        }
    }
}

/// A validated product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product<V = Variant> {
    /// The unique identifier of the product.
    pub id: u64,
    /// The title of the product.
    pub title: String,
    /// The description, as HTML.
    #[serde(default)]
    pub body_html: Option<String>,
    /// The vendor name.
    pub vendor: String,
    /// The product type.
    pub product_type: String,
    /// When the product was created, in the shop's UTC offset.
    pub created_at: DateTime<FixedOffset>,
    /// When the product was last updated.
    pub updated_at: DateTime<FixedOffset>,
    /// When the product was published, if it is.
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
    /// Variants, in Shopify's order.
    pub variants: Vec<V>,
    /// Images, in Shopify's order.
    pub images: Vec<Image>,
}

impl<V> Product<V> {
    /// Converts every variant, keeping the rest of the product as is.
    pub fn map_variants<W, F>(self, f: F) -> Product<W>
    where
        F: FnMut(V) -> W,
    {
        Product {
            id: self.id,
            title: self.title,
            body_html: self.body_html,
            vendor: self.vendor,
            product_type: self.product_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            variants: self.variants.into_iter().map(f).collect(),
            images: self.images,
        }
    }
}

/// A product with plain variants.
pub type ProductSummary = Product<Variant>;

/// A product with inventory-enriched variants.
pub type ProductDetails = Product<VariantDetails>;

//! Validation of raw product records into the public shapes.
//!
//! The assembler is strict: a record must carry every required field with the
//! right type, timestamps must be RFC 3339, prices must be strings, and every
//! image `src` must be an absolute `http(s)` URL with a host. Any violation is
//! reported as [`CatalogError::MalformedUpstreamData`] naming the product, which keeps
//! "Shopify sent something odd" apart from "Shopify could not be reached".

use chrono::{DateTime, FixedOffset};
use reqwest::Url;
use serde::Deserialize;

use super::error::CatalogError;
use super::inventory::InventoryLevels;
use super::model::{
    Image, Product, ProductDetails, ProductSummary, RawProduct, Variant, VariantDetails,
};

/// A variant as it appears on the wire, before inventory is attached.
#[derive(Deserialize)]
struct WireVariant {
    id: u64,
    title: String,
    price: String,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    inventory_item_id: Option<u64>,
}

impl WireVariant {
    fn into_parts(self) -> (Variant, Option<u64>) {
        (
            Variant {
                id: self.id,
                title: self.title,
                price: self.price,
                sku: self.sku,
            },
            self.inventory_item_id,
        )
    }
}

/// An image `src` must be an `http` or `https` URL with a host.
fn is_web_url(src: &str) -> bool {
    Url::parse(src).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

#[derive(Deserialize)]
struct WireProduct {
    id: u64,
    title: String,
    body_html: Option<String>,
    vendor: String,
    product_type: String,
    created_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
    #[serde(default)]
    published_at: Option<DateTime<FixedOffset>>,
    variants: Vec<WireVariant>,
    images: Vec<Image>,
}

/// Turns [`RawProduct`] records into [`ProductSummary`] or
/// [`ProductDetails`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProductAssembler;

impl ProductAssembler {
    /// Creates an assembler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a raw record into a product without inventory data.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedUpstreamData`] if the record fails
    /// validation.
    pub fn assemble_summary(&self, raw: RawProduct) -> Result<ProductSummary, CatalogError> {
        Ok(Self::validate(raw)?.map_variants(|(variant, _)| variant))
    }

    /// Validates a raw record and attaches inventory to every variant.
    ///
    /// A variant with no `inventory_item_id`, or one missing from `levels`,
    /// gets quantity 0.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedUpstreamData`] if the record fails
    /// validation.
    pub fn assemble_details(
        &self,
        raw: RawProduct,
        levels: &InventoryLevels,
    ) -> Result<ProductDetails, CatalogError> {
        Ok(Self::validate(raw)?.map_variants(|(variant, inventory_item_id)| {
            VariantDetails::new(variant, levels.quantity_for(inventory_item_id))
        }))
    }

    /// Assembles a batch of summaries, stopping at the first malformed record.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError::MalformedUpstreamData`] encountered.
    pub fn assemble_summaries<I>(&self, raws: I) -> Result<Vec<ProductSummary>, CatalogError>
    where
        I: IntoIterator<Item = RawProduct>,
    {
        raws.into_iter()
            .map(|raw| self.assemble_summary(raw))
            .collect()
    }

    /// Assembles a batch of enriched products, stopping at the first
    /// malformed record.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError::MalformedUpstreamData`] encountered.
    pub fn assemble_all_details<I>(
        &self,
        raws: I,
        levels: &InventoryLevels,
    ) -> Result<Vec<ProductDetails>, CatalogError>
    where
        I: IntoIterator<Item = RawProduct>,
    {
        raws.into_iter()
            .map(|raw| self.assemble_details(raw, levels))
            .collect()
    }

    fn validate(raw: RawProduct) -> Result<Product<(Variant, Option<u64>)>, CatalogError> {
        let context = raw
            .id()
            .map_or_else(|| "product".to_string(), |id| format!("product {id}"));

        let wire: WireProduct = serde_json::from_value(raw.into_value())
            .map_err(|e| CatalogError::malformed(context.clone(), e))?;

        if let Some(image) = wire.images.iter().find(|image| !is_web_url(&image.src)) {
            return Err(CatalogError::malformed(
                context,
                format!("image src '{}' is not an absolute http(s) URL", image.src),
            ));
        }

        Ok(Product {
            id: wire.id,
            title: wire.title,
            body_html: wire.body_html,
            vendor: wire.vendor,
            product_type: wire.product_type,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            published_at: wire.published_at,
            variants: wire
                .variants
                .into_iter()
                .map(WireVariant::into_parts)
                .collect(),
            images: wire.images,
        })
    }
}

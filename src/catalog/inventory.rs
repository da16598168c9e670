//! Inventory lookup and the quantity map it produces.
//!
//! Shopify reports one inventory level per item per location. The enricher
//! asks for every item of a batch in one call and folds the rows into
//! [`InventoryLevels`]: quantities are summed across locations, a negative
//! total clamps to 0, and an item Shopify did not mention reads as 0.
//! "No data" and "explicitly zero" are therefore indistinguishable.
//!
//! The quantity is a shop-wide total across every location, not the count
//! at whichever location Shopify happened to list last.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use super::error::CatalogError;
use super::model::RawProduct;
use super::source::CatalogSource;

/// One row of the `inventory_levels` response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct InventoryLevelRecord {
    /// The inventory item this row is for.
    pub inventory_item_id: u64,
    /// Units available at this row's location; `null` for untracked items.
    #[serde(default)]
    pub available: Option<i64>,
}

/// Inventory quantities keyed by inventory item id.
///
/// Scoped to a single enrichment call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventoryLevels {
    totals: HashMap<u64, i64>,
}

impl InventoryLevels {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds level rows into per-item totals.
    #[must_use]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = InventoryLevelRecord>,
    {
        let mut totals: HashMap<u64, i64> = HashMap::new();
        for record in records {
            let total = totals.entry(record.inventory_item_id).or_default();
            *total = total.saturating_add(record.available.unwrap_or(0));
        }
        Self { totals }
    }

    /// Returns the quantity for an item; 0 when unknown or negative.
    #[must_use]
    pub fn quantity(&self, inventory_item_id: u64) -> u64 {
        self.totals
            .get(&inventory_item_id)
            .map_or(0, |total| u64::try_from(*total).unwrap_or(0))
    }

    /// Returns the quantity for an optional item id; `None` reads as 0.
    #[must_use]
    pub fn quantity_for(&self, inventory_item_id: Option<u64>) -> u64 {
        inventory_item_id.map_or(0, |id| self.quantity(id))
    }

    /// Returns `true` if Shopify reported at least one row for the item.
    #[must_use]
    pub fn contains(&self, inventory_item_id: u64) -> bool {
        self.totals.contains_key(&inventory_item_id)
    }

    /// Returns the number of items with reported rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns `true` if no rows were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl FromIterator<InventoryLevelRecord> for InventoryLevels {
    fn from_iter<T: IntoIterator<Item = InventoryLevelRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

/// Fetches inventory for a batch of products with a single upstream call.
///
/// # Limits
///
/// Shopify caps `inventory_item_ids` at 50 ids per request. A batch is sent
/// as one request regardless of size, so a page whose variants span more than
/// 50 inventory items may be rejected upstream and surface as
/// [`CatalogError::Upstream`].
#[derive(Debug)]
pub struct InventoryEnricher<'a, S> {
    source: &'a S,
}

impl<'a, S: CatalogSource> InventoryEnricher<'a, S> {
    /// Creates an enricher reading from `source`.
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Collects the inventory item ids of every variant of `products` and
    /// fetches their levels in one call.
    ///
    /// # Errors
    ///
    /// Propagates any [`CatalogError`] from the inventory request.
    pub async fn levels_for<'p, I>(&self, products: I) -> Result<InventoryLevels, CatalogError>
    where
        I: IntoIterator<Item = &'p RawProduct>,
    {
        let item_ids: BTreeSet<u64> = products
            .into_iter()
            .flat_map(RawProduct::inventory_item_ids)
            .collect();
        self.levels_for_items(&item_ids).await
    }

    /// Fetches levels for the given ids. An empty set sends no request.
    ///
    /// # Errors
    ///
    /// Propagates any [`CatalogError`] from the inventory request.
    pub async fn levels_for_items(
        &self,
        item_ids: &BTreeSet<u64>,
    ) -> Result<InventoryLevels, CatalogError> {
        if item_ids.is_empty() {
            return Ok(InventoryLevels::new());
        }

        tracing::debug!("Fetching inventory levels for {} items", item_ids.len());
        let levels = self.source.inventory_levels(item_ids).await?;

        let missing = item_ids.iter().filter(|id| !levels.contains(**id)).count();
        if missing > 0 {
            tracing::warn!(
                "Shopify returned no inventory levels for {} of {} items; treating them as out of stock",
                missing,
                item_ids.len()
            );
        }

        Ok(levels)
    }
}

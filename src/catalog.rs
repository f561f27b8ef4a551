//! Catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::Identified;

/// Errors raised while looking up or editing the inventory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// No catalog item has the requested id.
    #[error("catalog item not found: {0}")]
    ItemNotFound(String),
}

/// An item offered for sale, as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Unit price
    pub price: Decimal,

    /// Units available. Informational only, carts never decrement it.
    pub stock: u32,
}

impl CatalogItem {
    /// Create a new catalog item.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            price,
            stock,
        }
    }
}

impl Identified for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered list of catalog items.
///
/// Like carts, inventories are edited by producing new values rather than
/// mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<CatalogItem>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new inventory with `item` appended.
    #[must_use]
    pub fn add_item(&self, item: CatalogItem) -> Self {
        let mut items = self.items.clone();
        items.push(item);

        Self { items }
    }

    /// Returns a new inventory without any item whose id is `id`.
    #[must_use]
    pub fn remove_item(&self, id: &str) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();

        Self { items }
    }

    /// Find the first item with the given id.
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find the first item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::ItemNotFound`] if no item has that id.
    pub fn try_get(&self, id: &str) -> Result<&CatalogItem, InventoryError> {
        self.get(id)
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<CatalogItem> for Inventory {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

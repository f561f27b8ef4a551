//! Items

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Anything that can be matched against cart lines by id.
pub trait Identified {
    /// Identity key shared by catalog items and cart lines.
    fn id(&self) -> &str;
}

impl Identified for str {
    fn id(&self) -> &str {
        self
    }
}

/// A snapshot of a catalog item held in a cart, with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Catalog identifier
    pub id: String,

    /// Title at the time the item was added
    pub title: String,

    /// Description at the time the item was added
    pub description: String,

    /// Unit price at the time the item was added
    pub price: Decimal,

    /// Number of units on this line, never zero
    pub quantity: NonZeroU32,
}

impl CartLineItem {
    /// Snapshot a catalog item with the given quantity.
    pub fn from_catalog(item: &CatalogItem, quantity: NonZeroU32) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            price: item.price,
            quantity,
        }
    }

    /// Price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity.get())
    }

    /// Returns this line with one fewer unit, or `None` once it would reach zero.
    #[must_use]
    pub fn decremented(&self) -> Option<Self> {
        let quantity = NonZeroU32::new(self.quantity.get() - 1)?;

        Some(Self {
            quantity,
            ..self.clone()
        })
    }
}

impl Identified for CartLineItem {
    fn id(&self) -> &str {
        &self.id
    }
}

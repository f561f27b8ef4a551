//! Cart
//!
//! Every operation here borrows the current cart and returns a new one, so
//! callers holding an older value never observe a change.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    catalog::CatalogItem,
    coupons::Coupon,
    items::{CartLineItem, Identified},
    pricing::{Totals, subtotal},
    validate::{ValidationError, validate_coupon, validate_line_item, validate_shipping_cost},
};

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A coupon with this code is already on the cart.
    #[error("cannot add the same coupon twice: {0}")]
    DuplicateCoupon(String),
}

/// A user's cart: line items, coupons, shipping and computed amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartRecord")]
pub struct Cart {
    user_id: String,
    items: Vec<CartLineItem>,
    coupons: Vec<Coupon>,
    sub_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_cost: Option<Decimal>,
    total: Decimal,
}

/// Serialized shape of a cart. Amounts are validated and the subtotal is
/// rebuilt from the items on load.
#[derive(Deserialize)]
struct CartRecord {
    user_id: String,
    #[serde(default)]
    items: Vec<CartLineItem>,
    #[serde(default)]
    coupons: Vec<Coupon>,
    #[serde(default)]
    shipping_cost: Option<Decimal>,
    #[serde(default)]
    total: Decimal,
}

impl TryFrom<CartRecord> for Cart {
    type Error = ValidationError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        for line in &record.items {
            validate_line_item(line)?;
        }

        for coupon in &record.coupons {
            validate_coupon(coupon)?;
        }

        if let Some(cost) = record.shipping_cost {
            validate_shipping_cost(cost)?;
        }

        Ok(Cart {
            user_id: record.user_id,
            sub_total: subtotal(&record.items),
            items: record.items,
            coupons: record.coupons,
            shipping_cost: record.shipping_cost,
            total: record.total,
        })
    }
}

impl Cart {
    /// Create an empty cart for `user_id`. The id is stored as given.
    pub fn new(user_id: impl Into<String>) -> Self {
        Cart {
            user_id: user_id.into(),
            items: Vec::new(),
            coupons: Vec::new(),
            sub_total: Decimal::ZERO,
            shipping_cost: None,
            total: Decimal::ZERO,
        }
    }

    /// Create an empty cart for an anonymous user.
    pub fn anonymous() -> Self {
        Self::new("")
    }

    /// Returns a cart with one unit of `item` appended as a new line.
    #[must_use]
    pub fn add_item(&self, item: &CatalogItem) -> Self {
        self.add_items(item, NonZeroU32::MIN)
    }

    /// Returns a cart with `quantity` units of `item` appended as a new line.
    ///
    /// Lines are never merged: adding an id that is already present produces
    /// a second line for it. See [`Cart::add_item_merged`] for the coalescing
    /// variant.
    #[must_use]
    pub fn add_items(&self, item: &CatalogItem, quantity: NonZeroU32) -> Self {
        trace!(
            user_id = %self.user_id,
            item_id = %item.id,
            quantity = quantity.get(),
            "adding cart line"
        );

        let mut items = self.items.clone();
        items.push(CartLineItem::from_catalog(item, quantity));

        self.with_items(items)
    }

    /// Returns a cart with `quantity` units of `item` added to the first line
    /// sharing its id, or appended as a new line if there is none.
    ///
    /// The existing line keeps its original snapshot of title, description and
    /// price. If the merged quantity would not fit in a `u32`, `quantity` is
    /// appended as a new line instead, so no units are lost.
    #[must_use]
    pub fn add_item_merged(&self, item: &CatalogItem, quantity: NonZeroU32) -> Self {
        let Some((position, existing)) = self
            .items
            .iter()
            .enumerate()
            .find(|(_, line)| line.id == item.id)
        else {
            return self.add_items(item, quantity);
        };

        let Some(merged) = existing.quantity.checked_add(quantity.get()) else {
            warn!(
                user_id = %self.user_id,
                item_id = %item.id,
                quantity = quantity.get(),
                "merged quantity overflows, appending new line"
            );

            return self.add_items(item, quantity);
        };

        let mut items = self.items.clone();

        if let Some(line) = items.get_mut(position) {
            line.quantity = merged;
        }

        trace!(
            user_id = %self.user_id,
            item_id = %item.id,
            quantity = quantity.get(),
            "merged cart line"
        );

        self.with_items(items)
    }

    /// Returns a cart with one unit removed from every line matching `item`'s id.
    ///
    /// Lines that drop to zero are removed. Removing an id that is not in the
    /// cart returns an equal cart.
    #[must_use]
    pub fn remove_item<I: Identified + ?Sized>(&self, item: &I) -> Self {
        let id = item.id();

        let items: Vec<CartLineItem> = self
            .items
            .iter()
            .filter_map(|line| {
                if line.id == id {
                    line.decremented()
                } else {
                    Some(line.clone())
                }
            })
            .collect();

        trace!(user_id = %self.user_id, item_id = %id, lines = items.len(), "removed cart unit");

        self.with_items(items)
    }

    /// Returns a cart with `coupon` appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateCoupon`] if a coupon with the same code is
    /// already applied, regardless of its other fields.
    pub fn add_coupon(&self, coupon: Coupon) -> Result<Self, CartError> {
        if self.coupons.iter().any(|existing| existing.same_code(&coupon)) {
            warn!(user_id = %self.user_id, code = %coupon.code, "rejected duplicate coupon");

            return Err(CartError::DuplicateCoupon(coupon.code));
        }

        debug!(user_id = %self.user_id, code = %coupon.code, "applied coupon");

        let mut coupons = self.coupons.clone();
        coupons.push(coupon);

        Ok(Cart {
            coupons,
            ..self.clone()
        })
    }

    /// Returns a cart without any coupon sharing `coupon`'s code.
    #[must_use]
    pub fn remove_coupon(&self, coupon: &Coupon) -> Self {
        self.remove_coupon_code(&coupon.code)
    }

    /// Returns a cart without any coupon with the given code.
    #[must_use]
    pub fn remove_coupon_code(&self, code: &str) -> Self {
        let coupons = self
            .coupons
            .iter()
            .filter(|coupon| coupon.code != code)
            .cloned()
            .collect();

        Cart {
            coupons,
            ..self.clone()
        }
    }

    /// Returns a cart with a flat shipping charge, applied at totalling unless
    /// a coupon waives it.
    #[must_use]
    pub fn set_shipping_cost(&self, cost: Decimal) -> Self {
        Cart {
            shipping_cost: Some(cost),
            ..self.clone()
        }
    }

    /// Breakdown of the total at the given sales tax rate.
    pub fn totals(&self, sales_tax_rate: Decimal) -> Totals {
        Totals::calculate(
            self.sub_total,
            &self.coupons,
            self.shipping_cost,
            sales_tax_rate,
        )
    }

    /// Returns a cart whose `total` reflects the current subtotal, coupons and
    /// shipping at the given sales tax rate. Nothing else changes.
    #[must_use]
    pub fn compute_total(&self, sales_tax_rate: Decimal) -> Self {
        let totals = self.totals(sales_tax_rate);

        debug!(
            user_id = %self.user_id,
            sub_total = %totals.sub_total,
            discounted = %totals.discounted_subtotal,
            tax = %totals.tax,
            shipping = %totals.shipping_charged,
            total = %totals.total,
            "computed cart total"
        );

        Cart {
            total: totals.total,
            ..self.clone()
        }
    }

    /// Owner of the cart.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Coupons in insertion order.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Sum of `price * quantity` over all lines.
    pub fn sub_total(&self) -> Decimal {
        self.sub_total
    }

    /// Configured shipping charge, if any.
    pub fn shipping_cost(&self) -> Option<Decimal> {
        self.shipping_cost
    }

    /// Total from the last call to [`Cart::compute_total`].
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn with_items(&self, items: Vec<CartLineItem>) -> Self {
        Cart {
            sub_total: subtotal(&items),
            items,
            ..self.clone()
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::anonymous()
    }
}

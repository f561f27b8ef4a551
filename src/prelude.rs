//! Cartage prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{CatalogItem, Inventory, InventoryError},
    coupons::Coupon,
    discounts::Reductions,
    fixtures::{Fixture, FixtureError},
    items::{CartLineItem, Identified},
    pricing::Totals,
    receipt::{Receipt, ReceiptError},
    session::CartSession,
    store::{CartStore, JsonFileCartStore, MemoryCartStore, StoreError},
    validate::ValidationError,
};

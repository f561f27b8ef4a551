//! Cartage
//!
//! Cartage is a small shopping cart pricing engine. Carts are immutable
//! values: every operation returns a new cart, and totals are computed on
//! demand from the items, coupons, shipping cost and a sales tax rate.

pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod store;
pub mod validate;

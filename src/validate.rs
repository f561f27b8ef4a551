//! Boundary validation
//!
//! The cart operations trust their inputs. These checks are for callers that
//! accept prices, coupons and rates from outside, before handing them on, and
//! for carts read back from storage. Upper bounds keep every total within
//! `Decimal`'s range, so arithmetic on validated values cannot overflow.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{catalog::CatalogItem, coupons::Coupon, items::CartLineItem};

/// Largest accepted price, flat reduction or shipping cost (one trillion).
///
/// A line of `MAX_AMOUNT * u32::MAX` units stays around 4.3e21, leaving room
/// to sum millions of such lines within `Decimal`'s range of about 7.9e28.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Largest accepted sales tax rate, as a fraction.
pub const MAX_TAX_RATE: Decimal = Decimal::ONE;

/// Input rejected at the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Catalog item has a negative price (item id, price).
    #[error("item {0} has negative price {1}")]
    NegativePrice(String, Decimal),

    /// Coupon code is empty or whitespace.
    #[error("coupon code cannot be empty")]
    EmptyCouponCode,

    /// Coupon has a negative flat reduction (code, amount).
    #[error("coupon {0} has negative flat amount {1}")]
    NegativeFlat(String, Decimal),

    /// Coupon percentage is outside 0 to 100 (code, percent).
    #[error("coupon {0} has percent {1}, expected 0 to 100")]
    PercentOutOfRange(String, Decimal),

    /// Shipping charge is negative.
    #[error("shipping cost cannot be negative: {0}")]
    NegativeShipping(Decimal),

    /// Sales tax rate is negative.
    #[error("sales tax rate cannot be negative: {0}")]
    NegativeTaxRate(Decimal),

    /// Amount exceeds [`MAX_AMOUNT`] (what it is, amount).
    #[error("{0} of {1} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(String, Decimal),

    /// Sales tax rate exceeds [`MAX_TAX_RATE`].
    #[error("sales tax rate {0} exceeds the maximum of {max}", max = MAX_TAX_RATE)]
    TaxRateTooHigh(Decimal),
}

fn check_amount(what: impl FnOnce() -> String, amount: Decimal) -> Result<(), ValidationError> {
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(what(), amount));
    }

    Ok(())
}

/// Check a catalog item before it is offered to carts.
///
/// # Errors
///
/// Returns [`ValidationError::NegativePrice`] if the price is below zero, or
/// [`ValidationError::AmountTooLarge`] if it is above [`MAX_AMOUNT`].
pub fn validate_catalog_item(item: &CatalogItem) -> Result<(), ValidationError> {
    validate_price(&item.id, item.price)
}

/// Check a line read back from storage.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the line's price is negative or too large.
pub fn validate_line_item(line: &CartLineItem) -> Result<(), ValidationError> {
    validate_price(&line.id, line.price)
}

fn validate_price(id: &str, price: Decimal) -> Result<(), ValidationError> {
    if price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice(id.to_string(), price));
    }

    check_amount(|| format!("price of item {id}"), price)
}

/// Check a coupon before it is applied to a cart.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the code is blank, the flat amount is
/// negative or above [`MAX_AMOUNT`], or the percentage is outside 0 to 100.
pub fn validate_coupon(coupon: &Coupon) -> Result<(), ValidationError> {
    if coupon.code.trim().is_empty() {
        return Err(ValidationError::EmptyCouponCode);
    }

    if let Some(flat) = coupon.flat
        && flat < Decimal::ZERO
    {
        return Err(ValidationError::NegativeFlat(coupon.code.clone(), flat));
    }

    if let Some(flat) = coupon.flat {
        check_amount(|| format!("flat amount of coupon {}", coupon.code), flat)?;
    }

    if let Some(percent) = coupon.percent
        && !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&percent)
    {
        return Err(ValidationError::PercentOutOfRange(
            coupon.code.clone(),
            percent,
        ));
    }

    Ok(())
}

/// Check a shipping charge.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeShipping`] if `cost` is below zero, or
/// [`ValidationError::AmountTooLarge`] if it is above [`MAX_AMOUNT`].
pub fn validate_shipping_cost(cost: Decimal) -> Result<(), ValidationError> {
    if cost < Decimal::ZERO {
        return Err(ValidationError::NegativeShipping(cost));
    }

    check_amount(|| "shipping cost".to_string(), cost)
}

/// Check a sales tax rate, expressed as a fraction (0.1 for 10%).
///
/// # Errors
///
/// Returns [`ValidationError::NegativeTaxRate`] if `rate` is below zero, or
/// [`ValidationError::TaxRateTooHigh`] if it is above [`MAX_TAX_RATE`].
pub fn validate_tax_rate(rate: Decimal) -> Result<(), ValidationError> {
    if rate < Decimal::ZERO {
        return Err(ValidationError::NegativeTaxRate(rate));
    }

    if rate > MAX_TAX_RATE {
        return Err(ValidationError::TaxRateTooHigh(rate));
    }

    Ok(())
}

//! Pricing

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    coupons::Coupon,
    discounts::{Reductions, waives_shipping},
    items::CartLineItem,
};

/// Sum of `price * quantity` over all lines. Zero for an empty slice.
pub fn subtotal(items: &[CartLineItem]) -> Decimal {
    items.iter().map(CartLineItem::line_total).sum()
}

/// Shipping actually charged: nothing when a coupon waives it, otherwise the
/// configured cost or zero.
pub fn shipping_charged(coupons: &[Coupon], shipping_cost: Option<Decimal>) -> Decimal {
    if waives_shipping(coupons) {
        Decimal::ZERO
    } else {
        shipping_cost.unwrap_or(Decimal::ZERO)
    }
}

/// Breakdown of a cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Merchandise subtotal before coupons
    pub sub_total: Decimal,

    /// Sum of flat coupon reductions
    pub flat_reduction: Decimal,

    /// Reduction from the combined coupon percentage
    pub percent_reduction: Decimal,

    /// Subtotal after both reductions, possibly negative
    pub discounted_subtotal: Decimal,

    /// Sales tax on the discounted subtotal
    pub tax: Decimal,

    /// Shipping charge after any waiver
    pub shipping_charged: Decimal,

    /// Final amount due
    pub total: Decimal,
}

impl Totals {
    /// Compute totals in a fixed order: flat reductions, then percentage
    /// reductions on the remainder, then tax on the discounted subtotal, then
    /// shipping. Tax never applies to shipping.
    pub fn calculate(
        sub_total: Decimal,
        coupons: &[Coupon],
        shipping_cost: Option<Decimal>,
        sales_tax_rate: Decimal,
    ) -> Self {
        let reductions = Reductions::calculate(sub_total, coupons);
        let discounted_subtotal = reductions.apply(sub_total);
        let tax = discounted_subtotal * sales_tax_rate;
        let shipping_charged = shipping_charged(coupons, shipping_cost);

        Self {
            sub_total,
            flat_reduction: reductions.flat,
            percent_reduction: reductions.percent,
            discounted_subtotal,
            tax,
            shipping_charged,
            total: tax + discounted_subtotal + shipping_charged,
        }
    }

    /// Amount saved through coupons, excluding any shipping waiver.
    pub fn savings(&self) -> Decimal {
        self.sub_total - self.discounted_subtotal
    }
}

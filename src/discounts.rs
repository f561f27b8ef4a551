//! Discounts

use rust_decimal::Decimal;

use crate::coupons::Coupon;

/// Sum of every coupon's flat reduction. Missing values count as zero.
pub fn flat_reduction(coupons: &[Coupon]) -> Decimal {
    coupons.iter().filter_map(|coupon| coupon.flat).sum()
}

/// Sum of every coupon's percentage. Missing values count as zero.
///
/// Percentages stack additively, so two 5% coupons behave as one 10% coupon.
pub fn combined_percent(coupons: &[Coupon]) -> Decimal {
    coupons.iter().filter_map(|coupon| coupon.percent).sum()
}

/// Amount taken off `base` by a percentage in the range 0 to 100.
pub fn percent_of(percent: Decimal, base: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED * base
}

/// Whether any coupon waives shipping.
pub fn waives_shipping(coupons: &[Coupon]) -> bool {
    coupons.iter().any(Coupon::waives_shipping)
}

/// Reductions produced by a set of coupons against a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reductions {
    /// Total of flat reductions
    pub flat: Decimal,

    /// Reduction from the combined percentage, taken after flat reductions
    pub percent: Decimal,
}

impl Reductions {
    /// Apply `coupons` to `sub_total`.
    ///
    /// Flat reductions come off first; the combined percentage is then taken
    /// from what remains.
    pub fn calculate(sub_total: Decimal, coupons: &[Coupon]) -> Self {
        let flat = flat_reduction(coupons);
        let percent = percent_of(combined_percent(coupons), sub_total - flat);

        Self { flat, percent }
    }

    /// Combined reduction.
    pub fn total(&self) -> Decimal {
        self.flat + self.percent
    }

    /// Subtotal after both reductions. Not floored at zero.
    pub fn apply(&self, sub_total: Decimal) -> Decimal {
        sub_total - self.total()
    }
}

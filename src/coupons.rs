//! Coupons

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named discount rule.
///
/// A coupon may combine a flat reduction, a percentage reduction and a
/// shipping waiver. Within a cart, coupons are identified by `code` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon code, unique within a cart
    pub code: String,

    /// Flat amount taken off the subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat: Option<Decimal>,

    /// Percentage (0 to 100) taken off the subtotal after flat reductions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<Decimal>,

    /// Waive the shipping charge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeshipping: Option<bool>,
}

impl Coupon {
    /// Create a coupon with the given code and no effects.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            flat: None,
            percent: None,
            freeshipping: None,
        }
    }

    /// Set the flat reduction.
    #[must_use]
    pub fn with_flat(mut self, flat: Decimal) -> Self {
        self.flat = Some(flat);
        self
    }

    /// Set the percentage reduction.
    #[must_use]
    pub fn with_percent(mut self, percent: Decimal) -> Self {
        self.percent = Some(percent);
        self
    }

    /// Waive shipping.
    #[must_use]
    pub fn with_free_shipping(mut self) -> Self {
        self.freeshipping = Some(true);
        self
    }

    /// Whether this coupon waives shipping.
    pub fn waives_shipping(&self) -> bool {
        self.freeshipping == Some(true)
    }

    /// Whether this coupon shares a code with `other`.
    pub fn same_code(&self, other: &Coupon) -> bool {
        self.code == other.code
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builder_sets_each_effect() {
        let coupon = Coupon::new("CRAZYDEAL")
            .with_flat(dec!(50))
            .with_percent(dec!(20))
            .with_free_shipping();

        assert_eq!(coupon.code, "CRAZYDEAL");
        assert_eq!(coupon.flat, Some(dec!(50)));
        assert_eq!(coupon.percent, Some(dec!(20)));
        assert!(coupon.waives_shipping());
    }

    #[test]
    fn explicit_false_does_not_waive_shipping() {
        let mut coupon = Coupon::new("NOPE");
        coupon.freeshipping = Some(false);

        assert!(!coupon.waives_shipping());
        assert!(!Coupon::new("NONE").waives_shipping());
    }

    #[test]
    fn same_code_ignores_effects() {
        let flat = Coupon::new("X").with_flat(dec!(5));
        let percent = Coupon::new("X").with_percent(dec!(10));

        assert!(flat.same_code(&percent));
        assert!(!flat.same_code(&Coupon::new("Y")));
    }

    #[test]
    fn missing_effects_deserialize_as_none() -> TestResult {
        let coupon: Coupon = serde_json::from_str(r#"{"code":"TAKE10","percent":"10"}"#)?;

        assert_eq!(coupon, Coupon::new("TAKE10").with_percent(dec!(10)));
        assert_eq!(serde_json::to_string(&coupon)?, r#"{"code":"TAKE10","percent":"10"}"#);

        Ok(())
    }
}

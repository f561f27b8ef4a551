//! Cart Fixtures

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    cart::Cart,
    catalog::Inventory,
    coupons::Coupon,
    fixtures::FixtureError,
    session::CartSession,
    validate::{validate_coupon, validate_shipping_cost, validate_tax_rate},
};

/// A scripted cart: who owns it, the tax rate to total at, and the
/// operations to replay against a catalog.
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart owner
    pub user_id: String,

    /// Sales tax rate as a fraction (e.g. "0.1" for 10%)
    #[serde(default)]
    pub sales_tax: Decimal,

    /// Operations, applied in order
    #[serde(default)]
    pub operations: Vec<CartOperation>,
}

/// A single cart operation from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartOperation {
    /// Append a new line for a catalog item
    Add {
        /// Catalog item id
        id: String,

        /// Units to add
        #[serde(default = "one")]
        quantity: NonZeroU32,
    },

    /// Add units to an existing line for the item, or append one
    AddMerged {
        /// Catalog item id
        id: String,

        /// Units to add
        #[serde(default = "one")]
        quantity: NonZeroU32,
    },

    /// Remove one unit from every line for the item
    Remove {
        /// Item id
        id: String,
    },

    /// Apply a coupon
    Coupon {
        /// Coupon code
        code: String,

        /// Flat reduction
        #[serde(default)]
        flat: Option<Decimal>,

        /// Percentage reduction
        #[serde(default)]
        percent: Option<Decimal>,

        /// Waive shipping
        #[serde(default)]
        freeshipping: Option<bool>,
    },

    /// Remove a coupon by code
    RemoveCoupon {
        /// Coupon code
        code: String,
    },

    /// Set the shipping charge
    Shipping {
        /// Flat shipping cost
        cost: Decimal,
    },
}

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl CartFixture {
    /// Start `session` on a fresh cart for this fixture's user and replay
    /// every operation, looking items up in `inventory`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if an item is missing from the inventory,
    /// an input fails validation or a coupon code repeats.
    pub fn replay(
        &self,
        inventory: &Inventory,
        session: &mut CartSession,
    ) -> Result<(), FixtureError> {
        validate_tax_rate(self.sales_tax)?;

        session.replace(Cart::new(self.user_id.clone()));

        for operation in &self.operations {
            operation.apply(inventory, session)?;
        }

        Ok(())
    }
}

impl CartOperation {
    /// Apply this operation to the session's current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the operation cannot be applied.
    pub fn apply(
        &self,
        inventory: &Inventory,
        session: &mut CartSession,
    ) -> Result<(), FixtureError> {
        match self {
            CartOperation::Add { id, quantity } => {
                let item = inventory.try_get(id)?;
                session.update(|cart| cart.add_items(item, *quantity));
            }
            CartOperation::AddMerged { id, quantity } => {
                let item = inventory.try_get(id)?;
                session.update(|cart| cart.add_item_merged(item, *quantity));
            }
            CartOperation::Remove { id } => {
                session.update(|cart| cart.remove_item(id.as_str()));
            }
            CartOperation::Coupon {
                code,
                flat,
                percent,
                freeshipping,
            } => {
                let coupon = Coupon {
                    code: code.clone(),
                    flat: *flat,
                    percent: *percent,
                    freeshipping: *freeshipping,
                };

                validate_coupon(&coupon)?;
                session.try_update(|cart| cart.add_coupon(coupon))?;
            }
            CartOperation::RemoveCoupon { code } => {
                session.update(|cart| cart.remove_coupon_code(code));
            }
            CartOperation::Shipping { cost } => {
                validate_shipping_cost(*cost)?;
                session.update(|cart| cart.set_shipping_cost(*cost));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::CartError,
        catalog::{CatalogItem, InventoryError},
        validate::ValidationError,
    };

    fn inventory() -> Inventory {
        Inventory::new().add_item(CatalogItem::new(
            "nike-shoe-12345",
            "Nike Shoes",
            "Really cool black shoes",
            dec!(60.0),
            121,
        ))
    }

    fn replay(yaml: &str) -> Result<CartSession, FixtureError> {
        let fixture: CartFixture = serde_norway::from_str(yaml)?;
        let mut session = CartSession::default();

        fixture.replay(&inventory(), &mut session)?;

        Ok(session)
    }

    #[test]
    fn replays_operations_in_order() -> TestResult {
        let session = replay(
            r#"
user_id: my-user-id
sales_tax: "0.1"
operations:
  - op: add
    id: nike-shoe-12345
    quantity: 3
  - op: remove
    id: nike-shoe-12345
  - op: coupon
    code: FLAT5
    flat: "5"
  - op: coupon
    code: TAKE5
    percent: "5"
  - op: shipping
    cost: "5.99"
  - op: coupon
    code: FREESHIP
    freeshipping: true
  - op: remove_coupon
    code: FREESHIP
"#,
        )?;

        let cart = session.current();

        assert_eq!(cart.user_id(), "my-user-id");
        assert_eq!(cart.sub_total(), dec!(120.0));
        assert_eq!(cart.coupons().len(), 2);
        assert_eq!(cart.shipping_cost(), Some(dec!(5.99)));
        assert_eq!(cart.totals(dec!(0.1)).total, dec!(126.165));

        Ok(())
    }

    #[test]
    fn add_defaults_to_one_unit() -> TestResult {
        let session = replay(
            r"
user_id: u
operations:
  - op: add
    id: nike-shoe-12345
  - op: add_merged
    id: nike-shoe-12345
",
        )?;

        assert_eq!(session.current().len(), 1);
        assert_eq!(session.current().sub_total(), dec!(120.0));

        Ok(())
    }

    #[test]
    fn unknown_item_is_reported() {
        let result = replay(
            r"
user_id: u
operations:
  - op: add
    id: missing
",
        );

        assert!(matches!(
            result,
            Err(FixtureError::Inventory(InventoryError::ItemNotFound(id))) if id == "missing"
        ));
    }

    #[test]
    fn duplicate_coupon_is_reported() {
        let result = replay(
            r"
user_id: u
operations:
  - op: coupon
    code: X
  - op: coupon
    code: X
",
        );

        assert!(matches!(
            result,
            Err(FixtureError::Cart(CartError::DuplicateCoupon(code))) if code == "X"
        ));
    }

    #[test]
    fn invalid_inputs_are_reported() {
        let negative_tax = replay("user_id: u\nsales_tax: \"-0.1\"\n");
        let bad_percent = replay(
            r#"
user_id: u
operations:
  - op: coupon
    code: HUGE
    percent: "150"
"#,
        );

        assert!(matches!(
            negative_tax,
            Err(FixtureError::Validation(ValidationError::NegativeTaxRate(_)))
        ));
        assert!(matches!(
            bad_percent,
            Err(FixtureError::Validation(ValidationError::PercentOutOfRange(..)))
        ));
    }

    #[test]
    fn oversized_amounts_are_reported() {
        let huge_flat = replay(
            r#"
user_id: u
operations:
  - op: coupon
    code: HUGE
    flat: "79228162514264337593543950335"
"#,
        );
        let huge_shipping = replay(
            r#"
user_id: u
operations:
  - op: shipping
    cost: "2000000000000"
"#,
        );
        let huge_tax = replay("user_id: u\nsales_tax: \"2\"\n");

        assert!(matches!(
            huge_flat,
            Err(FixtureError::Validation(ValidationError::AmountTooLarge(..)))
        ));
        assert!(matches!(
            huge_shipping,
            Err(FixtureError::Validation(ValidationError::AmountTooLarge(..)))
        ));
        assert!(matches!(
            huge_tax,
            Err(FixtureError::Validation(ValidationError::TaxRateTooHigh(_)))
        ));
    }

    #[test]
    fn zero_quantity_fails_to_parse() {
        let result = replay(
            r"
user_id: u
operations:
  - op: add
    id: nike-shoe-12345
    quantity: 0
",
        );

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }
}

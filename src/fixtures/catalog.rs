//! Catalog Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::{CatalogItem, Inventory},
    fixtures::FixtureError,
    validate::validate_catalog_item,
};

/// Wrapper for catalog items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of item id -> item fixture
    pub items: FxHashMap<String, CatalogItemFixture>,
}

/// Catalog Item Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Display title
    pub title: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Unit price (e.g. "60.00")
    pub price: Decimal,

    /// Units available
    #[serde(default)]
    pub stock: u32,
}

impl CatalogFixture {
    /// Build an inventory ordered by item id, validating every price.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Validation`] if any item has a negative or
    /// oversized price.
    pub fn into_inventory(self) -> Result<Inventory, FixtureError> {
        let mut items: Vec<CatalogItem> = self
            .items
            .into_iter()
            .map(|(id, fixture)| {
                CatalogItem::new(
                    id,
                    fixture.title,
                    fixture.description,
                    fixture.price,
                    fixture.stock,
                )
            })
            .collect();

        items.sort_by(|a, b| a.id.cmp(&b.id));

        for item in &items {
            validate_catalog_item(item)?;
        }

        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;
    use crate::validate::ValidationError;

    #[test]
    fn parses_items_in_id_order() -> TestResult {
        let yaml = r#"
items:
  socks-1:
    title: Socks
    price: "4.50"
    stock: 30
  hat-1:
    title: Hat
    description: Wool hat
    price: 12.25
"#;

        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
        let inventory = fixture.into_inventory()?;

        let ids: Vec<&str> = inventory.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, ["hat-1", "socks-1"]);
        assert_eq!(inventory.try_get("socks-1")?.price, dec!(4.50));
        assert_eq!(inventory.try_get("hat-1")?.description, "Wool hat");
        assert_eq!(inventory.try_get("hat-1")?.stock, 0);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() -> TestResult {
        let yaml = r#"
items:
  broken:
    title: Broken
    price: "-1"
"#;

        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            fixture.into_inventory(),
            Err(FixtureError::Validation(ValidationError::NegativePrice(..)))
        ));

        Ok(())
    }

    #[test]
    fn oversized_price_is_rejected() -> TestResult {
        let yaml = r#"
items:
  huge:
    title: Huge
    price: "79228162514264337593543950335"
"#;

        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            fixture.into_inventory(),
            Err(FixtureError::Validation(ValidationError::AmountTooLarge(_, price)))
                if price == rust_decimal::Decimal::MAX
        ));

        Ok(())
    }
}

//! Fixtures

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError},
    catalog::{Inventory, InventoryError},
    fixtures::{carts::CartFixture, catalog::CatalogFixture},
    session::CartSession,
    validate::ValidationError,
};

pub mod carts;
pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Fixture value failed validation
    #[error("Invalid fixture value: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced catalog item is missing
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Cart operation was rejected
    #[error(transparent)]
    Cart(#[from] CartError),

    /// No cart script loaded
    #[error("No cart fixture loaded")]
    NoCart,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog items loaded so far
    inventory: Inventory,

    /// Cart script, if loaded
    cart: Option<CartFixture>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            inventory: Inventory::new(),
            cart: None,
        }
    }

    /// Load catalog items from `catalog/<name>.yml`, appending to any already loaded
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an item fails validation.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for item in fixture.into_inventory()?.iter() {
            self.inventory = self.inventory.add_item(item.clone());
        }

        debug!(
            path = %file_path.display(),
            items = self.inventory.len(),
            "loaded catalog fixture"
        );

        Ok(self)
    }

    /// Load a cart script from `carts/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.cart = Some(serde_norway::from_str(&contents)?);

        debug!(path = %file_path.display(), "loaded cart fixture");

        Ok(self)
    }

    /// Load a complete fixture set (catalog and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Get the loaded inventory
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Get the loaded cart script
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCart`] if no cart fixture has been loaded.
    pub fn cart_fixture(&self) -> Result<&CartFixture, FixtureError> {
        self.cart.as_ref().ok_or(FixtureError::NoCart)
    }

    /// Sales tax rate from the cart script
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCart`] if no cart fixture has been loaded.
    pub fn sales_tax(&self) -> Result<Decimal, FixtureError> {
        Ok(self.cart_fixture()?.sales_tax)
    }

    /// Replay the cart script into `session`
    ///
    /// # Errors
    ///
    /// Returns an error if no cart fixture is loaded or any operation fails.
    pub fn replay(&self, session: &mut CartSession) -> Result<(), FixtureError> {
        self.cart_fixture()?.replay(&self.inventory, session)
    }

    /// Build the scripted cart, with its total computed at the script's tax rate
    ///
    /// # Errors
    ///
    /// Returns an error if no cart fixture is loaded or any operation fails.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let mut session = CartSession::default();

        self.replay(&mut session)?;

        Ok(session.into_cart().compute_total(self.sales_tax()?))
    }
}

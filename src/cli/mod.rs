use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use cartage::{
    fixtures::FixtureError,
    receipt::{ReceiptError, parse_currency},
    store::StoreError,
    validate::ValidationError,
};

use crate::cli::config::LoggingConfig;

mod checkout;
pub(crate) mod config;
mod inventory;
pub(crate) mod logging;
mod show;

/// Errors reported by the command line.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Fixture files could not be loaded or replayed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Receipt could not be rendered.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Cart store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Command line value failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Output could not be flushed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Store holds no cart for the requested user.
    #[error("no saved cart for user: {0}")]
    NoSavedCart(String),
}

/// Cartage shopping cart CLI
#[derive(Debug, Parser)]
#[command(name = "cartage", about = "Cartage shopping cart CLI", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Fixture base directory
    #[arg(long, env = "CARTAGE_FIXTURES", default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Display currency (GBP, USD, EUR)
    #[arg(long, env = "CARTAGE_CURRENCY", default_value = "USD")]
    currency: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a cart fixture and print its receipt
    Checkout(checkout::CheckoutArgs),

    /// Print a catalog fixture
    Inventory(inventory::InventoryArgs),

    /// Print the receipt for a saved cart
    Show(show::ShowArgs),
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn run(self, out: &mut impl Write) -> Result<(), CliError> {
        let currency = parse_currency(&self.currency)?;

        match self.command {
            Commands::Checkout(args) => checkout::run(args, self.fixtures, currency, out),
            Commands::Inventory(args) => inventory::run(&args, self.fixtures, currency, out),
            Commands::Show(args) => show::run(args, currency, out),
        }?;

        out.flush()?;

        Ok(())
    }
}

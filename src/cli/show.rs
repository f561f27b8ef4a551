use std::{io::Write, path::PathBuf};

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use cartage::{
    receipt::Receipt,
    store::{CartStore, JsonFileCartStore},
    validate::validate_tax_rate,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    /// JSON file carts were saved into
    #[arg(long)]
    store: PathBuf,

    /// Owner of the cart to show
    #[arg(long)]
    user: String,

    /// Sales tax rate as a fraction (e.g. 0.1 for 10%)
    #[arg(long, default_value_t = Decimal::ZERO)]
    sales_tax: Decimal,
}

pub(crate) fn run(
    args: ShowArgs,
    currency: &'static Currency,
    out: &mut impl Write,
) -> Result<(), CliError> {
    validate_tax_rate(args.sales_tax)?;

    let store = JsonFileCartStore::new(args.store);
    let cart = store
        .load(&args.user)?
        .ok_or(CliError::NoSavedCart(args.user))?;

    Receipt::new(&cart, args.sales_tax, currency).write_to(&mut *out)?;

    Ok(())
}

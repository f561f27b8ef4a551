use std::{io::Write, path::PathBuf};

use clap::Args;
use rusty_money::iso::Currency;
use tracing::info;

use cartage::{
    fixtures::Fixture,
    receipt::Receipt,
    session::CartSession,
    store::JsonFileCartStore,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Fixture set name (loads catalog/<set>.yml and carts/<set>.yml)
    #[arg(long)]
    set: String,

    /// JSON file to save the finished cart into
    #[arg(long)]
    store: Option<PathBuf>,
}

pub(crate) fn run(
    args: CheckoutArgs,
    fixtures: PathBuf,
    currency: &'static Currency,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut fixture = Fixture::with_base_path(fixtures);
    fixture.load_catalog(&args.set)?.load_cart(&args.set)?;

    let sales_tax = fixture.sales_tax()?;
    let mut session = CartSession::default();

    fixture.replay(&mut session)?;
    session.update(|cart| cart.compute_total(sales_tax));

    let cart = session.current();
    let receipt = Receipt::new(cart, sales_tax, currency);

    info!(
        set = %args.set,
        user_id = %cart.user_id(),
        lines = cart.len(),
        total = %cart.total(),
        currency = receipt.currency().iso_alpha_code,
        "checked out cart"
    );

    receipt.write_to(&mut *out)?;

    if let Some(path) = args.store {
        let mut store = JsonFileCartStore::new(path);
        session.commit(&mut store)?;

        info!(path = %store.path().display(), "saved cart");
    }

    Ok(())
}

use std::{io::Write, path::PathBuf};

use clap::Args;
use rusty_money::iso::Currency;

use cartage::{fixtures::Fixture, receipt::write_inventory};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct InventoryArgs {
    /// Catalog name (loads catalog/<set>.yml)
    #[arg(long)]
    set: String,
}

pub(crate) fn run(
    args: &InventoryArgs,
    fixtures: PathBuf,
    currency: &'static Currency,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut fixture = Fixture::with_base_path(fixtures);
    fixture.load_catalog(&args.set)?;

    write_inventory(&mut *out, fixture.inventory(), currency)?;

    Ok(())
}

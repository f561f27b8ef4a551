//! Cartage CLI

use std::{io, process::ExitCode};

use tracing::error;

use crate::cli::{Cli, logging};

mod cli;

fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            // clap routes --help and --version through here as well
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    let mut out = io::stdout().lock();

    match cli.run(&mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "command failed");

            #[expect(
                clippy::print_stderr,
                reason = "errors must reach the user even when logging is filtered out"
            )]
            {
                eprintln!("Error: {error}");
            }

            ExitCode::FAILURE
        }
    }
}

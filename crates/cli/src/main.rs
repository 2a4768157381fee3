// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # innkeep - front-desk discount tool
//!
//! - `innkeep validate -d discounts.json` checks a discount catalogue
//! - `innkeep quote ...` prices a booking and prints the breakdown as JSON
//! - `innkeep redeem ...` prices a booking and commits the redemption to
//!   the usage ledger
//! - `innkeep usage --database ledger.db` prints usage statistics
//!
//! Logs go to stderr; JSON results go to stdout.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod catalogue;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use color_eyre::Result;

use crate::args::{Args, Command};
use crate::error::CliError;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(args.command) {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Validate { discounts } => commands::validate(&discounts),
        Command::Quote(quote) => commands::quote(&quote),
        Command::Redeem {
            quote,
            database,
            actor,
            booking_ref,
        } => commands::redeem(&quote, &database, &actor, &booking_ref),
        Command::Usage { database } => commands::usage(&database),
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod args_tests;
mod catalogue_tests;

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::args::{Args, Command, QuoteArgs};

/// The sample catalogue shipped with the crate.
pub fn fixture_catalogue() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/discounts.json")
}

/// A path under the system temp directory unique to this test process.
pub fn temp_path(name: &str, extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "innkeep_cli_{name}_{}.{extension}",
        std::process::id()
    ))
}

/// Quote flags for a three-night airport stay checking in on 2024-03-10,
/// evaluated on 2024-03-01 at 400 per night.
pub fn base_quote_flags(catalogue: &Path) -> Vec<String> {
    [
        "innkeep",
        "quote",
        "--check-in",
        "2024-03-10",
        "--nights",
        "3",
        "--room",
        "101",
        "--category",
        "deluxe",
        "--location",
        "airport",
        "--guests",
        "2",
        "--tourist",
        "--nightly-rate",
        "400",
        "--now",
        "2024-03-01T10:00:00Z",
        "-d",
    ]
    .iter()
    .map(ToString::to_string)
    .chain(std::iter::once(catalogue.display().to_string()))
    .collect()
}

/// Parses quote flags and returns the quote arguments.
pub fn parse_quote_args(flags: &[String]) -> QuoteArgs {
    let args: Args = Args::try_parse_from(flags).expect("quote flags should parse");
    match args.command {
        Command::Quote(quote) => quote,
        other => panic!("expected quote command, got {other:?}"),
    }
}

/// Removes a SQLite database file and its WAL side files.
pub fn remove_database(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(file));
    }
}

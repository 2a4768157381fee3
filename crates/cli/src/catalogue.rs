// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use innkeep_domain::{Discount, validate_catalogue};
use tracing::{debug, info};

use crate::error::CliError;

/// Parses a catalogue from JSON text without validating it.
///
/// # Errors
///
/// Returns `CliError::ParseCatalogue` if the text is not a JSON array of
/// discounts.
pub fn parse_catalogue(path: &Path, text: &str) -> Result<Vec<Discount>, CliError> {
    serde_json::from_str(text).map_err(|source| CliError::ParseCatalogue {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and validates a catalogue file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any
/// discount is misconfigured.
pub fn load_catalogue(path: &Path) -> Result<Vec<Discount>, CliError> {
    let text: String = std::fs::read_to_string(path).map_err(|source| CliError::ReadCatalogue {
        path: path.to_path_buf(),
        source,
    })?;

    let discounts: Vec<Discount> = parse_catalogue(path, &text)?;
    debug!("Parsed {} discounts from {}", discounts.len(), path.display());

    validate_catalogue(&discounts)?;
    info!("Loaded {} discounts from {}", discounts.len(), path.display());

    Ok(discounts)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use innkeep_domain::DomainError;
use innkeep_persistence::PersistenceError;
use thiserror::Error;

/// Errors reported by the operator command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// A catalogue file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    ReadCatalogue {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalogue file is not valid JSON for a list of discounts.
    #[error("Cannot parse {}: {source}", path.display())]
    ParseCatalogue {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A discount, booking or time zone was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The usage ledger failed.
    #[error(transparent)]
    Ledger(#[from] PersistenceError),

    /// Every redemption attempt lost the race for a capped discount.
    #[error("Gave up after {attempts} attempts: {last}")]
    RedemptionContended {
        attempts: usize,
        last: PersistenceError,
    },

    /// Output could not be serialized.
    #[error("Cannot serialize output: {0}")]
    Output(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Cannot write output: {0}")]
    WriteOutput(#[from] std::io::Error),
}

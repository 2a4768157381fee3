// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::{Path, PathBuf};

use innkeep_domain::{Discount, DomainError};

use super::{fixture_catalogue, temp_path};
use crate::catalogue::{load_catalogue, parse_catalogue};
use crate::error::CliError;

#[test]
fn test_fixture_catalogue_loads() {
    let discounts: Vec<Discount> = load_catalogue(&fixture_catalogue()).unwrap();

    assert_eq!(discounts.len(), 6);
    assert_eq!(discounts[0].id.as_deref(), Some("spring-10"));
    assert_eq!(discounts[5].usage_limit.max_uses, Some(1));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let path: PathBuf = temp_path("missing_catalogue", "json");

    let err: CliError = load_catalogue(&path).unwrap_err();
    assert!(matches!(err, CliError::ReadCatalogue { path: p, .. } if p == path));
}

#[test]
fn test_non_array_is_a_parse_error() {
    let path: &Path = Path::new("catalogue.json");

    let err: CliError = parse_catalogue(path, r#"{"name": "Spring"}"#).unwrap_err();
    assert!(matches!(err, CliError::ParseCatalogue { .. }));
    assert!(err.to_string().starts_with("Cannot parse catalogue.json"));
}

#[test]
fn test_unknown_discount_type_is_a_parse_error() {
    let text: &str = r#"[{"name": "Odd", "discountType": "bogo", "discountValue": 1}]"#;

    let err: CliError = parse_catalogue(Path::new("catalogue.json"), text).unwrap_err();
    assert!(matches!(err, CliError::ParseCatalogue { .. }));
}

#[test]
fn test_parse_does_not_validate() {
    let text: &str = r#"[{"name": "No value", "discountType": "percentage"}]"#;

    let discounts: Vec<Discount> = parse_catalogue(Path::new("catalogue.json"), text).unwrap();
    assert_eq!(discounts.len(), 1);
    assert_eq!(discounts[0].discount_value, None);
}

#[test]
fn test_misconfigured_discount_is_rejected_on_load() {
    let path: PathBuf = temp_path("misconfigured_catalogue", "json");
    std::fs::write(
        &path,
        r#"[{"name": "Broken range", "discountType": "percentage", "discountValue": 10,
             "validityType": "date_range", "validFrom": "2024-03-01"}]"#,
    )
    .unwrap();

    let result: Result<Vec<Discount>, CliError> = load_catalogue(&path);
    let _ = std::fs::remove_file(&path);

    match result.unwrap_err() {
        CliError::Domain(DomainError::InvalidDiscount { name, field, .. }) => {
            assert_eq!(name, "Broken range");
            assert_eq!(field, "validFrom");
        }
        other => panic!("expected invalid discount, got {other:?}"),
    }
}

#[test]
fn test_duplicate_ids_are_rejected_on_load() {
    let path: PathBuf = temp_path("duplicate_catalogue", "json");
    std::fs::write(
        &path,
        r#"[{"id": "d1", "name": "A", "discountType": "fixed_amount", "discountValue": 10},
            {"id": "d1", "name": "B", "discountType": "fixed_amount", "discountValue": 20}]"#,
    )
    .unwrap();

    let result: Result<Vec<Discount>, CliError> = load_catalogue(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(
        result.unwrap_err(),
        CliError::Domain(DomainError::DuplicateDiscountId(id)) if id == "d1"
    ));
}

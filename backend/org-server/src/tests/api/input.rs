use crate::{ApiError, parse_id_set, require_text, sanitize_string};

use uuid::Uuid;

#[test]
fn test_sanitize_string_trims() {
    assert_eq!(sanitize_string("  Ada Lovelace \n"), "Ada Lovelace");
}

#[test]
fn test_require_text_rejects_whitespace_with_field() {
    let result = require_text("   ", "name", "Name is required");

    match result {
        Err(ApiError::Validation { message, field, .. }) => {
            assert_eq!(message, "Name is required");
            assert_eq!(field.as_deref(), Some("name"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_require_text_returns_trimmed_value() {
    let email = require_text(" ada@example.com ", "email", "Email is required").unwrap();

    assert_eq!(email, "ada@example.com");
}

#[test]
fn test_parse_id_set_skips_blanks_and_dedups() {
    let id = Uuid::new_v4();
    let ids = vec![id.to_string(), "".into(), format!(" {id} ")];

    let parsed = parse_id_set(&ids, "members").unwrap();

    assert_eq!(parsed.len(), 1);
    assert!(parsed.contains(&id));
}

#[test]
fn test_parse_id_set_reports_field_for_bad_id() {
    let ids = vec!["nope".to_string()];

    let result = parse_id_set(&ids, "departments");

    assert!(matches!(
        result,
        Err(ApiError::Validation { field: Some(ref f), .. }) if f == "departments"
    ));
}

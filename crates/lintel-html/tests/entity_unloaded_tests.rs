//! Integration tests for validation before any entity table is installed.
//!
//! Nothing in this file installs a table, so named entities are never
//! checked.

use lintel_html::entities::{is_known_entity, named_entities_loaded};
use lintel_html::validate;

#[test]
fn test_unknown_entity_is_not_reported_without_table() {
    assert!(validate("&notarealentity;").is_empty());
    assert!(!named_entities_loaded());
    assert_eq!(is_known_entity("amp"), None);
}

#[test]
fn test_syntax_errors_are_still_reported_without_table() {
    let errors = validate("&#;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Invalid token: \"#\"");
}

#[test]
fn test_lookups_without_table_stay_skipped() {
    for _ in 0..3 {
        assert_eq!(is_known_entity("check"), None);
        assert!(validate("&check; &bogus;").is_empty());
    }
    assert!(!named_entities_loaded());
}

//! Tests for the deduplicating warning channel.

use lintel_common::warning::{clear_warnings, warn_once, was_warned};

#[test]
fn test_warn_once_deduplicates_and_clears() {
    clear_warnings();
    assert!(!was_warned("Test", "something was skipped"));

    assert!(warn_once("Test", "something was skipped"));
    assert!(was_warned("Test", "something was skipped"));
    assert!(!warn_once("Test", "something was skipped"));

    // Same message from another component is a different warning
    assert!(warn_once("Other", "something was skipped"));

    clear_warnings();
    assert!(!was_warned("Test", "something was skipped"));
    assert!(warn_once("Test", "something was skipped"));
}

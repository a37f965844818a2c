//! Property tests for the parser over arbitrary input.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use lintel_html::{parse, validate};

/// Markup fragments that exercise every dialect when concatenated.
const FRAGMENTS: &[&str] = &[
    "<div", "<p>", "</p>", "</div>", ">", "<", "&", "&amp;", "&#x41;", "&#;", "=", "\"", "'",
    " ", "\n", "/", "<!--", "-->", "-", "<script>", "</script>", "<br", "a=", "text", "`",
];

/// Helper to build markup-heavy input from arbitrary indices into `FRAGMENTS`
fn markup(picks: &[u8]) -> String {
    picks
        .iter()
        .map(|&pick| FRAGMENTS[usize::from(pick) % FRAGMENTS.len()])
        .collect()
}

#[quickcheck]
fn prop_parse_never_panics(input: String) -> bool {
    let _ = parse(&input);
    true
}

#[quickcheck]
fn prop_parse_never_panics_on_markup(picks: Vec<u8>) -> bool {
    let _ = parse(&markup(&picks));
    true
}

#[quickcheck]
fn prop_reparse_is_identical(picks: Vec<u8>) -> bool {
    let html = markup(&picks);
    parse(&html) == parse(&html) && validate(&html) == validate(&html)
}

#[quickcheck]
fn prop_error_spans_lie_within_input(picks: Vec<u8>) -> TestResult {
    let html = markup(&picks);
    let length = html.chars().count();
    let errors = validate(&html);
    if errors.is_empty() {
        return TestResult::discard();
    }
    TestResult::from_bool(errors.iter().all(|error| {
        error
            .report()
            .is_some_and(|r| r.start_index < r.end_index && r.end_index <= length)
    }))
}

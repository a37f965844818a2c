//! Integration tests for the dialect scanner.

use lintel_html::{Dialect, Scanner, Token, TokenKind};

/// Helper to scan `input` in a single dialect and return every token
fn scan_in(dialect: Dialect, input: &str) -> Vec<Token> {
    let mut scanner = Scanner::html();
    scanner.set_source(input);
    scanner.push_dialect(dialect);
    std::iter::from_fn(|| scanner.next_token()).collect()
}

/// Helper to reduce tokens to (kind, value) pairs
fn kinds_and_values(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens.iter().map(|t| (t.kind, t.value.as_str())).collect()
}

#[test]
fn test_content_tokens() {
    let tokens = scan_in(Dialect::Content, "a <b & &amp; >");
    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Text, "a "),
            (TokenKind::TagStart, "<b"),
            (TokenKind::Text, " "),
            (TokenKind::Error, "&"),
            (TokenKind::Text, " "),
            (TokenKind::EntityStart, "&"),
            (TokenKind::Text, "amp; "),
            (TokenKind::Error, ">"),
        ]
    );
}

#[test]
fn test_bare_lt_is_error_in_content() {
    let tokens = scan_in(Dialect::Content, "1 < 2");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "<");
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = scan_in(Dialect::Content, "ab\ncd<p");
    assert_eq!(tokens.len(), 2);
    assert_eq!((tokens[0].index, tokens[0].line, tokens[0].column), (0, 1, 0));
    assert_eq!((tokens[1].index, tokens[1].line, tokens[1].column), (5, 2, 2));
}

#[test]
fn test_positions_count_characters_not_bytes() {
    let tokens = scan_in(Dialect::Content, "héllo<p");
    assert_eq!(tokens[0].len(), 5);
    assert_eq!(tokens[1].index, 5);
    assert_eq!(tokens[1].column, 5);
}

#[test]
fn test_comment_dialect() {
    let tokens = scan_in(Dialect::Comment, " a - b -->");
    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Text, " a "),
            (TokenKind::Dash, "-"),
            (TokenKind::Text, " b "),
            (TokenKind::CommentEnd, "-->"),
        ]
    );
}

#[test]
fn test_entity_dialect() {
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::Entity, "#x20AC;")),
        vec![(TokenKind::Hex, "#x20AC"), (TokenKind::EntityEnd, ";")]
    );
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::Entity, "#169;")),
        vec![(TokenKind::Dec, "#169"), (TokenKind::EntityEnd, ";")]
    );
    assert_eq!(scan_in(Dialect::Entity, "eacute;")[0].kind, TokenKind::Named);
    assert_eq!(scan_in(Dialect::Entity, "#;")[0].kind, TokenKind::Error);
}

#[test]
fn test_tag_and_attribute_dialects() {
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::Tag, " data-x/>")),
        vec![
            (TokenKind::Whitespace, " "),
            (TokenKind::AttributeStart, "data-x"),
            (TokenKind::SelfClose, "/"),
            (TokenKind::TagEnd, ">"),
        ]
    );
    assert_eq!(scan_in(Dialect::Tag, "=x")[0].kind, TokenKind::Error);
    assert_eq!(scan_in(Dialect::Attribute, "='v'")[0].kind, TokenKind::AttributeValueQuotedStart);
    assert_eq!(scan_in(Dialect::Attribute, "=v")[0].kind, TokenKind::AttributeValueStart);
}

#[test]
fn test_unquoted_value_dialect() {
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::AttributeValue, "a`b c")),
        vec![
            (TokenKind::Text, "a"),
            (TokenKind::Error, "`"),
            (TokenKind::Text, "b"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Text, "c"),
        ]
    );
}

#[test]
fn test_quoted_value_dialect() {
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::AttributeValueQuoted, "a&b'\"")),
        vec![
            (TokenKind::Text, "a"),
            (TokenKind::Error, "&"),
            (TokenKind::Text, "b"),
            (TokenKind::Squo, "'"),
            (TokenKind::Dquo, "\""),
        ]
    );
}

#[test]
fn test_close_tag_dialect() {
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::CloseTag, " junk>")),
        vec![
            (TokenKind::Whitespace, " "),
            (TokenKind::Error, "junk"),
            (TokenKind::TagEnd, ">"),
        ]
    );
}

#[test]
fn test_rawtext_dialect() {
    assert_eq!(
        kinds_and_values(&scan_in(Dialect::Rawtext, "a<b</script>")),
        vec![
            (TokenKind::Text, "a"),
            (TokenKind::Lt, "<"),
            (TokenKind::Text, "b"),
            (TokenKind::CloseTag, "</script>"),
        ]
    );
}

#[test]
fn test_dialect_stack() {
    let mut scanner = Scanner::html();
    scanner.set_source("x");
    assert_eq!(scanner.current_dialect(), None);
    scanner.push_dialect(Dialect::Content);
    scanner.push_dialect(Dialect::Tag);
    assert_eq!(scanner.current_dialect(), Some(Dialect::Tag));
    assert_eq!(scanner.pop_dialect(), Dialect::Tag);
    assert_eq!(scanner.current_dialect(), Some(Dialect::Content));

    scanner.set_source("y");
    assert_eq!(scanner.current_dialect(), None);
}

#[test]
#[should_panic(expected = "empty dialect stack")]
fn test_pop_empty_dialect_stack_panics() {
    let mut scanner = Scanner::html();
    let _ = scanner.pop_dialect();
}

#[test]
fn test_end_of_input() {
    let mut scanner = Scanner::html();
    scanner.set_source("");
    scanner.push_dialect(Dialect::Content);
    assert!(scanner.is_at_end());
    assert_eq!(scanner.next_token(), None);
}

//! Lexical dialects and the HTML grammar.
//!
//! A dialect is a named, ordered list of rules. The scanner tries the rules of
//! the dialect on top of its stack in order and the first rule whose pattern
//! matches at the cursor wins. Every dialect below is exhaustive: some rule
//! always matches at least one character, so scanning cannot stall.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::token::TokenKind;

/// A lexical context of the HTML grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Dialect {
    /// Content outside of any tag.
    Content,
    /// Inside `<!-- ... -->`.
    Comment,
    /// Inside `&...;`.
    Entity,
    /// Inside a start tag, between attributes.
    Tag,
    /// After an attribute name, before its value.
    Attribute,
    /// Inside an unquoted attribute value.
    AttributeValue,
    /// Inside a single- or double-quoted attribute value.
    AttributeValueQuoted,
    /// Inside `</name ... >`.
    CloseTag,
    /// Body of `script`, `style` and `xmp` elements.
    Rawtext,
}

/// One lexical rule: a token kind and the pattern that produces it.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: TokenKind,
    pattern: Regex,
    lookahead: Option<Regex>,
}

impl Rule {
    /// Create a rule whose pattern is matched at the scan cursor.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Grammar patterns
    /// are compile-time constants, so this indicates a bug in the grammar.
    #[must_use]
    pub fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: anchored(pattern),
            lookahead: None,
        }
    }

    /// Require `lookahead` to match right after the consumed text without
    /// consuming it.
    ///
    /// # Panics
    ///
    /// Panics if `lookahead` is not a valid regular expression.
    #[must_use]
    pub fn followed_by(mut self, lookahead: &str) -> Self {
        self.lookahead = Some(anchored(lookahead));
        self
    }

    /// The kind of token this rule produces.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Try the rule against the start of `input`, returning the byte length
    /// of the match.
    ///
    /// Empty matches are rejected so that a successful match always advances
    /// the scanner.
    #[must_use]
    pub fn match_len(&self, input: &str) -> Option<usize> {
        let found = self.pattern.find(input)?;
        let len = found.end();
        if len == 0 {
            return None;
        }
        if let Some(lookahead) = &self.lookahead
            && !lookahead.is_match(&input[len..])
        {
            return None;
        }
        Some(len)
    }
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})"))
        .unwrap_or_else(|e| panic!("invalid grammar pattern {pattern:?}: {e}"))
}

/// A complete set of dialects.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    dialects: HashMap<Dialect, Vec<Rule>>,
}

impl Grammar {
    /// Create an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule list of `dialect`.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect, rules: Vec<Rule>) -> Self {
        let _ = self.dialects.insert(dialect, rules);
        self
    }

    /// The ordered rules of `dialect`; empty if the dialect is not defined.
    #[must_use]
    pub fn rules(&self, dialect: Dialect) -> &[Rule] {
        self.dialects.get(&dialect).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if every [`Dialect`] has at least one rule.
    #[must_use]
    pub fn defines_all_dialects(&self) -> bool {
        Dialect::iter().all(|dialect| !self.rules(dialect).is_empty())
    }

    /// The grammar of HTML as seen by the validator.
    #[must_use]
    pub fn html() -> Self {
        use TokenKind as K;

        // `&` only starts an entity when a plausible reference follows.
        let entity_start = || Rule::new(K::EntityStart, "&").followed_by("[a-zA-Z0-9#]+;");
        let attribute_start = || Rule::new(K::AttributeStart, r"[^>=\s/]+");

        Self::new()
            .with_dialect(
                Dialect::Content,
                vec![
                    Rule::new(K::Text, "[^<>&]+"),
                    Rule::new(K::CommentStart, "<!--"),
                    entity_start(),
                    Rule::new(K::TagStart, r"<[a-zA-Z][^\t\n />\x00\xFF]*"),
                    Rule::new(K::CloseTagStart, r"</[a-zA-Z][^\t\n />\x00\xFF]*"),
                    Rule::new(K::Error, "[<>&]"),
                ],
            )
            .with_dialect(
                Dialect::Comment,
                vec![
                    Rule::new(K::CommentEnd, "-->"),
                    Rule::new(K::Dash, "-"),
                    Rule::new(K::Text, "[^-]+"),
                ],
            )
            .with_dialect(
                Dialect::Entity,
                vec![
                    Rule::new(K::EntityEnd, ";"),
                    Rule::new(K::Hex, "#[xX][a-fA-F0-9]+"),
                    Rule::new(K::Dec, "#[0-9]+"),
                    Rule::new(K::Named, "[a-zA-Z][a-zA-Z0-9]*"),
                    Rule::new(K::Error, "(?s:.)"),
                ],
            )
            .with_dialect(
                Dialect::Tag,
                vec![
                    Rule::new(K::TagEnd, ">"),
                    Rule::new(K::Whitespace, r"\s+"),
                    Rule::new(K::SelfClose, "/"),
                    Rule::new(K::Error, r#"['"<=]"#),
                    attribute_start(),
                ],
            )
            .with_dialect(
                Dialect::Attribute,
                vec![
                    Rule::new(K::Whitespace, r"\s+"),
                    Rule::new(K::AttributeValueQuotedStart, r#"=['"]"#),
                    Rule::new(K::AttributeValueStart, "="),
                    Rule::new(K::TagEnd, ">"),
                    Rule::new(K::SelfClose, "/"),
                    Rule::new(K::Error, r#"['"<]"#),
                    attribute_start(),
                ],
            )
            .with_dialect(
                Dialect::AttributeValue,
                vec![
                    Rule::new(K::Whitespace, r"\s+"),
                    entity_start(),
                    Rule::new(K::TagEnd, ">"),
                    Rule::new(K::Error, r#"['"<=`&]"#),
                    Rule::new(K::Text, r#"[^'"<>=`&\s]+"#),
                ],
            )
            .with_dialect(
                Dialect::AttributeValueQuoted,
                vec![
                    Rule::new(K::Dquo, "\""),
                    Rule::new(K::Squo, "'"),
                    entity_start(),
                    Rule::new(K::Error, "&"),
                    Rule::new(K::Text, r#"[^"'&]+"#),
                ],
            )
            .with_dialect(
                Dialect::CloseTag,
                vec![
                    Rule::new(K::TagEnd, ">"),
                    Rule::new(K::Whitespace, r"\s+"),
                    Rule::new(K::Error, r"[^\s>]+"),
                ],
            )
            .with_dialect(
                Dialect::Rawtext,
                vec![
                    Rule::new(K::CloseTag, r"</[a-zA-Z]+\s*>"),
                    Rule::new(K::Text, "[^<]+"),
                    Rule::new(K::Lt, "<"),
                ],
            )
    }
}

/// The process-wide HTML grammar, compiled on first use and immutable after.
pub static HTML_GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::html);

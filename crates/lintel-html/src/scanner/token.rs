use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// The lexical category of a [`Token`].
///
/// Every rule in every dialect of the grammar produces exactly one of these.
/// Names display in camelCase (`tagStart`, `attributeValueQuotedStart`, ...),
/// which is also the form used in op traces and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// A run of literal text.
    Text,
    /// `<!--`
    CommentStart,
    /// `-->`
    CommentEnd,
    /// A single `-` inside a comment.
    Dash,
    /// The `&` that begins an entity reference.
    EntityStart,
    /// The `;` that ends an entity reference.
    EntityEnd,
    /// A hexadecimal entity body, `#x20AC`.
    Hex,
    /// A decimal entity body, `#8364`.
    Dec,
    /// A named entity body, `eacute`.
    Named,
    /// `<` followed by a tag name.
    TagStart,
    /// `</` followed by a tag name.
    CloseTagStart,
    /// `>`
    TagEnd,
    /// A run of whitespace.
    Whitespace,
    /// The `/` self-closing marker.
    SelfClose,
    /// An attribute name.
    AttributeStart,
    /// `=` introducing an unquoted attribute value.
    AttributeValueStart,
    /// `="` or `='` introducing a quoted attribute value.
    AttributeValueQuotedStart,
    /// A double quote inside a quoted attribute value.
    Dquo,
    /// A single quote inside a quoted attribute value.
    Squo,
    /// A complete `</name>` inside raw text.
    CloseTag,
    /// A bare `<` inside raw text.
    Lt,
    /// Anything the current dialect considers malformed.
    Error,
}

/// A positioned lexeme produced by the [`Scanner`](super::Scanner).
///
/// Tokens are immutable once scanned, with one exception: the compiler may
/// reclassify a stray quote inside a quoted attribute value as [`TokenKind::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The token's lexical category.
    pub kind: TokenKind,
    /// The exact source text matched.
    pub value: String,
    /// 0-based character offset of the first character in the source.
    pub index: usize,
    /// 1-based line of the first character.
    pub line: usize,
    /// 0-based column (characters since the last newline) of the first character.
    pub column: usize,
}

impl Token {
    /// Create a token from its parts.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, index: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            index,
            line,
            column,
        }
    }

    /// Length of the token's value in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns true if the token matched no text.
    ///
    /// The scanner never produces such tokens; this exists for completeness
    /// next to [`Token::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns true if this is an `error` token.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}:{}", self.kind, self.value, self.line, self.column)
    }
}

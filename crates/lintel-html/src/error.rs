//! Positioned parse diagnostics.
//!
//! A [`ParseError`] is a domain error: malformed HTML is the normal input of
//! a validator, so errors are collected on the nodes they concern and never
//! abort parsing. Positions are derived from the tokens attached to the error.

use core::fmt;

use serde::Serialize;

use crate::node::Node;
use crate::scanner::Token;

/// A syntactic or structural problem found in the HTML source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    message: String,
    /// Always sorted ascending by [`Token::index`].
    tokens: Vec<Token>,
}

/// Flattened, serializable view of a [`ParseError`]'s position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// The error message.
    pub message: String,
    /// Character offset where the error begins.
    pub start_index: usize,
    /// Character offset just past the end of the error.
    pub end_index: usize,
    /// 1-based line where the error begins.
    pub line: usize,
    /// 0-based column where the error begins.
    pub column: usize,
}

impl ParseError {
    /// Create an error with a message and no tokens yet.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tokens: Vec::new(),
        }
    }

    /// Create an error located at a single token.
    #[must_use]
    pub fn at_token(message: impl Into<String>, token: &Token) -> Self {
        let mut error = Self::new(message);
        error.add_token(token.clone());
        error
    }

    /// Create an error spanning every token of `node`.
    #[must_use]
    pub fn at_node(message: impl Into<String>, node: &Node) -> Self {
        let mut error = Self::new(message);
        error.add_tokens_from(node);
        error
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The tokens this error refers to, sorted by index.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Attach a token, keeping the token list sorted by index.
    pub fn add_token(&mut self, token: Token) {
        let at = self.tokens.partition_point(|t| t.index <= token.index);
        self.tokens.insert(at, token);
    }

    /// Attach every token of `node`.
    pub fn add_tokens_from(&mut self, node: &Node) {
        for token in node.tokens() {
            self.add_token(token.clone());
        }
    }

    /// Returns true if at least one token has been attached, which is
    /// required before any position accessor may be called.
    #[must_use]
    pub fn has_position(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// The offset in the source where the error begins.
    ///
    /// # Panics
    ///
    /// Panics if no tokens have been attached.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.first_token().index
    }

    /// The offset in the source just past where the error ends.
    ///
    /// # Panics
    ///
    /// Panics if no tokens have been attached.
    #[must_use]
    pub fn end_index(&self) -> usize {
        let last = self.last_token();
        last.index + last.len()
    }

    /// The line in the source where the error begins.
    ///
    /// # Panics
    ///
    /// Panics if no tokens have been attached.
    #[must_use]
    pub fn line(&self) -> usize {
        self.first_token().line
    }

    /// The column of the line in the source where the error begins.
    ///
    /// # Panics
    ///
    /// Panics if no tokens have been attached.
    #[must_use]
    pub fn column(&self) -> usize {
        self.first_token().column
    }

    /// Positioned view of this error, or `None` if it has no tokens.
    #[must_use]
    pub fn report(&self) -> Option<ErrorReport> {
        self.has_position().then(|| ErrorReport {
            message: self.message.clone(),
            start_index: self.start_index(),
            end_index: self.end_index(),
            line: self.line(),
            column: self.column(),
        })
    }

    fn first_token(&self) -> &Token {
        self.tokens
            .first()
            .unwrap_or_else(|| panic!("No tokens added to error object."))
    }

    fn last_token(&self) -> &Token {
        self.tokens
            .last()
            .unwrap_or_else(|| panic!("No tokens added to error object."))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_position() {
            write!(f, "{}:{}: {}", self.line(), self.column(), self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

use super::dialect::{Dialect, Grammar, HTML_GRAMMAR};
use super::token::{Token, TokenKind};

/// A dialect-driven, position-tracking scanner.
///
/// The scanner keeps a stack of [`Dialect`]s over a source string.
/// [`Scanner::next_token`] matches the rules of the dialect on top of the
/// stack against the remaining input; the first matching rule wins and the
/// cursor advances by the length of the match.
pub struct Scanner {
    grammar: &'static Grammar,
    source: String,
    /// Byte offset of the cursor into `source`.
    position: usize,
    /// Character offset of the cursor, reported as [`Token::index`].
    char_index: usize,
    line: usize,
    column: usize,
    dialects: Vec<Dialect>,
}

impl Scanner {
    /// Create a scanner over an empty source using `grammar`.
    #[must_use]
    pub fn new(grammar: &'static Grammar) -> Self {
        Self {
            grammar,
            source: String::new(),
            position: 0,
            char_index: 0,
            line: 1,
            column: 0,
            dialects: Vec::new(),
        }
    }

    /// Create a scanner using the HTML grammar.
    #[must_use]
    pub fn html() -> Self {
        Self::new(&HTML_GRAMMAR)
    }

    /// Replace the source text, rewinding the cursor and clearing the
    /// dialect stack.
    pub fn set_source(&mut self, source: &str) {
        source.clone_into(&mut self.source);
        self.position = 0;
        self.char_index = 0;
        self.line = 1;
        self.column = 0;
        self.dialects.clear();
    }

    /// Enter `dialect`.
    pub fn push_dialect(&mut self, dialect: Dialect) {
        self.dialects.push(dialect);
    }

    /// Leave the current dialect.
    ///
    /// # Panics
    ///
    /// Panics if the dialect stack is empty, which indicates unbalanced
    /// push/pop calls in the compiler.
    pub fn pop_dialect(&mut self) -> Dialect {
        self.dialects
            .pop()
            .unwrap_or_else(|| panic!("pop_dialect called on an empty dialect stack"))
    }

    /// The dialect on top of the stack, or `None` if the stack is empty.
    #[must_use]
    pub fn current_dialect(&self) -> Option<Dialect> {
        self.dialects.last().copied()
    }

    /// Returns true once the whole source has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Scan the next token in the current dialect.
    ///
    /// Returns `None` at end of input. If no rule of the current dialect
    /// matches, a single-character `error` token is produced so that the
    /// scan always makes progress.
    ///
    /// # Panics
    ///
    /// Panics if the dialect stack is empty while input remains.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.is_at_end() {
            return None;
        }

        let dialect = self
            .current_dialect()
            .unwrap_or_else(|| panic!("next_token called with an empty dialect stack"));
        let rest = &self.source[self.position..];

        let (kind, len) = self
            .grammar
            .rules(dialect)
            .iter()
            .find_map(|rule| rule.match_len(rest).map(|len| (rule.kind(), len)))
            .unwrap_or_else(|| {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                (TokenKind::Error, len)
            });

        let value = rest[..len].to_string();
        let token = Token::new(kind, value, self.char_index, self.line, self.column);
        self.advance_over(len);
        Some(token)
    }

    /// Move the cursor forward by `len` bytes, keeping line and column in step.
    fn advance_over(&mut self, len: usize) {
        let consumed = &self.source[self.position..self.position + len];
        for c in consumed.chars() {
            self.char_index += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.position += len;
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::html()
    }
}

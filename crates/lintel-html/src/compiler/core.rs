use crate::node::{Node, close_tag_name};
use crate::scanner::{Dialect, Scanner, Token, TokenKind};

use super::op::Op;

/// Translates scanner tokens into parser [`Op`]s.
///
/// The compiler owns the scanner and drives its dialect stack: every token is
/// interpreted in the dialect that was current when it was scanned, and the
/// transition for that (dialect, token) pair decides both the ops to emit and
/// the next dialect.
pub struct Compiler {
    scanner: Scanner,
    /// Quote kind (`dquo` or `squo`) that ends the current quoted value.
    expected_attribute_value_end: Option<TokenKind>,
    /// Lowercased name of the element whose raw-text body is being scanned.
    expected_rawtext_closing_tag_name: Option<String>,
}

impl Compiler {
    /// Create a compiler with no input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scanner: Scanner::html(),
            expected_attribute_value_end: None,
            expected_rawtext_closing_tag_name: None,
        }
    }

    /// Start compiling `html` from the `content` dialect.
    pub fn set_input(&mut self, html: &str) {
        self.scanner.set_source(html);
        self.scanner.push_dialect(Dialect::Content);
        self.expected_attribute_value_end = None;
        self.expected_rawtext_closing_tag_name = None;
    }

    /// Scan the body of a `name` element as raw text until `</name>`.
    pub fn set_rawtext_mode_for_tag(&mut self, name: &str) {
        log::debug!(target: "lintel_html::compiler", "entering rawtext mode for <{name}>");
        self.scanner.push_dialect(Dialect::Rawtext);
        self.set_expected_rawtext_closing_tag_name(name);
    }

    /// Set the closing tag name that ends raw-text mode. Stored lowercased.
    pub fn set_expected_rawtext_closing_tag_name(&mut self, name: &str) {
        self.expected_rawtext_closing_tag_name = Some(name.to_lowercase());
    }

    /// The closing tag name that ends raw-text mode, if in raw-text mode.
    #[must_use]
    pub fn expected_rawtext_closing_tag_name(&self) -> Option<&str> {
        self.expected_rawtext_closing_tag_name.as_deref()
    }

    /// The quote kind that ends the current quoted attribute value.
    #[must_use]
    pub const fn expected_attribute_value_end(&self) -> Option<TokenKind> {
        self.expected_attribute_value_end
    }

    /// The dialect the next token will be scanned in.
    ///
    /// # Panics
    ///
    /// Panics if the dialect stack is empty, which means the transitions
    /// popped more dialects than they pushed.
    #[must_use]
    pub fn current_dialect(&self) -> Dialect {
        self.scanner
            .current_dialect()
            .unwrap_or_else(|| panic!("compiler dialect stack is empty"))
    }

    /// Scan one token and return the ops for it, or `None` once the input
    /// is exhausted.
    pub fn generate_next_code_fragment(&mut self) -> Option<Vec<Op>> {
        if self.scanner.is_at_end() {
            return None;
        }
        let dialect = self.current_dialect();
        let token = self.scanner.next_token()?;
        Some(self.ops_for_token_in_dialect(token, dialect))
    }

    /// Ops for `token` as seen in `dialect`, applying the transition's
    /// dialect-stack and state changes.
    ///
    /// # Panics
    ///
    /// Panics if `token` has no transition in `dialect`. The grammar only
    /// produces tokens the dialect knows, so this indicates a bug.
    pub fn ops_for_token_in_dialect(&mut self, token: Token, dialect: Dialect) -> Vec<Op> {
        match dialect {
            Dialect::Content => self.ops_for_content_token(token),
            Dialect::Comment => self.ops_for_comment_token(token),
            Dialect::Entity => self.ops_for_entity_token(token),
            Dialect::Tag => self.ops_for_tag_token(token),
            Dialect::Attribute => self.ops_for_attribute_token(token),
            Dialect::AttributeValue => self.ops_for_attribute_value_token(token),
            Dialect::AttributeValueQuoted => self.ops_for_attribute_value_quoted_token(token),
            Dialect::CloseTag => self.ops_for_close_tag_token(token),
            Dialect::Rawtext => self.ops_for_rawtext_token(token),
        }
    }

    fn ops_for_content_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::Text | TokenKind::Error => leaf(Node::text(), token),
            TokenKind::CommentStart => self.enter(Dialect::Comment, Node::comment(), token),
            TokenKind::EntityStart => self.enter(Dialect::Entity, Node::entity(), token),
            TokenKind::TagStart => self.enter(Dialect::Tag, Node::tag(), token),
            TokenKind::CloseTagStart => self.enter(Dialect::CloseTag, Node::close_tag(), token),
            _ => unknown_token(Dialect::Content, &token),
        }
    }

    fn ops_for_comment_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::Text | TokenKind::Dash => vec![Op::AddToken(token)],
            TokenKind::CommentEnd => self.finish(token),
            _ => unknown_token(Dialect::Comment, &token),
        }
    }

    fn ops_for_entity_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::Hex | TokenKind::Dec | TokenKind::Named => vec![Op::AddToken(token)],
            TokenKind::EntityEnd | TokenKind::Error => self.finish(token),
            _ => unknown_token(Dialect::Entity, &token),
        }
    }

    fn ops_for_tag_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::TagEnd => self.finish(token),
            TokenKind::Whitespace | TokenKind::SelfClose => vec![Op::AddToken(token)],
            TokenKind::AttributeStart | TokenKind::Error => {
                self.enter(Dialect::Attribute, Node::attr(), token)
            }
            _ => unknown_token(Dialect::Tag, &token),
        }
    }

    fn ops_for_attribute_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::AttributeValueQuotedStart => {
                self.expected_attribute_value_end = Some(if token.value.ends_with('"') {
                    TokenKind::Dquo
                } else {
                    TokenKind::Squo
                });
                self.begin_attribute_value(Dialect::AttributeValueQuoted, token)
            }
            TokenKind::AttributeValueStart => {
                self.begin_attribute_value(Dialect::AttributeValue, token)
            }
            TokenKind::Whitespace => vec![Op::AddToken(token)],
            TokenKind::TagEnd => self.end_tag_from_attribute(token),
            TokenKind::SelfClose => {
                let _ = self.scanner.pop_dialect();
                vec![Op::PopNode, Op::AddToken(token)]
            }
            TokenKind::AttributeStart | TokenKind::Error => {
                vec![Op::PopNode, Op::PushNode(Node::attr()), Op::AddToken(token)]
            }
            _ => unknown_token(Dialect::Attribute, &token),
        }
    }

    fn ops_for_attribute_value_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::Whitespace => {
                let _ = self.scanner.pop_dialect();
                vec![Op::PopNode, Op::AddToken(token)]
            }
            TokenKind::EntityStart => self.enter(Dialect::Entity, Node::entity(), token),
            TokenKind::TagEnd => self.end_tag_from_attribute(token),
            TokenKind::Text | TokenKind::Error => vec![Op::AddToken(token)],
            _ => unknown_token(Dialect::AttributeValue, &token),
        }
    }

    fn ops_for_attribute_value_quoted_token(&mut self, mut token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::Dquo | TokenKind::Squo => {
                if self.expected_attribute_value_end == Some(token.kind) {
                    self.expected_attribute_value_end = None;
                    self.finish(token)
                } else {
                    // The other quote character is part of the value.
                    token.kind = TokenKind::Text;
                    vec![Op::AddToken(token)]
                }
            }
            TokenKind::EntityStart => self.enter(Dialect::Entity, Node::entity(), token),
            TokenKind::Text | TokenKind::Error => vec![Op::AddToken(token)],
            _ => unknown_token(Dialect::AttributeValueQuoted, &token),
        }
    }

    fn ops_for_close_tag_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::Whitespace | TokenKind::Error => vec![Op::AddToken(token)],
            TokenKind::TagEnd => self.finish(token),
            _ => unknown_token(Dialect::CloseTag, &token),
        }
    }

    fn ops_for_rawtext_token(&mut self, token: Token) -> Vec<Op> {
        match token.kind {
            TokenKind::CloseTag if self.closes_rawtext(&token) => {
                let _ = self.scanner.pop_dialect();
                self.expected_rawtext_closing_tag_name = None;
                leaf(Node::close_tag(), token)
            }
            TokenKind::CloseTag | TokenKind::Text | TokenKind::Lt => leaf(Node::text(), token),
            _ => unknown_token(Dialect::Rawtext, &token),
        }
    }

    fn closes_rawtext(&self, token: &Token) -> bool {
        let name = close_tag_name(&token.value);
        self.expected_rawtext_closing_tag_name.as_deref() == Some(name.as_str())
    }

    /// Push `dialect` and start building `node` from `token`.
    fn enter(&mut self, dialect: Dialect, node: Node, token: Token) -> Vec<Op> {
        self.scanner.push_dialect(dialect);
        vec![Op::PushNode(node), Op::AddToken(token)]
    }

    /// Feed the final token of the current node and complete it.
    fn finish(&mut self, token: Token) -> Vec<Op> {
        let _ = self.scanner.pop_dialect();
        vec![Op::AddToken(token), Op::PopNode]
    }

    /// Swap the `attribute` dialect for a value dialect; the value tokens
    /// keep feeding the same attribute node.
    fn begin_attribute_value(&mut self, dialect: Dialect, token: Token) -> Vec<Op> {
        let _ = self.scanner.pop_dialect();
        self.scanner.push_dialect(dialect);
        vec![Op::AddToken(token)]
    }

    /// `>` inside an attribute: completes both the attribute and its tag.
    fn end_tag_from_attribute(&mut self, token: Token) -> Vec<Op> {
        let _ = self.scanner.pop_dialect();
        let _ = self.scanner.pop_dialect();
        vec![Op::PopNode, Op::AddToken(token), Op::PopNode]
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete single-token node.
fn leaf(node: Node, token: Token) -> Vec<Op> {
    vec![Op::PushNode(node), Op::AddToken(token), Op::PopNode]
}

fn unknown_token(dialect: Dialect, token: &Token) -> ! {
    panic!(
        "unknown token type {} in {dialect} dialect: {token}. This indicates a grammar/compiler mismatch.",
        token.kind
    )
}

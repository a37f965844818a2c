use strum_macros::{Display, EnumString};

use crate::entities::is_known_entity;
use crate::error::ParseError;
use crate::scanner::{Token, TokenKind};

use super::tree::NodeId;

/// Elements that can never have children or a closing tag.
pub const VOID_TAGS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose body is scanned as raw text up to their own closing tag.
pub const RAWTEXT_TAGS: [&str; 3] = ["script", "style", "xmp"];

/// The payload-free discriminant of a [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum NodeType {
    /// The root of a parse tree.
    #[strum(serialize = "ROOT")]
    Root,
    /// A start tag and, once closed, its element.
    #[strum(serialize = "TAG")]
    Tag,
    /// An attribute of a tag.
    #[strum(serialize = "ATTR")]
    Attr,
    /// A run of text.
    #[strum(serialize = "TEXT")]
    Text,
    /// A character reference.
    #[strum(serialize = "ENT")]
    Entity,
    /// A comment.
    #[strum(serialize = "CMNT")]
    Comment,
    /// A closing tag.
    #[strum(serialize = "CLOSE")]
    CloseTag,
}

/// Tag-specific state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagData {
    /// Lowercased tag name.
    pub name: String,
    /// Attribute nodes, in source order.
    pub attributes: Vec<NodeId>,
    /// The closing tag that explicitly closed this element, if any.
    pub closing_tag: Option<NodeId>,
}

/// Attribute-specific state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrData {
    /// Lowercased attribute name; empty when the attribute began with a
    /// malformed token.
    pub name: String,
    /// Concatenated value text, without delimiting quotes.
    pub value: String,
}

/// The variant-specific part of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The root of the tree.
    Root,
    /// A tag.
    Tag(TagData),
    /// An attribute.
    Attr(AttrData),
    /// Text content.
    Text(String),
    /// Comment text, without `<!--` and `-->`.
    Comment(String),
    /// Entity body, without `&` and `;` (`gt`, `#x20AC`).
    Entity(String),
    /// Lowercased name of the tag being closed.
    CloseTag(String),
}

impl NodeKind {
    /// The discriminant of this kind.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Root => NodeType::Root,
            Self::Tag(_) => NodeType::Tag,
            Self::Attr(_) => NodeType::Attr,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
            Self::Entity(_) => NodeType::Entity,
            Self::CloseTag(_) => NodeType::CloseTag,
        }
    }
}

/// A node of the parse tree.
///
/// Nodes accumulate the tokens they were built from, in arrival order, and
/// every variant derives its state (names, text, values) from those tokens
/// alone. Structural relationships live in the [`ParseTree`](super::ParseTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(super) kind: NodeKind,
    pub(super) tokens: Vec<Token>,
    pub(super) children: Vec<NodeId>,
    pub(super) errors: Vec<ParseError>,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            tokens: Vec::new(),
            children: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// A new root node.
    #[must_use]
    pub fn root() -> Self {
        Self::with_kind(NodeKind::Root)
    }

    /// A new, unnamed tag node. The name arrives with its `tagStart` token.
    #[must_use]
    pub fn tag() -> Self {
        Self::with_kind(NodeKind::Tag(TagData::default()))
    }

    /// A new tag node with a known name.
    #[must_use]
    pub fn tag_named(name: &str) -> Self {
        let mut node = Self::tag();
        node.set_tag_name(name);
        node
    }

    /// A new attribute node.
    #[must_use]
    pub fn attr() -> Self {
        Self::with_kind(NodeKind::Attr(AttrData::default()))
    }

    /// A new text node.
    #[must_use]
    pub fn text() -> Self {
        Self::with_kind(NodeKind::Text(String::new()))
    }

    /// A new comment node.
    #[must_use]
    pub fn comment() -> Self {
        Self::with_kind(NodeKind::Comment(String::new()))
    }

    /// A new entity node.
    #[must_use]
    pub fn entity() -> Self {
        Self::with_kind(NodeKind::Entity(String::new()))
    }

    /// A new, unnamed closing tag node.
    #[must_use]
    pub fn close_tag() -> Self {
        Self::with_kind(NodeKind::CloseTag(String::new()))
    }

    /// A new closing tag node with a known name.
    #[must_use]
    pub fn close_tag_named(name: &str) -> Self {
        let mut node = Self::close_tag();
        node.set_tag_name(name);
        node
    }

    /// The variant-specific state.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The node's type.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// The tokens this node was built from, in arrival order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Errors attached directly to this node.
    #[must_use]
    pub fn own_errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Attach an error to this node.
    pub fn add_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Tag or closing-tag name, if this is one.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tag(data) => Some(&data.name),
            NodeKind::CloseTag(name) => Some(name),
            _ => None,
        }
    }

    /// Set the (lowercased) name of a tag or closing tag.
    ///
    /// # Panics
    ///
    /// Panics if called on any other kind of node.
    pub fn set_tag_name(&mut self, name: &str) {
        match &mut self.kind {
            NodeKind::Tag(data) => data.name = name.to_lowercase(),
            NodeKind::CloseTag(tag_name) => *tag_name = name.to_lowercase(),
            other => panic!("set_tag_name called on {} node", other.node_type()),
        }
    }

    /// Whether children may be appended to this node.
    #[must_use]
    pub fn can_have_children(&self) -> bool {
        match &self.kind {
            NodeKind::Root => true,
            NodeKind::Tag(data) => !VOID_TAGS.contains(&data.name.as_str()),
            _ => false,
        }
    }

    /// Whether this is a tag whose body is raw text (`script`, `style`, `xmp`).
    #[must_use]
    pub fn has_rawtext_content(&self) -> bool {
        matches!(&self.kind, NodeKind::Tag(data) if RAWTEXT_TAGS.contains(&data.name.as_str()))
    }

    /// Source span covered by this node's tokens, as inclusive character
    /// offsets `(first, last)`, or `None` if no tokens were added yet.
    #[must_use]
    pub fn index_range(&self) -> Option<(usize, usize)> {
        let first = self.tokens.first()?;
        let last = self.tokens.last()?;
        Some((first.index, (last.index + last.len()).saturating_sub(1)))
    }

    /// Feed a token to this node.
    ///
    /// The token is recorded and folded into the variant's state. Tokens of
    /// kind `error` additionally produce an `Invalid token` error on the node.
    pub fn add_token(&mut self, token: Token) {
        if token.is_error() {
            let message = format!("Invalid token: \"{}\"", token.value);
            self.add_error(ParseError::at_token(message, &token));
        }

        match &mut self.kind {
            NodeKind::Root => {}
            NodeKind::Tag(data) => {
                if token.kind == TokenKind::TagStart {
                    let name = token.value.strip_prefix('<').unwrap_or(&token.value);
                    data.name = name.to_lowercase();
                }
            }
            NodeKind::Attr(data) => match token.kind {
                TokenKind::AttributeStart => data.name = token.value.to_lowercase(),
                TokenKind::Text | TokenKind::Error => data.value.push_str(&token.value),
                _ => {}
            },
            NodeKind::Text(text) => text.push_str(&token.value),
            NodeKind::Comment(text) => {
                if !matches!(token.kind, TokenKind::CommentStart | TokenKind::CommentEnd) {
                    text.push_str(&token.value);
                }
            }
            NodeKind::Entity(entity) => {
                if !matches!(token.kind, TokenKind::EntityStart | TokenKind::EntityEnd) {
                    token.value.clone_into(entity);
                }
                if token.kind == TokenKind::Named && is_known_entity(&token.value) == Some(false) {
                    let message = format!("Invalid HTML entity name for \"&{};\".", token.value);
                    self.errors.push(ParseError::at_token(message, &token));
                }
            }
            NodeKind::CloseTag(name) => match token.kind {
                TokenKind::CloseTagStart => {
                    let bare = token.value.strip_prefix("</").unwrap_or(&token.value);
                    *name = bare.to_lowercase();
                }
                TokenKind::CloseTag => *name = close_tag_name(&token.value),
                _ => {}
            },
        }

        self.tokens.push(token);
    }
}

/// Extract the lowercased name from a complete `</name >` token.
pub(crate) fn close_tag_name(value: &str) -> String {
    let inner = value.strip_prefix("</").unwrap_or(value);
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    inner.trim().to_lowercase()
}

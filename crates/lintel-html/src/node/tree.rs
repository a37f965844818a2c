use core::fmt;

use crate::error::ParseError;

use super::data::{Node, NodeKind};

/// Index of a node in a [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Arena of parse-tree nodes.
///
/// Nodes are owned by the arena and refer to each other by [`NodeId`].
/// Nodes are only ever added; an id stays valid for the life of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
}

impl ParseTree {
    /// Create a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    /// The root node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena, root included. Attributes and closing
    /// tags count as nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move `node` into the arena, returning its id. The node is detached
    /// until it is appended somewhere.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a node mutably by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Children of `id`, in document order. Empty for nodes that cannot
    /// have children.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The last child of `id`, if any.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Attributes of a tag, in source order. Empty for other nodes.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[NodeId] {
        match self.node(id).kind() {
            NodeKind::Tag(data) => &data.attributes,
            _ => &[],
        }
    }

    /// The closing tag that closed `id`, if it is a tag and was explicitly
    /// closed.
    #[must_use]
    pub fn closing_tag(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).kind() {
            NodeKind::Tag(data) => data.closing_tag,
            _ => None,
        }
    }

    /// Append `child` to `parent`.
    ///
    /// A closing tag whose name matches a tag parent is recorded as that
    /// tag's closing tag instead of becoming a child.
    ///
    /// # Panics
    ///
    /// Panics if `parent` cannot have children, which would mean the parser
    /// tried to nest content in a void element or a leaf.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let closes_parent = match (self.node(parent).kind(), self.node(child).kind()) {
            (NodeKind::Tag(data), NodeKind::CloseTag(name)) => data.name == *name,
            _ => false,
        };

        let node = self.node_mut(parent);
        if closes_parent && let NodeKind::Tag(data) = &mut node.kind {
            data.closing_tag = Some(child);
            return;
        }

        assert!(
            node.can_have_children(),
            "cannot append a child to a {} node",
            node.node_type()
        );
        node.children.push(child);
    }

    /// Attach an attribute node to a tag.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is not a tag node.
    pub fn add_attribute(&mut self, tag: NodeId, attribute: NodeId) {
        match &mut self.node_mut(tag).kind {
            NodeKind::Tag(data) => data.attributes.push(attribute),
            other => panic!("cannot add an attribute to a {} node", other.node_type()),
        }
    }

    /// Every error in the subtree rooted at `id`.
    ///
    /// For a tag the order is: attribute errors, the tag's own errors,
    /// children's errors, then closing-tag errors. Other nodes report their
    /// own errors followed by their children's.
    #[must_use]
    pub fn errors(&self, id: NodeId) -> Vec<&ParseError> {
        let mut errors = Vec::new();
        self.collect_errors(id, &mut errors);
        errors
    }

    fn collect_errors<'a>(&'a self, id: NodeId, out: &mut Vec<&'a ParseError>) {
        let mut pending = vec![ErrorStep::Visit(id)];
        while let Some(step) = pending.pop() {
            match step {
                ErrorStep::Own(id) => out.extend(self.node(id).own_errors()),
                ErrorStep::Visit(id) => {
                    // Pushed in reverse so they pop in document order.
                    if let Some(closing) = self.closing_tag(id) {
                        pending.push(ErrorStep::Visit(closing));
                    }
                    pending.extend(self.children(id).iter().rev().map(|&c| ErrorStep::Visit(c)));
                    pending.push(ErrorStep::Own(id));
                    pending.extend(self.attributes(id).iter().rev().map(|&a| ErrorStep::Visit(a)));
                }
            }
        }
    }

    /// A displayable debug rendering of the subtree rooted at `id`.
    ///
    /// Text renders as `'text'`, comments as `<!--text-->`, entities as
    /// `&(name);`, attributes as `name='value'`, tags as `<name attrs>`
    /// followed by their children and closing tag, and closing tags as
    /// `</name>`. The root renders its children.
    #[must_use]
    pub const fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { tree: self, id }
    }
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(NodeId::ROOT))
    }
}

/// Pending work for the error walk.
#[derive(Clone, Copy)]
enum ErrorStep {
    /// Expand a node into its attributes, own errors, children and closing tag.
    Visit(NodeId),
    /// Emit a node's own errors.
    Own(NodeId),
}

/// Debug rendering of a subtree. See [`ParseTree::display`].
#[derive(Debug, Clone, Copy)]
pub struct NodeDisplay<'a> {
    tree: &'a ParseTree,
    id: NodeId,
}

impl NodeDisplay<'_> {
    /// Write the part of a node that does not come from its children or
    /// closing tag.
    fn write_head(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tree.node(id).kind() {
            NodeKind::Root => Ok(()),
            NodeKind::Text(text) => write!(f, "'{text}'"),
            NodeKind::Comment(text) => write!(f, "<!--{text}-->"),
            NodeKind::Entity(name) => write!(f, "&({name});"),
            NodeKind::Attr(data) => write!(f, "{}='{}'", data.name, data.value),
            NodeKind::CloseTag(name) => write!(f, "</{name}>"),
            NodeKind::Tag(data) => {
                write!(f, "<{}", data.name)?;
                for &attribute in &data.attributes {
                    f.write_str(" ")?;
                    self.write_head(attribute, f)?;
                }
                f.write_str(">")
            }
        }
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree;
        let mut pending = vec![self.id];
        while let Some(id) = pending.pop() {
            self.write_head(id, f)?;
            if let Some(closing) = tree.closing_tag(id) {
                pending.push(closing);
            }
            pending.extend(tree.children(id).iter().rev());
        }
        Ok(())
    }
}

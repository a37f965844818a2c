use std::mem;

use crate::compiler::{Compiler, Op};
use crate::error::ParseError;
use crate::node::{NodeId, NodeType, ParseTree};

const LOG_TARGET: &str = "lintel_html::parser";

/// Error-tolerant HTML tree builder.
///
/// The parser pulls op batches from its [`Compiler`] and executes them
/// against two stacks:
///
/// - the *unfinished node* stack holds nodes still receiving tokens (a tag
///   and the attribute being scanned inside it, for example);
/// - the *open element* stack holds the root and every tag whose children are
///   still being collected. The root is at the bottom and the innermost open
///   element is at the top.
///
/// Completed nodes are attached to the innermost open element. Closing tags
/// pop the open element stack, implicitly closing (and reporting) anything
/// left open between the closing tag and its element.
pub struct Parser {
    compiler: Compiler,
    tree: ParseTree,
    nodes: Vec<NodeId>,
    open_elements: Vec<NodeId>,
}

impl Parser {
    /// Create a parser.
    #[must_use]
    pub fn new() -> Self {
        let mut parser = Self {
            compiler: Compiler::new(),
            tree: ParseTree::new(),
            nodes: Vec::new(),
            open_elements: Vec::new(),
        };
        parser.set_input("");
        parser
    }

    /// Parse `html` into a tree. Never fails: every problem found is
    /// recorded as a [`ParseError`] on the node it concerns.
    ///
    /// The parser is reset afterwards and can be reused.
    pub fn parse(&mut self, html: &str) -> ParseTree {
        self.set_input(html);
        while let Some(ops) = self.compiler.generate_next_code_fragment() {
            for op in ops {
                self.execute_op(op);
            }
        }
        self.finalize();
        let tree = mem::take(&mut self.tree);
        self.reset();
        tree
    }

    /// The tree under construction.
    #[must_use]
    pub const fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// The compiler feeding this parser.
    #[must_use]
    pub const fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Reset to an empty tree with no input.
    pub fn reset(&mut self) {
        self.set_input("");
    }

    fn set_input(&mut self, input: &str) {
        self.compiler.set_input(input);
        self.tree = ParseTree::new();
        self.nodes.clear();
        self.open_elements.clear();
        self.open_elements.push(self.tree.root());
    }

    /// Execute one op from the compiler.
    pub fn execute_op(&mut self, op: Op) {
        log::trace!(target: LOG_TARGET, "{op}");
        match op {
            Op::PushNode(node) => {
                let id = self.tree.alloc(node);
                self.push_node(id);
            }
            Op::PopNode => {
                let _ = self.pop_node();
            }
            Op::AddToken(token) => {
                let id = self.current_node();
                self.tree.node_mut(id).add_token(token);
            }
        }
    }

    /// Start assembling the node `id`.
    pub fn push_node(&mut self, id: NodeId) {
        self.nodes.push(id);
    }

    /// Pop the current unfinished node and apply it to the tree.
    ///
    /// # Panics
    ///
    /// Panics if no node is being assembled.
    pub fn pop_node(&mut self) -> NodeId {
        let id = self
            .nodes
            .pop()
            .unwrap_or_else(|| panic!("Node stack is unexpectedly empty."));
        self.apply_completed_node(id);
        id
    }

    /// The node currently receiving tokens.
    ///
    /// # Panics
    ///
    /// Panics if no node is being assembled.
    #[must_use]
    pub fn current_node(&self) -> NodeId {
        *self
            .nodes
            .last()
            .unwrap_or_else(|| panic!("called current_node() when node stack is empty."))
    }

    /// Place a completed node into the tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` is an attribute and the current unfinished node is not
    /// a tag, or if `id` is a root.
    pub fn apply_completed_node(&mut self, id: NodeId) {
        match self.tree.node(id).node_type() {
            NodeType::Text | NodeType::Entity | NodeType::Comment => {
                let parent = self.current_open_element();
                self.tree.append_child(parent, id);
            }
            NodeType::Attr => {
                let tag = self.current_node();
                assert!(
                    self.tree.node(tag).node_type() == NodeType::Tag,
                    "Unexpected node type when applying attribute node."
                );
                self.tree.add_attribute(tag, id);
            }
            NodeType::Tag => {
                let node = self.tree.node(id);
                if node.can_have_children() {
                    let rawtext_name = node
                        .has_rawtext_content()
                        .then(|| node.tag_name().unwrap_or_default().to_string());
                    self.push_open_element(id);
                    if let Some(name) = rawtext_name {
                        self.compiler.set_rawtext_mode_for_tag(&name);
                    }
                } else {
                    let parent = self.current_open_element();
                    self.tree.append_child(parent, id);
                }
            }
            NodeType::CloseTag => self.apply_close_tag(id),
            NodeType::Root => panic!("Unknown node type in apply_completed_node: ROOT"),
        }
    }

    fn apply_close_tag(&mut self, id: NodeId) {
        let name = self.tree.node(id).tag_name().unwrap_or_default().to_string();
        if let Some(element) = self.most_recent_open_element_with_name(&name) {
            self.tree.append_child(element, id);
            self.add_closed_element_to_parent(element);
        } else {
            let parent = self.current_open_element();
            self.tree.append_child(parent, id);
            let node = self.tree.node(id);
            let error = ParseError::at_node(format!("Found bogus closing tag \"</{name}>\"."), node);
            self.tree.node_mut(id).add_error(error);
        }
    }

    /// Close `element` and every element opened inside it.
    ///
    /// The closed elements are nested into each other, innermost first, and
    /// `element` is appended to the element that becomes current. If other
    /// elements had to be closed along the way, the closing tag of `element`
    /// is reported as unexpected; every closed element that has no closing
    /// tag of its own is reported as unclosed.
    pub fn add_closed_element_to_parent(&mut self, element: NodeId) {
        let closed = self.pop_elements_to_and_including(element);
        let parent = self.current_open_element();

        for pair in closed.windows(2) {
            self.tree.append_child(pair[1], pair[0]);
        }
        self.tree.append_child(parent, element);

        if closed.len() > 1
            && let Some(closing) = self.tree.closing_tag(element)
        {
            let message = format!(
                "Unexpected closing tag, \"</{}>\". Expected closing tag for \"<{}>\".",
                self.tag_name(element),
                self.tag_name(closed[0]),
            );
            let error = ParseError::at_node(message, self.tree.node(closing));
            self.tree.node_mut(closing).add_error(error);
        }

        for &closed_element in &closed {
            if self.tree.closing_tag(closed_element).is_none() {
                let message = format!(
                    "Could not find closing tag for \"<{}>\".",
                    self.tag_name(closed_element)
                );
                let error = ParseError::at_node(message, self.tree.node(closed_element));
                self.tree.node_mut(closed_element).add_error(error);
            }
        }
    }

    /// Pop open elements until `element` has been popped, returning them
    /// innermost first.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not on the open element stack.
    pub fn pop_elements_to_and_including(&mut self, element: NodeId) -> Vec<NodeId> {
        let mut closed = Vec::new();
        loop {
            let popped = self.pop_open_element();
            closed.push(popped);
            if popped == element {
                return closed;
            }
        }
    }

    /// The innermost open element named `name` (case-insensitive), not
    /// counting the root.
    #[must_use]
    pub fn most_recent_open_element_with_name(&self, name: &str) -> Option<NodeId> {
        let name = name.to_lowercase();
        self.open_elements
            .iter()
            .skip(1)
            .rev()
            .copied()
            .find(|&id| self.tree.node(id).tag_name() == Some(name.as_str()))
    }

    /// The innermost open element.
    ///
    /// # Panics
    ///
    /// Panics if the open element stack is empty.
    #[must_use]
    pub fn current_open_element(&self) -> NodeId {
        *self
            .open_elements
            .last()
            .unwrap_or_else(|| panic!("called current_open_element() when stack is empty"))
    }

    /// Make `id` the innermost open element.
    pub fn push_open_element(&mut self, id: NodeId) {
        self.open_elements.push(id);
    }

    /// Pop the innermost open element.
    ///
    /// # Panics
    ///
    /// Panics if that element is the root.
    pub fn pop_open_element(&mut self) -> NodeId {
        match self.open_elements.pop() {
            Some(id) if self.tree.node(id).node_type() != NodeType::Root => id,
            _ => panic!("Unexpectedly attempted to pop root node from open element stack."),
        }
    }

    /// Flush unfinished nodes into the tree and close every open element.
    ///
    /// The innermost unfinished node, if any, is reported as cut short by
    /// the end of input.
    pub fn finalize(&mut self) {
        log::debug!(
            target: LOG_TARGET,
            "finalize: {} unfinished node(s), {} open element(s)",
            self.nodes.len(),
            self.open_elements.len() - 1,
        );

        if let Some(&innermost) = self.nodes.last() {
            let error = ParseError::at_node("Unexpected end of HTML.", self.tree.node(innermost));
            self.tree.node_mut(innermost).add_error(error);
        }
        while !self.nodes.is_empty() {
            let _ = self.pop_node();
        }

        if self.current_open_element() != self.tree.root() {
            let outermost = self.open_elements[1];
            self.add_closed_element_to_parent(outermost);
        }
    }

    fn tag_name(&self, id: NodeId) -> &str {
        self.tree.node(id).tag_name().unwrap_or_default()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

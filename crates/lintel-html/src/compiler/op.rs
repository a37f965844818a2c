use core::fmt;

use crate::node::Node;
use crate::scanner::Token;

/// One tree-construction instruction for the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Start building `node`; it becomes the current unfinished node.
    PushNode(Node),
    /// The current unfinished node is complete.
    PopNode,
    /// Feed a token to the current unfinished node.
    AddToken(Token),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushNode(node) => write!(f, "PUSH_NODE:{}", node.node_type()),
            Self::PopNode => f.write_str("POP_NODE"),
            Self::AddToken(token) => write!(f, "ADD_TOKEN:{}", token.kind),
        }
    }
}

/// Render an op list the way compiler tests compare it: each op's display
/// form, separated by single spaces.
#[must_use]
pub fn describe(ops: &[Op]) -> String {
    ops.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::TokenKind;

    #[test]
    fn test_op_display() {
        assert_eq!(Op::PushNode(Node::text()).to_string(), "PUSH_NODE:TEXT");
        assert_eq!(Op::PopNode.to_string(), "POP_NODE");
        let token = Token::new(TokenKind::AttributeValueQuotedStart, "=\"", 0, 1, 0);
        assert_eq!(Op::AddToken(token).to_string(), "ADD_TOKEN:attributeValueQuotedStart");
    }

    #[test]
    fn test_describe_joins_with_spaces() {
        let token = Token::new(TokenKind::Text, "foo", 0, 1, 0);
        let ops = vec![Op::PushNode(Node::text()), Op::AddToken(token), Op::PopNode];
        assert_eq!(describe(&ops), "PUSH_NODE:TEXT ADD_TOKEN:text POP_NODE");
        assert_eq!(describe(&[]), "");
    }
}

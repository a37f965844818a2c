//! Parse tree nodes.
//!
//! The tree is an arena ([`ParseTree`]) of [`Node`]s addressed by
//! [`NodeId`]. Each node records the tokens it was built from and the errors
//! found while building it; structural errors are attached by the parser.

mod data;
mod tree;

pub use data::{AttrData, Node, NodeKind, NodeType, RAWTEXT_TAGS, TagData, VOID_TAGS};
pub(crate) use data::close_tag_name;
pub use tree::{NodeDisplay, NodeId, ParseTree};

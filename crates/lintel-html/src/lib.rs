//! Error-tolerant HTML parser and validator.
//!
//! # Scope
//!
//! This crate implements a three-stage pipeline that accepts any string and
//! never fails:
//!
//! - **Scanner** ([`scanner`]): a dialect-driven tokenizer. The set of
//!   tokens that can appear next depends on nesting (inside a tag, inside a
//!   quoted attribute value, inside a `<script>` body), so the scanner keeps a
//!   stack of lexical dialects.
//! - **Compiler** ([`compiler`]): maps each token, in the dialect it was
//!   scanned in, to tree-construction [`Op`]s and drives the dialect stack.
//! - **Parser** ([`parser`]): executes ops against an unfinished-node stack
//!   and an open-element stack, auto-closing unclosed tags, recognizing void
//!   elements and flagging bogus closing tags.
//!
//! Every problem found along the way is a positioned [`ParseError`] attached
//! to the node it concerns. [`validate`] collects them in document order.
//!
//! # Not Implemented
//!
//! - Rendering, scripting or a DOM API
//! - WHATWG insertion modes, implied end tags and foster parenting
//! - Resolving entity references to characters

/// Token-to-op compiler.
pub mod compiler;
/// Named entity table.
pub mod entities;
/// Positioned parse diagnostics.
pub mod error;
/// Parse tree arena and node variants.
pub mod node;
/// Tree builder.
pub mod parser;
/// Dialect-driven scanner.
pub mod scanner;

pub use compiler::{Compiler, Op};
pub use entities::{EntityTableError, initialize_extra_validations, load_named_entities_from_json};
pub use error::{ErrorReport, ParseError};
pub use node::{Node, NodeId, NodeKind, NodeType, ParseTree};
pub use parser::Parser;
pub use scanner::{Dialect, Scanner, Token, TokenKind};

/// Parse `html` into a tree.
#[must_use]
pub fn parse(html: &str) -> ParseTree {
    Parser::new().parse(html)
}

/// Every error found in `html`, in document order.
///
/// Named entities are only checked once an entity table is installed (see
/// [`initialize_extra_validations`]).
#[must_use]
pub fn validate(html: &str) -> Vec<ParseError> {
    let tree = parse(html);
    tree.errors(tree.root()).into_iter().cloned().collect()
}

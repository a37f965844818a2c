//! Token-to-op compiler.
//!
//! The compiler sits between the scanner and the parser. For each token it
//! consults the transition table of the dialect the token was scanned in and
//! emits the [`Op`]s the parser needs to build the tree, pushing and popping
//! scanner dialects as constructs open and close.

/// Dialect transition tables.
pub mod core;
/// Parser instructions.
pub mod op;

pub use self::core::Compiler;
pub use op::{Op, describe};

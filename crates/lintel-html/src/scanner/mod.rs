//! Dialect-driven scanner module.
//!
//! The scanner turns HTML source into positioned [`Token`]s. What counts as a
//! token depends on the lexical context: inside a tag, inside a quoted
//! attribute value, inside a `<script>` body and so on. Each context is a
//! [`Dialect`], and the scanner keeps a stack of them that the compiler
//! pushes and pops as it recognizes nested constructs.

/// Scanner state machine: cursor, position tracking and dialect stack.
pub mod core;
/// Dialect definitions and the HTML grammar tables.
pub mod dialect;
/// Token types produced by the scanner.
pub mod token;

pub use self::core::Scanner;
pub use dialect::{Dialect, Grammar, HTML_GRAMMAR, Rule};
pub use token::{Token, TokenKind};

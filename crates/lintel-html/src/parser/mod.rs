//! Tree builder.
//!
//! Executes the compiler's ops against an unfinished-node stack and an
//! open-element stack, repairing malformed nesting as it goes.

/// The parser state machine.
pub mod core;

pub use self::core::Parser;

//! Common utilities for the Lintel HTML validator.
//!
//! This crate provides shared infrastructure used by the parser and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for degraded
//!   validation (e.g. a missing named-entity table)

pub mod warning;

//! Navigation queries.
//!
//! Fan-out of definition-like requests to registered providers and the
//! named commands that expose them.

pub mod aggregator;
pub mod commands;

pub use aggregator::*;
pub use commands::{CommandTable, COMMAND_IDS};

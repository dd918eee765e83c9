//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for duet.

mod repl;

pub use repl::ChatRepl;

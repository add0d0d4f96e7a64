//! Command interpreter and session layer.
//!
//! The shell is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name (with optional aliases). The
//! processor tokenizes input lines, optionally rewrites natural language
//! through the translator, resolves the command, and dispatches `execute()`.

pub mod commands;
mod history;
mod processor;
mod registry;
mod session;

/// Register all built-in commands (filesystem, file content, system, shell)
/// into a registry.
pub use commands::register_builtins;
/// Persistent, bounded command history.
pub use history::HistoryManager;
/// The tokenize/resolve/validate/execute pipeline.
pub use processor::CommandProcessor;
/// Quote- and escape-aware tokenization with whitespace fallback.
pub use processor::{split_tokens, tokenize};
/// A single executable command trait.
pub use registry::Command;
/// Registry of available commands with alias resolution and dispatch.
pub use registry::CommandRegistry;
/// One interactive session: context, history, processor.
pub use session::Session;

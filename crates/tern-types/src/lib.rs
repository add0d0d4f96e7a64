//! Foundation types for tern.
//!
//! This crate contains the types shared by all tern crates: the error
//! enum, command results, the per-session execution context, history
//! entries, and the terminal configuration.

pub mod config;
pub mod error;
pub mod models;

pub use config::TerminalConfig;
pub use error::{Result, TernError};
pub use models::{CommandResult, ExecutionContext, HistoryEntry};

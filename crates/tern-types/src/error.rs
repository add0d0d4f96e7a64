//! Error types for tern.

use std::io;

/// Errors produced by the tern shell core.
#[derive(Debug, thiserror::Error)]
pub enum TernError {
    /// The first token did not resolve to any registered command.
    #[error("Command '{0}' not found. Type 'help' for available commands.")]
    CommandNotFound(String),

    /// The handler rejected the argument shape before executing.
    #[error("Invalid arguments for '{0}'. Use 'help {0}' for usage.")]
    InvalidArguments(String),

    /// A handler's operation failed (filesystem, permission, process).
    /// The message is the user-visible diagnostic, prefixed with the
    /// command name (e.g. "cat: foo: No such file or directory").
    #[error("{0}")]
    Execution(String),

    /// An unexpected fault inside the processor or orchestrator.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl TernError {
    /// Shell exit code conventionally associated with this error.
    ///
    /// 127 for an unresolvable command name, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            TernError::CommandNotFound(_) => 127,
            _ => 1,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TernError>;

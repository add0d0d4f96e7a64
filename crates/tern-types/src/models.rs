//! Core data models: command results, execution context, history entries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::error::TernError;

/// Result of a single command invocation.
///
/// Success implies an empty error message; failure implies a non-empty
/// one. The constructors uphold this, so use them instead of struct
/// literals. `elapsed` is filled in by the processor after the handler
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub output: String,
    pub error_message: Option<String>,
    pub exit_code: i32,
    pub elapsed: Duration,
}

impl CommandResult {
    /// A successful result carrying `output`.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error_message: None,
            exit_code: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// A failed result carrying a diagnostic and exit code.
    pub fn err(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: false,
            output: String::new(),
            error_message: Some(message.into()),
            exit_code,
            elapsed: Duration::ZERO,
        }
    }

    /// A failed result derived from an error value, using its
    /// conventional exit code.
    pub fn from_error(err: &TernError) -> Self {
        Self::err(err.to_string(), err.exit_code())
    }

    /// Attach elapsed wall-clock time, consuming and returning self.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }
}

/// Shared mutable state for one session, passed by reference into
/// every command invocation. Mutated in place by `cd`.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Current working directory (absolute).
    pub cwd: PathBuf,
    /// Environment variable snapshot for this session.
    pub env: HashMap<String, String>,
    /// User identity string.
    pub user: String,
    /// Opaque identifier, unique per session.
    pub session_id: String,
    /// Raw command strings issued this session, oldest first.
    pub history: Vec<String>,
}

impl ExecutionContext {
    /// Build a context from the host process environment.
    pub fn new() -> Self {
        let env: HashMap<String, String> = std::env::vars().collect();
        let user = env.get("USER").cloned().unwrap_or_else(|| "user".into());
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            env,
            user,
            session_id: uuid::Uuid::new_v4().to_string(),
            history: Vec::new(),
        }
    }

    /// Resolve a possibly-relative path against the current working
    /// directory, without touching the filesystem.
    pub fn resolve(&self, input: &str) -> PathBuf {
        let p = PathBuf::from(input);
        if p.is_absolute() { p } else { self.cwd.join(p) }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry in the session's command history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Raw command text as typed (pre-translation).
    pub command: String,
    /// When the command was issued.
    pub timestamp: DateTime<Local>,
    /// Wall-clock execution time.
    pub elapsed: Duration,
    /// Whether the invocation succeeded.
    pub success: bool,
    /// Working directory at invocation time.
    pub working_directory: String,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>, elapsed: Duration, success: bool, cwd: &str) -> Self {
        Self {
            command: command.into(),
            timestamp: Local::now(),
            elapsed,
            success,
            working_directory: cwd.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_has_no_error_message() {
        let r = CommandResult::ok("hello");
        assert!(r.success);
        assert_eq!(r.output, "hello");
        assert!(r.error_message.is_none());
        assert_eq!(r.exit_code, 0);
        assert_eq!(r.elapsed, Duration::ZERO);
    }

    #[test]
    fn err_result_has_nonempty_message() {
        let r = CommandResult::err("rm: missing operand", 1);
        assert!(!r.success);
        assert!(r.output.is_empty());
        assert_eq!(r.error_message.as_deref(), Some("rm: missing operand"));
        assert_eq!(r.exit_code, 1);
    }

    #[test]
    fn from_error_uses_error_exit_code() {
        let e = TernError::CommandNotFound("frobnicate".into());
        let r = CommandResult::from_error(&e);
        assert!(!r.success);
        assert_eq!(r.exit_code, 127);
        assert!(r.error_message.unwrap().contains("frobnicate"));
    }

    #[test]
    fn with_elapsed_sets_timing() {
        let r = CommandResult::ok("").with_elapsed(Duration::from_millis(5));
        assert_eq!(r.elapsed, Duration::from_millis(5));
    }

    #[test]
    fn context_resolve_relative() {
        let mut ctx = ExecutionContext::new();
        ctx.cwd = PathBuf::from("/tmp/work");
        assert_eq!(ctx.resolve("notes.txt"), PathBuf::from("/tmp/work/notes.txt"));
    }

    #[test]
    fn context_resolve_absolute_is_unchanged() {
        let ctx = ExecutionContext::new();
        assert_eq!(ctx.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn session_ids_are_unique() {
        let a = ExecutionContext::new();
        let b = ExecutionContext::new();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn history_entry_records_cwd() {
        let e = HistoryEntry::new("ls", Duration::ZERO, true, "/home");
        assert_eq!(e.command, "ls");
        assert_eq!(e.working_directory, "/home");
        assert!(e.success);
    }
}

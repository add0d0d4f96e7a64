//! Terminal configuration.
//!
//! An explicit value constructed at startup and passed into the
//! session/processor/translator constructors. There is no global
//! configuration state.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TernError};

/// Terminal settings, deserialized from a TOML file.
///
/// Every field has a default, so an empty file (or no file at all)
/// yields a usable configuration. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalConfig {
    /// Prompt template for interactive front ends.
    #[serde(default = "default_prompt_format")]
    pub prompt_format: String,
    /// Maximum number of history entries retained (FIFO eviction).
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Whether front ends should offer tab completion.
    #[serde(default = "default_true")]
    pub auto_completion: bool,
    /// Whether front ends should colorize output.
    #[serde(default = "default_true")]
    pub colored_output: bool,
    /// Gates the natural-language translation pass.
    #[serde(default)]
    pub nlp_enabled: bool,
    /// Cap on lines a front end renders from one command.
    #[serde(default = "default_max_output_lines")]
    pub max_output_lines: usize,
    /// Where command history is persisted. `None` disables persistence.
    #[serde(default = "default_history_file")]
    pub history_file: Option<PathBuf>,
}

fn default_prompt_format() -> String {
    "{user}:{cwd}$ ".to_string()
}

fn default_history_size() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_max_output_lines() -> usize {
    1000
}

fn default_history_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".tern").join("history.txt"))
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt_format: default_prompt_format(),
            history_size: default_history_size(),
            auto_completion: true,
            colored_output: true,
            nlp_enabled: false,
            max_output_lines: default_max_output_lines(),
            history_file: default_history_file(),
        }
    }
}

impl TerminalConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| TernError::Config(format!("config.toml: {e}")))
    }

    /// Load a configuration file from disk. A missing file is not an
    /// error; it yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = TerminalConfig::from_toml("").unwrap();
        assert_eq!(cfg.history_size, 1000);
        assert!(!cfg.nlp_enabled);
        assert!(cfg.auto_completion);
        assert!(cfg.colored_output);
        assert_eq!(cfg.max_output_lines, 1000);
        assert_eq!(cfg.prompt_format, "{user}:{cwd}$ ");
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = TerminalConfig::from_toml(
            r#"
history_size = 50
nlp_enabled = true
colored_output = false
"#,
        )
        .unwrap();
        assert_eq!(cfg.history_size, 50);
        assert!(cfg.nlp_enabled);
        assert!(!cfg.colored_output);
        assert!(cfg.auto_completion);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = TerminalConfig::from_toml("some_future_option = 3\n").unwrap();
        assert_eq!(cfg.history_size, 1000);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = TerminalConfig::from_toml("history_size = [[[").unwrap_err();
        assert!(format!("{err}").contains("config.toml"));
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let cfg = TerminalConfig::load(Path::new("/nonexistent/tern/config.toml")).unwrap();
        assert_eq!(cfg.history_size, 1000);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "history_size = 7\n").unwrap();
        let cfg = TerminalConfig::load(&path).unwrap();
        assert_eq!(cfg.history_size, 7);
    }

    #[test]
    fn history_file_can_be_set() {
        let cfg = TerminalConfig::from_toml("history_file = \"/tmp/h.txt\"\n").unwrap();
        assert_eq!(cfg.history_file, Some(PathBuf::from("/tmp/h.txt")));
    }
}

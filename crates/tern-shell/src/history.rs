//! Session command history with optional plain-text persistence.
//!
//! The on-disk format is one command per line, oldest first, no
//! escaping. The in-memory list is capped: once `max_entries` is
//! exceeded the oldest entry is dropped (FIFO).

use std::path::PathBuf;
use std::time::Duration;

use tern_types::models::HistoryEntry;

/// Capped, append-only command history for one session.
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
    file: Option<PathBuf>,
}

impl HistoryManager {
    /// Create a history manager, loading any existing history file.
    pub fn new(max_entries: usize, file: Option<PathBuf>) -> Self {
        let mut mgr = Self {
            entries: Vec::new(),
            max_entries,
            file,
        };
        mgr.load();
        mgr
    }

    /// An in-memory history with no persistence.
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            file: None,
        }
    }

    /// Append a command, evicting the oldest entry past the cap, and
    /// persist the updated list.
    pub fn record(&mut self, command: &str, elapsed: Duration, success: bool, cwd: &str) {
        self.entries
            .push(HistoryEntry::new(command, elapsed, success, cwd));
        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
        self.save();
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index` (0 = oldest retained).
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Entries whose command text contains `pattern`.
    pub fn search(&self, pattern: &str) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.command.contains(pattern))
            .collect()
    }

    /// Drop all entries and persist the empty list.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
        log::info!("command history cleared");
    }

    fn load(&mut self) {
        let Some(path) = &self.file else {
            return;
        };
        if !path.exists() {
            return;
        }
        match std::fs::read_to_string(path) {
            Ok(text) => {
                for line in text.lines() {
                    let command = line.trim();
                    if command.is_empty() {
                        continue;
                    }
                    // Prior-session entries carry approximate metadata.
                    self.entries
                        .push(HistoryEntry::new(command, Duration::ZERO, true, ""));
                }
                while self.entries.len() > self.max_entries {
                    self.entries.remove(0);
                }
                log::info!("loaded {} commands from history", self.entries.len());
            }
            Err(e) => log::warn!("could not load history from {}: {e}", path.display()),
        }
    }

    fn save(&self) {
        let Some(path) = &self.file else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            log::warn!("could not create history directory: {e}");
            return;
        }
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.command);
            text.push('\n');
        }
        if let Err(e) = std::fs::write(path, text) {
            log::warn!("could not save history to {}: {e}", path.display());
        }
    }
}

//! Command trait and registry.
//!
//! The registry maps command names to handlers and alias strings to
//! canonical names. It is populated once at startup and read-only
//! afterwards, so it can be shared immutably across sessions.

use std::collections::HashMap;

use tern_types::error::Result;
use tern_types::models::ExecutionContext;

/// A single executable command.
pub trait Command: Send + Sync {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[path\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Argument-shape check, run before `execute` and before any side
    /// effect. Permissive by default.
    fn validate(&self, _args: &[&str]) -> bool {
        true
    }

    /// Execute the command with the given arguments and session context.
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String>;
}

/// Registry of available commands.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a command under `name` with optional aliases.
    ///
    /// Re-registering an existing name replaces the previous handler
    /// (last write wins); the overwrite is logged so it is never an
    /// accident. Each alias maps to the canonical name, and alias
    /// lookup takes precedence over direct names in `resolve`.
    pub fn register(&mut self, name: &str, handler: Box<dyn Command>, aliases: &[&str]) {
        if self.commands.contains_key(name) {
            log::warn!("re-registering command '{name}' (last write wins)");
        }
        self.commands.insert(name.to_string(), handler);
        log::debug!("registered command: {name}");
        for alias in aliases {
            self.aliases.insert((*alias).to_string(), name.to_string());
            log::debug!("registered alias: {alias} -> {name}");
        }
    }

    /// Look up a handler by alias or name. An unknown token is a
    /// `None` value, not an error.
    pub fn resolve(&self, token: &str) -> Option<&dyn Command> {
        let canonical = self.aliases.get(token).map(String::as_str).unwrap_or(token);
        self.commands.get(canonical).map(Box::as_ref)
    }

    /// Non-throwing existence check with the same resolution order as
    /// `resolve`.
    pub fn exists(&self, token: &str) -> bool {
        self.resolve(token).is_some()
    }

    /// All primary command names, lexicographically sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// All aliases as (alias, canonical name) pairs, sorted by alias.
    pub fn aliases(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .aliases
            .iter()
            .map(|(a, n)| (a.clone(), n.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Sorted (name, description) pairs for help output.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }

    /// Registered names starting with `partial`, case-sensitive, sorted.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .commands
            .keys()
            .filter(|name| name.starts_with(partial))
            .cloned()
            .collect();
        matches.sort();
        matches
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        name: &'static str,
        desc: &'static str,
    }

    impl Named {
        fn boxed(name: &'static str, desc: &'static str) -> Box<dyn Command> {
            Box::new(Named { name, desc })
        }
    }

    impl Command for Named {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            self.desc
        }
        fn usage(&self) -> &str {
            self.name
        }
        fn execute(&self, args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
            Ok(args.join(" "))
        }
    }

    #[test]
    fn resolve_name_and_alias_hit_same_handler() {
        let mut reg = CommandRegistry::new();
        reg.register("exit", Named::boxed("exit", "Exit"), &["quit"]);
        let by_name = reg.resolve("exit").map(|c| c.name().to_string());
        let by_alias = reg.resolve("quit").map(|c| c.name().to_string());
        assert_eq!(by_name, by_alias);
        assert_eq!(by_name.as_deref(), Some("exit"));
    }

    #[test]
    fn resolve_unknown_is_none() {
        let reg = CommandRegistry::new();
        assert!(reg.resolve("frobnicate").is_none());
        assert!(!reg.exists("frobnicate"));
    }

    #[test]
    fn exists_follows_alias_resolution() {
        let mut reg = CommandRegistry::new();
        reg.register("ls", Named::boxed("ls", "List"), &["dir"]);
        assert!(reg.exists("ls"));
        assert!(reg.exists("dir"));
        assert!(!reg.exists("list"));
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = CommandRegistry::new();
        reg.register("zebra", Named::boxed("zebra", ""), &[]);
        reg.register("alpha", Named::boxed("alpha", ""), &[]);
        reg.register("middle", Named::boxed("middle", ""), &[]);
        assert_eq!(reg.names(), vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn register_replaces_existing_command() {
        let mut reg = CommandRegistry::new();
        reg.register("test", Named::boxed("test", "version A"), &[]);
        reg.register("test", Named::boxed("test", "version B"), &[]);
        let cmds = reg.list();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].1, "version B");
    }

    #[test]
    fn alias_shadows_same_named_command() {
        let mut reg = CommandRegistry::new();
        reg.register("list", Named::boxed("list", "primary list"), &[]);
        reg.register("ls", Named::boxed("ls", "real ls"), &["list"]);
        // Alias lookup precedes direct names, so "list" now reaches ls.
        let resolved = reg.resolve("list").map(|c| c.name().to_string());
        assert_eq!(resolved.as_deref(), Some("ls"));
    }

    #[test]
    fn completions_are_prefix_matched_and_sorted() {
        let mut reg = CommandRegistry::new();
        reg.register("cat", Named::boxed("cat", ""), &[]);
        reg.register("cd", Named::boxed("cd", ""), &[]);
        reg.register("cp", Named::boxed("cp", ""), &[]);
        reg.register("ls", Named::boxed("ls", ""), &[]);
        assert_eq!(reg.completions("c"), vec!["cat", "cd", "cp"]);
        assert_eq!(reg.completions("ca"), vec!["cat"]);
        assert!(reg.completions("CA").is_empty());
        assert!(reg.completions("x").is_empty());
    }

    #[test]
    fn default_creates_empty_registry() {
        let reg = CommandRegistry::default();
        assert!(reg.names().is_empty());
        assert!(reg.list().is_empty());
    }

    #[test]
    fn aliases_listing_sorted() {
        let mut reg = CommandRegistry::new();
        reg.register("exit", Named::boxed("exit", ""), &["quit", "bye"]);
        assert_eq!(
            reg.aliases(),
            vec![
                ("bye".to_string(), "exit".to_string()),
                ("quit".to_string(), "exit".to_string())
            ]
        );
    }
}

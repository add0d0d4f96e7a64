//! Command processing: optional NLP pass, tokenization, resolution,
//! validation, execution, and timing.

use std::sync::Arc;
use std::time::Instant;

use tern_nlp::Translator;
use tern_types::error::{Result, TernError};
use tern_types::models::{CommandResult, ExecutionContext};

use crate::registry::CommandRegistry;

/// Stateless per-invocation command pipeline. Holds shared read-only
/// references to the registry and (when NLP is enabled) the translator.
pub struct CommandProcessor {
    registry: Arc<CommandRegistry>,
    translator: Option<Arc<Translator>>,
}

impl CommandProcessor {
    pub fn new(registry: Arc<CommandRegistry>, translator: Option<Arc<Translator>>) -> Self {
        Self {
            registry,
            translator,
        }
    }

    /// The registry this processor dispatches against.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Process one line of input against the session context.
    ///
    /// Never panics and never returns an error: every failure mode is
    /// folded into the returned `CommandResult`. Elapsed time covers
    /// tokenize/resolve/validate/execute but not the NLP pass.
    pub fn process(&self, input: &str, ctx: &mut ExecutionContext) -> CommandResult {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            // No-op: no registry lookup, zero elapsed time.
            return CommandResult::ok("");
        }

        // NLP pre-pass. The translated text is dispatched; the caller
        // keeps the original text for history.
        let mut line = trimmed.to_string();
        if let Some(translator) = &self.translator
            && translator.looks_natural(trimmed)
            && let Some(translated) = translator.translate(trimmed)
        {
            log::info!("nlp converted: '{trimmed}' -> '{translated}'");
            line = translated;
        }

        let start = Instant::now();

        let tokens = split_tokens(&line);
        let Some((name, rest)) = tokens.split_first() else {
            return CommandResult::ok("").with_elapsed(start.elapsed());
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        // `help` needs registry access that handlers don't have, so
        // the processor intercepts it (and its aliases) before dispatch.
        if name == "help" || self.registry.resolve(name).is_some_and(|c| c.name() == "help") {
            return self.render_help(&args).with_elapsed(start.elapsed());
        }

        let result = match self.registry.resolve(name) {
            Some(handler) => {
                if handler.validate(&args) {
                    match handler.execute(&args, ctx) {
                        Ok(output) => CommandResult::ok(output),
                        Err(e) => CommandResult::from_error(&e),
                    }
                } else {
                    CommandResult::from_error(&TernError::InvalidArguments(name.clone()))
                }
            }
            None => CommandResult::from_error(&TernError::CommandNotFound(name.clone())),
        };

        result.with_elapsed(start.elapsed())
    }

    /// Completion candidates: registered names starting with `partial`.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        self.registry.completions(partial)
    }

    fn render_help(&self, args: &[&str]) -> CommandResult {
        if let Some(&name) = args.first() {
            return match self.registry.resolve(name) {
                Some(cmd) => CommandResult::ok(format!(
                    "{} ({})\n  {}\n  Usage: {}",
                    cmd.name(),
                    cmd.category(),
                    cmd.description(),
                    cmd.usage()
                )),
                None => CommandResult::ok(format!("No help available for '{name}'")),
            };
        }
        let mut out = String::from("Available commands:\n");
        for (name, desc) in self.registry.list() {
            if desc.is_empty() {
                out.push_str(&format!("  {name}\n"));
            } else {
                out.push_str(&format!("  {name:12} {desc}\n"));
            }
        }
        out.push_str("\nType 'help <command>' for specific command help.");
        CommandResult::ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tokenizer: handles single quotes, double quotes, and backslash escapes.
// ---------------------------------------------------------------------------

/// Split a command line into tokens. Malformed quoting never fails the
/// command: it degrades to naive whitespace splitting.
pub fn split_tokens(input: &str) -> Vec<String> {
    match tokenize(input) {
        Ok(tokens) => tokens,
        Err(e) => {
            log::warn!("falling back to whitespace split: {e}");
            input.split_whitespace().map(str::to_string).collect()
        }
    }
}

/// Tokenize a command line respecting quotes and backslash escapes.
///
/// - Single-quoted strings preserve all characters literally.
/// - Double-quoted segments form one token; `\"`, `\\` escape inside.
/// - Backslash escapes the next character outside of quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            if ch == '"' {
                in_double = false;
            } else if ch == '\\'
                && let Some(&next) = chars.peek()
            {
                match next {
                    '"' | '\\' => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '\'' => in_single = true,
                '"' => in_double = true,
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(ch),
            }
        }
    }

    if in_single {
        return Err(TernError::Execution("unterminated single quote".to_string()));
    }
    if in_double {
        return Err(TernError::Execution("unterminated double quote".to_string()));
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

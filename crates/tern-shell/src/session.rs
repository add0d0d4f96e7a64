//! An interactive session: one context, one history, one processor.

use std::sync::Arc;

use tern_nlp::Translator;
use tern_types::config::TerminalConfig;
use tern_types::models::{CommandResult, ExecutionContext};

use crate::commands::register_builtins;
use crate::history::HistoryManager;
use crate::processor::CommandProcessor;
use crate::registry::CommandRegistry;

/// Owns everything a running terminal needs. Front ends read lines and
/// hand them to [`Session::execute_command`]; the session never errors,
/// every outcome is a `CommandResult`.
pub struct Session {
    processor: CommandProcessor,
    context: ExecutionContext,
    history: HistoryManager,
}

impl Session {
    pub fn new(config: &TerminalConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);

        let translator = config.nlp_enabled.then(|| Arc::new(Translator::new()));
        let processor = CommandProcessor::new(Arc::new(registry), translator);
        let history = HistoryManager::new(config.history_size, config.history_file.clone());

        Self {
            processor,
            context: ExecutionContext::new(),
            history,
        }
    }

    /// Run one line of input. The raw text is appended to the context
    /// history first, even when it is empty or fails, so `history`
    /// reflects what the user actually typed.
    pub fn execute_command(&mut self, input: &str) -> CommandResult {
        self.context.history.push(input.to_string());

        let result = self.processor.process(input, &mut self.context);

        let cwd = self.context.cwd.display().to_string();
        self.history
            .record(input, result.elapsed, result.success, &cwd);

        if result.success {
            log::info!("ok: {input:?} ({:?})", result.elapsed);
        } else {
            log::info!("failed ({}): {input:?}", result.exit_code);
        }
        result
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn processor(&self) -> &CommandProcessor {
        &self.processor
    }
}

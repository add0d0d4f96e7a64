//! Built-in command handlers, grouped by category.

pub mod file;
pub mod fs;
pub mod system;

use tern_types::error::Result;
use tern_types::models::ExecutionContext;

use crate::registry::{Command, CommandRegistry};

// ---------------------------------------------------------------------------
// shell commands
// ---------------------------------------------------------------------------

/// Listed and resolvable like any other command. Its execution is handled
/// by the processor, which owns the registry needed to render the listing.
pub struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands"
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    fn category(&self) -> &str {
        "shell"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        Ok("Type 'help' for available commands.".to_string())
    }
}

/// The interactive front end intercepts exit/quit before dispatch; this
/// handler only answers when the command is run non-interactively.
pub struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Exit the terminal"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn category(&self) -> &str {
        "shell"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        Ok("Goodbye!".to_string())
    }
}

pub struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Show command history"
    }
    fn usage(&self) -> &str {
        "history [count]"
    }
    fn category(&self) -> &str {
        "shell"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        let count = args
            .first()
            .and_then(|a| a.parse::<usize>().ok())
            .unwrap_or(ctx.history.len());
        let skip = ctx.history.len().saturating_sub(count);
        let out: Vec<String> = ctx
            .history
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, cmd)| format!("{:>5}  {cmd}", i + 1))
            .collect();
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// registration
// ---------------------------------------------------------------------------

/// Register every built-in handler on a fresh registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    // filesystem
    reg.register("ls", Box::new(fs::LsCmd), &["dir"]);
    reg.register("cd", Box::new(fs::CdCmd), &[]);
    reg.register("pwd", Box::new(fs::PwdCmd), &[]);
    reg.register("mkdir", Box::new(fs::MkdirCmd), &[]);
    reg.register("rm", Box::new(fs::RmCmd), &["del"]);
    reg.register("echo", Box::new(fs::EchoCmd), &[]);
    reg.register("touch", Box::new(fs::TouchCmd), &[]);

    // file content
    reg.register("cat", Box::new(file::CatCmd), &["type"]);
    reg.register("grep", Box::new(file::GrepCmd), &[]);
    reg.register("find", Box::new(file::FindCmd), &[]);
    reg.register("wc", Box::new(file::WcCmd), &[]);
    reg.register("cp", Box::new(file::CpCmd), &["copy"]);
    reg.register("mv", Box::new(file::MvCmd), &["move"]);

    // system
    reg.register("ps", Box::new(system::PsCmd), &[]);
    reg.register("top", Box::new(system::TopCmd), &[]);
    reg.register("kill", Box::new(system::KillCmd), &[]);
    reg.register("df", Box::new(system::DfCmd), &[]);
    reg.register("free", Box::new(system::FreeCmd), &[]);
    reg.register("uptime", Box::new(system::UptimeCmd), &[]);

    // shell
    reg.register("help", Box::new(HelpCmd), &["?"]);
    reg.register("exit", Box::new(ExitCmd), &["quit"]);
    reg.register("history", Box::new(HistoryCmd), &[]);
}

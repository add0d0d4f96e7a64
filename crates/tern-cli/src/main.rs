//! Interactive terminal entry point.
//!
//! Reads lines from stdin, runs them through a [`Session`], and prints
//! each result. `exit`/`quit` (and EOF) end the loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tern_shell::Session;
use tern_types::config::TerminalConfig;

#[derive(Parser, Debug)]
#[command(name = "tern", about = "A command-line terminal emulator", version)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable natural-language command translation.
    #[arg(long)]
    nlp: bool,

    /// Override the history file location.
    #[arg(long)]
    history_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = TerminalConfig::load(&args.config)?;
    if args.nlp {
        config.nlp_enabled = true;
    }
    if args.history_file.is_some() {
        config.history_file = args.history_file;
    }
    log::info!(
        "starting session (nlp: {}, history: {:?})",
        config.nlp_enabled,
        config.history_file
    );

    let mut session = Session::new(&config);

    println!("tern terminal. Type 'help' for available commands, 'exit' to quit.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        let prompt = render_prompt(
            &config.prompt_format,
            &session.context().user,
            &session.context().cwd.display().to_string(),
            session.context().env.get("HOME").map(String::as_str),
        );
        print!("{prompt}");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }
        let input = line.trim();

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        let result = session.execute_command(input);
        if result.success {
            if !result.output.is_empty() {
                println!("{}", truncate_output(&result.output, config.max_output_lines));
            }
        } else if let Some(msg) = &result.error_message {
            eprintln!("{msg}");
        }
    }

    Ok(())
}

/// Expand `{user}` and `{cwd}` in the prompt template. The working
/// directory is shortened to `~` under the user's home.
fn render_prompt(template: &str, user: &str, cwd: &str, home: Option<&str>) -> String {
    let cwd = match home {
        Some(home) if !home.is_empty() && cwd == home => "~".to_string(),
        Some(home) if !home.is_empty() && cwd.starts_with(&format!("{home}/")) => {
            format!("~{}", &cwd[home.len()..])
        }
        _ => cwd.to_string(),
    };
    template.replace("{user}", user).replace("{cwd}", &cwd)
}

/// Cap output at `max_lines`, noting how many lines were dropped.
fn truncate_output(output: &str, max_lines: usize) -> String {
    let total = output.lines().count();
    if total <= max_lines {
        return output.to_string();
    }
    let kept: Vec<&str> = output.lines().take(max_lines).collect();
    format!("{}\n... ({} more lines)", kept.join("\n"), total - max_lines)
}

//! File content commands: cat, grep, find, wc, cp, mv.

use std::io::ErrorKind;
use std::path::Path;

use tern_types::error::{Result, TernError};
use tern_types::models::ExecutionContext;

use crate::registry::Command;

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

pub struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>..."
    }
    fn category(&self) -> &str {
        "file"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.is_empty() {
            return Err(TernError::Execution("cat: missing file operand".to_string()));
        }
        let mut outputs = Vec::new();
        for file_name in args {
            let path = ctx.resolve(file_name);
            if !path.exists() {
                return Err(TernError::Execution(format!(
                    "cat: {file_name}: No such file or directory"
                )));
            }
            if path.is_dir() {
                return Err(TernError::Execution(format!(
                    "cat: {file_name}: Is a directory"
                )));
            }
            let bytes = std::fs::read(&path).map_err(|e| {
                if e.kind() == ErrorKind::PermissionDenied {
                    TernError::Execution(format!("cat: {file_name}: Permission denied"))
                } else {
                    TernError::Execution(format!("cat: {e}"))
                }
            })?;
            match String::from_utf8(bytes) {
                Ok(text) => outputs.push(text),
                Err(_) => {
                    return Err(TernError::Execution(format!(
                        "cat: {file_name}: Binary file (not displayed)"
                    )));
                }
            }
        }
        Ok(outputs.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// grep
// ---------------------------------------------------------------------------

pub struct GrepCmd;
impl Command for GrepCmd {
    fn name(&self) -> &str {
        "grep"
    }
    fn description(&self) -> &str {
        "Search for pattern in files"
    }
    fn usage(&self) -> &str {
        "grep <pattern> <file>..."
    }
    fn category(&self) -> &str {
        "file"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.len() < 2 {
            return Err(TernError::Execution(
                "grep: usage: grep <pattern> <file>...".to_string(),
            ));
        }
        let pattern = regex::Regex::new(args[0])
            .map_err(|e| TernError::Execution(format!("grep: invalid pattern: {e}")))?;
        let files = &args[1..];
        let many = files.len() > 1;
        let mut out = Vec::new();

        for file_name in files {
            let path = ctx.resolve(file_name);
            if !path.exists() {
                out.push(format!("grep: {file_name}: No such file or directory"));
                continue;
            }
            if path.is_dir() {
                out.push(format!("grep: {file_name}: Is a directory"));
                continue;
            }
            let bytes = std::fs::read(&path)
                .map_err(|e| TernError::Execution(format!("grep: {e}")))?;
            let Ok(text) = String::from_utf8(bytes) else {
                out.push(format!("grep: {file_name}: Binary file matches"));
                continue;
            };
            for (line_num, line) in text.lines().enumerate() {
                if pattern.is_match(line) {
                    if many {
                        out.push(format!("{file_name}:{}:{line}", line_num + 1));
                    } else {
                        out.push(format!("{}:{line}", line_num + 1));
                    }
                }
            }
        }
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

pub struct FindCmd;
impl Command for FindCmd {
    fn name(&self) -> &str {
        "find"
    }
    fn description(&self) -> &str {
        "Find files and directories"
    }
    fn usage(&self) -> &str {
        "find [path] [-name pattern]"
    }
    fn category(&self) -> &str {
        "file"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        let (search_path, pattern) = match args {
            [] => (ctx.cwd.clone(), "*"),
            [path] => (ctx.resolve(path), "*"),
            [path, "-name", pattern, ..] => (ctx.resolve(path), *pattern),
            [path, ..] => (ctx.resolve(path), "*"),
        };

        if !search_path.exists() {
            return Err(TernError::Execution(format!(
                "find: '{}': No such file or directory",
                search_path.display()
            )));
        }

        let mut matches = Vec::new();
        if search_path.is_file() {
            matches.push(search_path.display().to_string());
        } else {
            walk(&search_path, pattern, &mut matches);
        }
        matches.sort();
        Ok(matches.join("\n"))
    }
}

/// Recursively collect paths under `dir` whose file name matches the
/// glob. Unreadable directories are skipped, not errors.
fn walk(dir: &Path, pattern: &str, matches: &mut Vec<String>) {
    let Ok(read) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in read.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if glob_match(pattern, &name) {
            matches.push(path.display().to_string());
        }
        if path.is_dir() {
            walk(&path, pattern, matches);
        }
    }
}

/// Simple glob matching: `*` matches any string, `?` matches one char.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    glob_match_inner(&p, &t, 0, 0, 0)
}

/// Maximum recursion depth for glob matching to prevent stack overflow.
const GLOB_MAX_DEPTH: usize = 256;

fn glob_match_inner(p: &[char], t: &[char], pi: usize, ti: usize, depth: usize) -> bool {
    if depth >= GLOB_MAX_DEPTH {
        return false;
    }
    if pi == p.len() && ti == t.len() {
        return true;
    }
    if pi == p.len() {
        return false;
    }
    if p[pi] == '*' {
        for skip in 0..=(t.len() - ti) {
            if glob_match_inner(p, t, pi + 1, ti + skip, depth + 1) {
                return true;
            }
        }
        false
    } else if ti < t.len() && (p[pi] == '?' || p[pi] == t[ti]) {
        glob_match_inner(p, t, pi + 1, ti + 1, depth + 1)
    } else {
        false
    }
}

// ---------------------------------------------------------------------------
// wc
// ---------------------------------------------------------------------------

pub struct WcCmd;
impl Command for WcCmd {
    fn name(&self) -> &str {
        "wc"
    }
    fn description(&self) -> &str {
        "Count lines, words, and characters"
    }
    fn usage(&self) -> &str {
        "wc <file>..."
    }
    fn category(&self) -> &str {
        "file"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.is_empty() {
            return Err(TernError::Execution("wc: missing file operand".to_string()));
        }
        let mut out = Vec::new();
        let (mut total_lines, mut total_words, mut total_chars) = (0usize, 0usize, 0usize);

        for file_name in args {
            let path = ctx.resolve(file_name);
            if !path.exists() {
                out.push(format!("wc: {file_name}: No such file or directory"));
                continue;
            }
            if path.is_dir() {
                out.push(format!("wc: {file_name}: Is a directory"));
                continue;
            }
            let bytes =
                std::fs::read(&path).map_err(|e| TernError::Execution(format!("wc: {e}")))?;
            let Ok(content) = String::from_utf8(bytes) else {
                out.push(format!("wc: {file_name}: Binary file"));
                continue;
            };
            let lines = content.matches('\n').count();
            let words = content.split_whitespace().count();
            let chars = content.chars().count();
            out.push(format!("{lines:>8} {words:>8} {chars:>8} {file_name}"));
            total_lines += lines;
            total_words += words;
            total_chars += chars;
        }

        if args.len() > 1 {
            out.push(format!("{total_lines:>8} {total_words:>8} {total_chars:>8} total"));
        }
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// cp
// ---------------------------------------------------------------------------

pub struct CpCmd;
impl Command for CpCmd {
    fn name(&self) -> &str {
        "cp"
    }
    fn description(&self) -> &str {
        "Copy files"
    }
    fn usage(&self) -> &str {
        "cp <source> <dest>"
    }
    fn category(&self) -> &str {
        "file"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.len() < 2 {
            return Err(TernError::Execution("cp: missing file operand".to_string()));
        }
        let source = ctx.resolve(args[0]);
        let mut dest = ctx.resolve(args[1]);

        if !source.exists() {
            return Err(TernError::Execution(format!(
                "cp: cannot stat '{}': No such file or directory",
                args[0]
            )));
        }
        if source.is_dir() {
            return Err(TernError::Execution(format!(
                "cp: omitting directory '{}'",
                args[0]
            )));
        }
        if dest.is_dir()
            && let Some(name) = source.file_name()
        {
            dest = dest.join(name);
        }
        std::fs::copy(&source, &dest).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                TernError::Execution("cp: permission denied".to_string())
            } else {
                TernError::Execution(format!("cp: {e}"))
            }
        })?;
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// mv
// ---------------------------------------------------------------------------

pub struct MvCmd;
impl Command for MvCmd {
    fn name(&self) -> &str {
        "mv"
    }
    fn description(&self) -> &str {
        "Move/rename files"
    }
    fn usage(&self) -> &str {
        "mv <source> <dest>"
    }
    fn category(&self) -> &str {
        "file"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.len() < 2 {
            return Err(TernError::Execution("mv: missing file operand".to_string()));
        }
        let source = ctx.resolve(args[0]);
        let mut dest = ctx.resolve(args[1]);

        if !source.exists() {
            return Err(TernError::Execution(format!(
                "mv: cannot stat '{}': No such file or directory",
                args[0]
            )));
        }
        if dest.is_dir()
            && let Some(name) = source.file_name()
        {
            dest = dest.join(name);
        }
        std::fs::rename(&source, &dest).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                TernError::Execution("mv: permission denied".to_string())
            } else {
                TernError::Execution(format!("mv: {e}"))
            }
        })?;
        Ok(String::new())
    }
}

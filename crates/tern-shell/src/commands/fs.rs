//! Filesystem navigation commands: ls, cd, pwd, mkdir, rm, echo, touch.

use std::io::ErrorKind;
use std::path::PathBuf;

use tern_types::error::{Result, TernError};
use tern_types::models::ExecutionContext;

use crate::registry::Command;

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

pub struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [directory]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        let target = match args.first() {
            Some(arg) => ctx.resolve(arg),
            None => ctx.cwd.clone(),
        };

        if !target.exists() {
            return Err(TernError::Execution(format!(
                "ls: cannot access '{}': No such file or directory",
                target.display()
            )));
        }

        if target.is_file() {
            let name = target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| target.display().to_string());
            return Ok(name);
        }

        let read = std::fs::read_dir(&target).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                TernError::Execution(format!(
                    "ls: cannot open directory '{}': Permission denied",
                    target.display()
                ))
            } else {
                TernError::Execution(format!("ls: {e}"))
            }
        })?;

        let mut items = Vec::new();
        for entry in read.flatten() {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                name.push('/');
            }
            items.push(name);
        }
        items.sort();
        Ok(items.join("  "))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

pub struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change current directory"
    }
    fn usage(&self) -> &str {
        "cd [directory]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        let target = match args.first() {
            Some(arg) => ctx.resolve(arg),
            None => PathBuf::from(ctx.env.get("HOME").map(String::as_str).unwrap_or("/")),
        };

        // Canonicalize so .. and symlinks resolve before the context
        // cwd is replaced.
        let canonical = match target.canonicalize() {
            Ok(p) => p,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TernError::Execution(format!(
                    "cd: no such file or directory: {}",
                    target.display()
                )));
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(TernError::Execution(format!(
                    "cd: permission denied: {}",
                    args.first().copied().unwrap_or("~")
                )));
            }
            Err(e) => return Err(TernError::Execution(format!("cd: {e}"))),
        };

        if !canonical.is_dir() {
            return Err(TernError::Execution(format!(
                "cd: not a directory: {}",
                canonical.display()
            )));
        }

        // The session working directory is context state, not process
        // state: sessions must not observe each other's cd.
        ctx.cwd = canonical;
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

pub struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print current working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, _args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        Ok(ctx.cwd.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

pub struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create directories"
    }
    fn usage(&self) -> &str {
        "mkdir <directory>..."
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.is_empty() {
            return Err(TernError::Execution("mkdir: missing operand".to_string()));
        }
        for dir_name in args {
            let target = ctx.resolve(dir_name);
            if target.exists() {
                return Err(TernError::Execution(format!(
                    "mkdir: cannot create directory '{dir_name}': File exists"
                )));
            }
            std::fs::create_dir_all(&target).map_err(|e| {
                if e.kind() == ErrorKind::PermissionDenied {
                    TernError::Execution(format!(
                        "mkdir: cannot create directory '{dir_name}': Permission denied"
                    ))
                } else {
                    TernError::Execution(format!("mkdir: {e}"))
                }
            })?;
        }
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

pub struct RmCmd;
impl Command for RmCmd {
    fn name(&self) -> &str {
        "rm"
    }
    fn description(&self) -> &str {
        "Remove files"
    }
    fn usage(&self) -> &str {
        "rm <file>..."
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        if args.is_empty() {
            return Err(TernError::Execution("rm: missing operand".to_string()));
        }
        for file_name in args {
            let target = ctx.resolve(file_name);
            if !target.exists() {
                return Err(TernError::Execution(format!(
                    "rm: cannot remove '{file_name}': No such file or directory"
                )));
            }
            if target.is_dir() {
                return Err(TernError::Execution(format!(
                    "rm: cannot remove '{file_name}': Is a directory"
                )));
            }
            std::fs::remove_file(&target).map_err(|e| {
                if e.kind() == ErrorKind::PermissionDenied {
                    TernError::Execution(format!(
                        "rm: cannot remove '{file_name}': Permission denied"
                    ))
                } else {
                    TernError::Execution(format!("rm: {e}"))
                }
            })?;
        }
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

pub struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Display text"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        Ok(args.join(" "))
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

pub struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create empty files"
    }
    fn usage(&self) -> &str {
        "touch <file>..."
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn validate(&self, args: &[&str]) -> bool {
        !args.is_empty()
    }
    fn execute(&self, args: &[&str], ctx: &mut ExecutionContext) -> Result<String> {
        for file_name in args {
            let target = ctx.resolve(file_name);
            if target.exists() {
                continue;
            }
            std::fs::File::create(&target)
                .map_err(|e| TernError::Execution(format!("touch: {file_name}: {e}")))?;
        }
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn ctx_in(dir: &Path) -> ExecutionContext {
        let mut ctx = ExecutionContext::new();
        ctx.cwd = dir.to_path_buf();
        ctx
    }

    #[test]
    fn ls_lists_sorted_with_dir_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        let mut ctx = ctx_in(dir.path());
        let out = LsCmd.execute(&[], &mut ctx).unwrap();
        assert_eq!(out, "a/  b.txt");
    }

    #[test]
    fn ls_missing_path_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        let err = LsCmd.execute(&["nope"], &mut ctx).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.starts_with("ls: cannot access"));
        assert!(msg.ends_with("No such file or directory"));
    }

    #[test]
    fn ls_on_file_prints_its_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "x").unwrap();
        let mut ctx = ctx_in(dir.path());
        let out = LsCmd.execute(&["f.txt"], &mut ctx).unwrap();
        assert_eq!(out, "f.txt");
    }

    #[test]
    fn cd_changes_context_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let mut ctx = ctx_in(dir.path());
        CdCmd.execute(&["sub"], &mut ctx).unwrap();
        assert!(ctx.cwd.ends_with("sub"));
    }

    #[test]
    fn cd_missing_dir_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        let err = CdCmd.execute(&["ghost"], &mut ctx).unwrap_err();
        assert!(format!("{err}").starts_with("cd: no such file or directory"));
    }

    #[test]
    fn cd_to_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "x").unwrap();
        let mut ctx = ctx_in(dir.path());
        let err = CdCmd.execute(&["f.txt"], &mut ctx).unwrap_err();
        assert!(format!("{err}").starts_with("cd: not a directory"));
    }

    #[test]
    fn cd_no_args_goes_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        ctx.env
            .insert("HOME".to_string(), dir.path().display().to_string());
        CdCmd.execute(&[], &mut ctx).unwrap();
        assert_eq!(ctx.cwd, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn cd_dot_dot_resolves() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let mut ctx = ctx_in(dir.path());
        CdCmd.execute(&["sub"], &mut ctx).unwrap();
        CdCmd.execute(&[".."], &mut ctx).unwrap();
        assert_eq!(ctx.cwd, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn pwd_prints_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        let out = PwdCmd.execute(&[], &mut ctx).unwrap();
        assert_eq!(out, dir.path().display().to_string());
    }

    #[test]
    fn mkdir_creates_multiple() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        MkdirCmd.execute(&["one", "two"], &mut ctx).unwrap();
        assert!(dir.path().join("one").is_dir());
        assert!(dir.path().join("two").is_dir());
    }

    #[test]
    fn mkdir_existing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        MkdirCmd.execute(&["one"], &mut ctx).unwrap();
        let err = MkdirCmd.execute(&["one"], &mut ctx).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "mkdir: cannot create directory 'one': File exists"
        );
    }

    #[test]
    fn mkdir_missing_operand() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        let err = MkdirCmd.execute(&[], &mut ctx).unwrap_err();
        assert_eq!(format!("{err}"), "mkdir: missing operand");
    }

    #[test]
    fn rm_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.txt"), "x").unwrap();
        let mut ctx = ctx_in(dir.path());
        RmCmd.execute(&["f.txt"], &mut ctx).unwrap();
        assert!(!dir.path().join("f.txt").exists());
    }

    #[test]
    fn rm_refuses_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let mut ctx = ctx_in(dir.path());
        let err = RmCmd.execute(&["sub"], &mut ctx).unwrap_err();
        assert_eq!(format!("{err}"), "rm: cannot remove 'sub': Is a directory");
    }

    #[test]
    fn rm_missing_file_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        let err = RmCmd.execute(&["ghost"], &mut ctx).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "rm: cannot remove 'ghost': No such file or directory"
        );
    }

    #[test]
    fn echo_joins_args() {
        let mut ctx = ExecutionContext::new();
        assert_eq!(EchoCmd.execute(&["a", "b c"], &mut ctx).unwrap(), "a b c");
        assert_eq!(EchoCmd.execute(&[], &mut ctx).unwrap(), "");
    }

    #[test]
    fn touch_creates_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(dir.path());
        TouchCmd.execute(&["f.txt"], &mut ctx).unwrap();
        assert!(dir.path().join("f.txt").exists());
        TouchCmd.execute(&["f.txt"], &mut ctx).unwrap();
    }

    #[test]
    fn touch_validates_operands() {
        assert!(!TouchCmd.validate(&[]));
        assert!(TouchCmd.validate(&["f"]));
    }
}

//! System commands backed by /proc: ps, top, kill, df, free, uptime.

use std::path::Path;

use tern_types::error::{Result, TernError};
use tern_types::models::ExecutionContext;

use crate::registry::Command;

// ---------------------------------------------------------------------------
// /proc parsing helpers
// ---------------------------------------------------------------------------

/// One process row sampled from /proc/<pid>/.
#[derive(Debug, Clone)]
struct ProcessInfo {
    pid: i32,
    name: String,
    state: char,
    mem_percent: f64,
}

/// Parse a /proc/<pid>/stat line into (name, state). The command name may
/// itself contain spaces and parentheses, so split on the last ')'.
fn parse_stat(stat: &str) -> Option<(String, char)> {
    let open = stat.find('(')?;
    let close = stat.rfind(')')?;
    let name = stat.get(open + 1..close)?.to_string();
    let state = stat.get(close + 1..)?.split_whitespace().next()?.chars().next()?;
    Some((name, state))
}

/// Resident set size in kB from /proc/<pid>/statm (second field, in pages).
fn parse_statm_rss_kb(statm: &str, page_size_kb: u64) -> Option<u64> {
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * page_size_kb)
}

/// Extract a field like "MemTotal" from /proc/meminfo, in kB.
fn meminfo_field(meminfo: &str, field: &str) -> Option<u64> {
    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix(field)
            && let Some(rest) = rest.strip_prefix(':')
        {
            return rest.split_whitespace().next()?.parse().ok();
        }
    }
    None
}

fn page_size_kb() -> u64 {
    // SAFETY: sysconf with a valid name has no preconditions.
    let bytes = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if bytes > 0 { bytes as u64 / 1024 } else { 4 }
}

/// Sample every numeric entry under /proc. Processes that vanish while we
/// read them are skipped.
fn sample_processes() -> Vec<ProcessInfo> {
    let mut procs = Vec::new();
    let Ok(entries) = std::fs::read_dir("/proc") else {
        return procs;
    };
    let mem_total_kb = std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|m| meminfo_field(&m, "MemTotal"))
        .unwrap_or(0);
    let page_kb = page_size_kb();

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(pid) = name.to_str().and_then(|s| s.parse::<i32>().ok()) else {
            continue;
        };
        let base = Path::new("/proc").join(name);
        let Ok(stat) = std::fs::read_to_string(base.join("stat")) else {
            continue;
        };
        let Some((proc_name, state)) = parse_stat(&stat) else {
            continue;
        };
        let rss_kb = std::fs::read_to_string(base.join("statm"))
            .ok()
            .and_then(|s| parse_statm_rss_kb(&s, page_kb))
            .unwrap_or(0);
        let mem_percent = if mem_total_kb > 0 {
            rss_kb as f64 / mem_total_kb as f64 * 100.0
        } else {
            0.0
        };
        procs.push(ProcessInfo {
            pid,
            name: proc_name,
            state,
            mem_percent,
        });
    }
    procs.sort_by_key(|p| p.pid);
    procs
}

// ---------------------------------------------------------------------------
// ps
// ---------------------------------------------------------------------------

pub struct PsCmd;
impl Command for PsCmd {
    fn name(&self) -> &str {
        "ps"
    }
    fn description(&self) -> &str {
        "List running processes"
    }
    fn usage(&self) -> &str {
        "ps"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        let procs = sample_processes();
        let mut out = vec![format!("{:>8} {:>6} {:>6} {}", "PID", "STATE", "MEM%", "NAME")];
        for p in procs.iter().take(20) {
            out.push(format!(
                "{:>8} {:>6} {:>6.1} {}",
                p.pid, p.state, p.mem_percent, p.name
            ));
        }
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// top
// ---------------------------------------------------------------------------

pub struct TopCmd;
impl Command for TopCmd {
    fn name(&self) -> &str {
        "top"
    }
    fn description(&self) -> &str {
        "Display system resource usage"
    }
    fn usage(&self) -> &str {
        "top"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        let mut out = Vec::new();

        if let Ok(loadavg) = std::fs::read_to_string("/proc/loadavg") {
            let fields: Vec<&str> = loadavg.split_whitespace().collect();
            if fields.len() >= 3 {
                out.push(format!(
                    "Load average: {} {} {}",
                    fields[0], fields[1], fields[2]
                ));
            }
        }
        if let Ok(meminfo) = std::fs::read_to_string("/proc/meminfo")
            && let Some(total) = meminfo_field(&meminfo, "MemTotal")
            && let Some(avail) = meminfo_field(&meminfo, "MemAvailable")
        {
            let used = total.saturating_sub(avail);
            out.push(format!(
                "Memory: {:.1} MB used / {:.1} MB total ({:.1}%)",
                used as f64 / 1024.0,
                total as f64 / 1024.0,
                if total > 0 {
                    used as f64 / total as f64 * 100.0
                } else {
                    0.0
                }
            ));
        }

        let mut procs = sample_processes();
        procs.sort_by(|a, b| {
            b.mem_percent
                .partial_cmp(&a.mem_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out.push(String::new());
        out.push(format!("{:>8} {:>6} {}", "PID", "MEM%", "NAME"));
        for p in procs.iter().take(10) {
            out.push(format!("{:>8} {:>6.1} {}", p.pid, p.mem_percent, p.name));
        }
        Ok(out.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// kill
// ---------------------------------------------------------------------------

pub struct KillCmd;
impl Command for KillCmd {
    fn name(&self) -> &str {
        "kill"
    }
    fn description(&self) -> &str {
        "Terminate a process by PID"
    }
    fn usage(&self) -> &str {
        "kill <pid>"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn validate(&self, args: &[&str]) -> bool {
        args.len() == 1
    }
    fn execute(&self, args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        let pid: i32 = args[0]
            .parse()
            .map_err(|_| TernError::Execution("kill: invalid process ID".to_string()))?;
        // SAFETY: kill(2) is safe to call with any pid/signal pair.
        let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
        if rc == 0 {
            return Ok(format!("Process {pid} terminated"));
        }
        match std::io::Error::last_os_error().raw_os_error() {
            Some(libc::ESRCH) => Err(TernError::Execution(format!(
                "kill: no such process: {pid}"
            ))),
            Some(libc::EPERM) => Err(TernError::Execution(format!(
                "kill: permission denied for process {pid}"
            ))),
            _ => Err(TernError::Execution(format!(
                "kill: failed to terminate process {pid}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// df
// ---------------------------------------------------------------------------

pub struct DfCmd;
impl Command for DfCmd {
    fn name(&self) -> &str {
        "df"
    }
    fn description(&self) -> &str {
        "Show filesystem disk usage"
    }
    fn usage(&self) -> &str {
        "df"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        // SAFETY: zeroed statvfs is a valid out-parameter for statvfs(2).
        let mut vfs: libc::statvfs = unsafe { std::mem::zeroed() };
        let path = c"/";
        // SAFETY: path is a valid NUL-terminated string and vfs is writable.
        let rc = unsafe { libc::statvfs(path.as_ptr(), &mut vfs) };
        if rc != 0 {
            return Err(TernError::Execution("df: cannot read filesystem statistics".to_string()));
        }
        let block = vfs.f_frsize;
        let total = vfs.f_blocks * block;
        let free = vfs.f_bavail * block;
        let used = total.saturating_sub(vfs.f_bfree * block);
        let gb = 1024.0 * 1024.0 * 1024.0;
        let percent = if total > 0 {
            used as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Ok(format!(
            "{:<12} {:>10} {:>10} {:>10} {:>5}\n{:<12} {:>9.1}G {:>9.1}G {:>9.1}G {:>4.0}%",
            "Filesystem",
            "Size",
            "Used",
            "Avail",
            "Use%",
            "/",
            total as f64 / gb,
            used as f64 / gb,
            free as f64 / gb,
            percent
        ))
    }
}

// ---------------------------------------------------------------------------
// free
// ---------------------------------------------------------------------------

pub struct FreeCmd;
impl Command for FreeCmd {
    fn name(&self) -> &str {
        "free"
    }
    fn description(&self) -> &str {
        "Show memory usage"
    }
    fn usage(&self) -> &str {
        "free"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        let meminfo = std::fs::read_to_string("/proc/meminfo")
            .map_err(|e| TernError::Execution(format!("free: {e}")))?;
        render_free(&meminfo)
            .ok_or_else(|| TernError::Execution("free: cannot parse memory statistics".to_string()))
    }
}

fn render_free(meminfo: &str) -> Option<String> {
    let total = meminfo_field(meminfo, "MemTotal")?;
    let avail = meminfo_field(meminfo, "MemAvailable")?;
    let free = meminfo_field(meminfo, "MemFree").unwrap_or(0);
    let swap_total = meminfo_field(meminfo, "SwapTotal").unwrap_or(0);
    let swap_free = meminfo_field(meminfo, "SwapFree").unwrap_or(0);
    let used = total.saturating_sub(avail);
    Some(format!(
        "{:<8} {:>12} {:>12} {:>12} {:>12}\n{:<8} {:>12} {:>12} {:>12} {:>12}\n{:<8} {:>12} {:>12} {:>12} {:>12}",
        "",
        "total",
        "used",
        "free",
        "available",
        "Mem:",
        total,
        used,
        free,
        avail,
        "Swap:",
        swap_total,
        swap_total.saturating_sub(swap_free),
        swap_free,
        ""
    ))
}

// ---------------------------------------------------------------------------
// uptime
// ---------------------------------------------------------------------------

pub struct UptimeCmd;
impl Command for UptimeCmd {
    fn name(&self) -> &str {
        "uptime"
    }
    fn description(&self) -> &str {
        "Show system uptime"
    }
    fn usage(&self) -> &str {
        "uptime"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], _ctx: &mut ExecutionContext) -> Result<String> {
        let raw = std::fs::read_to_string("/proc/uptime")
            .map_err(|e| TernError::Execution(format!("uptime: {e}")))?;
        let seconds: f64 = raw
            .split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| TernError::Execution("uptime: cannot parse uptime".to_string()))?;
        Ok(format_uptime(seconds as u64))
    }
}

fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    if days > 0 {
        format!("up {days} day(s), {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("up {hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stat_handles_parenthesised_names() {
        let stat = "1234 (some (weird) name) S 1 1234 1234 0 -1";
        let (name, state) = parse_stat(stat).unwrap();
        assert_eq!(name, "some (weird) name");
        assert_eq!(state, 'S');
    }

    #[test]
    fn parse_stat_plain() {
        let stat = "1 (systemd) S 0 1 1 0 -1 4194560";
        let (name, state) = parse_stat(stat).unwrap();
        assert_eq!(name, "systemd");
        assert_eq!(state, 'S');
    }

    #[test]
    fn parse_statm_rss() {
        assert_eq!(parse_statm_rss_kb("2500 640 400 100 0 300 0", 4), Some(2560));
        assert_eq!(parse_statm_rss_kb("garbage", 4), None);
    }

    #[test]
    fn meminfo_field_lookup() {
        let meminfo = "MemTotal:       16384000 kB\nMemFree:         1234567 kB\nMemAvailable:    8000000 kB\n";
        assert_eq!(meminfo_field(meminfo, "MemTotal"), Some(16_384_000));
        assert_eq!(meminfo_field(meminfo, "MemAvailable"), Some(8_000_000));
        assert_eq!(meminfo_field(meminfo, "Bogus"), None);
    }

    #[test]
    fn meminfo_field_requires_exact_prefix() {
        let meminfo = "SwapTotal: 100 kB\nSwapFree: 50 kB\n";
        assert_eq!(meminfo_field(meminfo, "SwapTotal"), Some(100));
        assert_eq!(meminfo_field(meminfo, "SwapFree"), Some(50));
    }

    #[test]
    fn render_free_rows() {
        let meminfo =
            "MemTotal: 1000 kB\nMemFree: 200 kB\nMemAvailable: 400 kB\nSwapTotal: 500 kB\nSwapFree: 500 kB\n";
        let out = render_free(meminfo).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Mem:"));
        assert!(lines[1].contains("600")); // used = total - available
        assert!(lines[2].starts_with("Swap:"));
    }

    #[test]
    fn uptime_formats() {
        assert_eq!(format_uptime(59), "up 00:00:59");
        assert_eq!(format_uptime(3_661), "up 01:01:01");
        assert_eq!(format_uptime(90_061), "up 1 day(s), 01:01:01");
    }

    #[test]
    fn kill_rejects_non_numeric_pid() {
        let mut ctx = ExecutionContext::new();
        let err = KillCmd.execute(&["abc"], &mut ctx).unwrap_err();
        assert_eq!(format!("{err}"), "kill: invalid process ID");
    }

    #[test]
    fn kill_validates_arity() {
        assert!(KillCmd.validate(&["123"]));
        assert!(!KillCmd.validate(&[]));
        assert!(!KillCmd.validate(&["1", "2"]));
    }

    #[test]
    fn ps_emits_header() {
        let mut ctx = ExecutionContext::new();
        let out = PsCmd.execute(&[], &mut ctx).unwrap();
        assert!(out.lines().next().unwrap().contains("PID"));
    }
}

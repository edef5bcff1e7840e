//! Windows owner lookup using netstat and tasklist.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

use super::{LookupBackend, PortOwner};

/// Windows-specific owner lookup using netstat.
#[derive(Debug, Default)]
pub struct NetstatLookup;

impl NetstatLookup {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a PID to an image name.
    ///
    /// Executes: `tasklist /FI "PID eq <pid>" /FO CSV /NH`
    async fn process_name(&self, pid: u32) -> Option<String> {
        let output = Command::new("tasklist")
            .arg("/FI")
            .arg(format!("PID eq {}", pid))
            .args(["/FO", "CSV", "/NH"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;

        let stdout = String::from_utf8(output.stdout).ok()?;
        parse_tasklist_name(&stdout)
    }
}

/// Extract the PID of a LISTENING row on `port` from netstat output.
///
/// Expected netstat output format:
/// ```text
///   Proto  Local Address          Foreign Address        State           PID
///   TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       34805
///   TCP    [::]:3000              [::]:0                 LISTENING       34805
/// ```
fn parse_netstat_pid(output: &str, port: u16) -> Option<u32> {
    let suffix = format!(":{}", port);

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 || fields[0] != "TCP" {
            continue;
        }

        if fields[3] != "LISTENING" || !fields[1].ends_with(&suffix) {
            continue;
        }

        // First matching row wins; ordering is not contractual.
        if let Ok(pid) = fields[4].parse() {
            return Some(pid);
        }
    }

    None
}

/// Extract the image name from tasklist CSV output.
///
/// Expected format: `"node.exe","34805","Console","1","45,120 K"`
fn parse_tasklist_name(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let name = line.split(',').next()?.trim_matches('"');
    if name.is_empty() || name.starts_with("INFO:") {
        None
    } else {
        Some(name.to_string())
    }
}

impl LookupBackend for NetstatLookup {
    /// Find the listener on `port`.
    ///
    /// Executes: `netstat -ano -p tcp` and filters the rows in Rust
    /// rather than piping through findstr.
    async fn owner_of(&self, port: u16) -> Result<Option<PortOwner>> {
        let output = Command::new("netstat")
            .args(["-ano", "-p", "tcp"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run netstat: {}", e)))?;

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in netstat output: {}", e)))?;

        let Some(pid) = parse_netstat_pid(&stdout, port) else {
            return Ok(None);
        };

        let process = self.process_name(pid).await;
        debug!(port = port, pid = pid, "Resolved listening process");

        Ok(Some(PortOwner { pid, process }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETSTAT_OUTPUT: &str = "\n  Proto  Local Address          Foreign Address        State           PID\n  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       34805\n  TCP    127.0.0.1:8080         0.0.0.0:0              LISTENING       112\n  TCP    127.0.0.1:52000        127.0.0.1:3000         ESTABLISHED     99\n  TCP    [::]:3000              [::]:0                 LISTENING       34805\n";

    #[test]
    fn test_parse_netstat_pid() {
        assert_eq!(parse_netstat_pid(NETSTAT_OUTPUT, 3000), Some(34805));
        assert_eq!(parse_netstat_pid(NETSTAT_OUTPUT, 8080), Some(112));
    }

    #[test]
    fn test_established_rows_are_ignored() {
        // 52000 only appears as the local end of an ESTABLISHED row.
        assert_eq!(parse_netstat_pid(NETSTAT_OUTPUT, 52000), None);
    }

    #[test]
    fn test_port_suffix_must_match_exactly() {
        // Port 300 must not match the :3000 rows.
        assert_eq!(parse_netstat_pid(NETSTAT_OUTPUT, 300), None);
    }

    #[test]
    fn test_parse_tasklist_name() {
        let output = "\"node.exe\",\"34805\",\"Console\",\"1\",\"45,120 K\"\n";
        assert_eq!(parse_tasklist_name(output), Some("node.exe".to_string()));
    }

    #[test]
    fn test_tasklist_no_match() {
        assert_eq!(parse_tasklist_name(""), None);
        assert_eq!(
            parse_tasklist_name("INFO: No tasks are running which match the specified criteria.\n"),
            None
        );
    }
}

//! macOS owner lookup using lsof and ps.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

use super::{LookupBackend, PortOwner};

/// macOS-specific owner lookup using lsof.
#[derive(Debug, Default)]
pub struct LsofLookup;

impl LsofLookup {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a PID to a short process name.
    ///
    /// Executes: `ps -p <pid> -o comm=`
    async fn process_name(&self, pid: u32) -> Option<String> {
        let output = Command::new("/bin/ps")
            .arg("-p")
            .arg(pid.to_string())
            .args(["-o", "comm="])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .ok()?;

        let name = String::from_utf8(output.stdout).ok()?;
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            // comm is a full path on macOS; keep the basename.
            Some(
                name.rsplit('/')
                    .next()
                    .unwrap_or(name)
                    .to_string(),
            )
        }
    }
}

/// Take the first PID from lsof terse output (one PID per line).
fn parse_lsof_pids(output: &str) -> Option<u32> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.parse().ok())
}

impl LookupBackend for LsofLookup {
    /// Find the listener on `port`.
    ///
    /// Executes: `lsof -ti :<port> -sTCP:LISTEN`
    ///
    /// Flags explained:
    /// - -t: terse output, PIDs only
    /// - -i :<port>: select internet sockets on this port
    /// - -sTCP:LISTEN: only sockets in LISTEN state
    ///
    /// lsof exits non-zero when nothing matches, so a failed exit with no
    /// output means "free". Only a failed spawn (missing binary) is an
    /// error.
    async fn owner_of(&self, port: u16) -> Result<Option<PortOwner>> {
        let output = Command::new("/usr/sbin/lsof")
            .arg("-ti")
            .arg(format!(":{}", port))
            .arg("-sTCP:LISTEN")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run lsof: {}", e)))?;

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in lsof output: {}", e)))?;

        let Some(pid) = parse_lsof_pids(&stdout) else {
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

    #[test]
    fn test_parse_single_pid() {
        assert_eq!(parse_lsof_pids("34805\n"), Some(34805));
    }

    #[test]
    fn test_first_pid_wins() {
        // Several processes can share a port (e.g., forked workers); the
        // first entry is reported.
        assert_eq!(parse_lsof_pids("100\n200\n300\n"), Some(100));
    }

    #[test]
    fn test_empty_output_means_free() {
        assert_eq!(parse_lsof_pids(""), None);
        assert_eq!(parse_lsof_pids("\n  \n"), None);
    }

    #[test]
    fn test_garbage_output() {
        assert_eq!(parse_lsof_pids("not-a-pid\n"), None);
    }
}

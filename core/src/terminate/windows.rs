//! Windows forced kill via taskkill.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::KillBackend;

/// Windows kill backend shelling out to taskkill.
#[derive(Debug, Default)]
pub struct TaskkillKiller;

impl KillBackend for TaskkillKiller {
    /// Executes: `taskkill /PID <pid> /F`
    async fn kill_force(&self, pid: u32) -> Result<()> {
        debug!(pid = pid, "Running taskkill /F");

        let output = Command::new("taskkill")
            .arg("/PID")
            .arg(pid.to_string())
            .arg("/F")
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run taskkill: {}", e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);

        if stderr.contains("Access is denied") {
            warn!(pid = pid, "Permission denied running taskkill");
            return Err(Error::PermissionDenied(pid));
        }

        if stderr.contains("not found") {
            // The process vanished between lookup and kill.
            return Err(Error::KillFailed {
                pid,
                reason: "process exited before taskkill ran".to_string(),
            });
        }

        Err(Error::KillFailed {
            pid,
            reason: stderr.trim().to_string(),
        })
    }
}

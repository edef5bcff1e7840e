//! Unix forced kill via SIGKILL.
//!
//! Uses the kill(2) syscall through nix rather than shelling out to
//! /bin/kill.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::KillBackend;

/// Unix kill backend sending SIGKILL directly.
#[derive(Debug, Default)]
pub struct SignalKiller;

impl KillBackend for SignalKiller {
    async fn kill_force(&self, pid: u32) -> Result<()> {
        debug!(pid = pid, "Sending SIGKILL");

        match kill(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => {
                // The process vanished between lookup and kill.
                debug!(pid = pid, "Process exited before the signal was delivered");
                Err(Error::KillFailed {
                    pid,
                    reason: "process exited before the signal was delivered".to_string(),
                })
            }
            Err(Errno::EPERM) => {
                warn!(pid = pid, "Permission denied sending SIGKILL");
                Err(Error::PermissionDenied(pid))
            }
            Err(e) => Err(Error::KillFailed {
                pid,
                reason: e.to_string(),
            }),
        }
    }
}

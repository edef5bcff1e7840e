//! Process termination keyed by port.
//!
//! A terminate request is one sequential two-step operation: resolve the
//! owning process with the shared lookup, then deliver a forced kill. The
//! process owning the port at lookup time may differ from the one holding
//! it at kill time (TOCTOU); no re-verification is performed.

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::lookup::PortLookup;
use crate::status::UNKNOWN_PROCESS;

/// Bound on the owner lookup preceding a kill.
const KILL_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for platform-specific forced-kill implementations.
trait KillBackend: Send + Sync {
    /// Deliver a forced, non-catchable termination to `pid`.
    fn kill_force(&self, pid: u32) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Outcome of a successful termination.
#[derive(Debug, Clone, Serialize)]
pub struct TerminateReport {
    /// The port that was freed.
    pub port: u16,

    /// PID the kill was delivered to.
    pub pid: u32,

    /// Human-readable confirmation.
    pub message: String,
}

/// Terminates whichever process holds a given port.
#[derive(Debug, Default)]
pub struct ProcessTerminator {
    lookup: PortLookup,

    #[cfg(unix)]
    killer: unix::SignalKiller,

    #[cfg(windows)]
    killer: windows::TaskkillKiller,
}

impl ProcessTerminator {
    /// Create a terminator for the current platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate the process listening on `port` and force-kill it.
    ///
    /// `Error::NoListener` is the expected-absence case (nothing to kill);
    /// no kill is attempted for it. Any other error means the lookup or
    /// the kill itself failed.
    pub async fn terminate(&self, port: u16) -> Result<TerminateReport> {
        let owner = tokio::time::timeout(KILL_LOOKUP_TIMEOUT, self.lookup.owner_of(port))
            .await
            .map_err(|_| Error::LookupTimeout {
                port,
                timeout_ms: KILL_LOOKUP_TIMEOUT.as_millis() as u64,
            })??
            .ok_or(Error::NoListener(port))?;

        self.killer.kill_force(owner.pid).await?;

        let process = owner.process.unwrap_or_else(|| UNKNOWN_PROCESS.to_string());
        info!(port = port, pid = owner.pid, process = %process, "Terminated listening process");

        Ok(TerminateReport {
            port,
            pid: owner.pid,
            message: format!(
                "Terminated {} (PID {}) listening on port {}",
                process, owner.pid, port
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_terminate_unbound_port_reports_no_listener() {
        // Grab a free port and release it before terminating.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let terminator = ProcessTerminator::new();
        match terminator.terminate(port).await {
            Err(Error::NoListener(p)) => assert_eq!(p, port),
            other => panic!("expected NoListener, got {:?}", other.map(|r| r.message)),
        }
    }
}

//! Port probing.
//!
//! The prober never fails: every lookup outcome, including tooling failure
//! and timeout, resolves to a concrete [`PortStatus`].

use std::time::Duration;

use tracing::warn;

use crate::lookup::PortLookup;
use crate::status::PortStatus;

/// Default bound on a single lookup.
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes single ports for a listening owner.
#[derive(Debug)]
pub struct PortProber {
    lookup: PortLookup,
    timeout: Duration,
}

impl PortProber {
    /// Create a prober for the current platform with the default timeout.
    pub fn new() -> Self {
        Self {
            lookup: PortLookup::new(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Determine the occupancy of `port`.
    ///
    /// A hung lookup is cut off at the configured timeout and reported as
    /// [`PortStatus::Unknown`], as is any lookup failure; absence of a
    /// listener is [`PortStatus::Free`].
    pub async fn probe(&self, port: u16) -> PortStatus {
        match tokio::time::timeout(self.timeout, self.lookup.owner_of(port)).await {
            Ok(Ok(Some(owner))) => PortStatus::occupied(owner.pid, owner.process),
            Ok(Ok(None)) => PortStatus::Free,
            Ok(Err(e)) => {
                warn!(port = port, error = %e, "Port lookup failed; occupancy unknown");
                PortStatus::Unknown
            }
            Err(_) => {
                warn!(
                    port = port,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Port lookup timed out; occupancy unknown"
                );
                PortStatus::Unknown
            }
        }
    }
}

impl Default for PortProber {
    fn default() -> Self {
        Self::new()
    }
}

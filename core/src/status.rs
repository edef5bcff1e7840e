//! Port occupancy status model.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Sentinel process name used when PID resolution succeeded but name
/// resolution did not.
pub const UNKNOWN_PROCESS: &str = "unknown";

/// The observed state of a single port at probe time.
///
/// Recomputed on every probe; has no identity beyond one request cycle.
/// `Unknown` means the lookup tooling failed or timed out, which is a
/// distinct condition from an observed absence of listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortStatus {
    /// The lookup ran cleanly and found no listener.
    Free,

    /// A process holds the port in LISTEN state. The PID is always known;
    /// the name falls back to [`UNKNOWN_PROCESS`] if resolution failed.
    Occupied { pid: u32, process: String },

    /// Occupancy could not be determined (lookup failed or timed out).
    Unknown,
}

impl PortStatus {
    /// Build an occupied status, applying the sentinel name fallback.
    pub fn occupied(pid: u32, process: Option<String>) -> Self {
        PortStatus::Occupied {
            pid,
            process: process.unwrap_or_else(|| UNKNOWN_PROCESS.to_string()),
        }
    }

    /// Whether a listener was positively observed.
    pub fn is_occupied(&self) -> bool {
        matches!(self, PortStatus::Occupied { .. })
    }

    /// Whether occupancy could not be determined.
    pub fn is_unknown(&self) -> bool {
        matches!(self, PortStatus::Unknown)
    }

    /// PID of the owning process, if one was observed.
    pub fn pid(&self) -> Option<u32> {
        match self {
            PortStatus::Occupied { pid, .. } => Some(*pid),
            _ => None,
        }
    }

    /// Name of the owning process, if one was observed.
    pub fn process(&self) -> Option<&str> {
        match self {
            PortStatus::Occupied { process, .. } => Some(process),
            _ => None,
        }
    }
}

// The wire shape is fixed: {occupied, pid, process}. Unknown collapses to
// occupied=false on the wire; callers log it separately.
impl Serialize for PortStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PortStatus", 3)?;
        state.serialize_field("occupied", &self.is_occupied())?;
        state.serialize_field("pid", &self.pid())?;
        state.serialize_field("process", &self.process())?;
        state.end()
    }
}

//! Ponitor Core Library
//!
//! Cross-platform library for inspecting a fixed catalog of well-known
//! network ports and freeing them. Provides functionality to:
//! - Probe a port for a listening process (occupancy, PID, process name)
//! - Force-terminate the process holding a port
//! - Expose the static catalog of commonly contended developer ports
//!
//! # Platform Support
//! - Linux: reads procfs directly (`/proc/net/tcp`, `/proc/<pid>/comm`)
//! - macOS: uses `lsof` and `ps` commands
//! - Windows: uses `netstat` and `tasklist` commands

pub mod catalog;
pub mod error;
pub mod lookup;
pub mod probe;
pub mod status;
pub mod terminate;

pub use catalog::{Category, PortDescriptor, COMMON_PORTS};
pub use error::{Error, Result};
pub use lookup::{PortLookup, PortOwner};
pub use probe::PortProber;
pub use status::PortStatus;
pub use terminate::{ProcessTerminator, TerminateReport};

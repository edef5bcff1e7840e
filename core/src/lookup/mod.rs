//! Owning-process lookup with platform-specific implementations.
//!
//! Answers one question: which process, if any, holds a given TCP port in
//! LISTEN state on the local machine. Both the prober and the terminator
//! share this lookup.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod darwin;

#[cfg(target_os = "windows")]
mod windows;

use crate::error::Result;

/// The process observed to own a listening port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOwner {
    /// PID of the listening process.
    pub pid: u32,

    /// Process name, if name resolution succeeded.
    pub process: Option<String>,
}

/// Trait for platform-specific owner lookup implementations.
pub trait LookupBackend: Send + Sync {
    /// Find the process listening on `port`, if any.
    ///
    /// `Ok(None)` means the lookup ran cleanly and observed no listener.
    /// `Err` means the lookup itself could not be trusted (missing tool,
    /// unreadable procfs, unparseable output).
    fn owner_of(&self, port: u16)
        -> impl std::future::Future<Output = Result<Option<PortOwner>>> + Send;
}

/// The main port lookup that uses the platform-specific implementation.
#[derive(Debug)]
pub struct PortLookup {
    #[cfg(target_os = "linux")]
    inner: linux::ProcfsLookup,

    #[cfg(target_os = "macos")]
    inner: darwin::LsofLookup,

    #[cfg(target_os = "windows")]
    inner: windows::NetstatLookup,
}

impl PortLookup {
    /// Create a new lookup for the current platform.
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "linux")]
            inner: linux::ProcfsLookup::new(),

            #[cfg(target_os = "macos")]
            inner: darwin::LsofLookup::new(),

            #[cfg(target_os = "windows")]
            inner: windows::NetstatLookup::new(),
        }
    }

    /// Find the process listening on `port`, if any.
    pub async fn owner_of(&self, port: u16) -> Result<Option<PortOwner>> {
        self.inner.owner_of(port).await
    }
}

impl Default for PortLookup {
    fn default() -> Self {
        Self::new()
    }
}

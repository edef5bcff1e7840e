//! Error types for the ponitor-core library.

use thiserror::Error;

/// Result type alias for ponitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during port lookup and process termination.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse command or procfs output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),

    /// A listening socket exists but its owning process could not be
    /// resolved (typically insufficient privileges to inspect it).
    #[error("Cannot resolve the process owning port {0}")]
    OwnerUnresolved(u16),

    /// The lookup did not complete within the configured deadline.
    #[error("Port {port} lookup timed out after {timeout_ms}ms")]
    LookupTimeout { port: u16, timeout_ms: u64 },

    /// No process is listening on the given port.
    #[error("No process found listening on port {0}")]
    NoListener(u16),

    /// Permission denied while killing a process.
    #[error("Permission denied to kill process {0}")]
    PermissionDenied(u32),

    /// Failed to kill a process.
    #[error("Failed to kill process {pid}: {reason}")]
    KillFailed { pid: u32, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert() {
        // Unreadable socket tables surface as Io through ?/From.
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::NoListener(3000);
        assert!(err.to_string().contains("3000"));

        let err = Error::KillFailed {
            pid: 1234,
            reason: "gone".to_string(),
        };
        assert!(err.to_string().contains("1234"));
    }
}

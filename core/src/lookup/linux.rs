//! Linux owner lookup reading procfs directly.
//!
//! No subprocess is spawned. Listening sockets come from `/proc/net/tcp`
//! and `/proc/net/tcp6`, the socket inode is resolved to a PID by scanning
//! `/proc/<pid>/fd`, and the process name comes from `/proc/<pid>/comm`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

use super::{LookupBackend, PortOwner};

/// TCP_LISTEN in the procfs socket state column.
const TCP_LISTEN: &str = "0A";

/// Linux-specific owner lookup.
#[derive(Debug, Default)]
pub struct ProcfsLookup;

impl ProcfsLookup {
    pub fn new() -> Self {
        Self
    }
}

/// Extract the socket inode of a listener on `port` from one
/// `/proc/net/tcp{,6}` table.
///
/// Expected format (space-delimited, addresses hex-encoded):
/// ```text
///   sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
///    0: 0100007F:0BB8 00000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 12345 ...
/// ```
fn find_listener_inode(table: &str, port: u16) -> Option<u64> {
    for line in table.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }

        if fields[3] != TCP_LISTEN {
            continue;
        }

        // local_address is "HEXADDR:HEXPORT"
        let local_port = fields[1]
            .rsplit(':')
            .next()
            .and_then(|hex| u16::from_str_radix(hex, 16).ok());
        if local_port != Some(port) {
            continue;
        }

        let inode: u64 = match fields[9].parse() {
            Ok(i) => i,
            Err(_) => continue,
        };
        if inode == 0 {
            continue;
        }

        // First matching listener wins; ordering is not contractual.
        return Some(inode);
    }

    None
}

/// Walk `/proc/<pid>/fd` looking for the process holding `socket:[inode]`.
///
/// Requires permission to read the fd directories, so in practice this
/// only resolves processes owned by the current user unless running as
/// root.
fn pid_for_inode(proc_root: &Path, inode: u64) -> Option<u32> {
    let target = format!("socket:[{}]", inode);

    let entries = fs::read_dir(proc_root).ok()?;
    for entry in entries.flatten() {
        let pid: u32 = match entry.file_name().to_str().and_then(|n| n.parse().ok()) {
            Some(p) => p,
            None => continue,
        };

        let fd_dir = entry.path().join("fd");
        let fds = match fs::read_dir(&fd_dir) {
            Ok(fds) => fds,
            Err(_) => continue,
        };

        for fd in fds.flatten() {
            if let Ok(link) = fs::read_link(fd.path()) {
                if link.as_os_str() == target.as_str() {
                    return Some(pid);
                }
            }
        }
    }

    None
}

/// Read the short process name from `/proc/<pid>/comm`.
fn process_name(proc_root: &Path, pid: u32) -> Option<String> {
    let comm = fs::read_to_string(proc_root.join(pid.to_string()).join("comm")).ok()?;
    let name = comm.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn resolve_owner(inode: u64, port: u16) -> Result<PortOwner> {
    let proc_root = Path::new("/proc");
    match pid_for_inode(proc_root, inode) {
        Some(pid) => Ok(PortOwner {
            pid,
            process: process_name(proc_root, pid),
        }),
        None => Err(Error::OwnerUnresolved(port)),
    }
}

impl LookupBackend for ProcfsLookup {
    async fn owner_of(&self, port: u16) -> Result<Option<PortOwner>> {
        let mut inode = None;
        let mut readable = false;
        let mut read_err = None;

        for path in ["/proc/net/tcp", "/proc/net/tcp6"] {
            match tokio::fs::read_to_string(path).await {
                Ok(table) => {
                    readable = true;
                    inode = find_listener_inode(&table, port);
                    if inode.is_some() {
                        break;
                    }
                }
                Err(e) => {
                    debug!(path = path, error = %e, "Could not read socket table");
                    read_err = Some(e);
                }
            }
        }

        if !readable {
            // Neither table could be read; surface the I/O failure.
            return Err(read_err.map(Error::from).unwrap_or_else(|| {
                Error::CommandFailed("no readable procfs socket table".to_string())
            }));
        }

        let Some(inode) = inode else {
            return Ok(None);
        };

        // The fd scan touches many directories; keep it off the runtime.
        let owner = tokio::task::spawn_blocking(move || resolve_owner(inode, port))
            .await
            .map_err(|e| Error::CommandFailed(format!("lookup task failed: {}", e)))??;

        debug!(port = port, pid = owner.pid, "Resolved listening process");
        Ok(Some(owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TCP_TABLE: &str = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode\n   0: 0100007F:0BB8 00000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 34567 1 0000000000000000 100 0 0 10 0\n   1: 00000000:1F90 00000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 45678 1 0000000000000000 100 0 0 10 0\n   2: 0100007F:2382 0100007F:0BB8 01 00000000:00000000 00:00000000 00000000  1000        0 56789 1 0000000000000000 100 0 0 10 0\n";

    #[test]
    fn test_find_listener_inode() {
        // 0x0BB8 == 3000
        assert_eq!(find_listener_inode(TCP_TABLE, 3000), Some(34567));
        // 0x1F90 == 8080
        assert_eq!(find_listener_inode(TCP_TABLE, 8080), Some(45678));
    }

    #[test]
    fn test_established_sockets_are_ignored() {
        // Port 9090 (0x2382) appears only as an ESTABLISHED (01) entry.
        assert_eq!(find_listener_inode(TCP_TABLE, 9090), None);
    }

    #[test]
    fn test_no_listener() {
        assert_eq!(find_listener_inode(TCP_TABLE, 5432), None);
    }

    #[test]
    fn test_zero_inode_is_skipped() {
        let table = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode\n   0: 0100007F:0050 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 0 1\n";
        assert_eq!(find_listener_inode(table, 80), None);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let table = "header\ngarbage line\n   0: nonsense\n";
        assert_eq!(find_listener_inode(table, 80), None);
    }

    #[tokio::test]
    async fn test_own_listener_is_resolved() {
        // Bind a socket in this process and look it up through procfs.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let lookup = ProcfsLookup::new();
        let owner = lookup
            .owner_of(port)
            .await
            .unwrap()
            .expect("own listener should be visible");

        assert_eq!(owner.pid, std::process::id());
        assert!(owner.process.is_some());
    }
}

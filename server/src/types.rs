//! JSON response types for the HTTP API.

use ponitor_core::{PortDescriptor, PortStatus};
use serde::Serialize;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub platform: &'static str,
    pub timestamp: String,
}

/// One entry of `GET /api/ports`: catalog descriptor merged with the
/// live status observed for it.
#[derive(Debug, Serialize)]
pub struct PortEntry {
    #[serde(flatten)]
    pub descriptor: PortDescriptor,

    #[serde(flatten)]
    pub status: PortStatus,
}

/// Body of `GET /api/ports`.
#[derive(Debug, Serialize)]
pub struct PortsResponse {
    pub success: bool,
    pub platform: &'static str,
    pub timestamp: String,
    pub ports: Vec<PortEntry>,
}

/// Body of a successful `POST /api/kill/:port`.
#[derive(Debug, Serialize)]
pub struct KillResponse {
    pub success: bool,
    pub message: String,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ponitor_core::COMMON_PORTS;

    #[test]
    fn test_port_entry_merges_descriptor_and_status() {
        let entry = PortEntry {
            descriptor: COMMON_PORTS[2].clone(),
            status: PortStatus::occupied(4321, Some("node".to_string())),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["port"], 3000);
        assert_eq!(json["name"], "Node.js Dev");
        assert_eq!(json["category"], "development");
        assert_eq!(json["occupied"], true);
        assert_eq!(json["pid"], 4321);
        assert_eq!(json["process"], "node");
    }

    #[test]
    fn test_free_entry_has_null_fields() {
        let entry = PortEntry {
            descriptor: COMMON_PORTS[0].clone(),
            status: PortStatus::Free,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["occupied"], false);
        assert!(json["pid"].is_null());
        assert!(json["process"].is_null());
    }
}

//! Static catalog of well-known developer ports.
//!
//! The catalog is fixed at build time and never mutated. Status requests
//! fan the prober out over these entries in array order, and responses
//! preserve that order.

use serde::Serialize;

/// Functional category of a well-known port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Web servers (HTTP, HTTPS, alternates).
    Web,
    /// Database and cache servers.
    Database,
    /// Local development servers and tooling.
    Development,
    /// System services (SSH, FTP, RDP).
    System,
}

/// A single catalog entry describing a well-known port.
#[derive(Debug, Clone, Serialize)]
pub struct PortDescriptor {
    /// The port number (1-65535).
    pub port: u16,

    /// Short display name (e.g., "PostgreSQL").
    pub name: &'static str,

    /// Functional category.
    pub category: Category,

    /// One-line description.
    pub description: &'static str,
}

const fn entry(
    port: u16,
    name: &'static str,
    category: Category,
    description: &'static str,
) -> PortDescriptor {
    PortDescriptor {
        port,
        name,
        category,
        description,
    }
}

/// The fixed catalog of commonly contended ports, in report order.
pub static COMMON_PORTS: [PortDescriptor; 16] = [
    entry(80, "HTTP", Category::Web, "Web server"),
    entry(443, "HTTPS", Category::Web, "SSL/TLS web server"),
    entry(3000, "Node.js Dev", Category::Development, "Development server"),
    entry(3306, "MySQL", Category::Database, "MySQL database"),
    entry(5432, "PostgreSQL", Category::Database, "PostgreSQL database"),
    entry(6379, "Redis", Category::Database, "Redis cache"),
    entry(27017, "MongoDB", Category::Database, "MongoDB database"),
    entry(8080, "HTTP Alt", Category::Web, "Alternate web server"),
    entry(9000, "PHP-FPM", Category::Development, "PHP FastCGI"),
    entry(5000, "Flask/Custom", Category::Development, "Python Flask"),
    entry(8000, "Django", Category::Development, "Python Django"),
    entry(4200, "Angular", Category::Development, "Angular dev server"),
    entry(5173, "Vite", Category::Development, "Vite dev server"),
    entry(22, "SSH", Category::System, "SSH remote access"),
    entry(21, "FTP", Category::System, "FTP file transfer"),
    entry(3389, "RDP", Category::System, "Windows remote desktop"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_sixteen_entries() {
        assert_eq!(COMMON_PORTS.len(), 16);
    }

    #[test]
    fn test_catalog_ports_are_unique() {
        let ports: HashSet<u16> = COMMON_PORTS.iter().map(|d| d.port).collect();
        assert_eq!(ports.len(), COMMON_PORTS.len());
    }

    #[test]
    fn test_catalog_order_is_stable() {
        // Report order is part of the API contract.
        let order: Vec<u16> = COMMON_PORTS.iter().map(|d| d.port).collect();
        assert_eq!(
            order,
            vec![
                80, 443, 3000, 3306, 5432, 6379, 27017, 8080, 9000, 5000, 8000, 4200, 5173,
                22, 21, 3389
            ]
        );
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Database).unwrap();
        assert_eq!(json, "\"database\"");
    }

    #[test]
    fn test_descriptor_serialization() {
        let json = serde_json::to_value(&COMMON_PORTS[4]).unwrap();
        assert_eq!(json["port"], 5432);
        assert_eq!(json["name"], "PostgreSQL");
        assert_eq!(json["category"], "database");
        assert_eq!(json["description"], "PostgreSQL database");
    }
}

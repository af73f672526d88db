//! Domain primitive types used across the gangway workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host interface a bound port listens on. All bindings use the wildcard
/// address; per-interface binding is out of scope.
pub const DEFAULT_HOST_IP: &str = "0.0.0.0";

/// Unique identifier for a container instance, as assigned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container ID from an engine-assigned string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-side half of a port exposure: the interface and port a container
/// port is published on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostBinding {
    /// Host interface address.
    pub host_ip: String,
    /// Host port, kept as a string to pass through to the engine verbatim.
    pub host_port: String,
}

impl HostBinding {
    /// Creates a binding on all host interfaces for the given port.
    #[must_use]
    pub fn on_all_interfaces(host_port: impl Into<String>) -> Self {
        Self {
            host_ip: DEFAULT_HOST_IP.to_string(),
            host_port: host_port.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_id_displays_inner_value() {
        let id = ContainerId::new("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn host_binding_defaults_to_wildcard_interface() {
        let binding = HostBinding::on_all_interfaces("8080");
        assert_eq!(binding.host_ip, DEFAULT_HOST_IP);
        assert_eq!(binding.host_port, "8080");
    }

    #[test]
    fn container_id_serializes_as_bare_string() {
        let id = ContainerId::new("abc-123");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, r#""abc-123""#);

        let back: ContainerId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn host_binding_survives_serde() {
        let binding = HostBinding::on_all_interfaces("8080");
        let json = serde_json::to_string(&binding).expect("serialize");
        assert!(json.contains(DEFAULT_HOST_IP));

        let back: HostBinding = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, binding);
    }
}

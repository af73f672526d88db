//! Port-exposure string parsing.
//!
//! The caller-facing grammar is `"<port>"` (exposed, no host binding) or
//! `"<hostPort>:<containerPort>"` (exposed and bound on all host
//! interfaces). The parse is deliberately permissive: anything that is not
//! exactly two colon-delimited segments falls back to "whole string exposed,
//! no binding" rather than failing. Strings pass through unmodified, so a
//! protocol suffix like `9222/tcp` reaches the engine as written.

use gangway_common::types::HostBinding;

/// Engine-level port structures derived from the declared exposures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMap {
    /// Container-side ports to expose, in declaration order.
    pub exposed: Vec<String>,
    /// Host bindings, keyed by container-side port, in declaration order.
    pub bindings: Vec<(String, HostBinding)>,
}

/// Translates exposure strings into exposed ports and host bindings.
#[must_use]
pub fn parse_exposures(exposures: &[String]) -> PortMap {
    let mut map = PortMap::default();
    for mapping in exposures {
        let parts: Vec<&str> = mapping.split(':').collect();
        if let [host_port, container_port] = parts[..] {
            map.exposed.push(container_port.to_string());
            map.bindings.push((
                container_port.to_string(),
                HostBinding::on_all_interfaces(host_port),
            ));
        } else {
            // Permissive parse: no binding, the raw string is the port.
            map.exposed.push(mapping.clone());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use gangway_common::types::DEFAULT_HOST_IP;

    fn parse(raw: &[&str]) -> PortMap {
        let owned: Vec<String> = raw.iter().map(ToString::to_string).collect();
        parse_exposures(&owned)
    }

    #[test]
    fn bare_port_is_exposed_without_binding() {
        let map = parse(&["9222"]);
        assert_eq!(map.exposed, vec!["9222"]);
        assert!(map.bindings.is_empty());
    }

    #[test]
    fn host_and_container_port_produce_one_binding() {
        let map = parse(&["8080:9222"]);
        assert_eq!(map.exposed, vec!["9222"]);
        assert_eq!(
            map.bindings,
            vec![("9222".to_string(), HostBinding {
                host_ip: DEFAULT_HOST_IP.to_string(),
                host_port: "8080".to_string(),
            })]
        );
    }

    #[test]
    fn extra_colons_fall_back_to_bare_exposure() {
        let map = parse(&["0.0.0.0:8080:9222"]);
        assert_eq!(map.exposed, vec!["0.0.0.0:8080:9222"]);
        assert!(map.bindings.is_empty());
    }

    #[test]
    fn declaration_order_is_preserved() {
        let map = parse(&["5432", "8080:9222", "6379"]);
        assert_eq!(map.exposed, vec!["5432", "9222", "6379"]);
        assert_eq!(map.bindings.len(), 1);
    }

    #[test]
    fn protocol_suffix_passes_through() {
        let map = parse(&["8080:9222/tcp"]);
        assert_eq!(map.exposed, vec!["9222/tcp"]);
        assert_eq!(map.bindings[0].0, "9222/tcp");
        assert_eq!(map.bindings[0].1.host_port, "8080");
    }

    #[test]
    fn empty_exposure_list_yields_empty_map() {
        let map = parse(&[]);
        assert_eq!(map, PortMap::default());
    }
}

//! Typed views over fetched resources.
//!
//! The views read only the fields the analyzers need. Anything missing or of
//! the wrong shape reads as `None`, `false` or empty, never as an error.

use crate::resource::{nested_bool, nested_i64, nested_str, Resource};
use serde_json::Value;

/// Tag carrying the service identifier of an inbound endpoint.
pub const SERVICE_TAG: &str = "kuma.io/service";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub port: Option<i64>,
    pub service: Option<String>,
    pub ready: bool,
}

impl Inbound {
    /// Returns `None` for entries that are not objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            port: nested_i64(value, &["port"]),
            service: non_empty(nested_str(value, &["tags", SERVICE_TAG])),
            ready: nested_bool(value, &["health", "ready"]).unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataplane {
    pub name: String,
    pub namespace: String,
    pub inbounds: Vec<Inbound>,
}

impl Dataplane {
    pub fn from_resource(resource: &Resource) -> Self {
        let inbounds = resource
            .nested_slice(&["spec", "networking", "inbound"])
            .unwrap_or_default()
            .iter()
            .filter_map(Inbound::from_value)
            .collect();
        Self {
            name: resource.name().to_string(),
            namespace: resource.namespace().to_string(),
            inbounds,
        }
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.inbounds
            .iter()
            .filter_map(|inbound| inbound.service.as_deref())
    }
}

/// First `to` rule of a policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetRule {
    pub target: Option<String>,
    pub action: Option<String>,
}

/// Policy reduced to its first `to` and first `from` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub name: String,
    pub to: Option<TargetRule>,
    pub from: Option<String>,
}

impl Policy {
    pub fn from_resource(resource: &Resource) -> Self {
        let to = first_entry(resource, "to").map(|rule| TargetRule {
            target: non_empty(nested_str(rule, &["targetRef", "name"])),
            action: non_empty(nested_str(rule, &["default", "action"])),
        });
        let from = first_entry(resource, "from")
            .and_then(|rule| non_empty(nested_str(rule, &["targetRef", "name"])));
        Self {
            name: resource.name().to_string(),
            to,
            from,
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.to.as_ref()?.target.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.to.as_ref()?.action.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    pub name: String,
    pub enabled_backend: Option<String>,
    pub backends: Vec<String>,
}

impl Mesh {
    pub fn from_resource(resource: &Resource) -> Self {
        let backends = resource
            .nested_slice(&["spec", "mtls", "backends"])
            .unwrap_or_default()
            .iter()
            .filter_map(|backend| nested_str(backend, &["name"]))
            .map(str::to_string)
            .collect();
        Self {
            name: resource.name().to_string(),
            enabled_backend: non_empty(resource.nested_str(&["spec", "mtls", "enabledBackend"])),
            backends,
        }
    }
}

fn first_entry<'a>(resource: &'a Resource, section: &str) -> Option<&'a Value> {
    resource
        .nested_slice(&["spec", section])?
        .first()
        .filter(|entry| entry.is_object())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn dataplane_skips_malformed_inbounds() {
        let resource = Resource::new(json!({
            "metadata": {"name": "web-1", "namespace": "shop"},
            "spec": {"networking": {"inbound": [
                {"port": 8080, "tags": {"kuma.io/service": "web"}, "health": {"ready": true}},
                "garbage",
                {"port": 9090}
            ]}}
        }));
        let dataplane = Dataplane::from_resource(&resource);
        assert_eq!(dataplane.name, "web-1");
        assert_eq!(dataplane.namespace, "shop");
        assert_eq!(
            dataplane.inbounds,
            vec![
                Inbound {
                    port: Some(8080),
                    service: Some("web".to_string()),
                    ready: true,
                },
                Inbound {
                    port: Some(9090),
                    service: None,
                    ready: false,
                },
            ]
        );
    }

    #[test]
    fn only_malformed_inbounds_derive_info() {
        let resource = Resource::new(json!({
            "metadata": {"name": "odd-1"},
            "spec": {"networking": {"inbound": [1, "a", null]}}
        }));
        let dataplane = Dataplane::from_resource(&resource);
        assert!(dataplane.inbounds.is_empty());
        assert_eq!(
            crate::health::derive_status(&dataplane.inbounds).status,
            crate::health::HealthStatus::Info
        );
    }

    #[test]
    fn dataplane_without_networking_has_no_inbounds() {
        let resource = Resource::new(json!({"metadata": {"name": "bare"}, "spec": {}}));
        let dataplane = Dataplane::from_resource(&resource);
        assert!(dataplane.inbounds.is_empty());
        assert_eq!(dataplane.namespace, "");
    }

    #[test]
    fn policy_reads_only_first_rules() {
        let resource = Resource::new(json!({
            "metadata": {"name": "allow-web"},
            "spec": {
                "to": [
                    {"targetRef": {"name": "web"}, "default": {"action": "Allow"}},
                    {"targetRef": {"name": "api"}}
                ],
                "from": [{"targetRef": {"name": "*"}}]
            }
        }));
        let policy = Policy::from_resource(&resource);
        assert_eq!(policy.target(), Some("web"));
        assert_eq!(policy.action(), Some("Allow"));
        assert_eq!(policy.from.as_deref(), Some("*"));
    }

    #[test]
    fn policy_with_mistyped_rules_reads_as_empty() {
        let resource = Resource::new(json!({
            "metadata": {"name": "odd"},
            "spec": {"to": ["web"], "from": {"targetRef": {"name": "*"}}}
        }));
        let policy = Policy::from_resource(&resource);
        assert_eq!(policy.to, None);
        assert_eq!(policy.from, None);
    }

    #[test]
    fn mesh_reads_backend_names() {
        let resource = Resource::new(json!({
            "metadata": {"name": "default"},
            "spec": {"mtls": {
                "enabledBackend": "ca-1",
                "backends": [{"name": "ca-1", "type": "builtin"}, {"type": "provided"}]
            }}
        }));
        let mesh = Mesh::from_resource(&resource);
        assert_eq!(mesh.enabled_backend.as_deref(), Some("ca-1"));
        assert_eq!(mesh.backends, vec!["ca-1".to_string()]);
    }
}

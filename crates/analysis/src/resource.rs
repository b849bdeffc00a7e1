use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Plural resource names of the mesh custom resources the analyzers read.
pub mod kinds {
    pub const DATAPLANES: &str = "dataplanes";
    pub const MESHES: &str = "meshes";
    pub const TRAFFIC_PERMISSIONS: &str = "meshtrafficpermissions";
    pub const RETRIES: &str = "meshretries";
    pub const TIMEOUTS: &str = "meshtimeouts";
    pub const CIRCUIT_BREAKERS: &str = "meshcircuitbreakers";
    pub const LOGS: &str = "meshlogs";
    pub const METRICS: &str = "meshmetrics";
    pub const TRACES: &str = "meshtraces";
}

/// (group, version, resource) triple addressing one custom resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKind {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl ResourceKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.resource, self.version, self.group)
    }
}

/// Read-only access to cluster-scoped custom resources.
///
/// Every analyzer call issues its own round-trips; implementations must not
/// assume results are cached between calls.
pub trait ResourceClient {
    fn list(&self, kind: &ResourceKind) -> Result<Vec<Resource>, FetchError>;

    fn get(&self, kind: &ResourceKind, name: &str) -> Result<Resource, FetchError>;
}

/// Generic attribute tree of one fetched resource.
///
/// Accessors never fail: a missing segment or a value of the wrong type reads
/// as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Value);

impl Resource {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn name(&self) -> &str {
        self.nested_str(&["metadata", "name"]).unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.nested_str(&["metadata", "namespace"]).unwrap_or_default()
    }

    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        nested(&self.0, path)
    }

    pub fn nested_str(&self, path: &[&str]) -> Option<&str> {
        nested_str(&self.0, path)
    }

    pub fn nested_slice(&self, path: &[&str]) -> Option<&[Value]> {
        nested_slice(&self.0, path)
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

pub fn nested<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, segment| current.as_object()?.get(*segment))
}

pub fn nested_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    nested(value, path)?.as_str()
}

pub fn nested_bool(value: &Value, path: &[&str]) -> Option<bool> {
    nested(value, path)?.as_bool()
}

pub fn nested_i64(value: &Value, path: &[&str]) -> Option<i64> {
    nested(value, path)?.as_i64()
}

pub fn nested_slice<'a>(value: &'a Value, path: &[&str]) -> Option<&'a [Value]> {
    nested(value, path)?.as_array().map(Vec::as_slice)
}

/// In-memory resource source keyed by plural resource name.
///
/// Group and version are ignored, which keeps fixtures short.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    resources: HashMap<String, Vec<Resource>>,
    failing: HashSet<String>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, resource: &str, items: impl IntoIterator<Item = Value>) -> Self {
        self.resources
            .entry(resource.to_string())
            .or_default()
            .extend(items.into_iter().map(Resource::new));
        self
    }

    /// Make every request for `resource` fail as if the backend were down.
    #[must_use]
    pub fn failing(mut self, resource: &str) -> Self {
        self.failing.insert(resource.to_string());
        self
    }

    fn check_available(&self, kind: &ResourceKind) -> Result<(), FetchError> {
        if self.failing.contains(&kind.resource) {
            return Err(FetchError::Unavailable(format!("{kind} is not served")));
        }
        Ok(())
    }
}

impl ResourceClient for MemoryClient {
    fn list(&self, kind: &ResourceKind) -> Result<Vec<Resource>, FetchError> {
        self.check_available(kind)?;
        Ok(self
            .resources
            .get(&kind.resource)
            .cloned()
            .unwrap_or_default())
    }

    fn get(&self, kind: &ResourceKind, name: &str) -> Result<Resource, FetchError> {
        self.check_available(kind)?;
        self.resources
            .get(&kind.resource)
            .and_then(|items| items.iter().find(|item| item.name() == name))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_reads_tolerate_missing_and_mistyped_paths() {
        let value = json!({
            "spec": {"mtls": {"enabledBackend": "ca-1", "backends": "oops"}},
            "port": "8080"
        });
        assert_eq!(nested_str(&value, &["spec", "mtls", "enabledBackend"]), Some("ca-1"));
        assert_eq!(nested_slice(&value, &["spec", "mtls", "backends"]), None);
        assert_eq!(nested_i64(&value, &["port"]), None);
        assert_eq!(nested_bool(&value, &["spec", "missing", "ready"]), None);
        assert_eq!(nested_str(&value, &["spec", "mtls", "enabledBackend", "x"]), None);
    }

    #[test]
    fn memory_client_gets_by_metadata_name() {
        let client = MemoryClient::new().with(
            kinds::MESHES,
            [json!({"metadata": {"name": "default"}})],
        );
        let kind = ResourceKind::new("kuma.io", "v1alpha1", kinds::MESHES);
        assert_eq!(client.get(&kind, "default").unwrap().name(), "default");
        assert!(matches!(
            client.get(&kind, "other"),
            Err(FetchError::NotFound { .. })
        ));
    }

    #[test]
    fn memory_client_simulates_outages() {
        let client = MemoryClient::new().failing(kinds::DATAPLANES);
        let kind = ResourceKind::new("kuma.io", "v1alpha1", kinds::DATAPLANES);
        assert!(matches!(client.list(&kind), Err(FetchError::Unavailable(_))));
    }

    #[test]
    fn kind_display_is_resource_version_group() {
        let kind = ResourceKind::new("kuma.io", "v1alpha1", kinds::DATAPLANES);
        assert_eq!(kind.to_string(), "dataplanes.v1alpha1.kuma.io");
    }
}

pub(crate) mod dataplanes;
pub(crate) mod mtls;
pub(crate) mod observability;
pub(crate) mod policies;
pub(crate) mod resilience;
pub(crate) mod summary;

pub use dataplanes::analyze_dataplanes;
pub use mtls::analyze_mtls;
pub use observability::analyze_observability;
pub use policies::analyze_traffic_permissions;
pub use resilience::analyze_resilience;
pub use summary::analyze_summary;

use crate::check::AnalysisOptions;
use crate::error::{AnalysisError, Result};
use crate::resource::{kinds, Resource, ResourceClient};
use crate::snapshot::{Dataplane, Policy};

fn list(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
    resource: &str,
) -> Result<Vec<Resource>> {
    let kind = options.kind(resource);
    log::debug!("listing {kind}");
    client
        .list(&kind)
        .map_err(|err| AnalysisError::fetch(format!("list {resource}"), err))
}

fn list_dataplanes(client: &dyn ResourceClient, options: &AnalysisOptions) -> Result<Vec<Dataplane>> {
    Ok(list(client, options, kinds::DATAPLANES)?
        .iter()
        .map(Dataplane::from_resource)
        .collect())
}

fn list_policies(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
    resource: &str,
) -> Result<Vec<Policy>> {
    Ok(list(client, options, resource)?
        .iter()
        .map(Policy::from_resource)
        .collect())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn dataplane(name: &str, inbounds: &[(i64, &str, bool)]) -> Value {
        let inbounds: Vec<Value> = inbounds
            .iter()
            .map(|(port, service, ready)| {
                json!({
                    "port": port,
                    "tags": {"kuma.io/service": service},
                    "health": {"ready": ready}
                })
            })
            .collect();
        json!({
            "metadata": {"name": name, "namespace": "kuma-demo"},
            "spec": {"networking": {"inbound": inbounds}}
        })
    }

    pub fn policy(name: &str, target: &str) -> Value {
        json!({
            "metadata": {"name": name},
            "spec": {"to": [{"targetRef": {"kind": "MeshService", "name": target}}]}
        })
    }

    pub fn permission(name: &str, target: &str, source: &str, action: &str) -> Value {
        json!({
            "metadata": {"name": name},
            "spec": {
                "to": [{"targetRef": {"name": target}, "default": {"action": action}}],
                "from": [{"targetRef": {"name": source}}]
            }
        })
    }

    pub fn named(name: &str) -> Value {
        json!({"metadata": {"name": name}})
    }
}

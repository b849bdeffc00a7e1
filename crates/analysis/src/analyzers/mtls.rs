use super::list_policies;
use crate::check::AnalysisOptions;
use crate::error::{AnalysisError, FetchError, Result};
use crate::finding::{Finding, Level, MtlsFinding, ValidationResult};
use crate::resource::{kinds, ResourceClient};
use crate::snapshot::Mesh;

pub(crate) const TITLE: &str = "mTLS Configuration";

/// Action that keeps traffic-permission traffic encrypted.
pub const ALLOW_WITH_MTLS: &str = "AllowWithMTLS";

/// Checks mTLS on the configured mesh and whether permissions enforce it.
///
/// With mTLS disabled the analyzer stops after the first `ALERT`; no
/// per-policy action checks run.
pub fn analyze_mtls(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
) -> Result<ValidationResult> {
    let mesh_name = options.mesh.as_str();
    let alert = |message: String| -> Finding {
        MtlsFinding {
            level: Level::Alert,
            message,
            resource: mesh_name.to_string(),
        }
        .into()
    };

    log::debug!("fetching mesh '{mesh_name}'");
    let mesh = match client.get(&options.kind(kinds::MESHES), mesh_name) {
        Ok(resource) => Mesh::from_resource(&resource),
        Err(FetchError::NotFound { .. }) => {
            return Ok(ValidationResult::new(
                TITLE,
                vec![alert(format!("Mesh '{mesh_name}' was not found."))],
            ));
        }
        Err(err) => return Err(AnalysisError::fetch(format!("get mesh '{mesh_name}'"), err)),
    };

    let Some(backend) = mesh.enabled_backend.as_deref() else {
        return Ok(ValidationResult::new(
            TITLE,
            vec![alert(
                "mTLS is disabled for this mesh; inter-service traffic is unencrypted.".to_string(),
            )],
        ));
    };

    let mut findings = vec![Finding::from(MtlsFinding {
        level: Level::Info,
        message: format!("mTLS is enabled with backend '{backend}'."),
        resource: mesh_name.to_string(),
    })];

    if mesh.backends.is_empty() {
        findings.push(alert(format!(
            "mTLS backend '{backend}' is enabled but no backends are defined."
        )));
    } else if !mesh.backends.iter().any(|name| name == backend) {
        findings.push(alert(format!(
            "mTLS backend '{backend}' is enabled but is not among the defined backends."
        )));
    }

    for policy in list_policies(client, options, kinds::TRAFFIC_PERMISSIONS)? {
        let Some(action) = policy.action() else {
            continue;
        };
        if action != ALLOW_WITH_MTLS {
            findings.push(
                MtlsFinding {
                    level: Level::Warn,
                    message: format!(
                        "Policy uses action '{action}' instead of '{ALLOW_WITH_MTLS}', which may allow unencrypted traffic."
                    ),
                    resource: policy.name.clone(),
                }
                .into(),
            );
        }
    }

    Ok(ValidationResult::new(TITLE, findings))
}

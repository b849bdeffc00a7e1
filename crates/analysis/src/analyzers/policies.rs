use super::{list_dataplanes, list_policies};
use crate::check::AnalysisOptions;
use crate::coverage::{all_services, coverage_gaps, covered_services, Wildcard, WILDCARD};
use crate::error::Result;
use crate::finding::{Finding, Level, PolicyFinding, ValidationResult};
use crate::resource::{kinds, ResourceClient};

pub(crate) const TITLE: &str = "Traffic Permission Consistency";

/// Checks which services no MeshTrafficPermission targets.
///
/// Wildcard-source policies are reported first (policy order), then one
/// `ALERT` per unprotected service (name order). When every service is
/// protected a single `INFO` replaces the per-service rows.
pub fn analyze_traffic_permissions(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
) -> Result<ValidationResult> {
    let policies = list_policies(client, options, kinds::TRAFFIC_PERMISSIONS)?;
    let dataplanes = list_dataplanes(client, options)?;

    let all = all_services(&dataplanes);
    let covered = covered_services(&policies, &all, Wildcard::Expand);

    let mut findings: Vec<Finding> = policies
        .iter()
        .filter(|policy| policy.from.as_deref() == Some(WILDCARD))
        .map(|policy| {
            PolicyFinding {
                level: Level::Info,
                message: "Policy allows traffic from any service; confirm this is intentional."
                    .to_string(),
                resource: policy.name.clone(),
            }
            .into()
        })
        .collect();

    let gaps = coverage_gaps(&all, &covered);
    if gaps.is_empty() {
        findings.push(
            PolicyFinding {
                level: Level::Info,
                message: "Every service is covered by at least one MeshTrafficPermission."
                    .to_string(),
                resource: "Global".to_string(),
            }
            .into(),
        );
    } else {
        findings.extend(gaps.into_iter().map(|service| {
            Finding::from(PolicyFinding {
                level: Level::Alert,
                message: "Service is not protected by any MeshTrafficPermission; traffic may be denied by default."
                    .to_string(),
                resource: service.to_string(),
            })
        }));
    }

    Ok(ValidationResult::new(TITLE, findings))
}

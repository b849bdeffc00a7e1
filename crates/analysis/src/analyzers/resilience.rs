use super::{list_dataplanes, list_policies};
use crate::check::AnalysisOptions;
use crate::coverage::{all_services, covered_services, Wildcard};
use crate::error::Result;
use crate::finding::{Finding, Level, PolicyKind, ResilienceFinding, ValidationResult};
use crate::resource::ResourceClient;
use std::collections::BTreeSet;

pub(crate) const TITLE: &str = "Resilience Policies";

/// Checks retry, timeout and circuit-breaker coverage per service.
///
/// A service missing several kinds gets one `WARN` per missing kind. A kind
/// whose policies cannot be listed is logged and treated as covering nothing.
pub fn analyze_resilience(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
) -> Result<ValidationResult> {
    let all = all_services(&list_dataplanes(client, options)?);

    let coverage: Vec<(PolicyKind, BTreeSet<String>)> = PolicyKind::RESILIENCE
        .into_iter()
        .map(|kind| {
            let covered = match list_policies(client, options, kind.resource()) {
                Ok(policies) => covered_services(&policies, &all, Wildcard::Literal),
                Err(err) => {
                    log::warn!("Could not analyze {kind}: {err}");
                    BTreeSet::new()
                }
            };
            (kind, covered)
        })
        .collect();

    let mut findings: Vec<Finding> = Vec::new();
    for service in &all {
        for (kind, covered) in &coverage {
            if !covered.contains(service) {
                findings.push(
                    ResilienceFinding {
                        level: Level::Warn,
                        policy_type: Some(*kind),
                        service: service.clone(),
                        message: missing_message(*kind),
                    }
                    .into(),
                );
            }
        }
    }

    if findings.is_empty() {
        findings.push(
            ResilienceFinding {
                level: Level::Info,
                policy_type: None,
                service: "Global".to_string(),
                message: "Every service has basic resilience policies applied.".to_string(),
            }
            .into(),
        );
    }

    Ok(ValidationResult::new(TITLE, findings))
}

fn missing_message(kind: PolicyKind) -> String {
    format!("Service is not covered by any {} policy.", kind.subject())
}

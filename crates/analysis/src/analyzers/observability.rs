use super::list;
use crate::check::AnalysisOptions;
use crate::error::Result;
use crate::finding::{Finding, Level, ObservabilityFinding, PolicyKind, ValidationResult};
use crate::resource::ResourceClient;

pub(crate) const TITLE: &str = "Observability Policies";

/// Reports presence of log, metric and trace policies, each kind on its own.
pub fn analyze_observability(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
) -> Result<ValidationResult> {
    let mut findings: Vec<Finding> = Vec::new();

    for kind in PolicyKind::OBSERVABILITY {
        let policies = list(client, options, kind.resource())?;
        if policies.is_empty() {
            findings.push(
                ObservabilityFinding {
                    level: Level::Warn,
                    policy_type: kind,
                    resource: "Global".to_string(),
                    message: missing_message(kind),
                }
                .into(),
            );
            continue;
        }
        findings.extend(policies.iter().map(|policy| {
            Finding::from(ObservabilityFinding {
                level: Level::Info,
                policy_type: kind,
                resource: policy.name().to_string(),
                message: found_message(kind),
            })
        }));
    }

    Ok(ValidationResult::new(TITLE, findings))
}

fn missing_message(kind: PolicyKind) -> String {
    format!("No {kind} policy found; {}.", kind.gap_consequence())
}

fn found_message(kind: PolicyKind) -> String {
    format!("{kind} {} policy found.", kind.subject())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::named;
    use crate::resource::{kinds, MemoryClient};
    use pretty_assertions::assert_eq;

    fn rows(result: &ValidationResult) -> Vec<(Level, PolicyKind, String)> {
        result
            .findings
            .iter()
            .map(|finding| match finding {
                Finding::ObservabilityFinding(f) => (f.level, f.policy_type, f.resource.clone()),
                other => panic!("unexpected finding {other:?}"),
            })
            .collect()
    }

    #[test]
    fn no_policies_yields_three_global_warnings() {
        let result = analyze_observability(&MemoryClient::new(), &AnalysisOptions::default()).unwrap();
        assert_eq!(
            rows(&result),
            vec![
                (Level::Warn, PolicyKind::MeshLog, "Global".to_string()),
                (Level::Warn, PolicyKind::MeshMetric, "Global".to_string()),
                (Level::Warn, PolicyKind::MeshTrace, "Global".to_string()),
            ]
        );
    }

    #[test]
    fn each_instance_is_listed() {
        let client = MemoryClient::new()
            .with(kinds::LOGS, [named("access-logs"), named("audit-logs")])
            .with(kinds::TRACES, [named("zipkin")]);
        let result = analyze_observability(&client, &AnalysisOptions::default()).unwrap();
        assert_eq!(
            rows(&result),
            vec![
                (Level::Info, PolicyKind::MeshLog, "access-logs".to_string()),
                (Level::Info, PolicyKind::MeshLog, "audit-logs".to_string()),
                (Level::Warn, PolicyKind::MeshMetric, "Global".to_string()),
                (Level::Info, PolicyKind::MeshTrace, "zipkin".to_string()),
            ]
        );
    }

    #[test]
    fn messages_are_specific_to_the_kind() {
        assert_eq!(
            missing_message(PolicyKind::MeshMetric),
            "No MeshMetric policy found; Prometheus metrics may not be enabled."
        );
        assert_eq!(found_message(PolicyKind::MeshTrace), "MeshTrace tracing policy found.");
    }

    #[test]
    fn fetch_failure_aborts() {
        let client = MemoryClient::new().failing(kinds::METRICS);
        let err = analyze_observability(&client, &AnalysisOptions::default()).unwrap_err();
        assert!(err.to_string().contains("list meshmetrics"));
    }
}

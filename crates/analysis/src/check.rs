use crate::analyzers::{
    self, analyze_dataplanes, analyze_mtls, analyze_observability, analyze_resilience,
    analyze_summary, analyze_traffic_permissions,
};
use crate::error::Result;
use crate::finding::ValidationResult;
use crate::resource::{ResourceClient, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MESH: &str = "default";
pub const DEFAULT_GROUP: &str = "kuma.io";
pub const DEFAULT_VERSION: &str = "v1alpha1";

/// Inputs shared by every analyzer of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Mesh inspected by the mTLS analyzer.
    pub mesh: String,
    pub group: String,
    pub version: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            mesh: DEFAULT_MESH.to_string(),
            group: DEFAULT_GROUP.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl AnalysisOptions {
    pub fn kind(&self, resource: &str) -> ResourceKind {
        ResourceKind::new(&self.group, &self.version, resource)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Summary,
    Dataplanes,
    Policies,
    Mtls,
    Resilience,
    Observability,
}

impl Check {
    /// Every check, in full-report order.
    pub const ALL: [Check; 6] = [
        Check::Summary,
        Check::Dataplanes,
        Check::Policies,
        Check::Mtls,
        Check::Resilience,
        Check::Observability,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Check::Summary => "summary",
            Check::Dataplanes => "dataplanes",
            Check::Policies => "policies",
            Check::Mtls => "mtls",
            Check::Resilience => "resilience",
            Check::Observability => "observability",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Check::Summary => analyzers::summary::TITLE,
            Check::Dataplanes => analyzers::dataplanes::TITLE,
            Check::Policies => analyzers::policies::TITLE,
            Check::Mtls => analyzers::mtls::TITLE,
            Check::Resilience => analyzers::resilience::TITLE,
            Check::Observability => analyzers::observability::TITLE,
        }
    }

    pub fn run(
        self,
        client: &dyn ResourceClient,
        options: &AnalysisOptions,
    ) -> Result<ValidationResult> {
        match self {
            Check::Summary => analyze_summary(client, options),
            Check::Dataplanes => analyze_dataplanes(client, options),
            Check::Policies => analyze_traffic_permissions(client, options),
            Check::Mtls => analyze_mtls(client, options),
            Check::Resilience => analyze_resilience(client, options),
            Check::Observability => analyze_observability(client, options),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `checks` in order. A check that fails is logged and skipped so the
/// remaining results can still be reported.
pub fn run_checks(
    client: &dyn ResourceClient,
    checks: &[Check],
    options: &AnalysisOptions,
) -> Vec<ValidationResult> {
    checks
        .iter()
        .filter_map(|check| match check.run(client, options) {
            Ok(result) => Some(result),
            Err(err) => {
                log::warn!("Skipping {check} check: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{dataplane, named};
    use crate::resource::{kinds, MemoryClient};
    use pretty_assertions::assert_eq;

    #[test]
    fn full_report_skips_failing_checks() {
        let client = MemoryClient::new()
            .with(kinds::MESHES, [named("default")])
            .with(kinds::DATAPLANES, [dataplane("web-1", &[(8080, "web", true)])])
            .failing(kinds::LOGS);
        let results = run_checks(&client, &Check::ALL, &AnalysisOptions::default());
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                Check::Summary.title(),
                Check::Dataplanes.title(),
                Check::Policies.title(),
                Check::Mtls.title(),
                Check::Resilience.title(),
            ]
        );
    }

    #[test]
    fn options_build_kinds_from_group_and_version() {
        let options = AnalysisOptions {
            group: "kuma.io".to_string(),
            version: "v1beta1".to_string(),
            ..AnalysisOptions::default()
        };
        assert_eq!(
            options.kind(kinds::MESHES),
            ResourceKind::new("kuma.io", "v1beta1", "meshes")
        );
    }

    #[test]
    fn check_names_are_stable() {
        let names: Vec<&str> = Check::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["summary", "dataplanes", "policies", "mtls", "resilience", "observability"]
        );
    }
}

//! Layout decisions shared by the text and markdown reporters.

use crate::theme::Tone;
use mesh_doctor_analysis::{
    DataplaneStatus, Finding, HealthStatus, Level, PolicyKind, ValidationResult,
};

/// Table shape picked from the first finding of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    Dataplane,
    Summary,
    Policy,
}

impl Layout {
    pub(crate) fn of(finding: &Finding) -> Self {
        match finding {
            Finding::DataplaneStatus(_) => Layout::Dataplane,
            Finding::SummaryStatus(_) => Layout::Summary,
            Finding::PolicyFinding(_)
            | Finding::MtlsFinding(_)
            | Finding::ResilienceFinding(_)
            | Finding::ObservabilityFinding(_) => Layout::Policy,
        }
    }
}

/// Borrowed view of any leveled finding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PolicyRow<'a> {
    pub level: Level,
    pub resource: &'a str,
    pub kind: Option<PolicyKind>,
    pub message: &'a str,
}

impl<'a> PolicyRow<'a> {
    pub(crate) fn of(finding: &'a Finding) -> Option<Self> {
        let row = match finding {
            Finding::PolicyFinding(f) => PolicyRow {
                level: f.level,
                resource: &f.resource,
                kind: None,
                message: &f.message,
            },
            Finding::MtlsFinding(f) => PolicyRow {
                level: f.level,
                resource: &f.resource,
                kind: None,
                message: &f.message,
            },
            Finding::ResilienceFinding(f) => PolicyRow {
                level: f.level,
                resource: &f.service,
                kind: f.policy_type,
                message: &f.message,
            },
            Finding::ObservabilityFinding(f) => PolicyRow {
                level: f.level,
                resource: &f.resource,
                kind: Some(f.policy_type),
                message: &f.message,
            },
            Finding::DataplaneStatus(_) | Finding::SummaryStatus(_) => return None,
        };
        Some(row)
    }
}

pub(crate) const NO_FINDINGS: &str = "✅ No problematic findings.";

pub(crate) fn level_marker(level: Level) -> (&'static str, Tone) {
    match level {
        Level::Alert => ("🚨", Tone::Bad),
        Level::Warn => ("⚠️", Tone::Caution),
        Level::Info => ("✅", Tone::Good),
    }
}

pub(crate) fn status_marker(status: HealthStatus) -> (&'static str, Tone) {
    match status {
        HealthStatus::Online => ("✅", Tone::Good),
        HealthStatus::Offline => ("❌", Tone::Bad),
        HealthStatus::Degraded => ("⚠️", Tone::Caution),
        HealthStatus::Info => ("ℹ️", Tone::Neutral),
    }
}

/// Details followed by the unready inbounds, if any.
pub(crate) fn details(status: &DataplaneStatus) -> String {
    if status.unhealthy.is_empty() {
        status.details.clone()
    } else {
        format!("{}: {}", status.details, status.unhealthy.join("; "))
    }
}

pub(crate) fn generated_at(result: &ValidationResult) -> String {
    result
        .generated_at
        .format("%a, %d %b %Y %H:%M:%S UTC")
        .to_string()
}

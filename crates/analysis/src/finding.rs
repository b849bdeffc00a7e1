use crate::health::HealthStatus;
use crate::resource::kinds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding. The vocabulary is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warn,
    Alert,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Alert => "ALERT",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy kinds that resilience and observability findings are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    MeshRetry,
    MeshTimeout,
    MeshCircuitBreaker,
    MeshLog,
    MeshMetric,
    MeshTrace,
}

impl PolicyKind {
    pub const RESILIENCE: [PolicyKind; 3] = [
        PolicyKind::MeshRetry,
        PolicyKind::MeshTimeout,
        PolicyKind::MeshCircuitBreaker,
    ];

    pub const OBSERVABILITY: [PolicyKind; 3] = [
        PolicyKind::MeshLog,
        PolicyKind::MeshMetric,
        PolicyKind::MeshTrace,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::MeshRetry => "MeshRetry",
            PolicyKind::MeshTimeout => "MeshTimeout",
            PolicyKind::MeshCircuitBreaker => "MeshCircuitBreaker",
            PolicyKind::MeshLog => "MeshLog",
            PolicyKind::MeshMetric => "MeshMetric",
            PolicyKind::MeshTrace => "MeshTrace",
        }
    }

    /// Plural resource name used to list instances of this kind.
    pub const fn resource(self) -> &'static str {
        match self {
            PolicyKind::MeshRetry => kinds::RETRIES,
            PolicyKind::MeshTimeout => kinds::TIMEOUTS,
            PolicyKind::MeshCircuitBreaker => kinds::CIRCUIT_BREAKERS,
            PolicyKind::MeshLog => kinds::LOGS,
            PolicyKind::MeshMetric => kinds::METRICS,
            PolicyKind::MeshTrace => kinds::TRACES,
        }
    }

    /// What a policy of this kind provides, as used in finding messages.
    pub const fn subject(self) -> &'static str {
        match self {
            PolicyKind::MeshRetry => "retry",
            PolicyKind::MeshTimeout => "timeout",
            PolicyKind::MeshCircuitBreaker => "circuit breaker",
            PolicyKind::MeshLog => "logging",
            PolicyKind::MeshMetric => "metrics",
            PolicyKind::MeshTrace => "tracing",
        }
    }

    /// Consequence of having no policy of this kind.
    pub const fn gap_consequence(self) -> &'static str {
        match self {
            PolicyKind::MeshRetry => "transient failures are not retried",
            PolicyKind::MeshTimeout => "requests may hang without a deadline",
            PolicyKind::MeshCircuitBreaker => "failing upstreams are not ejected",
            PolicyKind::MeshLog => "access logs are not being captured",
            PolicyKind::MeshMetric => "Prometheus metrics may not be enabled",
            PolicyKind::MeshTrace => "distributed tracing may not be configured",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataplaneStatus {
    pub name: String,
    pub namespace: String,
    pub status: HealthStatus,
    pub details: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unhealthy: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatus {
    pub total_meshes: usize,
    pub total_dataplanes: usize,
    pub online_dataplanes: usize,
    pub offline_dataplanes: usize,
    pub degraded_dataplanes: usize,
    pub info_dataplanes: usize,
    pub total_policies: usize,
}

impl SummaryStatus {
    pub fn record(&mut self, status: HealthStatus) {
        match status {
            HealthStatus::Online => self.online_dataplanes += 1,
            HealthStatus::Offline => self.offline_dataplanes += 1,
            HealthStatus::Degraded => self.degraded_dataplanes += 1,
            HealthStatus::Info => self.info_dataplanes += 1,
        }
    }
}

/// Traffic-permission finding. `resource` is a service or policy name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFinding {
    pub level: Level,
    pub message: String,
    pub resource: String,
}

/// mTLS finding. `resource` is the mesh or a policy name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MtlsFinding {
    pub level: Level,
    pub message: String,
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResilienceFinding {
    pub level: Level,
    /// Absent on the single full-coverage finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyKind>,
    pub service: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityFinding {
    pub level: Level,
    pub policy_type: PolicyKind,
    pub resource: String,
    pub message: String,
}

/// One verdict produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Finding {
    DataplaneStatus(DataplaneStatus),
    SummaryStatus(SummaryStatus),
    PolicyFinding(PolicyFinding),
    MtlsFinding(MtlsFinding),
    ResilienceFinding(ResilienceFinding),
    ObservabilityFinding(ObservabilityFinding),
}

impl Finding {
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Finding::DataplaneStatus(_) => "DataplaneStatus",
            Finding::SummaryStatus(_) => "SummaryStatus",
            Finding::PolicyFinding(_) => "PolicyFinding",
            Finding::MtlsFinding(_) => "MTLSFinding",
            Finding::ResilienceFinding(_) => "ResilienceFinding",
            Finding::ObservabilityFinding(_) => "ObservabilityFinding",
        }
    }

    /// Level of policy-style findings; status findings carry none.
    pub fn level(&self) -> Option<Level> {
        match self {
            Finding::DataplaneStatus(_) | Finding::SummaryStatus(_) => None,
            Finding::PolicyFinding(f) => Some(f.level),
            Finding::MtlsFinding(f) => Some(f.level),
            Finding::ResilienceFinding(f) => Some(f.level),
            Finding::ObservabilityFinding(f) => Some(f.level),
        }
    }

    /// Single-line description used when a finding is shown outside its own table.
    pub fn headline(&self) -> String {
        match self {
            Finding::DataplaneStatus(f) => {
                format!("{}/{} is {}: {}", f.namespace, f.name, f.status, f.details)
            }
            Finding::SummaryStatus(f) => format!(
                "{} meshes, {} dataplanes ({} online, {} offline, {} degraded, {} info), {} traffic permissions",
                f.total_meshes,
                f.total_dataplanes,
                f.online_dataplanes,
                f.offline_dataplanes,
                f.degraded_dataplanes,
                f.info_dataplanes,
                f.total_policies
            ),
            Finding::PolicyFinding(f) => format!("[{}] {}: {}", f.level, f.resource, f.message),
            Finding::MtlsFinding(f) => format!("[{}] {}: {}", f.level, f.resource, f.message),
            Finding::ResilienceFinding(f) => match f.policy_type {
                Some(kind) => format!("[{}] {} ({kind}): {}", f.level, f.service, f.message),
                None => format!("[{}] {}: {}", f.level, f.service, f.message),
            },
            Finding::ObservabilityFinding(f) => format!(
                "[{}] {} ({}): {}",
                f.level, f.resource, f.policy_type, f.message
            ),
        }
    }
}

macro_rules! impl_from_finding {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Finding {
                fn from(value: $variant) -> Self {
                    Finding::$variant(value)
                }
            }
        )*
    };
}

impl_from_finding!(
    DataplaneStatus,
    SummaryStatus,
    PolicyFinding,
    MtlsFinding,
    ResilienceFinding,
    ObservabilityFinding,
);

/// Titled, timestamped findings of one analyzer run, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn new(title: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            findings,
        }
    }

    pub fn count_level(&self, level: Level) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.level() == Some(level))
            .count()
    }
}

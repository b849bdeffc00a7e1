//! # Mesh Doctor Analysis
//!
//! Stateless analyzers that read a snapshot of service-mesh resources and
//! emit leveled findings.
//!
//! ## Architecture
//!
//! ```text
//! ResourceClient (list/get by group/version/resource)
//!     │
//!     ├──> Typed snapshot views (Dataplane, Policy, Mesh)
//!     │      └─ missing or mistyped fields read as absent
//!     │
//!     ├──> Analyzers
//!     │      ├─ summary        (counts, reuses the health deriver)
//!     │      ├─ dataplanes     (inbound readiness → Online/Offline/Degraded/Info)
//!     │      ├─ policies       (traffic-permission coverage, wildcard sources)
//!     │      ├─ mtls           (mesh backend, AllowWithMTLS enforcement)
//!     │      ├─ resilience     (retry/timeout/circuit-breaker coverage)
//!     │      └─ observability  (log/metric/trace presence)
//!     │
//!     └──> ValidationResult { title, generatedAt, findings[] }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mesh_doctor_analysis::{kinds, run_checks, AnalysisOptions, Check, MemoryClient};
//! use serde_json::json;
//!
//! let client = MemoryClient::new().with(
//!     kinds::DATAPLANES,
//!     [json!({"metadata": {"name": "web-1"}, "spec": {"networking": {"inbound": []}}})],
//! );
//! let results = run_checks(&client, &[Check::Dataplanes], &AnalysisOptions::default());
//! assert_eq!(results[0].findings.len(), 1);
//! ```

mod analyzers;
mod check;
mod coverage;
mod error;
mod finding;
mod health;
mod resource;
mod snapshot;

pub use analyzers::{
    analyze_dataplanes, analyze_mtls, analyze_observability, analyze_resilience,
    analyze_summary, analyze_traffic_permissions,
};
pub use check::{run_checks, AnalysisOptions, Check, DEFAULT_GROUP, DEFAULT_MESH, DEFAULT_VERSION};
pub use coverage::{all_services, coverage_gaps, covered_services, Wildcard, WILDCARD};
pub use error::{AnalysisError, FetchError, Result};
pub use finding::{
    DataplaneStatus, Finding, Level, MtlsFinding, ObservabilityFinding, PolicyFinding,
    PolicyKind, ResilienceFinding, SummaryStatus, ValidationResult,
};
pub use health::{derive_status, DerivedStatus, HealthStatus};
pub use resource::{kinds, MemoryClient, Resource, ResourceClient, ResourceKind};
pub use snapshot::{Dataplane, Inbound, Mesh, Policy, TargetRule, SERVICE_TAG};

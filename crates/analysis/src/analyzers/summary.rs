use super::{list, list_dataplanes};
use crate::check::AnalysisOptions;
use crate::error::Result;
use crate::finding::{SummaryStatus, ValidationResult};
use crate::health::derive_status;
use crate::resource::{kinds, ResourceClient};

pub(crate) const TITLE: &str = "Mesh Health Summary";

/// Consolidated counts for the whole control plane.
///
/// Meshes and dataplanes must be listable. A traffic-permission listing
/// failure is logged and leaves the policy count at zero.
pub fn analyze_summary(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
) -> Result<ValidationResult> {
    let mut summary = SummaryStatus {
        total_meshes: list(client, options, kinds::MESHES)?.len(),
        ..SummaryStatus::default()
    };

    let dataplanes = list_dataplanes(client, options)?;
    summary.total_dataplanes = dataplanes.len();
    for dataplane in &dataplanes {
        summary.record(derive_status(&dataplane.inbounds).status);
    }

    match list(client, options, kinds::TRAFFIC_PERMISSIONS) {
        Ok(policies) => summary.total_policies = policies.len(),
        Err(err) => log::warn!("Could not count traffic permissions: {err}"),
    }

    Ok(ValidationResult::new(TITLE, vec![summary.into()]))
}

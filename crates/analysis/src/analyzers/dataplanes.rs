use super::list_dataplanes;
use crate::check::AnalysisOptions;
use crate::error::Result;
use crate::finding::{DataplaneStatus, Finding, ValidationResult};
use crate::health::derive_status;
use crate::resource::ResourceClient;

pub(crate) const TITLE: &str = "Dataplane Status";

/// One status finding per dataplane, in listing order.
pub fn analyze_dataplanes(
    client: &dyn ResourceClient,
    options: &AnalysisOptions,
) -> Result<ValidationResult> {
    let findings: Vec<Finding> = list_dataplanes(client, options)?
        .into_iter()
        .map(|dataplane| {
            let derived = derive_status(&dataplane.inbounds);
            DataplaneStatus {
                name: dataplane.name,
                namespace: dataplane.namespace,
                status: derived.status,
                details: derived.details,
                unhealthy: derived.unhealthy,
            }
            .into()
        })
        .collect();

    Ok(ValidationResult::new(TITLE, findings))
}

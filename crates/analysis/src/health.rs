use crate::snapshot::Inbound;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate health of one dataplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Online,
    Offline,
    Degraded,
    Info,
}

impl HealthStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Online => "Online",
            HealthStatus::Offline => "Offline",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Info => "Info",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStatus {
    pub status: HealthStatus,
    pub details: String,
    /// One entry per inbound that is not ready, in inbound order.
    pub unhealthy: Vec<String>,
}

pub fn derive_status(inbounds: &[Inbound]) -> DerivedStatus {
    let total = inbounds.len();
    if total == 0 {
        return DerivedStatus {
            status: HealthStatus::Info,
            details: "no inbounds defined".to_string(),
            unhealthy: Vec::new(),
        };
    }

    let unhealthy: Vec<String> = inbounds
        .iter()
        .filter(|inbound| !inbound.ready)
        .map(describe_unready)
        .collect();
    let ready = total - unhealthy.len();

    if ready == total {
        DerivedStatus {
            status: HealthStatus::Online,
            details: "all inbounds ready".to_string(),
            unhealthy,
        }
    } else if ready > 0 {
        DerivedStatus {
            status: HealthStatus::Degraded,
            details: format!("{ready} of {total} inbounds ready"),
            unhealthy,
        }
    } else {
        DerivedStatus {
            status: HealthStatus::Offline,
            details: "no inbound is ready".to_string(),
            unhealthy,
        }
    }
}

fn describe_unready(inbound: &Inbound) -> String {
    let port = inbound
        .port
        .map_or_else(|| "?".to_string(), |port| port.to_string());
    let service = inbound.service.as_deref().unwrap_or("-");
    format!("port {port} (service: {service}) is not ready")
}

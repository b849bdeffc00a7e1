use clap::ValueEnum;
use mesh_doctor_analysis::Check;
use mesh_doctor_report::ReportFormat;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFlag {
    Text,
    Markdown,
    Json,
}

impl OutputFlag {
    pub(crate) const fn as_domain(self) -> ReportFormat {
        match self {
            OutputFlag::Text => ReportFormat::Text,
            OutputFlag::Markdown => ReportFormat::Markdown,
            OutputFlag::Json => ReportFormat::Json,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CheckFlag {
    Dataplanes,
    Policies,
    Mtls,
    Resilience,
    #[value(alias = "obs")]
    Observability,
    Summary,
}

impl CheckFlag {
    pub(crate) const fn as_domain(self) -> Check {
        match self {
            CheckFlag::Dataplanes => Check::Dataplanes,
            CheckFlag::Policies => Check::Policies,
            CheckFlag::Mtls => Check::Mtls,
            CheckFlag::Resilience => Check::Resilience,
            CheckFlag::Observability => Check::Observability,
            CheckFlag::Summary => Check::Summary,
        }
    }
}

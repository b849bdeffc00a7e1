use crate::error::Result;
use crate::layout::{self, Layout, PolicyRow, NO_FINDINGS};
use crate::Reporter;
use mesh_doctor_analysis::{Finding, SummaryStatus, ValidationResult};

/// GitHub-flavoured markdown, suitable for pasting into issues.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    fn render_result(&self, result: &ValidationResult) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", result.title));
        md.push_str(&format!("**Generated:** {}\n\n", layout::generated_at(result)));

        let Some(first) = result.findings.first() else {
            md.push_str(NO_FINDINGS);
            md.push('\n');
            return md;
        };

        match Layout::of(first) {
            Layout::Dataplane => {
                md.push_str("| Name | Namespace | Status | Details |\n");
                md.push_str("|---|---|---|---|\n");
                for finding in &result.findings {
                    match finding {
                        Finding::DataplaneStatus(status) => {
                            let (marker, _) = layout::status_marker(status.status);
                            md.push_str(&format!(
                                "| `{}` | `{}` | {marker} {} | {} |\n",
                                escape_cell(&status.name),
                                escape_cell(&status.namespace),
                                status.status,
                                escape_cell(&layout::details(status)),
                            ));
                        }
                        other => md.push_str(&fallback_row(other, 4)),
                    }
                }
            }
            Layout::Summary => {
                for finding in &result.findings {
                    match finding {
                        Finding::SummaryStatus(summary) => summary_list(&mut md, summary),
                        other => md.push_str(&format!(
                            "- **{}:** {}\n",
                            other.variant_name(),
                            other.headline()
                        )),
                    }
                }
            }
            Layout::Policy => {
                md.push_str("| Level | Resource | Message |\n");
                md.push_str("|---|---|---|\n");
                for finding in &result.findings {
                    let Some(row) = PolicyRow::of(finding) else {
                        md.push_str(&fallback_row(finding, 3));
                        continue;
                    };
                    let (marker, _) = layout::level_marker(row.level);
                    let message = match row.kind {
                        Some(kind) => format!("_({kind})_ {}", row.message),
                        None => row.message.to_string(),
                    };
                    md.push_str(&format!(
                        "| {marker} {} | `{}` | {} |\n",
                        row.level,
                        escape_cell(row.resource),
                        escape_cell(&message),
                    ));
                }
            }
        }
        md
    }
}

fn summary_list(md: &mut String, summary: &SummaryStatus) {
    md.push_str(&format!("- **Meshes:** {}\n", summary.total_meshes));
    md.push_str(&format!("- **Total dataplanes:** {}\n", summary.total_dataplanes));
    md.push_str(&format!("  - ✅ Online: {}\n", summary.online_dataplanes));
    md.push_str(&format!("  - ❌ Offline: {}\n", summary.offline_dataplanes));
    md.push_str(&format!("  - ⚠️ Degraded: {}\n", summary.degraded_dataplanes));
    md.push_str(&format!("  - ℹ️ Info: {}\n", summary.info_dataplanes));
    md.push_str(&format!("- **Traffic permissions:** {}\n", summary.total_policies));
}

fn fallback_row(finding: &Finding, columns: usize) -> String {
    let padding = " |".repeat(columns.saturating_sub(2));
    format!(
        "| `{}` |{padding} {} |\n",
        finding.variant_name(),
        escape_cell(&finding.headline())
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Reporter for MarkdownReporter {
    fn render(&self, results: &[ValidationResult]) -> Result<String> {
        Ok(results
            .iter()
            .map(|result| self.render_result(result))
            .collect::<Vec<_>>()
            .join("\n---\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::result;
    use mesh_doctor_analysis::{
        DataplaneStatus, HealthStatus, Level, MtlsFinding, ObservabilityFinding, PolicyKind,
    };
    use pretty_assertions::assert_eq;

    fn render(results: &[ValidationResult]) -> String {
        MarkdownReporter.render(results).unwrap()
    }

    #[test]
    fn policy_table_escapes_pipes() {
        let out = render(&[result(
            "mTLS Configuration",
            vec![MtlsFinding {
                level: Level::Alert,
                message: "backend a|b is unknown".to_string(),
                resource: "default".to_string(),
            }
            .into()],
        )]);
        assert_eq!(
            out,
            "# mTLS Configuration\n\n\
             **Generated:** Mon, 06 May 2024 07:08:09 UTC\n\n\
             | Level | Resource | Message |\n\
             |---|---|---|\n\
             | 🚨 ALERT | `default` | backend a\\|b is unknown |\n"
        );
    }

    #[test]
    fn observability_messages_are_tagged_in_italics() {
        let out = render(&[result(
            "Observability Policies",
            vec![ObservabilityFinding {
                level: Level::Warn,
                policy_type: PolicyKind::MeshTrace,
                resource: "Global".to_string(),
                message: "No MeshTrace policies found.".to_string(),
            }
            .into()],
        )]);
        assert!(
            out.contains("| ⚠️ WARN | `Global` | _(MeshTrace)_ No MeshTrace policies found. |")
        );
    }

    #[test]
    fn dataplane_rows_show_status_markers() {
        let out = render(&[result(
            "Dataplane Status",
            vec![DataplaneStatus {
                name: "db-1".to_string(),
                namespace: "kuma-demo".to_string(),
                status: HealthStatus::Offline,
                details: "no inbound is ready".to_string(),
                unhealthy: Vec::new(),
            }
            .into()],
        )]);
        assert!(out.contains("| `db-1` | `kuma-demo` | ❌ Offline | no inbound is ready |"));
    }

    #[test]
    fn summary_renders_as_a_bullet_list() {
        let summary = SummaryStatus {
            total_meshes: 2,
            ..SummaryStatus::default()
        };
        let out = render(&[result("Mesh Health Summary", vec![summary.into()])]);
        assert!(out.contains("- **Meshes:** 2\n"));
        assert!(out.contains("  - ℹ️ Info: 0\n"));
    }

    #[test]
    fn results_are_separated_by_a_rule() {
        let out = render(&[result("First", Vec::new()), result("Second", Vec::new())]);
        assert!(out.contains("✅ No problematic findings.\n\n---\n\n# Second"));
    }

    #[test]
    fn fallback_row_keeps_the_column_count() {
        assert_eq!(
            fallback_row(&Finding::from(SummaryStatus::default()), 3).matches(" |").count(),
            3
        );
    }
}

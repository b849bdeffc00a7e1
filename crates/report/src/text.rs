use crate::error::Result;
use crate::layout::{self, Layout, PolicyRow, NO_FINDINGS};
use crate::table::Table;
use crate::theme::{Theme, Tone};
use crate::Reporter;
use mesh_doctor_analysis::{Finding, SummaryStatus, ValidationResult};

/// Aligned plain-text tables for terminals.
#[derive(Debug, Clone, Default)]
pub struct TextReporter {
    theme: Theme,
}

impl TextReporter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn render_result(&self, result: &ValidationResult) -> String {
        let mut out = String::new();
        out.push_str(&self.theme.paint(Tone::Heading, &format!("--- {} ---", result.title)));
        out.push('\n');
        out.push_str(&format!("Generated: {}\n\n", layout::generated_at(result)));

        let Some(first) = result.findings.first() else {
            out.push_str(&self.theme.paint(Tone::Good, NO_FINDINGS));
            out.push('\n');
            return out;
        };

        let mut table = Table::new();
        match Layout::of(first) {
            Layout::Dataplane => {
                table.row(["NAME", "NAMESPACE", "STATUS", "DETAILS"]);
                table.row(["----", "---------", "------", "-------"]);
                for finding in &result.findings {
                    match finding {
                        Finding::DataplaneStatus(status) => {
                            let (marker, tone) = layout::status_marker(status.status);
                            table.row([
                                status.name.clone(),
                                status.namespace.clone(),
                                self.theme.paint(tone, &format!("{marker} {}", status.status)),
                                layout::details(status),
                            ]);
                        }
                        other => table.row(fallback(other, 4)),
                    }
                }
            }
            Layout::Summary => {
                table.row(["RESOURCE", "COUNT"]);
                table.row(["--------", "-----"]);
                for finding in &result.findings {
                    match finding {
                        Finding::SummaryStatus(summary) => self.summary_rows(&mut table, summary),
                        other => table.row(fallback(other, 2)),
                    }
                }
            }
            Layout::Policy => {
                table.row(["LEVEL", "RESOURCE", "MESSAGE"]);
                table.row(["-----", "--------", "-------"]);
                for finding in &result.findings {
                    match PolicyRow::of(finding) {
                        Some(row) => {
                            let (marker, tone) = layout::level_marker(row.level);
                            let message = match row.kind {
                                Some(kind) => format!("({kind}) {}", row.message),
                                None => row.message.to_string(),
                            };
                            table.row([
                                self.theme.paint(tone, &format!("{marker} {}", row.level)),
                                row.resource.to_string(),
                                message,
                            ]);
                        }
                        None => table.row(fallback(finding, 3)),
                    }
                }
            }
        }
        table.render(&mut out);
        out
    }

    fn summary_rows(&self, table: &mut Table, summary: &SummaryStatus) {
        table.row(["Meshes".to_string(), summary.total_meshes.to_string()]);
        table.row(["", ""]);
        table.row(["Total dataplanes".to_string(), summary.total_dataplanes.to_string()]);
        for (label, count, tone) in [
            ("  ✅ Online", summary.online_dataplanes, Tone::Good),
            ("  ❌ Offline", summary.offline_dataplanes, Tone::Bad),
            ("  ⚠️ Degraded", summary.degraded_dataplanes, Tone::Caution),
            ("  ℹ️ Info", summary.info_dataplanes, Tone::Neutral),
        ] {
            table.row([self.theme.paint(tone, label), count.to_string()]);
        }
        table.row(["", ""]);
        table.row(["Traffic permissions".to_string(), summary.total_policies.to_string()]);
    }
}

/// Variant name in the first column, headline in the last.
fn fallback(finding: &Finding, columns: usize) -> Vec<String> {
    let mut cells = vec![String::new(); columns.max(2)];
    cells[0] = finding.variant_name().to_string();
    if let Some(last) = cells.last_mut() {
        *last = finding.headline();
    }
    cells
}

impl Reporter for TextReporter {
    fn render(&self, results: &[ValidationResult]) -> Result<String> {
        Ok(results
            .iter()
            .map(|result| self.render_result(result))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::result;
    use mesh_doctor_analysis::{
        DataplaneStatus, HealthStatus, Level, PolicyFinding, PolicyKind, ResilienceFinding,
    };
    use pretty_assertions::assert_eq;

    fn render(results: &[ValidationResult]) -> String {
        TextReporter::new(Theme::plain()).render(results).unwrap()
    }

    #[test]
    fn empty_result_says_no_findings() {
        let out = render(&[result("Dataplane Status", Vec::new())]);
        assert_eq!(
            out,
            "--- Dataplane Status ---\nGenerated: Mon, 06 May 2024 07:08:09 UTC\n\n✅ No problematic findings.\n"
        );
    }

    #[test]
    fn dataplane_table_lists_unready_inbounds() {
        let out = render(&[result(
            "Dataplane Status",
            vec![DataplaneStatus {
                name: "web-1".to_string(),
                namespace: "kuma-demo".to_string(),
                status: HealthStatus::Degraded,
                details: "1 of 2 inbounds ready".to_string(),
                unhealthy: vec!["port 9090 (service: api) is not ready".to_string()],
            }
            .into()],
        )]);
        let rows: Vec<&str> = out.lines().skip(3).collect();
        assert_eq!(
            rows[0].split_whitespace().collect::<Vec<_>>(),
            vec!["NAME", "NAMESPACE", "STATUS", "DETAILS"]
        );
        assert!(rows[2].starts_with("web-1"));
        assert!(rows[2].contains("⚠️ Degraded"));
        assert!(rows[2].ends_with("1 of 2 inbounds ready: port 9090 (service: api) is not ready"));
    }

    #[test]
    fn resilience_messages_carry_the_policy_kind() {
        let out = render(&[result(
            "Resilience Policies",
            vec![ResilienceFinding {
                level: Level::Warn,
                policy_type: Some(PolicyKind::MeshRetry),
                service: "api".to_string(),
                message: "Service is not covered by any retry policy.".to_string(),
            }
            .into()],
        )]);
        assert!(out.contains("⚠️ WARN"));
        assert!(out.contains("(MeshRetry) Service is not covered by any retry policy."));
    }

    #[test]
    fn summary_is_a_label_count_table() {
        let summary = SummaryStatus {
            total_meshes: 1,
            total_dataplanes: 3,
            online_dataplanes: 2,
            offline_dataplanes: 1,
            total_policies: 4,
            ..SummaryStatus::default()
        };
        let out = render(&[result("Mesh Health Summary", vec![summary.into()])]);
        let lines: Vec<String> = out
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        assert!(lines.contains(&"Meshes 1".to_string()));
        assert!(lines.contains(&"Total dataplanes 3".to_string()));
        assert!(lines.contains(&"❌ Offline 1".to_string()));
        assert!(lines.contains(&"Traffic permissions 4".to_string()));
    }

    #[test]
    fn mismatched_finding_gets_a_fallback_row() {
        let out = render(&[result(
            "Traffic Permission Consistency",
            vec![
                PolicyFinding {
                    level: Level::Alert,
                    message: "Service is not covered by any traffic permission.".to_string(),
                    resource: "db".to_string(),
                }
                .into(),
                SummaryStatus::default().into(),
            ],
        )]);
        let last = out.lines().last().unwrap();
        assert!(last.starts_with("SummaryStatus"));
        assert!(last.ends_with("0 traffic permissions"));
    }

    #[test]
    fn results_are_separated_by_a_blank_line() {
        let out = render(&[result("First", Vec::new()), result("Second", Vec::new())]);
        assert!(out.contains("✅ No problematic findings.\n\n--- Second ---"));
    }
}

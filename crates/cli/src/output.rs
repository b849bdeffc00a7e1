use crate::config::Settings;
use anyhow::{Context as AnyhowContext, Result};
use mesh_doctor_analysis::ValidationResult;
use mesh_doctor_report::{reporter_for, Theme};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Renders `results` in the configured format and sends them to the
/// configured destination.
pub(crate) fn deliver(settings: &Settings, results: &[ValidationResult]) -> Result<()> {
    let theme = if settings.color {
        Theme::colored()
    } else {
        Theme::plain()
    };
    let rendered = reporter_for(settings.format, theme)
        .render(results)
        .context("Failed to render report")?;
    match &settings.destination {
        Some(path) => write_file(path, &rendered),
        None => print_stdout(rendered.trim_end_matches('\n')),
    }
}

fn write_file(path: &Path, rendered: &str) -> Result<()> {
    let mut body = rendered.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    fs::write(path, body)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    eprintln!("Report written to {}", path.display());
    Ok(())
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_doctor_analysis::AnalysisOptions;
    use mesh_doctor_report::ReportFormat;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn file_destination_gets_a_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let settings = Settings {
            options: AnalysisOptions::default(),
            snapshot_dir: PathBuf::from("."),
            format: ReportFormat::Json,
            destination: Some(path.clone()),
            color: false,
        };
        deliver(&settings, &[]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[]\n");
    }
}

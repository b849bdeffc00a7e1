use anyhow::{Context as AnyhowContext, Result};
use mesh_doctor_analysis::{AnalysisOptions, DEFAULT_GROUP, DEFAULT_MESH, DEFAULT_VERSION};
use mesh_doctor_report::ReportFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = "mesh-doctor.toml";
pub(crate) const CONFIG_ENV: &str = "MESH_DOCTOR_CONFIG";
pub(crate) const SNAPSHOT_DIR_ENV: &str = "MESH_DOCTOR_SNAPSHOT_DIR";
pub(crate) const MESH_ENV: &str = "MESH_DOCTOR_MESH";
pub(crate) const OUTPUT_ENV: &str = "MESH_DOCTOR_OUTPUT";
pub(crate) const NO_COLOR_ENV: &str = "NO_COLOR";

/// Optional settings read from `mesh-doctor.toml`.
///
/// `api_group` and `api_version` pick version-qualified snapshot files
/// (`<resource>.<version>.<group>.json`) when present.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub mesh: Option<String>,
    pub snapshot_dir: Option<PathBuf>,
    pub api_group: Option<String>,
    pub api_version: Option<String>,
    pub output: Option<String>,
    pub color: Option<bool>,
}

impl FileConfig {
    /// Loads the config named by `explicit`, then `MESH_DOCTOR_CONFIG`, then
    /// `mesh-doctor.toml` in the working directory. Only the last may be absent.
    pub(crate) fn load(
        explicit: Option<&Path>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| non_empty(env(CONFIG_ENV)).map(PathBuf::from));
        let path = match named {
            Some(path) => path,
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Self::parse(&text, &path)
    }

    pub(crate) fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).with_context(|| format!("Invalid config file {}", origin.display()))
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub output: Option<ReportFormat>,
    pub file: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
    pub mesh: Option<String>,
    pub no_color: bool,
}

/// Effective settings after layering flags, environment, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub options: AnalysisOptions,
    pub snapshot_dir: PathBuf,
    pub format: ReportFormat,
    pub destination: Option<PathBuf>,
    pub color: bool,
}

impl Settings {
    pub(crate) fn resolve(
        overrides: Overrides,
        file: FileConfig,
        env: &dyn Fn(&str) -> Option<String>,
        stdout_is_term: bool,
    ) -> Result<Self> {
        let format = match overrides.output {
            Some(format) => format,
            None => match non_empty(env(OUTPUT_ENV)) {
                Some(value) => value
                    .parse::<ReportFormat>()
                    .with_context(|| format!("Invalid {OUTPUT_ENV}"))?,
                None => match &file.output {
                    Some(value) => value
                        .parse::<ReportFormat>()
                        .context("Invalid `output` in config file")?,
                    None => ReportFormat::default(),
                },
            },
        };

        let mesh = overrides
            .mesh
            .or_else(|| non_empty(env(MESH_ENV)))
            .or(file.mesh)
            .unwrap_or_else(|| DEFAULT_MESH.to_string());
        let snapshot_dir = overrides
            .snapshot_dir
            .or_else(|| non_empty(env(SNAPSHOT_DIR_ENV)).map(PathBuf::from))
            .or(file.snapshot_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        // Files never get escape sequences, whatever the config says.
        let color_off = overrides.no_color
            || non_empty(env(NO_COLOR_ENV)).is_some()
            || overrides.file.is_some();
        let color = !color_off && file.color.unwrap_or(stdout_is_term);

        Ok(Self {
            options: AnalysisOptions {
                mesh,
                group: file.api_group.unwrap_or_else(|| DEFAULT_GROUP.to_string()),
                version: file.api_version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            },
            snapshot_dir,
            format,
            destination: overrides.file,
            color,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

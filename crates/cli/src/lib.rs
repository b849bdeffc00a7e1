//! # Mesh Doctor CLI
//!
//! Command-line front end: resolves settings, reads a snapshot directory and
//! prints analyzer results.
//!
//! ```text
//! flags ─┐
//! env ───┼──> Settings ──> FileSnapshotClient(<dir>/<resource>.json)
//! toml ──┘                      │
//!                               ├─ check <name>  one analyzer, fatal on fetch failure
//!                               ├─ report        every analyzer, failures skipped
//!                               └─ (none)        interactive menu
//!                                      │
//!                                      └──> reporter ──> stdout | --file
//! ```

use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{FileConfig, Overrides, Settings};
use console::Term;
use flags::{CheckFlag, OutputFlag};
use mesh_doctor_analysis::{run_checks, Check};
use mesh_doctor_report::ReportFormat;
use snapshot_client::FileSnapshotClient;
use std::env;
use std::path::PathBuf;

mod config;
mod flags;
mod menu;
mod output;
mod snapshot_client;

#[derive(Parser)]
#[command(name = "mesh-doctor")]
#[command(about = "Diagnose a Kuma service mesh from a snapshot of its resources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (env: MESH_DOCTOR_OUTPUT)
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFlag>,

    /// Write the report to this file instead of stdout
    #[arg(short = 'f', long = "file", global = true)]
    file: Option<PathBuf>,

    /// Directory holding <resource>.json snapshots (env: MESH_DOCTOR_SNAPSHOT_DIR)
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,

    /// Mesh inspected by the mTLS check (env: MESH_DOCTOR_MESH)
    #[arg(long, global = true)]
    mesh: Option<String>,

    /// Config file (env: MESH_DOCTOR_CONFIG, default: ./mesh-doctor.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored text output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single check
    Check(CheckArgs),

    /// Run every check and render one combined report
    Report,
}

#[derive(Args)]
struct CheckArgs {
    /// Check to run
    #[arg(value_enum)]
    check: CheckFlag,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.map(OutputFlag::as_domain),
            file: self.file.clone(),
            snapshot_dir: self.snapshot_dir.clone(),
            mesh: self.mesh.clone(),
            no_color: self.no_color,
        }
    }
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet || cli.output == Some(OutputFlag::Json));

    let env_lookup = |name: &str| env::var(name).ok();
    let file_config = FileConfig::load(cli.config.as_deref(), &env_lookup)?;
    let settings = Settings::resolve(
        cli.overrides(),
        file_config,
        &env_lookup,
        Term::stdout().is_term(),
    )?;

    // JSON chosen by env or config file still keeps stdout machine-readable.
    if settings.format == ReportFormat::Json {
        log::set_max_level(log::max_level().min(log::LevelFilter::Warn));
    }

    if !settings.snapshot_dir.is_dir() {
        bail!(
            "Snapshot directory {} does not exist",
            settings.snapshot_dir.display()
        );
    }
    log::debug!(
        "reading snapshot from {} ({}/{})",
        settings.snapshot_dir.display(),
        settings.options.group,
        settings.options.version
    );
    let client = FileSnapshotClient::new(&settings.snapshot_dir);

    match cli.command {
        Some(Commands::Check(args)) => {
            let check = args.check.as_domain();
            let result = check
                .run(&client, &settings.options)
                .with_context(|| format!("{check} check failed"))?;
            output::deliver(&settings, &[result])
        }
        Some(Commands::Report) => {
            let results = run_checks(&client, &Check::ALL, &settings.options);
            output::deliver(&settings, &results)
        }
        None => {
            if !Term::stderr().is_term() {
                bail!(
                    "No subcommand given and no terminal for the interactive menu; \
                     try `mesh-doctor report`"
                );
            }
            menu::run(&client, &settings)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

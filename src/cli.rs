use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::SnapshotFormat;
use crate::logging::LogFormat;

/// Programmatic threat modelling: resolve resource postures, run security
/// checks against them and render a Markdown report with a data-flow diagram
#[derive(Parser, Debug)]
#[command(name = "tmac")]
#[command(version)]
#[command(about = "Programmatic threat modelling report generator", long_about = None)]
pub struct Args {
    /// Path to the resources file (networks, users, databases, systems, containers, res_links)
    #[arg(long, value_name = "PATH")]
    pub resources_file: Option<PathBuf>,

    /// Path to the project config file (title, description, swagger import settings)
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Path to the per-category defaults file
    #[arg(long, value_name = "PATH")]
    pub defaults_file: Option<PathBuf>,

    /// Path to the security checks file [default: built-in checks]
    #[arg(long, value_name = "PATH")]
    pub security_checks_file: Option<PathBuf>,

    /// Path to an OpenAPI / Swagger document whose paths become resources
    #[arg(long, value_name = "PATH")]
    pub swagger_file: Option<PathBuf>,

    /// Directory the report and snapshot are written to [default: .]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Snapshot format: yaml or json
    #[arg(long, default_value = "yaml")]
    pub snapshot_format: SnapshotFormat,

    /// Run with the built-in demo model instead of input files
    #[arg(
        long,
        conflicts_with_all = ["resources_file", "config_file", "defaults_file", "swagger_file"]
    )]
    pub demo: bool,

    /// Do not invoke PlantUML even when it is installed
    #[arg(long)]
    pub no_render: bool,

    /// Treat attributes a resource does not define as false instead of failing
    #[arg(long)]
    pub lenient_missing_attributes: bool,

    /// Exit with code 1 when a finding of this severity or worse is produced
    /// (1 = critical ... 4 = low)
    #[arg(long, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(1..=4))]
    pub fail_on_severity: Option<u8>,

    /// Print the Markdown report to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Diagnostic log format: pretty or json
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

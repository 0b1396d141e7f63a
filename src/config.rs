use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
    pub report: ReportFormat,
    pub interactive: bool,
}

/// Paths required by a non-interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub source: PathBuf,
    pub output_folder: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            source: cli_source,
            output_dir: cli_output_dir,
            report: cli_report,
            interactive,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            source: file_source,
            output_dir: file_output_dir,
            report: file_report,
        } = file_config;

        Ok(Self {
            source: cli_source.or(file_source),
            output_folder: cli_output_dir.or(file_output_dir),
            report: cli_report.or(file_report).unwrap_or_default(),
            interactive,
        })
    }

    pub fn run_paths(&self) -> Result<RunPaths> {
        let source = self
            .source
            .clone()
            .context("a source workbook is required (--source)")?;
        let output_folder = self
            .output_folder
            .clone()
            .context("an output folder is required (--output-dir)")?;
        anyhow::ensure!(
            !output_folder.is_file(),
            "output folder {:?} is an existing file",
            output_folder
        );
        Ok(RunPaths {
            source,
            output_folder,
        })
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "sheet-qr",
    about = "Generate QR codes for spreadsheet rows and embed them beside their data",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Workbook whose first sheet holds name/data rows; overwritten in place"
    )]
    pub source: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Folder receiving one PNG per unique name"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        value_name = "FORMAT",
        help = "Completion report format (text or json)"
    )]
    pub report: Option<ReportFormat>,

    #[arg(long, help = "Pick the workbook and folder through native dialogs")]
    pub interactive: bool,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    source: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    report: Option<ReportFormat>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}

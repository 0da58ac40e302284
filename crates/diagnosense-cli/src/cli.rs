use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use diagnosense_core::form::ckd_field;

#[derive(Debug, Parser)]
#[command(name = "diagnosense", version, about = "Submit patient data to the Diagnosense prediction service")]
pub struct Cli {
    /// Prediction service base URL. Overrides DIAGNOSENSE_API_URL and the config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds. Without it requests wait indefinitely.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available predictors.
    List,
    /// Describe the CKD input fields: label, input kind, default and range.
    Fields,
    /// Chronic kidney disease risk from clinical markers.
    Ckd(CkdArgs),
    /// Pneumonia detection from a chest X-ray image.
    Pneumonia(PneumoniaArgs),
    /// Prostate cancer classification from a gene expression CSV.
    Prostate(ProstateArgs),
    /// Inspect or change the stored configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Write a standalone HTML page with the results and charts.
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Print the outcome and chart records as JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn field_default(name: &str) -> &'static str {
    ckd_field(name).map(|f| f.default).unwrap_or_default()
}

fn field_help(name: &str) -> String {
    ckd_field(name).map(|f| f.help()).unwrap_or_default()
}

#[derive(Debug, Args)]
pub struct CkdArgs {
    #[arg(long, default_value = field_default("sg"), help = field_help("sg"))]
    pub sg: String,

    #[arg(long, default_value = field_default("al"), help = field_help("al"))]
    pub al: String,

    #[arg(long, default_value = field_default("sc"), help = field_help("sc"))]
    pub sc: String,

    #[arg(long, default_value = field_default("bu"), help = field_help("bu"))]
    pub bu: String,

    #[arg(long, default_value = field_default("hemo"), help = field_help("hemo"))]
    pub hemo: String,

    #[arg(long, default_value = field_default("bgr"), help = field_help("bgr"))]
    pub bgr: String,

    #[arg(long, default_value = field_default("htn"), help = field_help("htn"))]
    pub htn: String,

    #[arg(long, default_value = field_default("dm"), help = field_help("dm"))]
    pub dm: String,

    #[arg(long, default_value = field_default("pc"), help = field_help("pc"))]
    pub pc: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CkdArgs {
    /// Field name and raw value pairs, in form order.
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("sg", self.sg.as_str()),
            ("al", self.al.as_str()),
            ("sc", self.sc.as_str()),
            ("bu", self.bu.as_str()),
            ("hemo", self.hemo.as_str()),
            ("bgr", self.bgr.as_str()),
            ("htn", self.htn.as_str()),
            ("dm", self.dm.as_str()),
            ("pc", self.pc.as_str()),
        ]
    }
}

#[derive(Debug, Args)]
pub struct PneumoniaArgs {
    /// Chest X-ray image.
    #[arg(long)]
    pub image: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ProstateArgs {
    /// Gene expression CSV.
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the stored config and the effective service URL.
    Show,
    /// Store a new service base URL.
    SetUrl { url: String },
    /// Delete the stored config.
    Reset,
}

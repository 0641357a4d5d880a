//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// crmwright: Salesforce end-to-end suite companion
#[derive(Parser, Debug)]
#[command(name = "crmwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the report directory and open the dashboard
    Dashboard(DashboardArgs),

    /// Show the effective suite configuration
    Config(ConfigArgs),

    /// List scenarios with their tags and execution mode
    Features(FeaturesArgs),
}

/// Arguments for the dashboard command
#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Report directory to serve
    #[arg(short, long, default_value = "cucumber-reports")]
    pub dir: PathBuf,

    /// First port to try; the next ones are tried while it is taken
    #[arg(short, long, default_value = "5500")]
    pub port: u16,

    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: std::net::IpAddr,

    /// Do not open the default browser
    #[arg(long)]
    pub no_open: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Configuration file (default: crmwright.yaml when present)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Only check the configuration
    #[arg(long)]
    pub validate: bool,
}

/// Arguments for the features command
#[derive(Parser, Debug)]
pub struct FeaturesArgs {
    /// Directory searched recursively for `.feature` files
    #[arg(short, long, default_value = "tests/features")]
    pub dir: PathBuf,

    /// Tag expression, e.g. "@smoke and not @wip"
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

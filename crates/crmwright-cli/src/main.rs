//! crmwright: companion CLI for the Salesforce end-to-end suite
//!
//! ## Usage
//!
//! ```bash
//! crmwright dashboard                    # Serve cucumber-reports on :5500
//! crmwright config --file ci.yaml        # Effective configuration, redacted
//! crmwright features --tags "@smoke"     # Scenarios with tags and mode
//! ```
//!
//! The suite itself runs with `cargo test -p crmwright --features live --test cucumber`.

use clap::Parser;
use crmwright::SuiteConfig;
use crmwright_cli::{
    catalog, CliConfig, CliError, CliResult, ColorChoice, Commands, ConfigArgs, Dashboard,
    DashboardArgs, DashboardConfig, FeaturesArgs, Reporter, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = crmwright_cli::Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    match cli.command {
        Commands::Dashboard(args) => run_dashboard(&args),
        Commands::Config(args) => run_config(&config, &args),
        Commands::Features(args) => run_features(&config, &args),
    }
}

fn build_config(cli: &crmwright_cli::Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(config.verbosity.is_debug())
        .try_init();
}

fn reporter(config: &CliConfig) -> Reporter {
    Reporter::new(config.color.should_color(), config.verbosity.is_quiet())
}

fn run_dashboard(args: &DashboardArgs) -> CliResult<()> {
    let config = DashboardConfig::default()
        .with_directory(&args.dir)
        .with_host(args.host)
        .with_port(args.port)
        .with_open_browser(!args.no_open);
    let dashboard = Dashboard::new(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server(format!("Failed to create runtime: {e}")))?;
    rt.block_on(dashboard.run())
}

fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let suite = SuiteConfig::load(args.file.as_deref())?;
    let reporter = reporter(config);

    if args.validate {
        reporter.success(&format!("configuration is valid ({})", suite.login_url));
        return Ok(());
    }
    if suite.username.is_empty() || suite.password.is_empty() {
        reporter.warning("credentials are not set (SF_USERNAME / SF_PASSWORD)");
    }

    if args.json {
        reporter.data(&serde_json::to_string_pretty(&suite.redacted())?);
    } else {
        reporter.data(&suite.to_redacted_yaml()?);
    }
    Ok(())
}

fn run_features(config: &CliConfig, args: &FeaturesArgs) -> CliResult<()> {
    let entries = catalog(&args.dir, args.tags.as_deref())?;
    let reporter = reporter(config);

    if args.json {
        reporter.data(&serde_json::to_string_pretty(&entries)?);
    } else {
        reporter.catalog(&entries);
    }
    Ok(())
}

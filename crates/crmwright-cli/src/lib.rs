//! crmwright CLI library
//!
//! Companion commands for the Salesforce suite: serve the report dashboard,
//! show the effective configuration, list scenarios by tag and mode.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
pub mod dashboard;
mod error;
pub mod features;
mod output;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, DashboardArgs, FeaturesArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use dashboard::{
    bind_with_retry, dashboard_url, Dashboard, DashboardConfig, DASHBOARD_PAGE, DEFAULT_PORT,
    MAX_PORT_ATTEMPTS,
};
pub use error::{CliError, CliResult};
pub use features::{catalog, ScenarioEntry};
pub use output::{render_catalog, Reporter};

//! Settings for the `divvy` command line.
//!
//! Layered lowest to highest priority: defaults, an optional TOML file
//! (`config/divvy.toml` or `--config`), `DIVVY_*` environment variables,
//! then command line flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/divvy.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the `divvy` and `engine` targets.
    pub level: String,
    /// Currency used when a ledger does not name one.
    pub currency: String,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: "SGD".to_string(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "divvy")]
#[command(about = "Split shared expenses and work out who owes whom")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override log level (e.g. `debug`).
    #[arg(long, global = true)]
    pub level: Option<String>,
    /// Override default currency code.
    #[arg(long, global = true)]
    pub currency: Option<String>,
    /// Override output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the owed amounts of one expense from a split request.
    Split(InputArgs),
    /// Show the net balance of every participant of a ledger.
    Balances(BalancesArgs),
    /// Suggest the payments that settle a ledger.
    Settle(InputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON document to read, `-` for stdin.
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct BalancesArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Participant id whose balance is highlighted.
    #[arg(long)]
    pub me: Option<Uuid>,
}

pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(cli.config.is_some()));
    builder = builder.add_source(config::Environment::with_prefix("DIVVY"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }
    if let Some(currency) = &cli.currency {
        settings.currency = currency.clone();
    }
    if let Some(format) = cli.format {
        settings.format = format;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "divvy",
            "--config",
            "does/not/exist.toml",
            "settle",
            "ledger.json",
        ]);
        assert!(load(&cli).is_err());

        let cli = Cli::parse_from([
            "divvy",
            "balances",
            "ledger.json",
            "--currency",
            "usd",
            "--format",
            "json",
            "--level",
            "debug",
        ]);
        let settings = load(&cli).unwrap();
        assert_eq!(settings.currency, "usd");
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.level, "debug");
        assert!(matches!(cli.command, Command::Balances(BalancesArgs { me: None, .. })));
    }
}

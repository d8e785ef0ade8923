use std::{
    io::Read,
    path::Path,
    process::ExitCode,
};

use api_types::{ledger::Ledger, split::SplitRequest};
use clap::Parser;
use engine::{Currency, ParticipantId};
use serde::{Serialize, de::DeserializeOwned};

use error::Result;
use settings::{Cli, Command, OutputFormat, Settings};

mod convert;
mod error;
mod render;
mod settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "divvy={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Split(args) => {
            let request: SplitRequest = read_json(&args.input)?;
            let currency = Currency::try_from(settings.currency.as_str())?;
            let total = convert::parse_total(&request.total)?;
            let mode = convert::split_mode(request.mode)?;
            tracing::info!(mode = mode.as_str(), total = %total, "computing splits");

            let splits = engine::compute_splits(total, &mode)?;
            emit(settings.format, &convert::split_response(&splits), || {
                render::splits(&splits, currency)
            })
        }
        Command::Balances(args) => {
            let ledger: Ledger = read_json(&args.input.input)?;
            let currency = convert::currency(&ledger, &settings.currency)?;
            let (expenses, settlements) = convert::ledger(&ledger)?;
            tracing::info!(
                expenses = expenses.len(),
                settlements = settlements.len(),
                "computing balances"
            );

            let summary =
                engine::summarize(&expenses, &settlements, args.me.map(ParticipantId::new));
            emit(settings.format, &convert::ledger_response(&summary, currency), || {
                render::balances(&summary, currency)
            })
        }
        Command::Settle(args) => {
            let ledger: Ledger = read_json(&args.input)?;
            let currency = convert::currency(&ledger, &settings.currency)?;
            let (expenses, settlements) = convert::ledger(&ledger)?;
            tracing::info!(
                expenses = expenses.len(),
                settlements = settlements.len(),
                "reconciling ledger"
            );

            let summary = engine::summarize(&expenses, &settlements, None);
            emit(settings.format, &convert::ledger_response(&summary, currency), || {
                render::transactions(&summary, currency)
            })
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn emit<T: Serialize>(
    format: OutputFormat,
    body: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(body)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

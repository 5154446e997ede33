//! Vitalscore command-line entry point.
//!
//! # Usage
//!
//! ```bash
//! vitalscore cardio <request.json>
//! vitalscore gfr --age <years|birth year> --sex male|female --creatinine <value> [--unit mgdl|umoll]
//! vitalscore tables
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr or to the file
//! named by `VITALSCORE_LOG_FILE` when `VITALSCORE_LOG_MODE=file`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitalscore::adapters::sanitize::SanitizingMakeWriter;
use vitalscore::config::LogMode;
use vitalscore::domain::age_from_entry;
use vitalscore::{
    CardioInputs, CardioService, CreatinineUnit, EngineConfig, RenalInputs, RenalService, Sex,
};

const USAGE: &str = "usage:
  vitalscore cardio <request.json>
  vitalscore gfr --age <years|birth year> --sex male|female --creatinine <value> [--unit mgdl|umoll]
  vitalscore tables";

#[derive(Debug, PartialEq)]
enum Command {
    Cardio(PathBuf),
    Gfr(RenalInputs),
    Tables,
    Help,
}

fn parse_gfr(args: &[String]) -> Result<RenalInputs> {
    let mut age = None;
    let mut sex = None;
    let mut creatinine = None;
    let mut unit = CreatinineUnit::default();

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("Missing value for {flag}"))?;
        match flag.as_str() {
            "--age" => {
                let entry: u32 = value.parse().context("--age must be a whole number")?;
                age = Some(age_from_entry(entry));
            }
            "--sex" => sex = Some(value.parse::<Sex>().map_err(anyhow::Error::msg)?),
            "--creatinine" => {
                creatinine = Some(value.parse::<f64>().context("--creatinine must be a number")?);
            }
            "--unit" => unit = value.parse::<CreatinineUnit>().map_err(anyhow::Error::msg)?,
            other => bail!("Unknown option {other}\n{USAGE}"),
        }
    }

    Ok(RenalInputs::new(
        age.context("--age is required")?,
        sex.context("--sex is required")?,
        creatinine.context("--creatinine is required")?,
        unit,
    ))
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.split_first() {
        None => Ok(Command::Help),
        Some((cmd, rest)) => match cmd.as_str() {
            "cardio" => match rest {
                [path] => Ok(Command::Cardio(PathBuf::from(path))),
                _ => bail!("cardio takes exactly one request file\n{USAGE}"),
            },
            "gfr" => parse_gfr(rest).map(Command::Gfr),
            "tables" => Ok(Command::Tables),
            "-h" | "--help" | "help" => Ok(Command::Help),
            other => bail!("Unknown command {other}\n{USAGE}"),
        },
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let config = EngineConfig::from_env()?;

    let (writer, _guard) = match config.log_mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: a missing directory surfaces when the file is opened.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("Cannot open log file {}", config.log_file.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Help => println!("{USAGE}"),
        Command::Cardio(path) => {
            let content = std::fs::read(&path)
                .with_context(|| format!("Cannot read request {}", path.display()))?;
            let mut inputs: CardioInputs =
                serde_json::from_slice(&content).context("Malformed cardiovascular request")?;
            inputs.age = age_from_entry(inputs.age);

            let service = CardioService::new(config.table_store()?);
            print_json(&service.assess(&inputs)?)?;
        }
        Command::Gfr(inputs) => {
            print_json(&RenalService::new().assess(&inputs)?)?;
        }
        Command::Tables => {
            let store = config.table_store()?;
            print_json(&serde_json::json!({
                "source": store.source(),
                "version": store.tables().version(),
                "region": store.tables().region(),
                "sha256": store.fingerprint(),
            }))?;
        }
    }

    Ok(())
}

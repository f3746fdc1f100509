use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use payjournal::settings::Settings;
use payjournal::{convert, info};

#[derive(Debug, Parser)]
/// Converts payment provider reports into journal import files.
struct Command {
    /// RON settings file. Built-in defaults are used when omitted.
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Log per-row detail.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Debug, Subcommand)]
enum SubCommand {
    #[command(name = "convert")]
    /// Converts a PAYD or COMPLETED report into JDT and OJDT files.
    Convert(convert::cmd::Command),
    #[command(name = "detect")]
    /// Prints the format of a report.
    Detect(convert::cmd::DetectCommand),
    #[command(name = "mappings")]
    /// Prints the account mapping tables in effect.
    Mappings(info::MappingsCommand),
    #[command(name = "columns")]
    /// Prints the input columns recognized for each report format.
    Columns(info::ColumnsCommand),
}

fn main() -> Result<()> {
    let cmd = Command::parse();
    let default_level = if cmd.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = match &cmd.config {
        Some(path) => {
            Settings::from_path(path).with_context(|| format!("loading settings {:?}", path))?
        }
        None => Settings::default(),
    };

    use SubCommand::*;
    match cmd.subcmd {
        Convert(cmd) => cmd.run(&settings),
        Detect(cmd) => cmd.run(),
        Mappings(cmd) => cmd.run(&settings),
        Columns(cmd) => cmd.run(),
    }
}

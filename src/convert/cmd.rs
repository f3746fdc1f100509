use anyhow::{Context, Result};
use clap::Args;

use crate::convert;
use crate::filespec::FileSpec;
use crate::report;
use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct Command {
    /// The report CSV to convert. "-" reads from stdin.
    input: FileSpec,
    /// The JDT (journal lines) file to write (overwrites any existing file).
    /// "-" writes to stdout.
    #[arg(long = "jdt")]
    jdt: FileSpec,
    /// The OJDT (journal headers) file to write (overwrites any existing
    /// file). "-" writes to stdout.
    #[arg(long = "ojdt")]
    ojdt: FileSpec,
}

impl Command {
    pub fn run(&self, settings: &Settings) -> Result<()> {
        let summary = convert::convert(&self.input, &self.jdt, &self.ojdt, settings)
            .with_context(|| format!("converting {}", self.input))?;
        eprintln!("{}", summary);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct DetectCommand {
    /// The report CSV to inspect. "-" reads from stdin.
    input: FileSpec,
}

impl DetectCommand {
    pub fn run(&self) -> Result<()> {
        let format = report::detect_format(self.input.reader()?)
            .with_context(|| format!("reading {}", self.input))?;
        println!("{}", format);
        Ok(())
    }
}

//! Conversion of one report into its JDT and OJDT journal files.

use std::fmt;
use std::io::Read;

use log::info;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::filespec::FileSpec;
use crate::journal::{Batch, JournalBuilder};
use crate::output::{OutputTemplates, RenderedBatch};
use crate::report::{Report, ReportFormat};
use crate::settings::Settings;

pub mod cmd;

/// What a successful conversion produced.
#[derive(Debug)]
pub struct Summary {
    pub format: ReportFormat,
    pub rows: usize,
    pub primary_groups: usize,
    pub additional_fee_groups: usize,
    pub jdt_lines: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} rows, {} groups ({} additional fee), {} JDT lines, {} diagnostics",
            self.format,
            self.rows,
            self.primary_groups + self.additional_fee_groups,
            self.additional_fee_groups,
            self.jdt_lines,
            self.diagnostics.len(),
        )
    }
}

/// Converts the report at `input`, writing both journal files. Either both
/// files are written or neither is.
pub fn convert(
    input: &FileSpec,
    jdt: &FileSpec,
    ojdt: &FileSpec,
    settings: &Settings,
) -> Result<Summary> {
    info!("converting {}", input);
    let report = Report::from_reader(input.reader()?)?;
    let templates = settings.load_templates(report.format)?;
    let (rendered, summary) = render_report(&report, &templates, settings)?;
    rendered.write(jdt, ojdt)?;
    Ok(summary)
}

/// Converts a report held in memory, returning both rendered files instead
/// of writing them.
pub fn convert_reader<R: Read>(
    input: R,
    templates: &OutputTemplates,
    settings: &Settings,
) -> Result<(RenderedBatch, Summary)> {
    let report = Report::from_reader(input)?;
    render_report(&report, templates, settings)
}

fn render_report(
    report: &Report,
    templates: &OutputTemplates,
    settings: &Settings,
) -> Result<(RenderedBatch, Summary)> {
    let dates = settings.date_normalizer();
    let mut diagnostics = Diagnostics::new();
    let journal = JournalBuilder::new(&settings.accounts, &dates).build(report, &mut diagnostics)?;
    let batch = Batch::assemble(&journal);
    let rendered = RenderedBatch::render(&batch, templates)?;

    let summary = Summary {
        format: journal.format,
        rows: report.rows.len(),
        primary_groups: journal.primary.len(),
        additional_fee_groups: journal.additional_fees.len(),
        jdt_lines: batch.jdt.len(),
        diagnostics: diagnostics.into_vec(),
    };
    info!("{}", summary);
    Ok((rendered, summary))
}

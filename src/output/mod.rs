//! Rendering and writing of the JDT and OJDT outputs of a batch.

use std::fmt;

use log::{error, info};

use crate::error::Result;
use crate::filespec::FileSpec;
use crate::journal::Batch;

pub mod template;

use template::OutputTemplate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Journal detail lines.
    Jdt,
    /// Journal headers.
    Ojdt,
}

impl OutputKind {
    pub const ALL: [OutputKind; 2] = [OutputKind::Jdt, OutputKind::Ojdt];
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            OutputKind::Jdt => "JDT",
            OutputKind::Ojdt => "OJDT",
        })
    }
}

/// The templates for both outputs of one report format.
#[derive(Clone, Debug)]
pub struct OutputTemplates {
    pub jdt: OutputTemplate,
    pub ojdt: OutputTemplate,
}

/// Both outputs of a batch, fully rendered.
#[derive(Debug)]
pub struct RenderedBatch {
    pub jdt: Vec<u8>,
    pub ojdt: Vec<u8>,
}

impl RenderedBatch {
    pub fn render(batch: &Batch, templates: &OutputTemplates) -> Result<Self> {
        Ok(Self {
            jdt: templates.jdt.render(&batch.jdt)?,
            ojdt: templates.ojdt.render(&batch.ojdt)?,
        })
    }

    /// Writes both outputs. Neither destination is touched until both have
    /// been staged in full, and the JDT file is put back as it was if the
    /// OJDT file cannot be committed.
    pub fn write(self, jdt: &FileSpec, ojdt: &FileSpec) -> Result<()> {
        let staged_jdt = jdt.stage(self.jdt)?;
        let staged_ojdt = ojdt.stage(self.ojdt)?;
        staged_jdt.check()?;
        staged_ojdt.check()?;

        let committed_jdt = staged_jdt.commit_reversibly()?;
        if let Err(e) = staged_ojdt.commit() {
            if let Err(rollback_err) = committed_jdt.rollback() {
                error!("restoring JDT {}: {}", jdt, rollback_err);
            }
            return Err(e);
        }
        committed_jdt.finish();
        info!("wrote JDT to {} and OJDT to {}", jdt, ojdt);
        Ok(())
    }
}

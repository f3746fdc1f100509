//! Non-fatal anomalies found while building a batch. These never stop a run,
//! but are logged and returned so the values can be corrected by hand.

use std::fmt;

use log::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The provider had no entry in the named table and was written through
    /// as the account code.
    UnmappedProvider {
        row: usize,
        table: &'static str,
        provider: String,
    },
    /// No date pattern matched and the raw value was written through.
    UnparseableDate { row: usize, value: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Diagnostic::*;
        match self {
            UnmappedProvider {
                row,
                table,
                provider,
            } => write!(
                f,
                "row {}: provider {:?} not in {} table, using it as the account code",
                row, provider, table
            ),
            UnparseableDate { row, value } => {
                write!(f, "row {}: unrecognized date {:?}, kept as is", row, value)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records and logs a diagnostic. The same anomaly on the same row is
    /// recorded once, even if several lines of the row hit it.
    pub fn push(&mut self, d: Diagnostic) {
        if self.0.contains(&d) {
            return;
        }
        warn!("{}", d);
        self.0.push(d);
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

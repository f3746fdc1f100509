use log::debug;

use crate::error::{ConvertError, Result};
use crate::report::columns::ColumnIndex;
use crate::report::{ReportFormat, PAID, RESELLER_FEE_EUR};

/// Classifies a report from its column names.
///
/// Names are canonicalized first, so line-break variants of a known column
/// name are recognized.
pub fn detect<I, S>(column_names: I) -> Result<ReportFormat>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    detect_columns(&ColumnIndex::new(column_names))
}

/// Classifies a report from an already canonicalized header. The COMPLETED
/// signature is checked first and wins if both are present.
pub fn detect_columns(columns: &ColumnIndex) -> Result<ReportFormat> {
    let format = if columns.contains(RESELLER_FEE_EUR) {
        ReportFormat::Completed
    } else if columns.contains(PAID) {
        ReportFormat::Payd
    } else {
        return Err(ConvertError::UnrecognizedFormat {
            columns: columns.names().to_vec(),
        });
    };
    debug!("detected {} report from columns {:?}", format, columns.names());
    Ok(format)
}

//! Reading of provider report exports.

use std::fmt;
use std::io::Read;

use log::info;

use crate::error::Result;

pub mod columns;
pub mod detect;
pub mod row;

pub use row::{FeeSplit, TransactionRow};

use columns::ColumnIndex;
use row::RowReader;

// Canonical input column names.
pub const PAID: &str = "Paid";
pub const COMPLETED: &str = "Completed";
pub const PAYMENT_PROVIDER: &str = "Payment Provider";
pub const PAYMENT_METHOD: &str = "Payment Method";
pub const FVAL_EUR: &str = "Fval EUR";
pub const TOTAL_FEE_EUR: &str = "Total Fee EUR";
pub const RESELLER_FEE_EUR: &str = "Reseller Fee EUR";
pub const NET_FEE_EUR: &str = "Net Fee EUR";
pub const NAME: &str = "Name";
pub const ORDER: &str = "Order";
/// Spelled as the provider exports spell it.
pub const ADDITIONAL_FEE: &str = "Additionall Fee";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// Simple settled payments.
    Payd,
    /// Payments with reseller/net fee splits.
    Completed,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Payd, ReportFormat::Completed];

    pub fn layout(self) -> &'static Layout {
        match self {
            ReportFormat::Payd => &PAYD_LAYOUT,
            ReportFormat::Completed => &COMPLETED_LAYOUT,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Payd => "PAYD",
            ReportFormat::Completed => "COMPLETED",
        })
    }
}

/// A logical input field and the canonical column names it may appear
/// under, in order of preference.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub columns: &'static [&'static str],
}

impl Field {
    const fn new(columns: &'static [&'static str]) -> Self {
        Self { columns }
    }

    pub fn name(&self) -> &'static str {
        self.columns[0]
    }
}

/// Where each logical field of a report format is read from.
#[derive(Debug)]
pub struct Layout {
    pub date: Field,
    pub provider: Field,
    pub total_fee: Field,
    /// Present only for formats with a reseller/net fee split.
    pub fee_split: Option<(Field, Field)>,
    pub name: Field,
    pub order: Field,
    pub additional_fee: Field,
}

impl Layout {
    /// All required fields, in the order they are listed to operators.
    pub fn required(&self) -> Vec<Field> {
        let mut fields = vec![self.date, self.provider, self.total_fee];
        if let Some((reseller, net)) = self.fee_split {
            fields.push(reseller);
            fields.push(net);
        }
        fields.push(self.name);
        fields.push(self.order);
        fields
    }
}

const PAYD_LAYOUT: Layout = Layout {
    date: Field::new(&[PAID]),
    provider: Field::new(&[PAYMENT_PROVIDER, PAYMENT_METHOD]),
    total_fee: Field::new(&[FVAL_EUR, TOTAL_FEE_EUR]),
    fee_split: None,
    name: Field::new(&[NAME]),
    order: Field::new(&[ORDER]),
    additional_fee: Field::new(&[ADDITIONAL_FEE]),
};

const COMPLETED_LAYOUT: Layout = Layout {
    date: Field::new(&[COMPLETED]),
    provider: Field::new(&[PAYMENT_PROVIDER]),
    total_fee: Field::new(&[TOTAL_FEE_EUR]),
    fee_split: Some((Field::new(&[RESELLER_FEE_EUR]), Field::new(&[NET_FEE_EUR]))),
    name: Field::new(&[NAME]),
    order: Field::new(&[ORDER]),
    additional_fee: Field::new(&[ADDITIONAL_FEE]),
};

/// A fully read input report.
#[derive(Debug)]
pub struct Report {
    pub format: ReportFormat,
    pub rows: Vec<TransactionRow>,
}

impl Report {
    /// Reads a CSV report, detecting its format from the header row.
    ///
    /// Any malformed row fails the whole report.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_rdr = csv_reader(reader);

        let columns = ColumnIndex::new(csv_rdr.headers()?);
        let format = detect::detect_columns(&columns)?;
        let row_reader = RowReader::new(format.layout(), &columns);

        let rows = csv_rdr
            .records()
            .enumerate()
            .map(|(i, record)| row_reader.read(i + 1, &record?))
            .collect::<Result<Vec<TransactionRow>>>()?;

        info!("read {} report with {} rows", format, rows.len());
        Ok(Report { format, rows })
    }
}

/// Detects the format of a CSV report from its header row alone.
pub fn detect_format<R: Read>(reader: R) -> Result<ReportFormat> {
    let mut csv_rdr = csv_reader(reader);
    let columns = ColumnIndex::new(csv_rdr.headers()?);
    detect::detect_columns(&columns)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<impl Read> {
    // Strips a leading BOM, as spreadsheet exports usually carry one.
    let reader = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding_rs::UTF_8))
        .build(reader);
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

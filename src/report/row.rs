use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;

use crate::error::{ConvertError, Result};
use crate::report::columns::ColumnIndex;
use crate::report::{Field, Layout};

/// One input record, read-only once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRow {
    /// 1-based data row number within the report.
    pub row: usize,
    /// Raw date string, normalized later.
    pub transaction_date: String,
    pub provider: String,
    pub total_fee: Decimal,
    /// Set for COMPLETED reports only.
    pub fee_split: Option<FeeSplit>,
    /// `None` when the column is absent, empty or not a number.
    pub additional_fee: Option<Decimal>,
    pub customer_name: String,
    pub order_reference: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub reseller_fee: Decimal,
    pub net_fee: Decimal,
}

/// A `Field` resolved against a particular header row.
#[derive(Clone, Copy, Debug)]
struct BoundField {
    field: Field,
    position: Option<usize>,
}

impl BoundField {
    fn bind(field: Field, columns: &ColumnIndex) -> Self {
        Self {
            field,
            position: columns.find_any(field.columns),
        }
    }

    fn get<'r>(&self, record: &'r csv::StringRecord) -> Option<&'r str> {
        self.position.and_then(|i| record.get(i))
    }

    fn text(&self, row: usize, record: &csv::StringRecord) -> Result<String> {
        self.get(record)
            .map(str::to_string)
            .ok_or_else(|| ConvertError::malformed_row(row, self.field.name(), "is missing"))
    }

    fn amount(&self, row: usize, record: &csv::StringRecord) -> Result<Decimal> {
        let s = self
            .get(record)
            .ok_or_else(|| ConvertError::malformed_row(row, self.field.name(), "is missing"))?;
        parse_amount(s).ok_or_else(|| {
            ConvertError::malformed_row(
                row,
                self.field.name(),
                format!("is not an amount: {:?}", s),
            )
        })
    }

    fn optional_amount(&self, record: &csv::StringRecord) -> Option<Decimal> {
        self.get(record).and_then(parse_amount)
    }
}

fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Reads `TransactionRow`s according to a format's `Layout`. Column
/// positions are resolved once, when the reader is created.
#[derive(Debug)]
pub struct RowReader {
    date: BoundField,
    provider: BoundField,
    total_fee: BoundField,
    fee_split: Option<(BoundField, BoundField)>,
    name: BoundField,
    order: BoundField,
    additional_fee: BoundField,
}

impl RowReader {
    pub fn new(layout: &Layout, columns: &ColumnIndex) -> Self {
        let bind = |field| BoundField::bind(field, columns);
        Self {
            date: bind(layout.date),
            provider: bind(layout.provider),
            total_fee: bind(layout.total_fee),
            fee_split: layout
                .fee_split
                .map(|(reseller, net)| (bind(reseller), bind(net))),
            name: bind(layout.name),
            order: bind(layout.order),
            additional_fee: bind(layout.additional_fee),
        }
    }

    pub fn read(&self, row: usize, record: &csv::StringRecord) -> Result<TransactionRow> {
        let fee_split = match &self.fee_split {
            Some((reseller, net)) => Some(FeeSplit {
                reseller_fee: reseller.amount(row, record)?,
                net_fee: net.amount(row, record)?,
            }),
            None => None,
        };
        let trn = TransactionRow {
            row,
            transaction_date: self.date.text(row, record)?,
            provider: self.provider.text(row, record)?,
            total_fee: self.total_fee.amount(row, record)?,
            fee_split,
            additional_fee: self.additional_fee.optional_amount(record),
            customer_name: self.name.text(row, record)?,
            order_reference: self.order.text(row, record)?,
        };
        debug!("read row {}: {:?}", row, trn);
        Ok(trn)
    }
}

//! The per-format transcription rules: which lines a row expands into, and
//! which accounts they post to.

use crate::accounts::{AccountMappingTable, AccountMappings};
use crate::error::{ConvertError, Result};
use crate::journal::{LineRole, Posting};
use crate::report::{ReportFormat, TransactionRow, RESELLER_FEE_EUR};

/// A mapping table together with the name it is reported under.
#[derive(Clone, Copy, Debug)]
pub struct NamedTable<'a> {
    pub name: &'static str,
    pub table: &'a AccountMappingTable,
}

/// Where a line's account code comes from.
#[derive(Clone, Copy, Debug)]
pub enum AccountSource<'a> {
    /// Looked up by the row's provider.
    Mapped(NamedTable<'a>),
    Fixed(&'a str),
}

/// A line as decided by a rule, before group-wide fields are filled in.
#[derive(Clone, Copy, Debug)]
pub struct LineSpec<'a> {
    pub role: LineRole,
    pub posting: Posting,
    pub account: AccountSource<'a>,
}

pub trait RuleSet {
    /// Lines of the primary group for `row`, first line first.
    fn primary_lines(&self, row: &TransactionRow) -> Result<Vec<LineSpec<'_>>>;

    /// Table that additional-fee debit lines are resolved from.
    fn additional_fee_debit_table(&self) -> NamedTable<'_>;

    /// Account that additional-fee credit lines post to.
    fn additional_fee_credit_account(&self) -> &str;
}

pub fn rules_for(format: ReportFormat, mappings: &AccountMappings) -> Box<dyn RuleSet + '_> {
    match format {
        ReportFormat::Payd => Box::new(PaydRules { mappings }),
        ReportFormat::Completed => Box::new(CompletedRules { mappings }),
    }
}

/// Debit and credit of the total fee, each through its own table.
pub struct PaydRules<'a> {
    mappings: &'a AccountMappings,
}

impl<'a> PaydRules<'a> {
    fn debit_table(&self) -> NamedTable<'a> {
        NamedTable {
            name: "PAYD debit",
            table: &self.mappings.payd_debit,
        }
    }

    fn credit_table(&self) -> NamedTable<'a> {
        NamedTable {
            name: "PAYD credit",
            table: &self.mappings.payd_credit,
        }
    }
}

impl<'a> RuleSet for PaydRules<'a> {
    fn primary_lines(&self, row: &TransactionRow) -> Result<Vec<LineSpec<'_>>> {
        Ok(vec![
            LineSpec {
                role: LineRole::PrimaryDebit,
                posting: Posting::Debit(row.total_fee),
                account: AccountSource::Mapped(self.debit_table()),
            },
            LineSpec {
                role: LineRole::PrimaryCredit,
                posting: Posting::Credit(row.total_fee),
                account: AccountSource::Mapped(self.credit_table()),
            },
        ])
    }

    fn additional_fee_debit_table(&self) -> NamedTable<'_> {
        self.debit_table()
    }

    fn additional_fee_credit_account(&self) -> &str {
        &self.mappings.special.additional_fee
    }
}

/// Debit of the total fee, credited as the reseller fee plus the net fee.
/// The split is transcribed as given; it is not checked to add up.
pub struct CompletedRules<'a> {
    mappings: &'a AccountMappings,
}

impl<'a> CompletedRules<'a> {
    fn debit_table(&self) -> NamedTable<'a> {
        NamedTable {
            name: "COMPLETED debit",
            table: &self.mappings.completed_debit,
        }
    }
}

impl<'a> RuleSet for CompletedRules<'a> {
    fn primary_lines(&self, row: &TransactionRow) -> Result<Vec<LineSpec<'_>>> {
        let split = row.fee_split.ok_or_else(|| {
            ConvertError::malformed_row(row.row, RESELLER_FEE_EUR, "is missing")
        })?;
        let special = &self.mappings.special;
        Ok(vec![
            LineSpec {
                role: LineRole::PrimaryDebit,
                posting: Posting::Debit(row.total_fee),
                account: AccountSource::Mapped(self.debit_table()),
            },
            LineSpec {
                role: LineRole::ResellerCredit,
                posting: Posting::Credit(split.reseller_fee),
                account: AccountSource::Fixed(&special.reseller_fee),
            },
            LineSpec {
                role: LineRole::NetFeeCredit,
                posting: Posting::Credit(split.net_fee),
                account: AccountSource::Fixed(special.net_fee_account(&row.provider)),
            },
        ])
    }

    fn additional_fee_debit_table(&self) -> NamedTable<'_> {
        self.debit_table()
    }

    fn additional_fee_credit_account(&self) -> &str {
        &self.mappings.special.additional_fee
    }
}

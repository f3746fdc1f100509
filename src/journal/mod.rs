//! Double-entry journal lines and headers generated from report rows.

use rust_decimal::Decimal;

use crate::output::template::TemplateRow;
use crate::report::ReportFormat;

pub mod batch;
pub mod builder;
pub mod rules;

pub use batch::Batch;
pub use builder::JournalBuilder;

/// Identifies all lines of one double-entry transaction. Keys are dense and
/// start at 1.
pub type GroupKey = usize;

// Generated JDT fields.
pub const PARENT_KEY: &str = "ParentKey";
pub const JDT_NUM: &str = "JdtNum";
pub const LINE_NUM: &str = "LineNum";
pub const DEBIT: &str = "Debit";
pub const CREDIT: &str = "Credit";
pub const DUE_DATE: &str = "DueDate";
pub const SHORT_NAME: &str = "ShortName";
pub const REFERENCE_DATE1: &str = "ReferenceDate1";
pub const REFERENCE1: &str = "Reference1";
pub const REFERENCE2: &str = "Reference2";
pub const TAX_DATE: &str = "TaxDate";

// Generated OJDT fields, in addition to JDT_NUM, REFERENCE2, TAX_DATE and
// DUE_DATE.
pub const REFERENCE_DATE: &str = "ReferenceDate";
pub const REFERENCE: &str = "Reference";

/// What a line represents within its group. The declaration order is the
/// order in which the roles appear in a JDT file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineRole {
    PrimaryDebit,
    /// PAYD credit of the total fee.
    PrimaryCredit,
    /// COMPLETED credit of the reseller fee.
    ResellerCredit,
    /// COMPLETED credit of the net fee.
    NetFeeCredit,
    AdditionalFeeDebit,
    AdditionalFeeCredit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Posting {
    Debit(Decimal),
    Credit(Decimal),
}

impl Posting {
    pub fn debit(&self) -> Option<Decimal> {
        match self {
            Posting::Debit(amount) => Some(*amount),
            Posting::Credit(_) => None,
        }
    }

    pub fn credit(&self) -> Option<Decimal> {
        match self {
            Posting::Debit(_) => None,
            Posting::Credit(amount) => Some(*amount),
        }
    }
}

/// One JDT row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalLine {
    pub group_key: GroupKey,
    /// Position within the group, starting at 0.
    pub sequence: usize,
    pub role: LineRole,
    pub posting: Posting,
    pub account_code: String,
    /// Normalized transaction date, used for all date fields.
    pub date: String,
    /// Customer name.
    pub reference1: String,
    /// Order reference.
    pub reference2: String,
}

impl JournalLine {
    /// The `LineNum` value: empty for the first line of a group, then "1",
    /// "2", and so on.
    pub fn line_num(&self) -> String {
        match self.sequence {
            0 => String::new(),
            n => n.to_string(),
        }
    }
}

impl TemplateRow for JournalLine {
    fn field(&self, column: &str) -> Option<String> {
        Some(match column {
            PARENT_KEY | JDT_NUM => self.group_key.to_string(),
            LINE_NUM => self.line_num(),
            DEBIT => amount_field(self.posting.debit()),
            CREDIT => amount_field(self.posting.credit()),
            DUE_DATE | REFERENCE_DATE1 | TAX_DATE => self.date.clone(),
            SHORT_NAME => self.account_code.clone(),
            REFERENCE1 => self.reference1.clone(),
            REFERENCE2 => self.reference2.clone(),
            _ => return None,
        })
    }
}

fn amount_field(amount: Option<Decimal>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}

/// One OJDT row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderRecord {
    pub group_key: GroupKey,
    pub date: String,
    /// Customer name.
    pub reference: String,
    /// Order reference.
    pub reference2: String,
}

impl TemplateRow for HeaderRecord {
    fn field(&self, column: &str) -> Option<String> {
        Some(match column {
            JDT_NUM => self.group_key.to_string(),
            REFERENCE_DATE | TAX_DATE | DUE_DATE => self.date.clone(),
            REFERENCE => self.reference.clone(),
            REFERENCE2 => self.reference2.clone(),
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    /// Built from a row's main fee.
    Primary,
    /// Built from a row's additional fee.
    AdditionalFee,
}

/// The balanced set of lines built from one row (or one row's additional
/// fee), with its header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalGroup {
    pub key: GroupKey,
    pub kind: GroupKind,
    /// Data row the group was built from.
    pub source_row: usize,
    pub lines: Vec<JournalLine>,
    pub header: HeaderRecord,
}

impl JournalGroup {
    pub fn debit_total(&self) -> Decimal {
        self.lines.iter().filter_map(|l| l.posting.debit()).sum()
    }

    pub fn credit_total(&self) -> Decimal {
        self.lines.iter().filter_map(|l| l.posting.credit()).sum()
    }
}

/// All groups built from one report.
#[derive(Clone, Debug)]
pub struct Journal {
    pub format: ReportFormat,
    /// One group per row, in row order.
    pub primary: Vec<JournalGroup>,
    /// Additional-fee groups, in the order their rows were found.
    pub additional_fees: Vec<JournalGroup>,
}

impl Journal {
    pub fn groups(&self) -> impl Iterator<Item = &JournalGroup> {
        self.primary.iter().chain(self.additional_fees.iter())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn line(sequence: usize, posting: Posting) -> JournalLine {
        JournalLine {
            group_key: 7,
            sequence,
            role: LineRole::PrimaryDebit,
            posting,
            account_code: "210001".to_string(),
            date: "20250131".to_string(),
            reference1: "Alice".to_string(),
            reference2: "O1".to_string(),
        }
    }

    #[test_case(PARENT_KEY => Some("7".to_string()); "parent_key")]
    #[test_case(JDT_NUM => Some("7".to_string()); "jdt_num")]
    #[test_case(LINE_NUM => Some("".to_string()); "line_num_empty")]
    #[test_case(DEBIT => Some("12.50".to_string()); "debit")]
    #[test_case(CREDIT => Some("".to_string()); "credit_empty")]
    #[test_case(DUE_DATE => Some("20250131".to_string()); "due_date")]
    #[test_case(REFERENCE_DATE1 => Some("20250131".to_string()); "reference_date1")]
    #[test_case(TAX_DATE => Some("20250131".to_string()); "tax_date")]
    #[test_case(SHORT_NAME => Some("210001".to_string()); "short_name")]
    #[test_case(REFERENCE1 => Some("Alice".to_string()); "reference1")]
    #[test_case(REFERENCE2 => Some("O1".to_string()); "reference2")]
    #[test_case("Memo" => None; "not_generated")]
    fn debit_line_field(column: &str) -> Option<String> {
        line(0, Posting::Debit(Decimal::new(1250, 2))).field(column)
    }

    #[test_case(0 => ""; "first")]
    #[test_case(1 => "1"; "second")]
    #[test_case(2 => "2"; "third")]
    fn line_num(sequence: usize) -> String {
        line(sequence, Posting::Credit(Decimal::ONE)).line_num()
    }

    #[test]
    fn credit_line_leaves_debit_empty() {
        let l = line(1, Posting::Credit(Decimal::new(30, 0)));
        assert_eq!(Some(String::new()), l.field(DEBIT));
        assert_eq!(Some("30".to_string()), l.field(CREDIT));
    }

    #[test]
    fn header_fields() {
        let h = HeaderRecord {
            group_key: 3,
            date: "20250131".to_string(),
            reference: "Alice".to_string(),
            reference2: "O1".to_string(),
        };
        assert_eq!(Some("3".to_string()), h.field(JDT_NUM));
        assert_eq!(Some("20250131".to_string()), h.field(REFERENCE_DATE));
        assert_eq!(Some("20250131".to_string()), h.field(TAX_DATE));
        assert_eq!(Some("20250131".to_string()), h.field(DUE_DATE));
        assert_eq!(Some("Alice".to_string()), h.field(REFERENCE));
        assert_eq!(Some("O1".to_string()), h.field(REFERENCE2));
        assert_eq!(None, h.field(PARENT_KEY));
    }
}

use log::{debug, info};

use crate::accounts::AccountMappings;
use crate::dates::DateNormalizer;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::journal::rules::{rules_for, AccountSource, LineSpec, NamedTable, RuleSet};
use crate::journal::{
    GroupKey, GroupKind, HeaderRecord, Journal, JournalGroup, JournalLine, LineRole, Posting,
};
use crate::report::{Report, TransactionRow};

/// Expands report rows into journal groups.
///
/// Building happens in two passes. The primary pass builds one group per
/// row with keys `1..=N`. The additional-fee pass then builds one group for
/// each row with a non-zero additional fee, with keys continuing from
/// `N + 1` in row order.
pub struct JournalBuilder<'a> {
    mappings: &'a AccountMappings,
    dates: &'a DateNormalizer,
}

impl<'a> JournalBuilder<'a> {
    pub fn new(mappings: &'a AccountMappings, dates: &'a DateNormalizer) -> Self {
        Self { mappings, dates }
    }

    pub fn build(&self, report: &Report, diagnostics: &mut Diagnostics) -> Result<Journal> {
        let rules = rules_for(report.format, self.mappings);
        let primary = self.primary_pass(rules.as_ref(), &report.rows, diagnostics)?;
        let additional_fees =
            self.additional_fee_pass(rules.as_ref(), &report.rows, primary.len() + 1, diagnostics);
        info!(
            "built {} primary and {} additional fee groups",
            primary.len(),
            additional_fees.len()
        );
        Ok(Journal {
            format: report.format,
            primary,
            additional_fees,
        })
    }

    /// Builds the primary group of every row. Any rule failure fails the
    /// whole pass.
    pub fn primary_pass(
        &self,
        rules: &dyn RuleSet,
        rows: &[TransactionRow],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<JournalGroup>> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let specs = rules.primary_lines(row)?;
                Ok(self.group(i + 1, GroupKind::Primary, row, &specs, diagnostics))
            })
            .collect()
    }

    /// Builds additional-fee groups, keyed from `first_key` upwards. Rows
    /// without an additional fee, or with a zero one, are skipped.
    pub fn additional_fee_pass(
        &self,
        rules: &dyn RuleSet,
        rows: &[TransactionRow],
        first_key: GroupKey,
        diagnostics: &mut Diagnostics,
    ) -> Vec<JournalGroup> {
        let debit_table = rules.additional_fee_debit_table();
        let credit_account = rules.additional_fee_credit_account();
        rows.iter()
            .filter_map(|row| match row.additional_fee {
                Some(fee) if !fee.is_zero() => Some((row, fee)),
                _ => None,
            })
            .enumerate()
            .map(|(i, (row, fee))| {
                let specs = [
                    LineSpec {
                        role: LineRole::AdditionalFeeDebit,
                        posting: Posting::Debit(fee),
                        account: AccountSource::Mapped(debit_table),
                    },
                    LineSpec {
                        role: LineRole::AdditionalFeeCredit,
                        posting: Posting::Credit(fee),
                        account: AccountSource::Fixed(credit_account),
                    },
                ];
                self.group(
                    first_key + i,
                    GroupKind::AdditionalFee,
                    row,
                    &specs,
                    diagnostics,
                )
            })
            .collect()
    }

    fn group(
        &self,
        key: GroupKey,
        kind: GroupKind,
        row: &TransactionRow,
        specs: &[LineSpec],
        diagnostics: &mut Diagnostics,
    ) -> JournalGroup {
        let date = self.date(row, diagnostics);
        let lines: Vec<JournalLine> = specs
            .iter()
            .enumerate()
            .map(|(sequence, spec)| JournalLine {
                group_key: key,
                sequence,
                role: spec.role,
                posting: spec.posting,
                account_code: resolve_account(spec.account, row, diagnostics),
                date: date.clone(),
                reference1: row.customer_name.clone(),
                reference2: row.order_reference.clone(),
            })
            .collect();
        let group = JournalGroup {
            key,
            kind,
            source_row: row.row,
            lines,
            header: HeaderRecord {
                group_key: key,
                date,
                reference: row.customer_name.clone(),
                reference2: row.order_reference.clone(),
            },
        };
        debug!(
            "row {}: built {:?} group {} with {} lines",
            group.source_row,
            group.kind,
            group.key,
            group.lines.len()
        );
        group
    }

    fn date(&self, row: &TransactionRow, diagnostics: &mut Diagnostics) -> String {
        match self.dates.parse(&row.transaction_date) {
            Some(date) => date,
            None => {
                diagnostics.push(Diagnostic::UnparseableDate {
                    row: row.row,
                    value: row.transaction_date.clone(),
                });
                row.transaction_date.clone()
            }
        }
    }
}

fn resolve_account(
    source: AccountSource,
    row: &TransactionRow,
    diagnostics: &mut Diagnostics,
) -> String {
    match source {
        AccountSource::Fixed(code) => code.to_string(),
        AccountSource::Mapped(NamedTable { name, table }) => match table.get(&row.provider) {
            Some(code) => code.to_string(),
            None => {
                diagnostics.push(Diagnostic::UnmappedProvider {
                    row: row.row,
                    table: name,
                    provider: row.provider.clone(),
                });
                table.resolve(&row.provider)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use test_case::test_case;

    use super::*;
    use crate::report::{FeeSplit, ReportFormat};

    fn payd_row(row: usize, provider: &str, fee: i64, additional: Option<i64>) -> TransactionRow {
        TransactionRow {
            row,
            transaction_date: "31/01/2025".to_string(),
            provider: provider.to_string(),
            total_fee: Decimal::new(fee, 0),
            fee_split: None,
            additional_fee: additional.map(|a| Decimal::new(a, 0)),
            customer_name: format!("Customer{}", row),
            order_reference: format!("O{}", row),
        }
    }

    fn completed_row(
        row: usize,
        provider: &str,
        (total, reseller, net): (i64, i64, i64),
        additional: Option<i64>,
    ) -> TransactionRow {
        TransactionRow {
            transaction_date: "31/01/2025 10:00:00".to_string(),
            total_fee: Decimal::new(total, 0),
            fee_split: Some(FeeSplit {
                reseller_fee: Decimal::new(reseller, 0),
                net_fee: Decimal::new(net, 0),
            }),
            ..payd_row(row, provider, total, additional)
        }
    }

    fn build(format: ReportFormat, rows: Vec<TransactionRow>) -> (Journal, Diagnostics) {
        let mappings = AccountMappings::default();
        let dates = DateNormalizer::default();
        let mut diagnostics = Diagnostics::new();
        let journal = JournalBuilder::new(&mappings, &dates)
            .build(&Report { format, rows }, &mut diagnostics)
            .expect("build");
        (journal, diagnostics)
    }

    fn summarize(group: &JournalGroup) -> Vec<(String, String, String, String)> {
        group
            .lines
            .iter()
            .map(|l| {
                (
                    l.line_num(),
                    l.posting.debit().map(|d| d.to_string()).unwrap_or_default(),
                    l.posting.credit().map(|c| c.to_string()).unwrap_or_default(),
                    l.account_code.clone(),
                )
            })
            .collect()
    }

    fn tuple(
        line_num: &str,
        debit: &str,
        credit: &str,
        account: &str,
    ) -> (String, String, String, String) {
        (
            line_num.to_string(),
            debit.to_string(),
            credit.to_string(),
            account.to_string(),
        )
    }

    #[test]
    fn payd_group() {
        let (journal, diagnostics) = build(
            ReportFormat::Payd,
            vec![payd_row(1, "volt", 12, None), payd_row(2, "TRU", 5, None)],
        );
        assert!(diagnostics.is_empty());
        assert!(journal.additional_fees.is_empty());
        assert_eq!(2, journal.primary.len());
        let group = &journal.primary[1];
        assert_eq!(2, group.key);
        assert_eq!(GroupKind::Primary, group.kind);
        assert_eq!(
            vec![tuple("", "5", "", "141006"), tuple("1", "", "5", "210006")],
            summarize(group)
        );
        assert_eq!(group.debit_total(), group.credit_total());
        assert_eq!("20250131", group.header.date);
        assert_eq!("Customer2", group.header.reference);
        assert_eq!("O2", group.header.reference2);
    }

    #[test_case("wire_transfer" => "420001".to_string(); "wire_transfer")]
    #[test_case("volt" => "420002".to_string(); "other_provider")]
    fn completed_net_fee_account(provider: &str) -> String {
        let (journal, _) = build(
            ReportFormat::Completed,
            vec![completed_row(1, provider, (100, 30, 70), None)],
        );
        let group = &journal.primary[0];
        assert_eq!(3, group.lines.len());
        assert_eq!(LineRole::NetFeeCredit, group.lines[2].role);
        group.lines[2].account_code.clone()
    }

    #[test]
    fn completed_group() {
        let (journal, diagnostics) = build(
            ReportFormat::Completed,
            vec![completed_row(1, "wire_transfer", (100, 30, 70), Some(0))],
        );
        assert!(diagnostics.is_empty());
        assert!(journal.additional_fees.is_empty());
        let group = &journal.primary[0];
        assert_eq!(
            vec![
                tuple("", "100", "", "210001"),
                tuple("1", "", "30", "207001"),
                tuple("2", "", "70", "420001"),
            ],
            summarize(group)
        );
        for line in &group.lines {
            assert_eq!(1, line.group_key);
            assert_eq!("20250131", line.date);
            assert_eq!("Customer1", line.reference1);
            assert_eq!("O1", line.reference2);
        }
    }

    #[test]
    fn completed_split_is_not_checked() {
        let (journal, _) = build(
            ReportFormat::Completed,
            vec![completed_row(1, "volt", (100, 1, 2), None)],
        );
        let group = &journal.primary[0];
        assert_eq!(Decimal::new(100, 0), group.debit_total());
        assert_eq!(Decimal::new(3, 0), group.credit_total());
    }

    #[test]
    fn additional_fee_groups_follow_primary_groups() {
        let (journal, _) = build(
            ReportFormat::Completed,
            vec![
                completed_row(1, "wire_transfer", (100, 30, 70), Some(15)),
                completed_row(2, "volt", (10, 3, 7), None),
                completed_row(3, "volt", (10, 3, 7), Some(0)),
                completed_row(4, "TRU", (10, 3, 7), Some(-2)),
            ],
        );
        assert_eq!(4, journal.primary.len());
        let keys: Vec<(GroupKey, usize)> = journal
            .additional_fees
            .iter()
            .map(|g| (g.key, g.source_row))
            .collect();
        assert_eq!(vec![(5, 1), (6, 4)], keys);

        let first = &journal.additional_fees[0];
        assert_eq!(GroupKind::AdditionalFee, first.kind);
        assert_eq!(
            vec![tuple("", "15", "", "210001"), tuple("1", "", "15", "420003")],
            summarize(first)
        );
        assert_eq!(5, first.header.group_key);
        assert_eq!("Customer1", first.header.reference);
        assert_eq!(
            vec![LineRole::AdditionalFeeDebit, LineRole::AdditionalFeeCredit],
            first.lines.iter().map(|l| l.role).collect::<Vec<_>>()
        );
    }

    #[test]
    fn payd_additional_fee_uses_payd_debit_table() {
        let (journal, _) = build(ReportFormat::Payd, vec![payd_row(1, "volt", 12, Some(3))]);
        assert_eq!(
            vec![tuple("", "3", "", "141005"), tuple("1", "", "3", "420003")],
            summarize(&journal.additional_fees[0])
        );
        assert_eq!(2, journal.additional_fees[0].key);
    }

    #[test]
    fn additional_fee_pass_seeded_independently() {
        let mappings = AccountMappings::default();
        let dates = DateNormalizer::default();
        let builder = JournalBuilder::new(&mappings, &dates);
        let rules = rules_for(ReportFormat::Payd, &mappings);
        let rows = vec![payd_row(1, "volt", 1, Some(1)), payd_row(2, "volt", 1, Some(2))];
        let groups =
            builder.additional_fee_pass(rules.as_ref(), &rows, 10, &mut Diagnostics::new());
        assert_eq!(
            vec![10, 11],
            groups.iter().map(|g| g.key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn value_anomalies_are_diagnostics() {
        let mut row = payd_row(1, "UnknownCo", 12, Some(1));
        row.transaction_date = "not-a-date".to_string();
        let (journal, diagnostics) = build(ReportFormat::Payd, vec![row]);

        let primary = &journal.primary[0];
        assert_eq!(
            vec![
                tuple("", "12", "", "UnknownCo"),
                tuple("1", "", "12", "UnknownCo")
            ],
            summarize(primary)
        );
        assert_eq!("not-a-date", primary.header.date);
        assert_eq!(
            vec![
                Diagnostic::UnparseableDate {
                    row: 1,
                    value: "not-a-date".to_string()
                },
                Diagnostic::UnmappedProvider {
                    row: 1,
                    table: "PAYD debit",
                    provider: "UnknownCo".to_string()
                },
                Diagnostic::UnmappedProvider {
                    row: 1,
                    table: "PAYD credit",
                    provider: "UnknownCo".to_string()
                },
            ],
            diagnostics.into_vec()
        );
    }

    #[test]
    fn completed_row_without_split_is_malformed() {
        let mappings = AccountMappings::default();
        let dates = DateNormalizer::default();
        let got = JournalBuilder::new(&mappings, &dates).build(
            &Report {
                format: ReportFormat::Completed,
                rows: vec![payd_row(1, "volt", 1, None)],
            },
            &mut Diagnostics::new(),
        );
        assert!(matches!(
            got,
            Err(crate::error::ConvertError::MalformedRow { row: 1, .. })
        ));
    }
}

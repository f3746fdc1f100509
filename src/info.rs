//! Operator reference output: the effective account mappings and the input
//! columns each report format is recognized by.

use std::fmt::Write;

use anyhow::Result;
use clap::Args;
use itertools::Itertools;

use crate::accounts::{AccountMappingTable, AccountMappings};
use crate::report::ReportFormat;
use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct MappingsCommand {}

impl MappingsCommand {
    pub fn run(&self, settings: &Settings) -> Result<()> {
        print!("{}", format_mappings(&settings.accounts)?);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ColumnsCommand {}

impl ColumnsCommand {
    pub fn run(&self) -> Result<()> {
        print!("{}", format_columns()?);
        Ok(())
    }
}

pub fn format_mappings(mappings: &AccountMappings) -> Result<String> {
    let mut out = String::new();
    for (title, table) in [
        ("PAYD debit", &mappings.payd_debit),
        ("PAYD credit", &mappings.payd_credit),
        ("COMPLETED debit", &mappings.completed_debit),
    ] {
        format_table(&mut out, title, table)?;
    }
    let special = &mappings.special;
    writeln!(out, "Fixed accounts:")?;
    writeln!(out, "  reseller fee: {}", special.reseller_fee)?;
    writeln!(
        out,
        "  net fee ({}): {}",
        special.wire_transfer_provider, special.net_fee_wire_transfer
    )?;
    writeln!(out, "  net fee (other): {}", special.net_fee_other)?;
    writeln!(out, "  additional fee: {}", special.additional_fee)?;
    Ok(out)
}

fn format_table(out: &mut String, title: &str, table: &AccountMappingTable) -> Result<()> {
    writeln!(out, "{} ({} providers):", title, table.len())?;
    for (provider, code) in table.iter() {
        writeln!(out, "  {}: {}", provider, code)?;
    }
    Ok(())
}

pub fn format_columns() -> Result<String> {
    let mut out = String::new();
    for format in ReportFormat::ALL {
        let layout = format.layout();
        writeln!(out, "{}:", format)?;
        for field in layout.required() {
            writeln!(out, "  {}", field.columns.iter().join(" | "))?;
        }
        writeln!(out, "  {} (optional)", layout.additional_fee.columns.iter().join(" | "))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use textwrap::dedent;

    use super::*;
    use crate::accounts::SpecialAccounts;

    #[test]
    fn columns() {
        assert_eq!(
            dedent(
                "
                PAYD:
                  Paid
                  Payment Provider | Payment Method
                  Fval EUR | Total Fee EUR
                  Name
                  Order
                  Additionall Fee (optional)
                COMPLETED:
                  Completed
                  Payment Provider
                  Total Fee EUR
                  Reseller Fee EUR
                  Net Fee EUR
                  Name
                  Order
                  Additionall Fee (optional)
                "
            )
            .trim_start(),
            format_columns().expect("format")
        );
    }

    #[test]
    fn mappings() {
        let mappings = AccountMappings {
            payd_debit: AccountMappingTable::from_pairs([("volt", "141005")]),
            payd_credit: AccountMappingTable::default(),
            completed_debit: AccountMappingTable::from_pairs([
                ("wire_transfer", "210001"),
                ("TRU", "210006"),
            ]),
            special: SpecialAccounts::default(),
        };
        assert_eq!(
            dedent(
                "
                PAYD debit (1 providers):
                  volt: 141005
                PAYD credit (0 providers):
                COMPLETED debit (2 providers):
                  TRU: 210006
                  wire_transfer: 210001
                Fixed accounts:
                  reseller fee: 207001
                  net fee (wire_transfer): 420001
                  net fee (other): 420002
                  additional fee: 420003
                "
            )
            .trim_start(),
            format_mappings(&mappings).expect("format")
        );
    }
}

//! Provider to ledger account code resolution.

use std::collections::BTreeMap;

use serde_derive::Deserialize;

/// Maps a payment provider identifier to a ledger account code.
///
/// Lookups are exact and case-sensitive.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccountMappingTable(BTreeMap<String, String>);

impl AccountMappingTable {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(provider, code)| (provider.to_string(), code.to_string()))
                .collect(),
        )
    }

    /// Returns the mapped account code, if the provider is known.
    pub fn get(&self, provider: &str) -> Option<&str> {
        self.0.get(provider).map(String::as_str)
    }

    /// Returns the mapped account code, or the provider itself when it is
    /// not in the table so that it shows up in the output for correction.
    pub fn resolve(&self, provider: &str) -> String {
        self.get(provider).unwrap_or(provider).to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fixed account codes that do not depend on a mapping table lookup.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpecialAccounts {
    pub reseller_fee: String,
    pub net_fee_wire_transfer: String,
    pub net_fee_other: String,
    pub additional_fee: String,
    /// Provider identifier whose net fee posts to `net_fee_wire_transfer`.
    pub wire_transfer_provider: String,
}

impl SpecialAccounts {
    pub fn net_fee_account(&self, provider: &str) -> &str {
        if provider == self.wire_transfer_provider {
            &self.net_fee_wire_transfer
        } else {
            &self.net_fee_other
        }
    }
}

impl Default for SpecialAccounts {
    fn default() -> Self {
        Self {
            reseller_fee: "207001".to_string(),
            net_fee_wire_transfer: "420001".to_string(),
            net_fee_other: "420002".to_string(),
            additional_fee: "420003".to_string(),
            wire_transfer_provider: "wire_transfer".to_string(),
        }
    }
}

/// All account mapping configuration used by the journal rules.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccountMappings {
    pub payd_debit: AccountMappingTable,
    pub payd_credit: AccountMappingTable,
    /// Used for COMPLETED primary debits and additional-fee debits.
    pub completed_debit: AccountMappingTable,
    pub special: SpecialAccounts,
}

impl Default for AccountMappings {
    fn default() -> Self {
        Self {
            payd_debit: AccountMappingTable::from_pairs(DEFAULT_PAYD_DEBIT.iter().copied()),
            payd_credit: AccountMappingTable::from_pairs(DEFAULT_PAYD_CREDIT.iter().copied()),
            completed_debit: AccountMappingTable::from_pairs(
                DEFAULT_COMPLETED_DEBIT.iter().copied(),
            ),
            special: SpecialAccounts::default(),
        }
    }
}

const DEFAULT_PAYD_DEBIT: &[(&str, &str)] = &[
    ("astropay", "141009"),
    ("Eupago", "141011"),
    ("Fibo PNC", "141002"),
    ("Intergiro", "141012"),
    ("Paysafe", "141007"),
    ("PNC", "141002"),
    ("PNC VISA", "141002"),
    ("RPD", "141013"),
    ("TRU", "141006"),
    ("Truevo PayOn", "141008"),
    ("volt", "141005"),
    ("voltx", "141005"),
    ("wire_transfer", "141001"),
    ("Unicorn", "141010"),
    ("payretailers", "141014"),
];

const DEFAULT_PAYD_CREDIT: &[(&str, &str)] = &[
    ("astropay", "210009"),
    ("Eupago", "210011"),
    ("Fibo PNC", "210002"),
    ("Intergiro", "210012"),
    ("Paysafe", "210007"),
    ("PNC", "210002"),
    ("PNC VISA", "210002"),
    ("RPD", "210013"),
    ("TRU", "210006"),
    ("Truevo PayOn", "210008"),
    ("volt", "210005"),
    ("voltx", "210005"),
    ("wire_transfer", "210001"),
    ("Unicorn", "210010"),
    ("payretailers", "210014"),
];

// Identical to the PAYD credit table in the current deployment, but kept
// separate as the two are configured independently.
const DEFAULT_COMPLETED_DEBIT: &[(&str, &str)] = DEFAULT_PAYD_CREDIT;

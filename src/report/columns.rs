use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

/// Returns the canonical form of a column name: surrounding whitespace
/// removed and any internal whitespace run (including line breaks) collapsed
/// to a single space. `"Reseller\nFee EUR "` becomes `"Reseller Fee EUR"`.
pub fn canonicalize(name: &str) -> String {
    lazy_static! {
        static ref WHITESPACE_RX: Regex = Regex::new(r"\s+").unwrap();
    }
    WHITESPACE_RX.replace_all(name.trim(), " ").into_owned()
}

/// Maps canonical column names to their position in the input header row.
#[derive(Clone, Debug, Default)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = header
            .into_iter()
            .map(|name| canonicalize(name.as_ref()))
            .collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            // The first of any duplicated columns wins.
            positions.entry(name.clone()).or_insert(i);
        }
        Self { names, positions }
    }

    /// Canonical column names, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, canonical_name: &str) -> bool {
        self.positions.contains_key(canonical_name)
    }

    pub fn position(&self, canonical_name: &str) -> Option<usize> {
        self.positions.get(canonical_name).copied()
    }

    /// Position of the first of `canonical_names` present in the header.
    pub fn find_any(&self, canonical_names: &[&str]) -> Option<usize> {
        canonical_names.iter().find_map(|name| self.position(name))
    }
}

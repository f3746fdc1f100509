//! Normalizes the assorted date formats found in provider exports to the
//! `yyyymmdd` form expected by the journal importer.

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;

/// Output format of normalized dates.
const OUTPUT_FORMAT: &str = "%Y%m%d";

/// Default input patterns, in priority order. Day-first patterns come before
/// their month-first counterparts, so `01/02/2025` is the 1st of February.
pub const DEFAULT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y/%m/%d",
];

#[derive(Clone, Debug)]
struct DatePattern {
    format: String,
    with_time: bool,
}

impl DatePattern {
    fn new(format: &str) -> Self {
        let with_time = ["%H", "%M", "%S", "%T", "%R"]
            .iter()
            .any(|spec| format.contains(spec));
        Self {
            format: format.to_string(),
            with_time,
        }
    }

    fn parse(&self, s: &str) -> Option<NaiveDate> {
        if self.with_time {
            NaiveDateTime::parse_from_str(s, &self.format)
                .ok()
                .map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(s, &self.format).ok()
        }
    }
}

/// Tries an ordered list of date patterns and reformats the first match.
#[derive(Clone, Debug)]
pub struct DateNormalizer {
    patterns: Vec<DatePattern>,
}

impl DateNormalizer {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: formats
                .into_iter()
                .map(|f| DatePattern::new(f.as_ref()))
                .collect(),
        }
    }

    /// Returns the `yyyymmdd` form of `raw`, or `None` if no pattern matches.
    pub fn parse(&self, raw: &str) -> Option<String> {
        let s = raw.trim();
        self.patterns
            .iter()
            .find_map(|p| p.parse(s))
            .map(|date| date.format(OUTPUT_FORMAT).to_string())
    }

    /// Like `parse`, but falls back to `raw` unchanged (with a warning) when
    /// no pattern matches.
    pub fn normalize(&self, raw: &str) -> String {
        match self.parse(raw) {
            Some(date) => date,
            None => {
                warn!("unrecognized date format: {:?}", raw);
                raw.to_string()
            }
        }
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_FORMATS)
    }
}

//! Converts payment-provider report exports into JDT/OJDT journal import
//! batches.

#[cfg(test)]
mod testutil;

pub mod accounts;
pub mod convert;
pub mod dates;
pub mod diagnostics;
pub mod error;
pub mod filespec;
pub mod info;
pub mod journal;
pub mod output;
pub mod report;
pub mod settings;

pub use convert::{convert, convert_reader, Summary};
pub use error::{ConvertError, Result};

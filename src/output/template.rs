//! Output templates: the fixed header rows that the journal importer expects,
//! and rendering of generated rows into the template's column layout.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::error::{ConvertError, Result};

/// A generated output row, addressable by template column name.
pub trait TemplateRow {
    /// The value for `column`, or `None` if this row does not generate it.
    fn field(&self, column: &str) -> Option<String>;
}

#[derive(Clone, Debug)]
pub struct OutputTemplate {
    path: PathBuf,
    /// Written verbatim as the first output row.
    header: StringRecord,
    /// Optional field-caption row, written verbatim after the header.
    caption: Option<StringRecord>,
    /// Header names as matched against generated fields.
    columns: Vec<String>,
}

impl OutputTemplate {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ConvertError::File {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(path, file)
    }

    /// Reads a template. `path` is only used to identify it in errors.
    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self> {
        let reader = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .build(reader);
        let mut csv_rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = csv_rdr.records();

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(template_error(path, "is empty")),
        };
        let caption = records.next().transpose()?;

        let columns: Vec<String> = header.iter().map(|c| c.trim().to_string()).collect();
        if columns.iter().all(String::is_empty) {
            return Err(template_error(path, "has no column names"));
        }

        Ok(Self {
            path: path.to_owned(),
            header,
            caption,
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Renders the template rows followed by `rows`. Each row is restricted
    /// to the template's columns: generated fields the template lacks are
    /// dropped, and template columns a row does not generate are left blank.
    pub fn render<T: TemplateRow>(&self, rows: &[&T]) -> Result<Vec<u8>> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        wtr.write_record(&self.header)?;
        if let Some(caption) = &self.caption {
            wtr.write_record(caption)?;
        }
        for row in rows {
            wtr.write_record(
                self.columns
                    .iter()
                    .map(|column| row.field(column).unwrap_or_default()),
            )?;
        }
        wtr.into_inner()
            .map_err(|e| ConvertError::Io(e.into_error()))
    }
}

fn template_error(path: &Path, reason: &str) -> ConvertError {
    ConvertError::Template {
        path: path.to_owned(),
        reason: reason.to_string(),
    }
}

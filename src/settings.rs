//! Run configuration. Everything has a built-in default, so a settings file
//! only needs to name what differs from the standard deployment.

use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::accounts::AccountMappings;
use crate::dates::{DateNormalizer, DEFAULT_FORMATS};
use crate::error::{ConvertError, Result};
use crate::output::template::OutputTemplate;
use crate::output::{OutputKind, OutputTemplates};
use crate::report::ReportFormat;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub accounts: AccountMappings,
    /// chrono format strings, tried in order.
    pub date_formats: Vec<String>,
    pub templates: TemplateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accounts: AccountMappings::default(),
            date_formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
            templates: TemplateSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a RON file. A relative template directory is
    /// taken to be relative to the file's own directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| ConvertError::File {
            path: path.to_owned(),
            source,
        })?;
        let mut settings: Settings =
            ron::de::from_reader(file).map_err(|e| ConvertError::Settings {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
        if let Some(parent) = path.parent() {
            settings.templates.dir = parent.join(&settings.templates.dir);
        }
        Ok(settings)
    }

    #[cfg(test)]
    pub fn parse_ron(s: &str) -> Result<Self> {
        ron::de::from_str(s).map_err(|e| ConvertError::Settings {
            path: PathBuf::new(),
            reason: e.to_string(),
        })
    }

    pub fn date_normalizer(&self) -> DateNormalizer {
        DateNormalizer::new(&self.date_formats)
    }

    pub fn load_templates(&self, format: ReportFormat) -> Result<OutputTemplates> {
        Ok(OutputTemplates {
            jdt: OutputTemplate::from_path(&self.templates.path(format, OutputKind::Jdt))?,
            ojdt: OutputTemplate::from_path(&self.templates.path(format, OutputKind::Ojdt))?,
        })
    }
}

/// Where the output templates are found.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateSettings {
    pub dir: PathBuf,
    pub jdt_payd: String,
    pub ojdt_payd: String,
    pub jdt_completed: String,
    pub ojdt_completed: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            jdt_payd: "jdt_payd.csv".to_string(),
            ojdt_payd: "ojdt_payd.csv".to_string(),
            jdt_completed: "jdt_completed.csv".to_string(),
            ojdt_completed: "ojdt_completed.csv".to_string(),
        }
    }
}

impl TemplateSettings {
    pub fn path(&self, format: ReportFormat, kind: OutputKind) -> PathBuf {
        use OutputKind::*;
        use ReportFormat::*;
        let name = match (format, kind) {
            (Payd, Jdt) => &self.jdt_payd,
            (Payd, Ojdt) => &self.ojdt_payd,
            (Completed, Jdt) => &self.jdt_completed,
            (Completed, Ojdt) => &self.ojdt_completed,
        };
        self.dir.join(name)
    }
}

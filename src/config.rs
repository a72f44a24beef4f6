// File: src/config.rs
use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dictionary::Dictionary;
use crate::core::types::{ToneStyle, TransliterationConfig};
use crate::error::{Error, Result};
use crate::output::OutputFormat;

/// Settings for the annotate binary, read from a JSON file.
/// Every key is optional; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub style: ToneStyle,
    pub heteronyms: bool,
    pub neutral_tone_with_five: bool,
    pub format: OutputFormat,
    /// Token separator for the lazy format.
    pub separator: String,
    /// Extra reading tables laid over the bundled one, in order.
    pub dictionaries: Vec<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let transliteration = TransliterationConfig::default();
        Self {
            style: transliteration.style,
            heteronyms: transliteration.heteronyms,
            neutral_tone_with_five: transliteration.neutral_tone_with_five,
            format: OutputFormat::default(),
            separator: " ".to_string(),
            dictionaries: Vec::new(),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads a config file. Relative `dictionaries` paths resolve against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: AppConfig = serde_json::from_reader(BufReader::new(file))?;

        if let Some(base) = path.parent() {
            for dictionary in &mut config.dictionaries {
                if dictionary.is_relative() {
                    *dictionary = base.join(&*dictionary);
                }
            }
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn transliteration(&self) -> TransliterationConfig {
        TransliterationConfig::new(self.style, self.heteronyms)
            .with_neutral_tone_with_five(self.neutral_tone_with_five)
    }

    /// The bundled table with every configured overlay merged on top.
    /// Borrows the shared table when there are no overlays.
    pub fn load_dictionary(&self) -> Result<Cow<'static, Dictionary>> {
        let builtin = Dictionary::builtin()?;
        if self.dictionaries.is_empty() {
            return Ok(Cow::Borrowed(builtin));
        }

        let mut dictionary = builtin.clone();
        for path in &self.dictionaries {
            dictionary.merge(Dictionary::from_path(path)?);
        }
        debug!(overlays = self.dictionaries.len(), entries = dictionary.len(), "merged reading tables");
        Ok(Cow::Owned(dictionary))
    }
}

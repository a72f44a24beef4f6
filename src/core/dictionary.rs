// --- File: src/core/dictionary.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing::debug;

use crate::core::syllable;
use crate::core::types::Reading;
use crate::error::{DictionaryError, Error, Result};

/// The reading table shipped with the crate, in pinyin-data layout.
const BUILTIN_TABLE: &str = include_str!("../../data/dictionary.txt");

static BUILTIN: OnceLock<std::result::Result<Dictionary, DictionaryError>> = OnceLock::new();

/// A read-only character to readings table.
///
/// Each known character maps to a non-empty list of readings ordered by
/// priority, primary reading first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<char, Vec<Reading>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled table, parsed on first use and shared for the rest of the process.
    pub fn builtin() -> std::result::Result<&'static Dictionary, DictionaryError> {
        BUILTIN
            .get_or_init(|| {
                let dictionary = Self::parse(BUILTIN_TABLE)?;
                if dictionary.is_empty() {
                    return Err(DictionaryError::Empty);
                }
                debug!(entries = dictionary.len(), "loaded built-in reading table");
                Ok(dictionary)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Parses a table in `U+4E2D: zhōng,zhòng  # 中` form.
    ///
    /// `#` starts a comment and blank lines are skipped. Repeated readings in
    /// one entry collapse to the first; a repeated character replaces the
    /// earlier entry.
    pub fn parse(source: &str) -> std::result::Result<Self, DictionaryError> {
        let mut entries = HashMap::new();

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let content = match raw.find('#') {
                Some(i) => &raw[..i],
                None => raw,
            }
            .trim();
            if content.is_empty() {
                continue;
            }

            let (key, values) = content.split_once(':').ok_or(DictionaryError::MalformedLine {
                line,
                reason: "missing ':' after code point",
            })?;
            let key = key.trim();
            let character = parse_code_point(key).ok_or_else(|| DictionaryError::InvalidCodePoint {
                line,
                value: key.to_string(),
            })?;

            let mut readings: Vec<Reading> = Vec::new();
            for value in values.split(',').map(str::trim).filter(|v| !v.is_empty()) {
                let reading = syllable::parse_marked(value).map_err(|reason| {
                    DictionaryError::InvalidSyllable {
                        line,
                        syllable: value.to_string(),
                        reason,
                    }
                })?;
                if !readings.contains(&reading) {
                    readings.push(reading);
                }
            }
            if readings.is_empty() {
                return Err(DictionaryError::MalformedLine {
                    line,
                    reason: "entry has no readings",
                });
            }

            entries.insert(character, readings);
        }

        Ok(Self { entries })
    }

    /// Reads and parses a table file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::parse(&source)?;
        debug!(path = %path.display(), entries = dictionary.len(), "loaded reading table");
        Ok(dictionary)
    }

    /// Overlays `other` on top of `self`; its entries replace whole entries here.
    pub fn merge(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }

    pub fn lookup(&self, character: char) -> Option<&[Reading]> {
        self.entries.get(&character).map(Vec::as_slice)
    }

    pub fn contains(&self, character: char) -> bool {
        self.entries.contains_key(&character)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[Reading])> {
        self.entries.iter().map(|(c, r)| (*c, r.as_slice()))
    }
}

fn parse_code_point(key: &str) -> Option<char> {
    let hex = key.strip_prefix("U+").or_else(|| key.strip_prefix("u+"))?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

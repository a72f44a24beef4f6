//! Error types for pinyin_core operations.

use std::path::PathBuf;

use thiserror::Error;

/// Problems found while parsing a reading table.
///
/// The bundled table is parsed once per process; if it is corrupt every call
/// to [`crate::Dictionary::builtin`] returns the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: &'static str },

    #[error("line {line}: invalid code point '{value}'")]
    InvalidCodePoint { line: usize, value: String },

    #[error("line {line}: invalid syllable '{syllable}': {reason}")]
    InvalidSyllable {
        line: usize,
        syllable: String,
        reason: &'static str,
    },

    #[error("reading table has no entries")]
    Empty,
}

/// Rejected configuration values. Never defaulted silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown tone style '{0}' (expected one of: none, mark, numeric, numeric-inline)")]
    UnknownToneStyle(String),

    #[error("unknown output format '{0}' (expected one of: brackets, lines, lazy, json)")]
    UnknownFormat(String),

    #[error("unknown color mode '{0}' (expected one of: auto, always, never)")]
    UnknownColorMode(String),

    #[error("invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// Top-level error for everything the crate does outside the pure lookup path.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("invalid reading table: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

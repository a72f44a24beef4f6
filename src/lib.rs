// src/lib.rs
//! Hanzi to pinyin transliteration.
//!
//! Every input character becomes one [`AnnotationGroup`]. Characters the
//! dictionary does not know pass through unchanged, so the conversion is
//! total and the output always has one group per input code point.
//!
//! ```
//! use pinyin_core::{ToneStyle, TransliterationConfig};
//!
//! let config = TransliterationConfig::new(ToneStyle::Mark, false);
//! let tokens = pinyin_core::lazy("中国人", &config).unwrap();
//! assert_eq!(tokens, ["zhōng", "guó", "rén"]);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;

pub use crate::core::converter::{flatten, flatten_with, Transliterator, READING_SEPARATOR};
pub use crate::core::dictionary::Dictionary;
pub use crate::core::types::{AnnotationGroup, Reading, Tone, ToneStyle, TransliterationConfig};
pub use crate::error::{ConfigError, DictionaryError, Error, Result};

/// Transliterates `text` against the bundled dictionary.
pub fn transliterate(text: &str, config: &TransliterationConfig) -> Result<Vec<AnnotationGroup>> {
    Ok(Transliterator::builtin()?.transliterate(text, config))
}

/// Primary reading per character against the bundled dictionary.
pub fn lazy(text: &str, config: &TransliterationConfig) -> Result<Vec<String>> {
    Ok(Transliterator::builtin()?.lazy(text, config))
}

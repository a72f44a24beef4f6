// src/core/types.rs
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::syllable;
use crate::error::ConfigError;

/// One of the four Mandarin tones, or the neutral (light) tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    Neutral,
}

impl Tone {
    /// The tones that carry a diacritic, in mark-table order.
    pub const MARKED: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];

    /// Tone number as written in numeric styles; the neutral tone is 5.
    pub fn number(self) -> u8 {
        match self {
            Tone::First => 1,
            Tone::Second => 2,
            Tone::Third => 3,
            Tone::Fourth => 4,
            Tone::Neutral => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Tone::First),
            2 => Some(Tone::Second),
            3 => Some(Tone::Third),
            4 => Some(Tone::Fourth),
            5 => Some(Tone::Neutral),
            _ => None,
        }
    }
}

/// One candidate pronunciation of a character.
///
/// `syllable` is always toneless and spells the umlaut as `ü`. A reading with
/// no tone is a pass-through: its syllable is the original input character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reading {
    syllable: String,
    tone: Option<Tone>,
}

impl Reading {
    pub fn new(syllable: impl Into<String>, tone: Tone) -> Self {
        Self { syllable: syllable.into(), tone: Some(tone) }
    }

    /// Reading for a character the dictionary does not know.
    pub fn pass_through(character: char) -> Self {
        Self { syllable: character.to_string(), tone: None }
    }

    pub fn syllable(&self) -> &str {
        &self.syllable
    }

    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    pub fn is_pass_through(&self) -> bool {
        self.tone.is_none()
    }

    /// Renders the reading. Pass-through readings come back verbatim in every style.
    pub fn render(&self, style: ToneStyle, neutral_tone_with_five: bool) -> String {
        syllable::render(self, style, neutral_tone_with_five)
    }
}

/// How tones are written in rendered readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ToneStyle {
    /// Plain syllable, tone dropped: `zhong`.
    #[default]
    None,
    /// Diacritic over the nucleus vowel: `zhōng`.
    Mark,
    /// Tone digit after the syllable: `zhong1`.
    Numeric,
    /// Tone digit right after the vowel that would carry the mark: `zho1ng`.
    NumericInline,
}

impl ToneStyle {
    pub const ALL: [ToneStyle; 4] = [
        ToneStyle::None,
        ToneStyle::Mark,
        ToneStyle::Numeric,
        ToneStyle::NumericInline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToneStyle::None => "none",
            ToneStyle::Mark => "mark",
            ToneStyle::Numeric => "numeric",
            ToneStyle::NumericInline => "numeric-inline",
        }
    }
}

impl fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToneStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "normal" => Ok(ToneStyle::None),
            "mark" | "tone" => Ok(ToneStyle::Mark),
            "numeric" | "tone3" => Ok(ToneStyle::Numeric),
            "numeric-inline" | "numeric_inline" | "tone2" => Ok(ToneStyle::NumericInline),
            _ => Err(ConfigError::UnknownToneStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for ToneStyle {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for ToneStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Immutable settings for one transliteration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransliterationConfig {
    pub style: ToneStyle,
    /// Return every known reading instead of only the primary one.
    pub heteronyms: bool,
    /// Write the neutral tone as `5` in the numeric styles.
    pub neutral_tone_with_five: bool,
}

impl TransliterationConfig {
    pub fn new(style: ToneStyle, heteronyms: bool) -> Self {
        Self { style, heteronyms, ..Self::default() }
    }

    pub fn with_neutral_tone_with_five(self, neutral_tone_with_five: bool) -> Self {
        Self { neutral_tone_with_five, ..self }
    }
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            style: ToneStyle::None,
            heteronyms: false,
            neutral_tone_with_five: true,
        }
    }
}

/// The readings produced for one input character.
///
/// Holds exactly one reading unless heteronyms were requested. `rendered` is
/// parallel to `readings`, formatted with the style the group was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationGroup {
    character: char,
    readings: Vec<Reading>,
    rendered: Vec<String>,
}

impl AnnotationGroup {
    pub(crate) fn new(character: char, readings: Vec<Reading>, rendered: Vec<String>) -> Self {
        debug_assert_eq!(readings.len(), rendered.len());
        Self { character, readings, rendered }
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }

    /// The dictionary's primary reading, or the character itself on pass-through.
    pub fn primary(&self) -> &str {
        self.rendered.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_pass_through(&self) -> bool {
        self.readings.iter().all(Reading::is_pass_through)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl Serialize for AnnotationGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AnnotationGroup", 3)?;
        state.serialize_field("character", &self.character)?;
        state.serialize_field("readings", &self.rendered)?;
        state.serialize_field("pass_through", &self.is_pass_through())?;
        state.end()
    }
}

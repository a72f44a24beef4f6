//! Display sinks for annotation groups.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::converter::flatten;
use crate::core::types::AnnotationGroup;
use crate::error::{ConfigError, Result};

/// Layout of the printed annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    /// `[[zhōng] [guó] [rén]]`
    #[default]
    Brackets,
    /// One `字<TAB>readings` line per non-whitespace character.
    Lines,
    /// Flat tokens joined by the separator.
    Lazy,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Brackets => "brackets",
            OutputFormat::Lines => "lines",
            OutputFormat::Lazy => "lazy",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brackets" => Ok(OutputFormat::Brackets),
            "lines" => Ok(OutputFormat::Lines),
            "lazy" => Ok(OutputFormat::Lazy),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for OutputFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// When to colour terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves `Auto` against whether stdout is a terminal.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_tty(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ConfigError::UnknownColorMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Token separator for [`OutputFormat::Lazy`].
    pub separator: String,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { separator: " ".to_string(), color: false }
    }
}

pub fn write_groups<W: Write>(
    out: &mut W,
    groups: &[AnnotationGroup],
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    match format {
        OutputFormat::Brackets => write_brackets(out, groups),
        OutputFormat::Lines => write_lines(out, groups, options.color),
        OutputFormat::Lazy => write_lazy(out, groups, &options.separator),
        OutputFormat::Json => write_json(out, groups),
    }
}

fn write_brackets<W: Write>(out: &mut W, groups: &[AnnotationGroup]) -> Result<()> {
    let inner: Vec<String> = groups
        .iter()
        .map(|g| format!("[{}]", g.rendered().join(" ")))
        .collect();
    writeln!(out, "[{}]", inner.join(" "))?;
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, groups: &[AnnotationGroup], color: bool) -> Result<()> {
    for group in groups.iter().filter(|g| !g.character().is_whitespace()) {
        let readings = group.rendered().join(" ");
        match (color, group.is_pass_through()) {
            (false, _) => writeln!(out, "{}\t{}", group.character(), readings)?,
            (true, true) => writeln!(out, "{}\t{}", group.character(), readings.dim())?,
            (true, false) => writeln!(out, "{}\t{}", group.character(), readings.green())?,
        }
    }
    Ok(())
}

fn write_lazy<W: Write>(out: &mut W, groups: &[AnnotationGroup], separator: &str) -> Result<()> {
    let tokens: Vec<String> = flatten(groups)
        .into_iter()
        .zip(groups)
        .filter(|(_, g)| !g.character().is_whitespace())
        .map(|(token, _)| token)
        .collect();
    writeln!(out, "{}", tokens.join(separator))?;
    Ok(())
}

fn write_json<W: Write>(out: &mut W, groups: &[AnnotationGroup]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, groups)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::converter::Transliterator;
    use crate::core::types::{ToneStyle, TransliterationConfig};

    fn render(text: &str, config: TransliterationConfig, format: OutputFormat) -> String {
        let groups = Transliterator::builtin().unwrap().transliterate(text, &config);
        let mut out = Vec::new();
        write_groups(&mut out, &groups, format, &RenderOptions::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn brackets_match_classic_print_form() {
        let config = TransliterationConfig::new(ToneStyle::NumericInline, true);
        assert_eq!(render("中国人", config, OutputFormat::Brackets), "[[zho1ng zho4ng] [guo2] [re2n]]\n");
    }

    #[test]
    fn lines_skip_whitespace() {
        let config = TransliterationConfig::new(ToneStyle::Mark, false);
        assert_eq!(render("你 好\n", config, OutputFormat::Lines), "你\tnǐ\n好\thǎo\n");
    }

    #[test]
    fn colored_lines_still_carry_text() {
        let groups = Transliterator::builtin()
            .unwrap()
            .transliterate("你!", &TransliterationConfig::default());
        let mut out = Vec::new();
        let options = RenderOptions { color: true, ..RenderOptions::default() };
        write_groups(&mut out, &groups, OutputFormat::Lines, &options).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ni"));
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn lazy_uses_separator() {
        let groups = Transliterator::builtin()
            .unwrap()
            .transliterate("中国 人", &TransliterationConfig::default());
        let mut out = Vec::new();
        let options = RenderOptions { separator: "-".into(), color: false };
        write_groups(&mut out, &groups, OutputFormat::Lazy, &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "zhong-guo-ren\n");
    }

    #[test]
    fn json_lists_groups() {
        let text = render("人A", TransliterationConfig::new(ToneStyle::Mark, false), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"character": "人", "readings": ["rén"], "pass_through": false},
                {"character": "A", "readings": ["A"], "pass_through": true},
            ])
        );
    }

    #[test]
    fn parses_format_and_color_names() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(
            "table".parse::<OutputFormat>(),
            Err(ConfigError::UnknownFormat("table".into()))
        );
        assert_eq!("never".parse::<ColorMode>(), Ok(ColorMode::Never));
        assert!(!ColorMode::Never.enabled());
        assert!("sometimes".parse::<ColorMode>().is_err());
    }
}

//! pinyin_annotate - print pinyin for every character of a text

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pinyin_core::config::AppConfig;
use pinyin_core::output::{self, ColorMode, OutputFormat, RenderOptions};
use pinyin_core::{logging, ToneStyle, Transliterator};

#[derive(Parser)]
#[command(name = "pinyin_annotate")]
#[command(version, about = "Annotate Chinese text with pinyin", long_about = None)]
#[command(after_help = "EXAMPLES:
    pinyin_annotate song.txt                        Print [[ming] [yue] ...]
    pinyin_annotate -s tone2 -m song.txt            Inline tone digits, all readings
    echo 中国人 | pinyin_annotate -s mark -f lazy   Read stdin, flat output")]
struct Cli {
    /// Text file to annotate; stdin when omitted or '-'
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Tone style: none, mark, numeric, numeric-inline
    #[arg(short, long, value_name = "STYLE")]
    style: Option<ToneStyle>,

    /// Print every known reading of each character
    #[arg(short = 'm', long, overrides_with = "no_heteronyms")]
    heteronyms: bool,

    /// Print only the primary reading, even if the config asks for all
    #[arg(long, overrides_with = "heteronyms")]
    no_heteronyms: bool,

    /// Write 5 for the neutral tone in numeric styles
    #[arg(long, overrides_with = "no_five")]
    five: bool,

    /// Leave the neutral tone without a digit in numeric styles
    #[arg(long, overrides_with = "five")]
    no_five: bool,

    /// Output layout: brackets, lines, lazy, json
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Token separator for the lazy format
    #[arg(long, value_name = "SEP")]
    separator: Option<String>,

    /// Extra reading table laid over the bundled one (repeatable)
    #[arg(short, long = "dict", value_name = "FILE")]
    dictionaries: Vec<PathBuf>,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the source text before its annotations
    #[arg(short, long)]
    echo: bool,

    /// Colour output: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log filter, e.g. 'debug' or 'pinyin_core=trace'
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    // Usage errors exit 1 like every other failure; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("could not load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    apply_overrides(&mut config, &cli);
    logging::init_subscriber(&config.log_level)?;

    // The reading table is loaded before any input is read so a broken
    // table fails the run up front.
    let dictionary = config.load_dictionary().context("could not load reading table")?;
    let transliterator = Transliterator::new(&dictionary);

    let text = read_input(cli.input.as_deref())?;
    let groups = transliterator.transliterate(&text, &config.transliteration());
    info!(characters = groups.len(), style = %config.style, "annotated input");

    let options = RenderOptions {
        separator: config.separator.clone(),
        color: cli.color.enabled(),
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.echo {
        writeln!(out, "{}", text.trim_end())?;
    }
    output::write_groups(&mut out, &groups, config.format, &options)?;
    out.flush()?;
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(style) = cli.style {
        config.style = style;
    }
    if let Some(heteronyms) = switch(cli.heteronyms, cli.no_heteronyms) {
        config.heteronyms = heteronyms;
    }
    if let Some(five) = switch(cli.five, cli.no_five) {
        config.neutral_tone_with_five = five;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(separator) = &cli.separator {
        config.separator = separator.clone();
    }
    config.dictionaries.extend(cli.dictionaries.iter().cloned());
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
}

/// A `--flag`/`--no-flag` pair; `None` leaves the config value alone.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("could not read '{}'", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("could not read stdin")?;
            Ok(text)
        }
    }
}

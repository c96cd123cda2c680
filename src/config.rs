//! Validated run configuration
//!
//! Turns parsed [`Args`] into an immutable [`Config`]. All option checking
//! happens here, before any input is read.

use crate::cli::Args;
use crate::error::ConfigError;
use crate::range::FieldList;
use crate::splitter::{DelimiterSplitter, PatternSplitter, QuotedSplitter, Splitter};
use encoding_rs::Encoding;
use regex::Regex;
use std::path::PathBuf;

/// The single active splitting strategy
#[derive(Debug, Clone)]
pub enum Mode {
    /// Split lines on a literal string
    Delimiter(String),
    /// Capture groups of the first match in each line
    Pattern(Regex),
    /// Comma-separated quoted records
    Csv,
    /// Tab-separated quoted records
    Tsv,
}

impl Mode {
    /// Record separator for the quoted modes
    pub fn separator(&self) -> Option<u8> {
        match self {
            Mode::Csv => Some(b','),
            Mode::Tsv => Some(b'\t'),
            Mode::Delimiter(_) | Mode::Pattern(_) => None,
        }
    }

    /// Output delimiter used when `-o` is not given
    fn default_out_delimiter(&self) -> String {
        match self {
            Mode::Delimiter(delimiter) => delimiter.clone(),
            Mode::Csv => ",".to_string(),
            Mode::Tsv | Mode::Pattern(_) => "\t".to_string(),
        }
    }

    /// Build the splitter for this mode
    pub fn splitter(&self) -> Box<dyn Splitter> {
        match self {
            Mode::Delimiter(delimiter) => Box::new(DelimiterSplitter::new(delimiter.clone())),
            Mode::Pattern(pattern) => Box::new(PatternSplitter::new(pattern.clone())),
            Mode::Csv => Box::new(QuotedSplitter::new(b',')),
            Mode::Tsv => Box::new(QuotedSplitter::new(b'\t')),
        }
    }

    /// How the record separator is named in messages
    pub fn separator_label(&self) -> &'static str {
        match self.separator() {
            Some(b',') => "','",
            Some(b'\t') => "tab",
            _ => "input",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Delimiter(_) => "delimiter",
            Mode::Pattern(_) => "extract",
            Mode::Csv => "csv",
            Mode::Tsv => "tsv",
        }
    }
}

/// Immutable snapshot of all run options
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Resolved once; never empty for delimiter mode
    pub out_delimiter: String,
    /// `None` selects every field
    pub fields: Option<FieldList>,
    /// Empty means stdin
    pub files: Vec<PathBuf>,
    /// `None` means UTF-8 with BOM sniffing
    pub encoding: Option<&'static Encoding>,
    pub stats: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let fields = args
            .fields
            .as_deref()
            .map(str::parse::<FieldList>)
            .transpose()?;

        let mode = resolve_mode(args)?;

        if mode.separator().is_some() && args.out_delimiter.is_some() {
            log::warn!(
                "--out-delimiter is ignored in {} mode; records are written with the {} separator",
                mode.name(),
                mode.separator_label()
            );
        }

        let out_delimiter = match args.out_delimiter.as_deref() {
            Some(delimiter) => decode_tabs(delimiter),
            None => mode.default_out_delimiter(),
        };

        let encoding = args
            .encoding
            .as_deref()
            .map(|label| {
                Encoding::for_label(label.trim().as_bytes())
                    .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
            })
            .transpose()?;

        Ok(Self {
            mode,
            out_delimiter,
            fields,
            files: args.files.clone(),
            encoding,
            stats: args.stats,
        })
    }
}

/// Pick exactly one splitting mode from the flags
fn resolve_mode(args: &Args) -> Result<Mode, ConfigError> {
    let active: Vec<&'static str> = [
        (args.delimiter.is_some(), "--delimiter"),
        (args.extract.is_some(), "--extract"),
        (args.csv, "--csv"),
        (args.tsv, "--tsv"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();

    if active.len() > 1 {
        return Err(ConfigError::ConflictingModes(active));
    }

    if let Some(ref delimiter) = args.delimiter {
        let delimiter = decode_tabs(delimiter);
        if delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        return Ok(Mode::Delimiter(delimiter));
    }

    if let Some(ref pattern) = args.extract {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        if regex.captures_len() == 1 {
            log::warn!("pattern '{}' has no capture groups; matching lines produce empty records", pattern);
        }
        return Ok(Mode::Pattern(regex));
    }

    if args.csv {
        return Ok(Mode::Csv);
    }
    if args.tsv {
        return Ok(Mode::Tsv);
    }

    if args.tab_fallback {
        log::debug!("no mode given, falling back to tab-delimited input");
        return Ok(Mode::Delimiter("\t".to_string()));
    }

    Err(ConfigError::NoMode)
}

/// Replace the two-character sequence `\t` with a tab
pub fn decode_tabs(value: &str) -> String {
    value.replace(r"\t", "\t")
}

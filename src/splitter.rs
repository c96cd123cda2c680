//! Input splitting strategies
//!
//! Each [`Mode`](crate::config::Mode) has one [`Splitter`] that turns the
//! input stream into field records. Line-based splitters strip `\n` or `\r\n`
//! and decode invalid UTF-8 lossily.

use bstr::io::BufReadExt;
use bstr::ByteVec;
use regex::Regex;
use std::cell::Cell;
use std::io::BufRead;

/// Fields of one line or record
pub type Record = Vec<String>;

/// Stream of records produced by a splitter
pub type Records<'a> = Box<dyn Iterator<Item = anyhow::Result<Record>> + 'a>;

/// Turns an input stream into field records
pub trait Splitter {
    fn records<'a>(&'a self, input: Box<dyn BufRead + 'a>) -> Records<'a>;

    /// Lines dropped without producing a record
    fn skipped(&self) -> u64 {
        0
    }
}

/// Literal substring split, no quoting
#[derive(Debug, Clone)]
pub struct DelimiterSplitter {
    delimiter: String,
}

impl DelimiterSplitter {
    pub fn new(delimiter: String) -> Self {
        debug_assert!(!delimiter.is_empty());
        Self { delimiter }
    }

    #[inline]
    pub fn split(&self, line: &str) -> Record {
        line.split(self.delimiter.as_str()).map(str::to_owned).collect()
    }
}

impl Splitter for DelimiterSplitter {
    fn records<'a>(&'a self, input: Box<dyn BufRead + 'a>) -> Records<'a> {
        Box::new(input.byte_lines().map(move |line| -> anyhow::Result<Record> {
            let line = line?.into_string_lossy();
            Ok(self.split(&line))
        }))
    }
}

/// Capture groups of the first match in each line
#[derive(Debug)]
pub struct PatternSplitter {
    pattern: Regex,
    skipped: Cell<u64>,
}

impl PatternSplitter {
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            skipped: Cell::new(0),
        }
    }

    /// Groups of the first match, or `None` when the line does not match.
    /// Groups that did not take part in the match become empty fields.
    #[inline]
    pub fn extract(&self, line: &str) -> Option<Record> {
        let captures = self.pattern.captures(line)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
                .collect(),
        )
    }
}

impl Splitter for PatternSplitter {
    fn records<'a>(&'a self, input: Box<dyn BufRead + 'a>) -> Records<'a> {
        Box::new(input.byte_lines().filter_map(move |line| -> Option<anyhow::Result<Record>> {
            let line = match line {
                Ok(line) => line.into_string_lossy(),
                Err(e) => return Some(Err(e.into())),
            };

            let record = self.extract(&line);
            if record.is_none() {
                self.skipped.set(self.skipped.get() + 1);
                log::trace!("no match: {:?}", line);
            }
            record.map(Ok)
        }))
    }

    fn skipped(&self) -> u64 {
        self.skipped.get()
    }
}

/// Quote state while scanning raw CSV/TSV bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote seen inside a quoted field: either an escape or the close
    QuoteInQuoted,
}

impl Scan {
    #[inline]
    fn step(self, byte: u8, separator: u8) -> Self {
        match (self, byte) {
            (Scan::Quoted, b'"') => Scan::QuoteInQuoted,
            (Scan::Quoted, _) => Scan::Quoted,
            (Scan::FieldStart, b'"') | (Scan::QuoteInQuoted, b'"') => Scan::Quoted,
            (_, b'\n') => Scan::FieldStart,
            (_, b) if b == separator => Scan::FieldStart,
            _ => Scan::Unquoted,
        }
    }
}

/// Raw bytes of one record at a time, terminator included.
///
/// Physical lines are joined while a quoted field is still open, so a record
/// may span lines. A blank line between records comes out on its own.
struct RawRecords<R> {
    input: R,
    separator: u8,
}

impl<R: BufRead> Iterator for RawRecords<R> {
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = Vec::new();
        let mut state = Scan::FieldStart;

        loop {
            let start = record.len();
            match self.input.read_until(b'\n', &mut record) {
                Ok(0) => return (!record.is_empty()).then_some(Ok(record)),
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            for &byte in &record[start..] {
                state = state.step(byte, self.separator);
            }
            if state != Scan::Quoted {
                return Some(Ok(record));
            }
        }
    }
}

/// CSV/TSV records with `"` quoting; a record may span lines and a blank
/// line is an empty record
#[derive(Debug, Clone, Copy)]
pub struct QuotedSplitter {
    separator: u8,
}

impl QuotedSplitter {
    pub fn new(separator: u8) -> Self {
        Self { separator }
    }

    /// Parse the raw bytes of a single record
    fn parse(&self, builder: &csv::ReaderBuilder, raw: &[u8]) -> anyhow::Result<Record> {
        if raw.iter().all(|&b| b == b'\r' || b == b'\n') {
            return Ok(Vec::new());
        }

        let mut record = csv::ByteRecord::new();
        builder.from_reader(raw).read_byte_record(&mut record)?;
        Ok(record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect())
    }
}

impl Splitter for QuotedSplitter {
    fn records<'a>(&'a self, input: Box<dyn BufRead + 'a>) -> Records<'a> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.separator)
            .quote(b'"')
            .double_quote(true)
            .has_headers(false)
            .flexible(true);

        let raw = RawRecords {
            input,
            separator: self.separator,
        };

        Box::new(raw.map(move |chunk| -> anyhow::Result<Record> {
            self.parse(&builder, &chunk?)
        }))
    }
}

//! Core processing loop
//!
//! Reads records from the configured input, selects fields, and writes one
//! output line per record.

use crate::config::Config;
use crate::input::{self, ByteCounter};
use crate::output::OutputWriter;
use crate::report::RunStats;
use crate::select::FieldSelector;

use anyhow::Context;
use std::io::{BufRead, Write};
use std::time::Instant;

/// Main processor
pub struct Processor {
    config: Config,
    selector: FieldSelector,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        let selector = FieldSelector::new(config.fields.clone());
        Self { config, selector }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process the configured files (or stdin) into `out`
    pub fn process<W: Write>(&self, out: W) -> anyhow::Result<RunStats> {
        let counter = ByteCounter::default();
        let input = input::open(&self.config.files, self.config.encoding, counter.clone());

        let mut stats = self.process_reader(input, out)?;
        stats.bytes_read = counter.get();
        Ok(stats)
    }

    /// Process an already opened input stream into `out`
    pub fn process_reader<'a, W: Write>(
        &self,
        input: Box<dyn BufRead + 'a>,
        out: W,
    ) -> anyhow::Result<RunStats> {
        let start = Instant::now();
        let splitter = self.config.mode.splitter();

        let mut writer = match self.config.mode.separator() {
            Some(separator) => OutputWriter::quoted(out, separator),
            None => OutputWriter::joined(out, self.config.out_delimiter.as_str()),
        };

        let fields = match &self.config.fields {
            Some(list) if !self.selector.is_identity() => list.to_string(),
            _ => "all".to_string(),
        };
        log::debug!(
            "mode: {}, fields: {}, output delimiter: {:?}",
            self.config.mode.name(),
            fields,
            self.config.out_delimiter
        );

        let mut records_read = 0u64;
        for record in splitter.records(input) {
            let record = record.context("failed to read input")?;
            records_read += 1;

            let selected = self.selector.select(&record);
            writer
                .write_record(&selected)
                .context("failed to write output")?;
        }

        writer.flush().context("failed to write output")?;

        let stats = RunStats {
            records_read,
            records_written: writer.records_written(),
            lines_skipped: splitter.skipped(),
            bytes_read: 0,
            bytes_written: writer.bytes_written(),
            elapsed: start.elapsed(),
        };
        log::debug!(
            "{} records read, {} written ({} bytes), {} skipped",
            stats.records_read,
            stats.records_written,
            stats.bytes_written,
            stats.lines_skipped
        );

        Ok(stats)
    }
}

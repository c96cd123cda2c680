//! Output module
//!
//! Writes selected fields as plain joined lines or as quoted CSV/TSV records.

use std::io::{self, BufWriter, Write};

/// Default buffer size for stdout (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Counts bytes that reach the underlying writer
struct Counting<W> {
    inner: W,
    bytes: u64,
}

impl<W: Write> Write for Counting<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

enum Sink<W: Write> {
    /// Fields joined by a delimiter, no quoting
    Joined {
        writer: BufWriter<Counting<W>>,
        delimiter: String,
    },
    /// Quoted records with a single-byte separator
    Quoted(csv::Writer<Counting<W>>),
}

/// Record writer with buffering
pub struct OutputWriter<W: Write> {
    sink: Sink<W>,
    records_written: u64,
}

impl<W: Write> OutputWriter<W> {
    /// Plain lines: fields joined with `delimiter`
    pub fn joined(inner: W, delimiter: impl Into<String>) -> Self {
        Self {
            sink: Sink::Joined {
                writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, Counting { inner, bytes: 0 }),
                delimiter: delimiter.into(),
            },
            records_written: 0,
        }
    }

    /// CSV/TSV records: fields are quoted only when they contain the
    /// separator, a quote or a line break
    pub fn quoted(inner: W, separator: u8) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(separator)
            .quote(b'"')
            .double_quote(true)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .flexible(true)
            .from_writer(Counting { inner, bytes: 0 });

        Self {
            sink: Sink::Quoted(writer),
            records_written: 0,
        }
    }

    /// Write one record as one output line
    pub fn write_record(&mut self, fields: &[&str]) -> anyhow::Result<()> {
        match &mut self.sink {
            Sink::Joined { writer, delimiter } => {
                let mut first = true;
                for field in fields {
                    if !first {
                        writer.write_all(delimiter.as_bytes())?;
                    }
                    writer.write_all(field.as_bytes())?;
                    first = false;
                }
                writer.write_all(b"\n")?;
            }
            Sink::Quoted(writer) => writer.write_record(fields)?,
        }
        self.records_written += 1;
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> anyhow::Result<()> {
        match &mut self.sink {
            Sink::Joined { writer, .. } => writer.flush()?,
            Sink::Quoted(writer) => writer.flush()?,
        }
        Ok(())
    }

    /// Get number of records written
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Bytes passed on to the underlying writer; exact after [`flush`](Self::flush)
    pub fn bytes_written(&self) -> u64 {
        match &self.sink {
            Sink::Joined { writer, .. } => writer.get_ref().bytes,
            Sink::Quoted(writer) => writer.get_ref().bytes,
        }
    }
}

impl<W: Write> Drop for OutputWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

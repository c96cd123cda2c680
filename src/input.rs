//! Input acquisition
//!
//! Named files are read back to back as one stream, or stdin when no files
//! are given. Each source is optionally transcoded to UTF-8.

use crate::error::InputError;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::cell::Cell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::rc::Rc;

/// Buffer size for the combined input stream
const BUFFER_SIZE: usize = 64 * 1024;

/// Wrap a raw source in a UTF-8 decoder.
///
/// Without an explicit encoding, a UTF-8 or UTF-16 BOM selects the encoding
/// and anything else passes through unchanged.
fn decoded<R: Read + 'static>(inner: R, encoding: Option<&'static Encoding>) -> Box<dyn Read> {
    Box::new(
        DecodeReaderBytesBuilder::new()
            .encoding(encoding)
            .strip_bom(true)
            .build(inner),
    )
}

/// Counts bytes pulled from the underlying sources
#[derive(Debug, Clone, Default)]
pub struct ByteCounter(Rc<Cell<u64>>);

impl ByteCounter {
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    fn add(&self, n: usize) {
        self.0.set(self.0.get() + n as u64);
    }
}

struct Counting<R> {
    inner: R,
    counter: ByteCounter,
}

impl<R: Read> Read for Counting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.add(n);
        Ok(n)
    }
}

/// Files read one after another as a single stream.
///
/// A file is opened only once the previous one is exhausted, and dropped
/// before the next is opened. If a file does not end in a newline, one is
/// inserted so its last line stays separate from the next file's first.
pub struct FileChain {
    pending: VecDeque<PathBuf>,
    current: Option<Box<dyn Read>>,
    encoding: Option<&'static Encoding>,
    counter: ByteCounter,
    last_byte: Option<u8>,
    needs_newline: bool,
}

impl FileChain {
    pub fn new(paths: Vec<PathBuf>, encoding: Option<&'static Encoding>, counter: ByteCounter) -> Self {
        Self {
            pending: paths.into(),
            current: None,
            encoding,
            counter,
            last_byte: None,
            needs_newline: false,
        }
    }

    fn open_next(&mut self) -> io::Result<bool> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(false);
        };

        log::debug!("opening {:?}", path);
        let file = File::open(&path).map_err(|source| InputError::Open { path, source })?;
        let counted = Counting {
            inner: file,
            counter: self.counter.clone(),
        };

        self.current = Some(decoded(counted, self.encoding));
        self.last_byte = None;
        Ok(true)
    }
}

impl Read for FileChain {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.needs_newline {
                self.needs_newline = false;
                buf[0] = b'\n';
                return Ok(1);
            }

            let Some(reader) = self.current.as_mut() else {
                if self.open_next()? {
                    continue;
                }
                return Ok(0);
            };

            let n = reader.read(buf)?;
            if n > 0 {
                self.last_byte = Some(buf[n - 1]);
                return Ok(n);
            }

            // Exhausted: close it before moving on
            self.current = None;
            self.needs_newline = matches!(self.last_byte, Some(b) if b != b'\n');
        }
    }
}

/// Open the run's input as one buffered stream
pub fn open(
    files: &[PathBuf],
    encoding: Option<&'static Encoding>,
    counter: ByteCounter,
) -> Box<dyn BufRead> {
    if files.is_empty() {
        log::debug!("reading from stdin");
        let stdin = Counting {
            inner: io::stdin(),
            counter,
        };
        Box::new(BufReader::with_capacity(BUFFER_SIZE, decoded(stdin, encoding)))
    } else {
        let chain = FileChain::new(files.to_vec(), encoding, counter);
        Box::new(BufReader::with_capacity(BUFFER_SIZE, chain))
    }
}

//! Line supply for the pipeline.
//!
//! [`LineSource`] is the seam between the pipeline and wherever the dump comes
//! from. [`DumpReader`] implements it over any [`BufRead`], which covers files
//! (see [`DumpReader::open`]) and in-memory buffers used by tests. The file
//! handle is owned by the reader and released when it is dropped, whatever
//! the outcome of the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Supplier of raw dump lines.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input.
    ///
    /// Any read failure other than end of input is returned as an error.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Line reader over a buffered byte stream.
#[derive(Debug)]
pub struct DumpReader<R> {
    inner: R,
    buf: String,
}

impl DumpReader<BufReader<File>> {
    /// Open a dump file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> DumpReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> LineSource for DumpReader<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }

        let line = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }
}

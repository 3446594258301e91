// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Inertial data acquisition module
//!
//! This module reads line-delimited gyroscope/accelerometer records and keeps
//! a bounded history of every channel for the filter chains.

pub mod history;
pub mod record;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::{FilterError, FilterResult};

pub use history::{ChannelHistory, SensorHistory};
pub use record::{format_output_line, InertialRecord, CHANNEL_COUNT, CHANNEL_NAMES};

/// A source of inertial records
pub trait RecordSource {
    /// Read the next record
    ///
    /// Returns `None` at the end of the stream. A malformed record yields an
    /// [`crate::error::FilterError::InvalidRecord`] and the source stays usable.
    fn next_record(&mut self) -> Option<FilterResult<InertialRecord>>;
}

/// Record source reading one record per line from any buffered reader
///
/// Blank lines are skipped. A line that is not valid UTF-8 is reported as an
/// invalid record like any other malformed line.
///
/// ### Examples
///
/// ```
/// use rust_filters::acquisition::{LineRecordReader, RecordSource};
///
/// let input = "0,1,2,3,4,5,6\n\nbad line\n20,1,1,1,1,1,1\n";
/// let mut reader = LineRecordReader::new(input.as_bytes());
/// assert!(reader.next_record().unwrap().is_ok());
/// assert!(reader.next_record().unwrap().is_err());
/// assert_eq!(reader.next_record().unwrap().unwrap().timestamp, 20.0);
/// assert!(reader.next_record().is_none());
/// ```
pub struct LineRecordReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineRecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl LineRecordReader<BufReader<File>> {
    /// Open a record file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordSource for LineRecordReader<R> {
    fn next_record(&mut self) -> Option<FilterResult<InertialRecord>> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = match std::str::from_utf8(&self.buffer) {
                        Ok(line) => line.trim(),
                        Err(err) => {
                            return Some(Err(FilterError::InvalidRecord {
                                line: self.line_number,
                                reason: format!("not valid UTF-8: {}", err),
                            }))
                        }
                    };
                    if line.is_empty() {
                        continue;
                    }
                    return Some(InertialRecord::parse(line, self.line_number));
                }
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}

impl<R: BufRead> Iterator for LineRecordReader<R> {
    type Item = FilterResult<InertialRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

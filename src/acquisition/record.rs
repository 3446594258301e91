// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Inertial sensor records
//!
//! One record per line, comma separated:
//!
//! ```text
//! timestamp,wx,wy,wz,ax,ay,az
//! ```
//!
//! `w*` are the gyroscope axes and `a*` the accelerometer axes. Fields after
//! the seventh are ignored.

use crate::error::{FilterError, FilterResult};

/// Number of sensor channels carried by a record
pub const CHANNEL_COUNT: usize = 6;

/// Channel names, in record and output order
pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["wx", "wy", "wz", "ax", "ay", "az"];

/// One timestamped gyroscope + accelerometer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialRecord {
    /// Acquisition time in milliseconds
    pub timestamp: f64,
    /// Samples in [`CHANNEL_NAMES`] order
    pub channels: [f64; CHANNEL_COUNT],
}

impl InertialRecord {
    /// Parse one line of input
    ///
    /// ### Arguments
    ///
    /// * `line` - The text of the record
    /// * `line_number` - 1-based line number, reported in errors
    ///
    /// ### Examples
    ///
    /// ```
    /// use rust_filters::acquisition::InertialRecord;
    ///
    /// let record = InertialRecord::parse("1500,0.1,0.2,0.3,0,0,9.81", 1).unwrap();
    /// assert_eq!(record.timestamp, 1500.0);
    /// assert_eq!(record.channels[5], 9.81);
    /// assert!(InertialRecord::parse("1500,0.1", 2).is_err());
    /// ```
    pub fn parse(line: &str, line_number: usize) -> FilterResult<Self> {
        let mut fields = line.split(',').map(str::trim);
        let mut next_value = |name: &str| -> FilterResult<f64> {
            let field = fields.next().ok_or_else(|| FilterError::InvalidRecord {
                line: line_number,
                reason: format!("missing field {}", name),
            })?;
            field.parse::<f64>().map_err(|e| FilterError::InvalidRecord {
                line: line_number,
                reason: format!("field {} ({:?}): {}", name, field, e),
            })
        };

        let timestamp = next_value("timestamp")?;
        let mut channels = [0.0; CHANNEL_COUNT];
        for (value, name) in channels.iter_mut().zip(CHANNEL_NAMES) {
            *value = next_value(name)?;
        }

        Ok(Self {
            timestamp,
            channels,
        })
    }

    /// Render the record as an input line
    pub fn to_line(&self) -> String {
        std::iter::once(self.timestamp)
            .chain(self.channels)
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Format one output line: `<sentence>,<6 values>,<timestamp / 1000>`
///
/// Channels without a filtered value are written as `0`.
///
/// ### Examples
///
/// ```
/// use rust_filters::acquisition::format_output_line;
///
/// let values = [Some(1.5), None, Some(0.0), Some(-2.0), None, Some(9.75)];
/// assert_eq!(
///     format_output_line("$GYRACC", &values, 2500.0),
///     "$GYRACC,1.5,0,0,-2,0,9.75,2.5"
/// );
/// ```
pub fn format_output_line(
    sentence: &str,
    values: &[Option<f64>; CHANNEL_COUNT],
    timestamp: f64,
) -> String {
    let mut fields = Vec::with_capacity(values.len() + 2);
    fields.push(sentence.to_string());
    fields.extend(values.iter().map(|value| match value {
        Some(v) => v.to_string(),
        None => "0".to_string(),
    }));
    fields.push((timestamp / 1000.0).to_string());
    fields.join(",")
}

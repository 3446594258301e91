// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sample container with eagerly maintained statistics
//!
//! [`SignalContainer`] owns a time-ordered sequence of samples together with
//! its sum, mean, population variance, standard deviation, minimum and
//! maximum. Every mutation recomputes the statistics, except when the
//! sequence ends up empty: in that case the previous values (zero for a
//! fresh container) are kept as they were.

use std::ops::Index;

use crate::error::{FilterError, FilterResult};

/// Summary statistics of a sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalStats {
    pub sum: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_deviation: f64,
    pub min: f64,
    pub max: f64,
}

impl SignalStats {
    /// Compute statistics over a non-empty slice
    ///
    /// Returns `None` for an empty slice so that callers can keep their last
    /// known values.
    fn compute(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let sum: f64 = samples.iter().sum();
        let mean = sum / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            sum,
            mean,
            variance,
            std_deviation: variance.sqrt(),
            min,
            max,
        })
    }
}

/// A finite sequence of samples and its statistics
///
/// Position in the sequence doubles as the discrete time index. An optional
/// timestamp can be attached by the caller; the filters never read it.
///
/// ### Examples
///
/// ```
/// use rust_filters::signal::SignalContainer;
///
/// let mut signal = SignalContainer::from_vec(vec![1.0, 2.0, 3.0]);
/// assert_eq!(signal.mean(), 2.0);
///
/// signal.append_signal(6.0);
/// assert_eq!(signal.len(), 4);
/// assert_eq!(signal.max(), 6.0);
/// assert_eq!(signal[3], 6.0);
/// assert!(signal.at(4).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalContainer {
    samples: Vec<f64>,
    stats: SignalStats,
    timestamp: Option<u64>,
}

impl SignalContainer {
    /// Create an empty container with zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container from an initial sequence
    ///
    /// Statistics are computed only if `samples` is non-empty.
    pub fn from_vec(samples: Vec<f64>) -> Self {
        let mut container = Self::new();
        container.set_signal(samples);
        container
    }

    /// Replace the whole sequence
    ///
    /// The statistics are recomputed when the new sequence is non-empty. An
    /// empty sequence replaces the samples but keeps the previous statistics.
    ///
    /// ### Arguments
    ///
    /// * `samples` - The new sample sequence
    pub fn set_signal(&mut self, samples: Vec<f64>) {
        self.samples = samples;
        self.refresh_stats();
    }

    /// Push one sample at the end of the sequence and refresh the statistics
    pub fn append_signal(&mut self, value: f64) {
        self.samples.push(value);
        self.refresh_stats();
    }

    /// Remove the sample at `position`
    ///
    /// Out-of-range positions are ignored.
    pub fn erase_signal(&mut self, position: usize) {
        if position >= self.samples.len() {
            log::debug!(
                "erase_signal ignored: position {} out of range for length {}",
                position,
                self.samples.len()
            );
            return;
        }
        self.samples.remove(position);
        self.refresh_stats();
    }

    /// Checked read of the sample at `index`
    ///
    /// ### Returns
    ///
    /// The sample, or [`FilterError::IndexOutOfRange`] if `index >= len()`
    pub fn at(&self, index: usize) -> FilterResult<f64> {
        self.samples
            .get(index)
            .copied()
            .ok_or(FilterError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }

    /// Copy of the sample sequence
    pub fn get_signal(&self) -> Vec<f64> {
        self.samples.clone()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Last sample of the sequence, if any
    pub fn last(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    pub fn stats(&self) -> SignalStats {
        self.stats
    }

    pub fn sum(&self) -> f64 {
        self.stats.sum
    }

    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    /// Population variance (divisor `N`)
    pub fn variance(&self) -> f64 {
        self.stats.variance
    }

    pub fn std_deviation(&self) -> f64 {
        self.stats.std_deviation
    }

    pub fn min(&self) -> f64 {
        self.stats.min
    }

    pub fn max(&self) -> f64 {
        self.stats.max
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: Option<u64>) {
        self.timestamp = timestamp;
    }

    fn refresh_stats(&mut self) {
        if let Some(stats) = SignalStats::compute(&self.samples) {
            self.stats = stats;
        }
    }
}

impl Index<usize> for SignalContainer {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl From<Vec<f64>> for SignalContainer {
    fn from(samples: Vec<f64>) -> Self {
        Self::from_vec(samples)
    }
}

impl<'a> IntoIterator for &'a SignalContainer {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

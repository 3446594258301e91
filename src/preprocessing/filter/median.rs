// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sliding-window median filter
//!
//! Output `i` is an order statistic of the forward window `x[i..i + w]`,
//! sorted with [`crate::utility::helpers::tim_sort`]. The element picked is
//! at index `ceil(len / 2)` of the sorted window, or `0` for a one-element
//! window.
//!
//! Near the end of the signal the forward window no longer fits:
//!
//! - if the whole signal is shorter than the window, every position takes
//!   the order statistic of its remaining tail;
//! - otherwise the positions past the last full window repeat the previous
//!   output.

use serde::{Deserialize, Serialize};

use super::Filter;
use crate::signal::SignalContainer;
use crate::utility::helpers;

/// Settings of a [`MedianFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedianSettings {
    /// Window length (non-positive disables the filter)
    pub window_size: i64,
}

impl Default for MedianSettings {
    fn default() -> Self {
        Self { window_size: 16 }
    }
}

/// Forward sliding-window median filter
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::Filter;
/// use rust_filters::preprocessing::filter::median::{MedianFilter, MedianSettings};
///
/// let mut filter = MedianFilter::new(MedianSettings { window_size: 3 });
/// filter.set_signal(vec![1.0, 5.0, 2.0, 8.0, 3.0]);
/// filter.apply_filter();
/// assert_eq!(filter.get_signal(), vec![5.0, 8.0, 8.0, 8.0, 8.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MedianFilter {
    original: SignalContainer,
    filtered: SignalContainer,
    settings: MedianSettings,
}

/// Index of the order statistic taken from a sorted window of `len` values
pub fn median_index(len: usize) -> usize {
    if len <= 1 {
        0
    } else {
        len.div_ceil(2)
    }
}

/// Order statistic of an unsorted window
fn window_median(window: &[f64]) -> f64 {
    let sorted = helpers::sorted(window);
    sorted[median_index(sorted.len())]
}

impl MedianFilter {
    pub fn new(settings: MedianSettings) -> Self {
        Self::with_signal(SignalContainer::new(), settings)
    }

    pub fn with_signal(original: SignalContainer, settings: MedianSettings) -> Self {
        Self {
            original,
            filtered: SignalContainer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> MedianSettings {
        self.settings
    }
}

impl Filter for MedianFilter {
    fn apply_filter(&mut self) {
        if self.settings.window_size <= 0 {
            log::warn!(
                "median: window size {} is not positive, filter skipped",
                self.settings.window_size
            );
            return;
        }

        let samples = self.original.as_slice();
        let n = samples.len();
        let window = self.settings.window_size as usize;
        let short_signal = n < window;
        let mut output: Vec<f64> = Vec::with_capacity(n);

        for i in 0..n {
            let value = if i + window > n {
                match output.last() {
                    Some(&previous) if !short_signal => previous,
                    _ => window_median(&samples[i..]),
                }
            } else {
                window_median(&samples[i..i + window])
            };
            output.push(value);
        }

        self.filtered.set_signal(output);
    }

    fn name(&self) -> &'static str {
        "median"
    }

    fn original(&self) -> &SignalContainer {
        &self.original
    }

    fn original_mut(&mut self) -> &mut SignalContainer {
        &mut self.original
    }

    fn filtered(&self) -> &SignalContainer {
        &self.filtered
    }

    fn filtered_mut(&mut self) -> &mut SignalContainer {
        &mut self.filtered
    }
}

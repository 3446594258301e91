// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Moving average filter
//!
//! The first sample is copied unchanged. While fewer than `window_size`
//! samples have been seen, each output is the running mean of everything
//! seen so far. Once the window is full, each output is the mean of the last
//! `window_size` input samples, summed directly for every position.

use serde::{Deserialize, Serialize};

use super::Filter;
use crate::signal::SignalContainer;

/// Settings of a [`MovingAverageFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAverageSettings {
    /// Number of samples averaged once the window is full (non-positive disables the filter)
    pub window_size: i64,
}

impl Default for MovingAverageSettings {
    fn default() -> Self {
        Self { window_size: 5 }
    }
}

/// Windowed arithmetic-mean smoother
///
/// A window larger than the signal is clamped to the signal length for the
/// current call only.
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::Filter;
/// use rust_filters::preprocessing::filter::moving_average::{MovingAverageFilter, MovingAverageSettings};
///
/// let mut filter = MovingAverageFilter::new(MovingAverageSettings { window_size: 2 });
/// filter.set_signal(vec![1.0, 3.0, 5.0, 7.0]);
/// filter.apply_filter();
/// assert_eq!(filter.get_signal(), vec![1.0, 2.0, 4.0, 6.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverageFilter {
    original: SignalContainer,
    filtered: SignalContainer,
    settings: MovingAverageSettings,
}

impl MovingAverageFilter {
    pub fn new(settings: MovingAverageSettings) -> Self {
        Self::with_signal(SignalContainer::new(), settings)
    }

    /// Create a filter already holding its original signal
    pub fn with_signal(original: SignalContainer, settings: MovingAverageSettings) -> Self {
        Self {
            original,
            filtered: SignalContainer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> MovingAverageSettings {
        self.settings
    }
}

/// Moving average of `samples` with a window of `window` samples
///
/// `window` must be at least one and not larger than `samples.len()`.
fn moving_average(samples: &[f64], window: usize) -> Vec<f64> {
    let mut output = Vec::with_capacity(samples.len());
    let Some(&first) = samples.first() else {
        return output;
    };
    output.push(first);

    let mut running_sum = first;
    for i in 1..samples.len() {
        if i < window {
            running_sum += samples[i];
            output.push(running_sum / (i + 1) as f64);
        } else {
            let sum: f64 = samples[i + 1 - window..=i].iter().sum();
            output.push(sum / window as f64);
        }
    }

    output
}

impl Filter for MovingAverageFilter {
    fn apply_filter(&mut self) {
        if self.settings.window_size <= 0 {
            log::warn!(
                "moving_average: window size {} is not positive, filter skipped",
                self.settings.window_size
            );
            return;
        }

        let samples = self.original.as_slice();
        let window = (self.settings.window_size as usize).min(samples.len());
        if window < self.settings.window_size as usize {
            log::debug!(
                "moving_average: window {} clamped to signal length {}",
                self.settings.window_size,
                samples.len()
            );
        }

        let output = moving_average(samples, window);
        self.filtered.set_signal(output);
    }

    fn name(&self) -> &'static str {
        "moving_average"
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

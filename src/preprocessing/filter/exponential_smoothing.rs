// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Adaptive exponential smoothing
//!
//! Each output blends the previous output with the current input:
//!
//! ```text
//! y[i] = (1 - w) * y[i-1] + w * x[i]
//! ```
//!
//! The weight `w` is chosen per sample from the jump `|x[i] - y[i-1]|`, with
//! a rule that depends on the [`Environment`] of the signal. The first output
//! is seeded with `standard_factor * x[0]`.

use serde::{Deserialize, Serialize};

use super::Filter;
use crate::signal::SignalContainer;
use crate::utility::helpers;

/// Noise character of the signal, selecting the weight rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Weight `physical_factor`, scaled down by `variance / jump` on jumps above the variance
    Physical,
    /// `maximal_factor` on jumps of at least `delta_threshold`, `standard_factor` otherwise
    RadioTechnical,
    /// `maximal_factor` on jumps above twice the variance, `standard_factor` otherwise
    Undefined,
}

/// Settings of an [`ExponentialSmoothingFilter`]
///
/// Outside the physical environment `maximal_factor + standard_factor` must
/// be exactly `1.0`, otherwise the filter does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExponentialSmoothingSettings {
    pub environment: Environment,
    pub physical_factor: f64,
    pub standard_factor: f64,
    pub maximal_factor: f64,
    pub delta_threshold: f64,
}

impl Default for ExponentialSmoothingSettings {
    fn default() -> Self {
        Self {
            environment: Environment::Physical,
            physical_factor: 0.5,
            standard_factor: 0.5,
            maximal_factor: 0.5,
            delta_threshold: 0.0,
        }
    }
}

impl ExponentialSmoothingSettings {
    /// Whether the factor pair satisfies the environment requirement
    pub fn factors_are_consistent(&self) -> bool {
        self.environment == Environment::Physical
            || self.maximal_factor + self.standard_factor == 1.0
    }
}

/// Recursive smoother with an environment-dependent weight
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::Filter;
/// use rust_filters::preprocessing::filter::exponential_smoothing::{
///     Environment, ExponentialSmoothingFilter, ExponentialSmoothingSettings,
/// };
///
/// let settings = ExponentialSmoothingSettings {
///     environment: Environment::RadioTechnical,
///     physical_factor: 0.0,
///     standard_factor: 0.25,
///     maximal_factor: 0.75,
///     delta_threshold: 10.0,
/// };
/// let mut filter = ExponentialSmoothingFilter::new(settings);
/// filter.set_signal(vec![4.0, 8.0]);
/// filter.apply_filter();
/// // y0 = 0.25 * 4, y1 = 0.75 * 1 + 0.25 * 8
/// assert_eq!(filter.get_signal(), vec![1.0, 2.75]);
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialSmoothingFilter {
    original: SignalContainer,
    filtered: SignalContainer,
    settings: ExponentialSmoothingSettings,
}

impl ExponentialSmoothingFilter {
    pub fn new(settings: ExponentialSmoothingSettings) -> Self {
        Self::with_signal(SignalContainer::new(), settings)
    }

    pub fn with_signal(original: SignalContainer, settings: ExponentialSmoothingSettings) -> Self {
        Self {
            original,
            filtered: SignalContainer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> ExponentialSmoothingSettings {
        self.settings
    }

    /// Weight applied to sample `x` given the previous output
    fn weight(&self, x: f64, previous: f64, variance: f64) -> f64 {
        let s = &self.settings;
        let delta = (x - previous).abs();
        match s.environment {
            Environment::RadioTechnical => {
                if delta >= s.delta_threshold {
                    s.maximal_factor
                } else {
                    s.standard_factor
                }
            }
            Environment::Physical => {
                if delta > variance {
                    s.physical_factor * (variance / delta)
                } else {
                    s.physical_factor
                }
            }
            Environment::Undefined => {
                if delta > 2.0 * variance {
                    s.maximal_factor
                } else {
                    s.standard_factor
                }
            }
        }
    }
}

impl Filter for ExponentialSmoothingFilter {
    fn apply_filter(&mut self) {
        if !self.settings.factors_are_consistent() {
            log::warn!(
                "exponential_smoothing: maximal_factor + standard_factor = {} (expected 1.0), filter skipped",
                self.settings.maximal_factor + self.settings.standard_factor
            );
            return;
        }

        let samples = self.original.as_slice();
        let Some(&first) = samples.first() else {
            self.filtered.set_signal(Vec::new());
            return;
        };

        let variance = helpers::variance(samples).unwrap_or(0.0);
        let mut output = Vec::with_capacity(samples.len());
        let mut previous = self.settings.standard_factor * first;
        output.push(previous);

        for &x in &samples[1..] {
            let w = self.weight(x, previous, variance);
            previous = (1.0 - w) * previous + w * x;
            output.push(previous);
        }

        self.filtered.set_signal(output);
    }

    fn name(&self) -> &'static str {
        "exponential_smoothing"
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settings(environment: Environment) -> ExponentialSmoothingSettings {
        ExponentialSmoothingSettings {
            environment,
            physical_factor: 0.5,
            standard_factor: 0.25,
            maximal_factor: 0.75,
            delta_threshold: 2.0,
        }
    }

    fn run(samples: Vec<f64>, settings: ExponentialSmoothingSettings) -> Vec<f64> {
        let mut filter =
            ExponentialSmoothingFilter::with_signal(SignalContainer::from_vec(samples), settings);
        filter.apply_filter();
        filter.get_signal()
    }

    #[test]
    fn test_first_sample_is_seeded_with_standard_factor() {
        for environment in [
            Environment::Physical,
            Environment::RadioTechnical,
            Environment::Undefined,
        ] {
            let out = run(vec![8.0, 8.0], settings(environment));
            assert_relative_eq!(out[0], 2.0);
        }
    }

    #[test]
    fn test_radio_technical_switches_on_delta_threshold() {
        // y0 = 0.25 * 4 = 1; |5 - 1| >= 2 -> maximal (y1 = 4); |4 - 4| < 2 -> standard
        let out = run(vec![4.0, 5.0, 4.0], settings(Environment::RadioTechnical));
        assert_relative_eq!(out[1], 0.25 * 1.0 + 0.75 * 5.0);
        let y1 = out[1];
        assert_relative_eq!(out[2], 0.75 * y1 + 0.25 * 4.0);
    }

    #[test]
    fn test_physical_keeps_factor_below_variance() {
        // variance 4: every jump stays at or below it
        let out = run(vec![0.0, 4.0, 0.0, 4.0], settings(Environment::Physical));
        assert_relative_eq!(out[1], 2.0);
        assert_relative_eq!(out[2], 1.0);
        assert_relative_eq!(out[3], 2.5);
    }

    #[test]
    fn test_physical_jump_above_variance() {
        // variance of [0, 0, 0, 0, 0, 0, 0, 8] is 7, last jump is 8
        let mut input = vec![0.0; 7];
        input.push(8.0);
        let out = run(input, settings(Environment::Physical));
        let w = 0.5 * (7.0 / 8.0);
        assert_relative_eq!(out[7], w * 8.0);
    }

    #[test]
    fn test_undefined_uses_twice_the_variance() {
        // variance 3, threshold 6: a jump of 4 keeps the standard factor
        let out = run(vec![0.0, 0.0, 0.0, 4.0], settings(Environment::Undefined));
        assert_relative_eq!(out[3], 0.25 * 4.0);

        // variance 0.25, threshold 0.5: a jump of 1 switches to the maximal factor
        let out = run(vec![0.0, 1.0, 0.0, 1.0], settings(Environment::Undefined));
        assert_relative_eq!(out[1], 0.75);
    }

    #[test]
    fn test_mismatched_factors_leave_filtered_untouched() {
        let mut bad = settings(Environment::RadioTechnical);
        bad.maximal_factor = 0.5;
        for environment in [Environment::RadioTechnical, Environment::Undefined] {
            let mut filter = ExponentialSmoothingFilter::new(ExponentialSmoothingSettings {
                environment,
                ..bad
            });
            filter.filtered_mut().set_signal(vec![7.0, 7.0]);
            filter.set_signal(vec![1.0, 2.0, 3.0]);
            filter.apply_filter();
            assert_eq!(filter.get_signal(), vec![7.0, 7.0], "{:?}", environment);
        }

        // The physical environment does not check the factor pair
        let mut physical = bad;
        physical.environment = Environment::Physical;
        assert_eq!(run(vec![2.0], physical), vec![0.5]);
    }
}

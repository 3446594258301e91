// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Piecewise linear approximation
//!
//! The signal is cut into non-overlapping windows of `window_size` samples,
//! starting from the end, so only the first window may be shorter. Each
//! window is replaced by the line `incline * i + intercept` fitted over its
//! local positions `0..len`:
//!
//! - [`ErrorEstimate::Mse`] and [`ErrorEstimate::Rmse`] use the closed-form
//!   least-squares solution. A degenerate slope (NaN or infinite) becomes 0.
//! - [`ErrorEstimate::Mae`] runs a sign sub-gradient descent on the mean
//!   absolute error, starting from a flat line at zero.
//!
//! The incline is clamped to `[-max_incline, max_incline]` before the line
//! is written out. With stabilization enabled, when the mean clamped incline
//! over all windows is below `stabilization_threshold` in magnitude, the
//! whole output is shifted by its mean.

use serde::{Deserialize, Serialize};

use super::Filter;
use crate::signal::SignalContainer;
use crate::utility::helpers;

const MAE_LEARNING_RATE: f64 = 0.0001;
const MAE_TOLERANCE: f64 = 1e-6;
const MAE_MAX_ITERATIONS: usize = 10_000;

/// Error minimised by the line fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorEstimate {
    Mae,
    Mse,
    Rmse,
}

/// Shape of the fitted curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearizationType {
    Linear,
    /// Accepted in settings but not implemented: the filter outputs zeros
    Parabolic,
}

/// Settings of a [`LinearApproximationFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearApproximationSettings {
    pub stabilization: bool,
    pub stabilization_threshold: f64,
    pub max_incline: f64,
    /// Window length; non-positive or longer than the signal means one window
    pub window_size: i64,
    pub error_estimate: ErrorEstimate,
    pub linearization: LinearizationType,
}

impl Default for LinearApproximationSettings {
    fn default() -> Self {
        Self {
            stabilization: true,
            stabilization_threshold: 0.0,
            max_incline: 0.1,
            window_size: 5,
            error_estimate: ErrorEstimate::Mse,
            linearization: LinearizationType::Linear,
        }
    }
}

/// A fitted line over window-local positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub incline: f64,
    pub intercept: f64,
}

/// Closed-form least-squares line through `(i, window[i])`
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::linear_approximation::least_squares_fit;
///
/// let fit = least_squares_fit(&[1.0, 3.0, 5.0]);
/// assert!((fit.incline - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// ```
pub fn least_squares_fit(window: &[f64]) -> LineFit {
    let count = window.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in window.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let mut incline = (count * sum_xy - sum_x * sum_y) / (count * sum_x2 - sum_x * sum_x);
    if !incline.is_finite() {
        log::trace!("linear_approximation: degenerate window of {} samples", window.len());
        incline = 0.0;
    }
    let intercept = (sum_y - incline * sum_x) / count;

    LineFit { incline, intercept }
}

/// Sub-gradient descent on the mean absolute error of a line fit
pub fn mae_fit(window: &[f64]) -> LineFit {
    let count = window.len() as f64;
    let mut incline = 0.0;
    let mut intercept = 0.0;

    for _ in 0..MAE_MAX_ITERATIONS {
        let mut grad_incline = 0.0;
        let mut grad_intercept = 0.0;
        for (i, &y) in window.iter().enumerate() {
            let error = y - (incline * i as f64 + intercept);
            let sign = if error >= 0.0 { 1.0 } else { -1.0 };
            grad_incline -= sign * i as f64;
            grad_intercept -= sign;
        }
        grad_incline /= count;
        grad_intercept /= count;

        let next_incline = incline - MAE_LEARNING_RATE * grad_incline;
        let next_intercept = intercept - MAE_LEARNING_RATE * grad_intercept;
        if (next_incline - incline).abs() < MAE_TOLERANCE
            && (next_intercept - intercept).abs() < MAE_TOLERANCE
        {
            break;
        }
        incline = next_incline;
        intercept = next_intercept;
    }

    LineFit { incline, intercept }
}

/// Clamp without panicking on an inverted range
fn clamp_incline(incline: f64, max_incline: f64) -> f64 {
    if incline > max_incline {
        max_incline
    } else if incline < -max_incline {
        -max_incline
    } else {
        incline
    }
}

/// Windowed line-fitting filter
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::Filter;
/// use rust_filters::preprocessing::filter::linear_approximation::{
///     LinearApproximationFilter, LinearApproximationSettings,
/// };
///
/// let settings = LinearApproximationSettings {
///     stabilization: false,
///     max_incline: 10.0,
///     window_size: 4,
///     ..LinearApproximationSettings::default()
/// };
/// let mut filter = LinearApproximationFilter::new(settings);
/// filter.set_signal(vec![0.0, 1.0, 2.0, 3.0]);
/// filter.apply_filter();
/// let out = filter.get_signal();
/// assert!((out[3] - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LinearApproximationFilter {
    original: SignalContainer,
    filtered: SignalContainer,
    settings: LinearApproximationSettings,
}

impl LinearApproximationFilter {
    pub fn new(settings: LinearApproximationSettings) -> Self {
        Self::with_signal(SignalContainer::new(), settings)
    }

    pub fn with_signal(original: SignalContainer, settings: LinearApproximationSettings) -> Self {
        Self {
            original,
            filtered: SignalContainer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> LinearApproximationSettings {
        self.settings
    }

    fn fit(&self, window: &[f64]) -> LineFit {
        match self.settings.error_estimate {
            ErrorEstimate::Mse | ErrorEstimate::Rmse => least_squares_fit(window),
            ErrorEstimate::Mae => mae_fit(window),
        }
    }

    fn effective_window(&self, len: usize) -> usize {
        match usize::try_from(self.settings.window_size) {
            Ok(w) if w > 0 && w <= len => w,
            _ => len,
        }
    }
}

impl Filter for LinearApproximationFilter {
    fn apply_filter(&mut self) {
        let samples = self.original.as_slice();
        let n = samples.len();
        if n == 0 {
            log::debug!("linear_approximation: empty signal, filter skipped");
            return;
        }

        if self.settings.linearization == LinearizationType::Parabolic {
            log::warn!("linear_approximation: parabolic linearization is not supported, output zeroed");
            self.filtered.set_signal(vec![0.0; n]);
            return;
        }

        let window = self.effective_window(n);
        let mut output = vec![0.0; n];
        let mut incline_sum = 0.0;
        let mut window_count = 0usize;

        // Windows are laid out from the end of the signal
        let mut end = n;
        while end > 0 {
            let len = window.min(end);
            let start = end - len;
            let fit = self.fit(&samples[start..end]);
            let incline = clamp_incline(fit.incline, self.settings.max_incline);
            for (i, value) in output[start..end].iter_mut().enumerate() {
                *value = incline * i as f64 + fit.intercept;
            }
            incline_sum += incline;
            window_count += 1;
            end = start;
        }

        if self.settings.stabilization {
            let average_incline = incline_sum / window_count as f64;
            if average_incline.abs() < self.settings.stabilization_threshold {
                let mean = helpers::mean(&output).unwrap_or(0.0);
                log::debug!(
                    "linear_approximation: average incline {} below {}, removing offset {}",
                    average_incline,
                    self.settings.stabilization_threshold,
                    mean
                );
                output.iter_mut().for_each(|v| *v -= mean);
            }
        }

        self.filtered.set_signal(output);
    }

    fn name(&self) -> &'static str {
        "linear_approximation"
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
    use approx::assert_abs_diff_eq;

    fn settings(window_size: i64, max_incline: f64) -> LinearApproximationSettings {
        LinearApproximationSettings {
            stabilization: false,
            stabilization_threshold: 0.0,
            max_incline,
            window_size,
            error_estimate: ErrorEstimate::Mse,
            linearization: LinearizationType::Linear,
        }
    }

    fn run(samples: Vec<f64>, settings: LinearApproximationSettings) -> Vec<f64> {
        let mut filter =
            LinearApproximationFilter::with_signal(SignalContainer::from_vec(samples), settings);
        filter.apply_filter();
        filter.get_signal()
    }

    #[test]
    fn test_exact_line_is_reproduced() {
        let input: Vec<f64> = (0..9).map(|i| 0.5 * i as f64 - 1.0).collect();
        let out = run(input.clone(), settings(3, 1.0));
        for (o, i) in out.iter().zip(&input) {
            assert_abs_diff_eq!(o, i, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_windows_start_from_the_end() {
        // 5 samples, window 2: windows [3..5], [1..3], [0..1]
        let input = vec![7.0, 0.0, 2.0, 10.0, 14.0];
        let out = run(input, settings(2, 100.0));
        assert_abs_diff_eq!(out[0], 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[3], 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[4], 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_incline_is_clamped() {
        let input: Vec<f64> = (0..6).map(|i| 10.0 * i as f64).collect();
        let max_incline = 0.5;
        let out = run(input, settings(3, max_incline));
        for window in out.chunks(3) {
            for pair in window.windows(2) {
                assert!((pair[1] - pair[0]).abs() <= max_incline + 1e-12);
            }
        }
    }

    #[test]
    fn test_single_sample_window_has_zero_incline() {
        let fit = least_squares_fit(&[4.0]);
        assert_eq!(fit.incline, 0.0);
        assert_abs_diff_eq!(fit.intercept, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_or_oversized_window_uses_whole_signal() {
        let input = vec![1.0, 2.0, 3.0, 4.0];
        let whole = run(input.clone(), settings(4, 10.0));
        assert_eq!(run(input.clone(), settings(0, 10.0)), whole);
        assert_eq!(run(input.clone(), settings(-2, 10.0)), whole);
        assert_eq!(run(input, settings(50, 10.0)), whole);
    }

    #[test]
    fn test_mae_fit_moves_towards_the_data() {
        let mut s = settings(4, 10.0);
        s.error_estimate = ErrorEstimate::Mae;
        let out = run(vec![1.0, 1.0, 1.0, 1.0], s);
        // The flat line at zero has a mean absolute error of 1
        let mae = out.iter().map(|v| (v - 1.0).abs()).sum::<f64>() / out.len() as f64;
        assert!(mae < 0.5, "mean absolute error {} did not decrease", mae);
    }

    #[test]
    fn test_stabilization_removes_offset_on_flat_fit() {
        let mut s = settings(4, 10.0);
        s.stabilization = true;
        s.stabilization_threshold = 0.01;
        let out = run(vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0], s);
        for v in out {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
        }

        // A steep fit keeps its offset
        let out = run(vec![0.0, 1.0, 2.0, 3.0], s);
        assert_abs_diff_eq!(out[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[3], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parabolic_publishes_zeros() {
        let mut s = settings(3, 1.0);
        s.linearization = LinearizationType::Parabolic;
        let mut filter = LinearApproximationFilter::new(s);
        filter.filtered_mut().set_signal(vec![9.0]);
        filter.set_signal(vec![1.0, 2.0, 3.0]);
        filter.apply_filter();
        assert_eq!(filter.get_signal(), vec![0.0; 3]);

        // Empty input still leaves the previous output in place
        filter.set_signal(Vec::new());
        filter.apply_filter();
        assert_eq!(filter.get_signal(), vec![0.0; 3]);
    }

    #[test]
    fn test_empty_signal_is_a_no_op() {
        let mut filter = LinearApproximationFilter::new(settings(3, 1.0));
        filter.filtered_mut().set_signal(vec![9.0]);
        filter.apply_filter();
        assert_eq!(filter.get_signal(), vec![9.0]);
    }
}

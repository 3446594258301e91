// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Haar wavelet threshold filter
//!
//! The signal is padded to the next power of two by repeating its last
//! sample, decomposed into a Haar pyramid of `depth` levels, the detail
//! coefficients are thresholded and the pyramid is reconstructed.
//!
//! # Pyramid layout
//!
//! At level `l` the active range is the first `m = N / 2^l` entries of the
//! buffer. Adjacent pairs `(a, b)` of that range are replaced by the
//! approximation `(a + b) / √2`, stored in the first half of the range, and
//! the detail `(a - b) / √2`, stored in the second half. Level `l + 1` then
//! works on the approximations only.
//!
//! ```text
//! level 0: [x0 x1 x2 x3 x4 x5 x6 x7]
//! level 1: [a0 a1 a2 a3 | d0 d1 d2 d3]
//! level 2: [aa0 aa1 | ad0 ad1 | d0 d1 d2 d3]
//! ```
//!
//! # Thresholding
//!
//! - **Hard**: details with `|d| < t` are zeroed, the others pass unchanged,
//!   with `t` the configured threshold.
//! - **Soft**: details with `|d| < t` are zeroed, the others are shrunk
//!   towards zero by `t`. The threshold is derived from the data,
//!   `t = sqrt(var(x) * 2 * log10(n))`, and the configured value is ignored.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use super::Filter;
use crate::signal::SignalContainer;
use crate::utility::helpers;

/// Detail-coefficient thresholding policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    Soft,
    Hard,
}

/// Settings of a [`WaveletThresholdFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveletSettings {
    pub threshold_mode: ThresholdMode,
    /// Threshold used in hard mode
    pub threshold: f64,
    /// Reported by `settings()`; the transform does not use it
    pub filtering_window: i64,
    /// Number of pyramid levels
    pub depth: i64,
}

impl Default for WaveletSettings {
    fn default() -> Self {
        Self {
            threshold_mode: ThresholdMode::Soft,
            threshold: 0.0,
            filtering_window: 0,
            depth: 1,
        }
    }
}

/// In-place forward Haar pyramid over `depth` levels
///
/// `buffer.len()` should be a power of two; levels whose active range would
/// drop below two entries are skipped.
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::wavelet::haar_decompose;
///
/// let mut buffer = vec![1.0, 3.0];
/// haar_decompose(&mut buffer, 1);
/// let s = std::f64::consts::SQRT_2;
/// assert!((buffer[0] - 4.0 / s).abs() < 1e-12);
/// assert!((buffer[1] + 2.0 / s).abs() < 1e-12);
/// ```
pub fn haar_decompose(buffer: &mut [f64], depth: usize) {
    let mut scratch = vec![0.0; buffer.len()];
    for level in 0..depth {
        let m = buffer.len() >> level;
        if m < 2 {
            break;
        }
        let half = m / 2;
        for i in 0..half {
            let (a, b) = (buffer[2 * i], buffer[2 * i + 1]);
            scratch[i] = (a + b) / SQRT_2;
            scratch[half + i] = (a - b) / SQRT_2;
        }
        buffer[..m].copy_from_slice(&scratch[..m]);
    }
}

/// In-place inverse of [`haar_decompose`]
pub fn haar_reconstruct(buffer: &mut [f64], depth: usize) {
    let mut scratch = vec![0.0; buffer.len()];
    for level in (0..depth).rev() {
        let m = buffer.len() >> level;
        if m < 2 {
            continue;
        }
        let half = m / 2;
        for i in 0..half {
            let (a, d) = (buffer[i], buffer[half + i]);
            scratch[2 * i] = (a + d) / SQRT_2;
            scratch[2 * i + 1] = (a - d) / SQRT_2;
        }
        buffer[..m].copy_from_slice(&scratch[..m]);
    }
}

/// Haar multiresolution denoiser
///
/// Output length is the input length rounded up to a power of two.
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::Filter;
/// use rust_filters::preprocessing::filter::wavelet::{ThresholdMode, WaveletSettings, WaveletThresholdFilter};
///
/// let settings = WaveletSettings {
///     threshold_mode: ThresholdMode::Hard,
///     threshold: 0.0,
///     filtering_window: 0,
///     depth: 1,
/// };
/// let mut filter = WaveletThresholdFilter::new(settings);
/// filter.set_signal(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
/// filter.apply_filter();
/// for (out, expected) in filter.get_signal().iter().zip(1..=8) {
///     assert!((out - expected as f64).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WaveletThresholdFilter {
    original: SignalContainer,
    filtered: SignalContainer,
    settings: WaveletSettings,
}

impl WaveletThresholdFilter {
    pub fn new(settings: WaveletSettings) -> Self {
        Self::with_signal(SignalContainer::new(), settings)
    }

    pub fn with_signal(original: SignalContainer, settings: WaveletSettings) -> Self {
        Self {
            original,
            filtered: SignalContainer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> WaveletSettings {
        self.settings
    }

    /// Check the length/depth preconditions, returning the usable depth
    fn checked_depth(&self, len: usize) -> Option<usize> {
        if len < 2 {
            log::warn!("wavelet: signal of length {} is too short, filter skipped", len);
            return None;
        }
        let depth = match usize::try_from(self.settings.depth) {
            Ok(depth) => depth,
            Err(_) => {
                log::warn!(
                    "wavelet: negative depth {}, filter skipped",
                    self.settings.depth
                );
                return None;
            }
        };
        let divisible = u32::try_from(depth)
            .ok()
            .and_then(|d| 1usize.checked_shl(d))
            .is_some_and(|step| step <= len && len % step == 0);
        if !divisible {
            log::warn!(
                "wavelet: length {} is not divisible by 2^{}, filter skipped",
                len,
                depth
            );
            return None;
        }
        Some(depth)
    }

    /// Threshold applied to the detail bands
    fn threshold(&self, samples: &[f64]) -> f64 {
        match self.settings.threshold_mode {
            ThresholdMode::Hard => self.settings.threshold,
            ThresholdMode::Soft => {
                let variance = helpers::variance(samples).unwrap_or(0.0);
                (variance * 2.0 * (samples.len() as f64).log10()).sqrt()
            }
        }
    }

    fn shrink(&self, value: f64, threshold: f64) -> f64 {
        if value.abs() < threshold {
            return 0.0;
        }
        match self.settings.threshold_mode {
            ThresholdMode::Hard => value,
            ThresholdMode::Soft => value - value.signum() * threshold,
        }
    }
}

/// Copy of `samples` padded to the next power of two with its last sample
fn pad_to_power_of_two(samples: &[f64]) -> Vec<f64> {
    let target = samples.len().next_power_of_two();
    let mut padded = samples.to_vec();
    if let Some(&last) = samples.last() {
        padded.resize(target, last);
    }
    padded
}

impl Filter for WaveletThresholdFilter {
    fn apply_filter(&mut self) {
        let samples = self.original.as_slice();
        let Some(depth) = self.checked_depth(samples.len()) else {
            return;
        };

        let threshold = self.threshold(samples);
        let mut buffer = pad_to_power_of_two(samples);
        log::trace!(
            "wavelet: {} samples padded to {}, depth {}, threshold {}",
            samples.len(),
            buffer.len(),
            depth,
            threshold
        );

        haar_decompose(&mut buffer, depth);

        // Every detail band sits after the deepest approximation band
        let approximation_len = buffer.len() >> depth;
        for value in buffer[approximation_len..].iter_mut() {
            *value = self.shrink(*value, threshold);
        }

        haar_reconstruct(&mut buffer, depth);
        self.filtered.set_signal(buffer);
    }

    fn name(&self) -> &'static str {
        "wavelet"
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

    fn hard(threshold: f64, depth: i64) -> WaveletSettings {
        WaveletSettings {
            threshold_mode: ThresholdMode::Hard,
            threshold,
            filtering_window: 0,
            depth,
        }
    }

    fn run(samples: Vec<f64>, settings: WaveletSettings) -> WaveletThresholdFilter {
        let mut filter =
            WaveletThresholdFilter::with_signal(SignalContainer::from_vec(samples), settings);
        filter.apply_filter();
        filter
    }

    #[test]
    fn test_first_level_coefficients() {
        let mut buffer: Vec<f64> = (1..=8).map(|v| v as f64).collect();
        haar_decompose(&mut buffer, 1);
        for i in 0..4 {
            let (a, b) = ((2 * i + 1) as f64, (2 * i + 2) as f64);
            assert_abs_diff_eq!(buffer[i], (a + b) / SQRT_2, epsilon = 1e-12);
            assert_abs_diff_eq!(buffer[4 + i], (a - b) / SQRT_2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_round_trip_without_threshold() {
        let input = vec![0.3, -1.2, 4.5, 2.0, 0.0, 7.7, -3.1, 1.1, 5.0, 5.5, -0.4, 2.2, 9.0, 1.0, 0.0, -2.0];
        for depth in 0..=4 {
            let filter = run(input.clone(), hard(0.0, depth));
            let out = filter.get_signal();
            assert_eq!(out.len(), input.len());
            for (o, i) in out.iter().zip(&input) {
                assert_abs_diff_eq!(o, i, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_padding_repeats_last_sample() {
        // 6 samples, depth 1: 6 is divisible by 2, padded to 8
        let filter = run(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], hard(0.0, 1));
        let out = filter.get_signal();
        assert_eq!(out.len(), 8);
        assert_abs_diff_eq!(out[6], 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[7], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hard_threshold_removes_small_details() {
        // Pairs differ by 0.2: detail 0.2/√2 < 0.5 is zeroed, pairs collapse to their mean
        let filter = run(vec![1.0, 1.2, 3.0, 3.2], hard(0.5, 1));
        let out = filter.get_signal();
        assert_abs_diff_eq!(out[0], 1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2], 3.1, epsilon = 1e-12);
        assert_abs_diff_eq!(out[3], 3.1, epsilon = 1e-12);
    }

    #[test]
    fn test_soft_threshold_ignores_configured_value() {
        let settings = WaveletSettings {
            threshold_mode: ThresholdMode::Soft,
            threshold: 1e9,
            filtering_window: 3,
            depth: 1,
        };
        // Constant signal: data-driven threshold is zero, output equals input
        let filter = run(vec![2.0; 8], settings);
        for v in filter.get_signal() {
            assert_abs_diff_eq!(v, 2.0, epsilon = 1e-12);
        }
        assert_eq!(filter.settings().filtering_window, 3);
    }

    #[test]
    fn test_soft_threshold_shrinks_details() {
        let settings = WaveletSettings {
            threshold_mode: ThresholdMode::Soft,
            ..WaveletSettings::default()
        };
        let input = vec![0.0, 4.0];
        // variance 4, t = sqrt(4 * 2 * log10(2))
        let t = (8.0 * 2f64.log10()).sqrt();
        let detail = -4.0 / SQRT_2;
        let shrunk = detail + t;
        let approximation = 4.0 / SQRT_2;
        let filter = run(input, settings);
        let out = filter.get_signal();
        assert_abs_diff_eq!(out[0], (approximation + shrunk) / SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], (approximation - shrunk) / SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_precondition_failures_leave_filtered_untouched() {
        let cases = vec![
            (vec![1.0], hard(0.0, 0)),
            (vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], hard(0.0, 2)),
            (vec![1.0, 2.0, 3.0, 4.0], hard(0.0, -1)),
            (vec![1.0, 2.0, 3.0, 4.0], hard(0.0, 3)),
            (vec![1.0, 2.0, 3.0, 4.0], hard(0.0, 200)),
        ];
        for (input, settings) in cases {
            let mut filter = WaveletThresholdFilter::new(settings);
            filter.filtered_mut().set_signal(vec![-1.0]);
            filter.set_signal(input);
            filter.apply_filter();
            assert_eq!(filter.get_signal(), vec![-1.0]);
        }
    }
}

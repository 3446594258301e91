// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Denoising filters for scalar sample sequences
//!
//! Every filter owns two [`SignalContainer`]s: the *original* signal it reads
//! and the *filtered* signal it writes. All filters implement the [`Filter`]
//! trait, which is what [`crate::processing::FilterChain`] composes.
//!
//! # Filter Types
//!
//! - **[`moving_average::MovingAverageFilter`]**: windowed arithmetic mean with a running-mean warm-up
//! - **[`exponential_smoothing::ExponentialSmoothingFilter`]**: recursive smoothing whose factor adapts to the signal environment
//! - **[`median::MedianFilter`]**: sliding-window order statistic
//! - **[`wavelet::WaveletThresholdFilter`]**: Haar pyramid with soft or hard detail thresholding
//! - **[`linear_approximation::LinearApproximationFilter`]**: piecewise linear regression with slope clamping
//!
//! # Precondition failures
//!
//! Settings are never validated at construction. When a precondition does
//! not hold at apply time (non-positive window, mismatched smoothing factors,
//! incompatible wavelet length) `apply_filter` returns without touching the
//! filtered container, so a caller sees the previous filtered state.
//!
//! # Examples
//!
//! ```
//! use rust_filters::preprocessing::filter::{Filter, moving_average::{MovingAverageFilter, MovingAverageSettings}};
//!
//! let mut filter = MovingAverageFilter::new(MovingAverageSettings { window_size: 3 });
//! filter.set_signal(vec![5.0, 5.0, 5.0, 5.0, 5.0]);
//! filter.apply_filter();
//! assert_eq!(filter.get_signal(), vec![5.0; 5]);
//! ```

pub mod exponential_smoothing;
pub mod linear_approximation;
pub mod median;
pub mod moving_average;
pub mod wavelet;

use crate::signal::SignalContainer;

/// Common contract of every denoising filter
///
/// Implementors only provide access to their two containers, a kind name and
/// the algorithm itself; signal exchange is provided by default methods.
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::filter::{Filter, median::{MedianFilter, MedianSettings}};
///
/// let mut filter: Box<dyn Filter> = Box::new(MedianFilter::new(MedianSettings { window_size: 3 }));
/// filter.set_signal(vec![1.0, 9.0, 2.0, 3.0]);
/// filter.apply_filter();
/// assert_eq!(filter.name(), "median");
/// assert_eq!(filter.filtered().len(), 4);
/// ```
pub trait Filter: Send + Sync {
    /// Run the filter over the original container and store the result in
    /// the filtered container
    ///
    /// Returns silently, leaving the filtered container as it was, when the
    /// filter preconditions are not met.
    fn apply_filter(&mut self);

    /// Stable kind name used in logs and configuration (`"median"`, ...)
    fn name(&self) -> &'static str;

    /// The container read by [`Filter::apply_filter`]
    fn original(&self) -> &SignalContainer;

    fn original_mut(&mut self) -> &mut SignalContainer;

    /// The container written by [`Filter::apply_filter`]
    fn filtered(&self) -> &SignalContainer;

    fn filtered_mut(&mut self) -> &mut SignalContainer;

    /// Replace the original signal
    ///
    /// ### Arguments
    ///
    /// * `samples` - New input sequence; the filtered container is left untouched
    fn set_signal(&mut self, samples: Vec<f64>) {
        self.original_mut().set_signal(samples);
    }

    /// Copy of the filtered signal
    fn get_signal(&self) -> Vec<f64> {
        self.filtered().get_signal()
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Signal preprocessing module
//!
//! This module holds the denoising filters applied to raw sensor channels
//! and small factory helpers returning them as boxed [`Filter`] objects.

pub mod filter;

pub use filter::exponential_smoothing::{
    Environment, ExponentialSmoothingFilter, ExponentialSmoothingSettings,
};
pub use filter::linear_approximation::{
    ErrorEstimate, LinearApproximationFilter, LinearApproximationSettings, LinearizationType,
};
pub use filter::median::{MedianFilter, MedianSettings};
pub use filter::moving_average::{MovingAverageFilter, MovingAverageSettings};
pub use filter::wavelet::{ThresholdMode, WaveletSettings, WaveletThresholdFilter};
pub use filter::Filter;

/// Create a moving average filter
pub fn create_moving_average_filter(settings: MovingAverageSettings) -> Box<dyn Filter> {
    Box::new(MovingAverageFilter::new(settings))
}

/// Create an adaptive exponential smoothing filter
pub fn create_exponential_smoothing_filter(
    settings: ExponentialSmoothingSettings,
) -> Box<dyn Filter> {
    Box::new(ExponentialSmoothingFilter::new(settings))
}

/// Create a sliding-window median filter
pub fn create_median_filter(settings: MedianSettings) -> Box<dyn Filter> {
    Box::new(MedianFilter::new(settings))
}

/// Create a Haar wavelet threshold filter
pub fn create_wavelet_filter(settings: WaveletSettings) -> Box<dyn Filter> {
    Box::new(WaveletThresholdFilter::new(settings))
}

/// Create a piecewise linear approximation filter
pub fn create_linear_approximation_filter(
    settings: LinearApproximationSettings,
) -> Box<dyn Filter> {
    Box::new(LinearApproximationFilter::new(settings))
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust filters library
//!
//! Offline smoothing and denoising filters for finite real-valued signals,
//! composable into filter chains, with the plumbing needed to run them over
//! gyroscope/accelerometer recordings.
//!
//! - [`signal`]: the [`SignalContainer`] holding samples and their statistics
//! - [`preprocessing`]: the [`Filter`] trait and the five filters
//! - [`processing`]: [`FilterChain`] and the per-channel [`processing::SensorPipeline`]
//! - [`config`]: YAML description of a pipeline
//! - [`acquisition`]: inertial record parsing and bounded channel history
//!
//! ### Examples
//!
//! ```
//! use rust_filters::preprocessing::{create_median_filter, MedianSettings};
//! use rust_filters::FilterChain;
//!
//! let mut chain = FilterChain::new();
//! chain.add_filter(create_median_filter(MedianSettings { window_size: 3 }));
//! chain.set_signal(vec![1.0, 9.0, 1.0, 1.0]);
//! chain.apply_filters();
//! assert_eq!(chain.get_filtered_signal().len(), 4);
//! ```

pub mod acquisition;
pub mod config;
pub mod error;
pub mod preprocessing;
pub mod processing;
pub mod signal;
pub mod utility;

pub use error::{FilterError, FilterResult};
pub use preprocessing::Filter;
pub use processing::FilterChain;
pub use signal::SignalContainer;

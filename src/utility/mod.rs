// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Utility module for common utilities used throughout the project

pub mod helpers;
pub mod noise_generator;

// Re-exports for use in other modules
pub use helpers::{mean, sorted, tim_sort, tim_sort_with_run, variance};
pub use noise_generator::NoiseGenerator;

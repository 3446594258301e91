// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error types for the filter library
//!
//! Only caller misuse is reported through [`FilterError`]. Filters whose
//! preconditions are not met do not fail: their `apply_filter` returns
//! without touching the filtered container.

use thiserror::Error;

/// Errors raised by signal containers, filter chains and record parsing
#[derive(Error, Debug)]
pub enum FilterError {
    /// An index was outside `0..len`
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An input record could not be parsed
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// Reading the record stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the library
pub type FilterResult<T> = Result<T, FilterError>;

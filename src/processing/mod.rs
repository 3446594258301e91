// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Processing Module
//!
//! Composition of preprocessing filters into a single end-to-end transform.
//!
//! - **[`FilterChain`]**: ordered list of filters, each fed with the output of
//!   the previous one; can be assembled by hand or described in the YAML
//!   configuration (see [`crate::config::FilterConfig`])
//! - **[`SensorPipeline`]**: one chain per inertial channel, applied to a
//!   bounded history of that channel for every incoming record

pub mod chain;
pub mod sensor;

pub use chain::FilterChain;
pub use sensor::SensorPipeline;

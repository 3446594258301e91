// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the filter driver
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against an embedded JSON schema before deserialization.
//!
//! ## Configuration Structure
//!
//! - `history_length`: number of samples kept per sensor channel
//! - `sentence`: prefix written at the start of every output line
//! - `pipeline`: ordered list of filters, each tagged by its `type`
//!
//! ```yaml
//! history_length: 128
//! sentence: $GYRACC
//! pipeline:
//!   - type: median
//!     window_size: 16
//!   - type: wavelet
//!     threshold_mode: hard
//!     threshold: 0.05
//!     depth: 2
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use rust_filters::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(Some(256));
//!
//! let chain = config.build_chain();
//! println!("Pipeline: {}", chain);
//! ```

pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::preprocessing::{
    create_exponential_smoothing_filter, create_linear_approximation_filter,
    create_median_filter, create_moving_average_filter, create_wavelet_filter,
    ExponentialSmoothingSettings, Filter, LinearApproximationSettings, LinearizationType,
    MedianSettings, MovingAverageSettings, WaveletSettings,
};
use crate::processing::FilterChain;

pub use utils::{output_config_schema, validate_specific_rules};

/// Default number of samples kept per channel
pub const DEFAULT_HISTORY_LENGTH: usize = 128;

/// Largest accepted number of samples kept per channel
pub const MAX_HISTORY_LENGTH: usize = 1 << 20;

/// Default output line prefix
pub const DEFAULT_SENTENCE: &str = "$GYRACC";

/// One filter of the processing pipeline
///
/// Serialized as a map whose `type` key selects the filter kind; the other
/// keys are the fields of the corresponding settings record. Missing fields
/// take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    MovingAverage(MovingAverageSettings),
    ExponentialSmoothing(ExponentialSmoothingSettings),
    Median(MedianSettings),
    Wavelet(WaveletSettings),
    LinearApproximation(LinearApproximationSettings),
}

impl FilterConfig {
    /// Instantiate the described filter
    pub fn build(&self) -> Box<dyn Filter> {
        match self {
            FilterConfig::MovingAverage(s) => create_moving_average_filter(*s),
            FilterConfig::ExponentialSmoothing(s) => create_exponential_smoothing_filter(*s),
            FilterConfig::Median(s) => create_median_filter(*s),
            FilterConfig::Wavelet(s) => create_wavelet_filter(*s),
            FilterConfig::LinearApproximation(s) => create_linear_approximation_filter(*s),
        }
    }

    /// Kind name, identical to the `type` tag and to [`Filter::name`]
    pub fn kind(&self) -> &'static str {
        match self {
            FilterConfig::MovingAverage(_) => "moving_average",
            FilterConfig::ExponentialSmoothing(_) => "exponential_smoothing",
            FilterConfig::Median(_) => "median",
            FilterConfig::Wavelet(_) => "wavelet",
            FilterConfig::LinearApproximation(_) => "linear_approximation",
        }
    }

    /// Describe why the filter will skip every call, if its settings make it inert
    ///
    /// Filters accept any settings; this is only used to warn the user.
    pub fn inert_reason(&self) -> Option<String> {
        match self {
            FilterConfig::MovingAverage(s) if s.window_size <= 0 => {
                Some(format!("window_size {} is not positive", s.window_size))
            }
            FilterConfig::Median(s) if s.window_size <= 0 => {
                Some(format!("window_size {} is not positive", s.window_size))
            }
            FilterConfig::ExponentialSmoothing(s) if !s.factors_are_consistent() => Some(format!(
                "maximal_factor + standard_factor = {} instead of 1.0",
                s.maximal_factor + s.standard_factor
            )),
            FilterConfig::Wavelet(s) if s.depth < 0 => {
                Some(format!("depth {} is negative", s.depth))
            }
            FilterConfig::LinearApproximation(s)
                if s.linearization == LinearizationType::Parabolic =>
            {
                Some("parabolic linearization is not supported, output is zero".to_string())
            }
            _ => None,
        }
    }
}

fn default_history_length() -> usize {
    DEFAULT_HISTORY_LENGTH
}

fn default_sentence() -> String {
    DEFAULT_SENTENCE.to_string()
}

fn default_pipeline() -> Vec<FilterConfig> {
    vec![FilterConfig::Median(MedianSettings::default())]
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of samples kept per sensor channel; older samples are dropped
    #[serde(default = "default_history_length")]
    pub history_length: usize,

    /// Prefix of every output line
    #[serde(default = "default_sentence")]
    pub sentence: String,

    /// Filters applied to every channel, in order
    #[serde(default = "default_pipeline")]
    pub pipeline: Vec<FilterConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_length: default_history_length(),
            sentence: default_sentence(),
            pipeline: default_pipeline(),
        }
    }
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with the default configuration, which is
    /// then returned. An invalid file produces an error and a
    /// `<name>.sample.yaml` file holding the defaults next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        Self::from_yaml_str(&contents).or_else(|err| {
            error!("Invalid configuration in {}: {:#}", path.display(), err);
            if let Err(e) = Self::create_sample_config(path) {
                error!("Failed to create sample config: {}", e);
            }
            Err(err.context(format!("Invalid configuration file {}", path.display())))
        })
    }

    /// Parse and validate configuration text
    ///
    /// The YAML is checked against the embedded JSON schema, deserialized and
    /// then checked with [`validate_specific_rules`].
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // First step: convert YAML to a generic Value
        let yaml_value: serde_yml::Value =
            serde_yml::from_str(contents).context("Failed to parse YAML configuration")?;

        // Convert to JSON Value for validation
        let json_value = serde_json::to_value(&yaml_value)
            .context("Failed to convert YAML to JSON for validation")?;

        let schema: serde_json::Value =
            serde_json::from_str(utils::CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating configuration against schema");
        if let Err(error) = validator.validate(&json_value) {
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config =
            serde_yml::from_str(contents).context("Failed to deserialize configuration")?;

        validate_specific_rules(&config)?;
        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// # Parameters
    ///
    /// * `history_length` - Optional number of samples kept per channel
    pub fn apply_args(&mut self, history_length: Option<usize>) {
        if let Some(history_length) = history_length {
            debug!(
                "Overriding history length from command line: {}",
                history_length
            );
            self.history_length = history_length;
        }
    }

    /// Build a fresh filter chain from the pipeline description
    pub fn build_chain(&self) -> FilterChain {
        FilterChain::from_configs(&self.pipeline)
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, MAX_HISTORY_LENGTH};

/// JSON schema embedded at build time
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line. It outputs the full JSON schema for the configuration
/// to stdout, formatted for readability.
///
/// # Example
///
/// ```bash
/// ./rust_filters --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    // Parse the schema to a JSON Value to pretty-format it
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Arguments
///
/// * `config` - The configuration object to validate
///
/// # Returns
///
/// * `Ok(())` if all validations pass
/// * `Err(anyhow::Error)` with descriptive message if any validation fails
///
/// # Validation Rules
///
/// - **History length**: between 1 and [`MAX_HISTORY_LENGTH`] samples per channel
/// - **Sentence**: must be non-empty and must not contain the field separator `,`
/// - **Pipeline**: filters never reject their settings; settings that make a
///   filter skip every call are only reported with a warning
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    if !(1..=MAX_HISTORY_LENGTH).contains(&config.history_length) {
        anyhow::bail!(
            "Invalid history length: {} (expected 1 to {})",
            config.history_length,
            MAX_HISTORY_LENGTH
        );
    }

    if config.sentence.is_empty() {
        anyhow::bail!("Output sentence must not be empty");
    }

    if config.sentence.contains(',') {
        anyhow::bail!(
            "Output sentence {:?} must not contain the field separator ','",
            config.sentence
        );
    }

    if config.pipeline.is_empty() {
        warn!("Empty pipeline: channels will be written as 0");
    }

    for (index, filter) in config.pipeline.iter().enumerate() {
        if let Some(reason) = filter.inert_reason() {
            warn!(
                "Pipeline entry {} ({}) will leave its signal unfiltered: {}",
                index,
                filter.kind(),
                reason
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(CONFIG_SCHEMA).unwrap();
        assert!(schema.get("properties").is_some());
        assert!(jsonschema::draft202012::options().build(&schema).is_ok());
    }

    #[test]
    fn test_sentence_rules() {
        let mut config = Config::default();
        assert!(validate_specific_rules(&config).is_ok());

        config.sentence = "$A,B".to_string();
        assert!(validate_specific_rules(&config).is_err());

        config.sentence = String::new();
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_history_length_rule() {
        let mut config = Config {
            history_length: 0,
            ..Config::default()
        };
        assert!(validate_specific_rules(&config).is_err());

        config.history_length = MAX_HISTORY_LENGTH;
        assert!(validate_specific_rules(&config).is_ok());

        config.history_length = usize::MAX;
        assert!(validate_specific_rules(&config).is_err());
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Per-channel filtering of inertial records
//!
//! [`SensorPipeline`] keeps a bounded history of each sensor channel and one
//! [`FilterChain`] per channel. Every new record is appended to the
//! histories, each chain is applied to its whole history and the last
//! filtered sample of every channel is returned.

use std::array;

use crate::acquisition::{InertialRecord, SensorHistory, CHANNEL_COUNT};
use crate::config::{Config, FilterConfig};
use crate::processing::FilterChain;

/// Bounded histories and filter chains for the six sensor channels
pub struct SensorPipeline {
    history: SensorHistory,
    chains: [FilterChain; CHANNEL_COUNT],
    processed: u64,
}

impl SensorPipeline {
    /// Create a pipeline keeping `history_length` samples per channel
    pub fn new(history_length: usize, pipeline: &[FilterConfig]) -> Self {
        Self {
            history: SensorHistory::new(history_length),
            chains: array::from_fn(|_| FilterChain::from_configs(pipeline)),
            processed: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.history_length, &config.pipeline)
    }

    /// Push a record and filter every channel history
    ///
    /// ### Returns
    ///
    /// The last filtered sample of each channel, `None` where the chain
    /// produced no output
    pub fn process(&mut self, record: &InertialRecord) -> [Option<f64>; CHANNEL_COUNT] {
        self.history.push(record);
        self.processed += 1;

        let mut outputs = [None; CHANNEL_COUNT];
        for ((chain, history), output) in self
            .chains
            .iter_mut()
            .zip(self.history.channels())
            .zip(outputs.iter_mut())
        {
            chain.set_signal(history.to_vec());
            chain.apply_filters();
            *output = chain.filtered().last();
        }
        outputs
    }

    /// Number of records processed so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn history(&self) -> &SensorHistory {
        &self.history
    }

    pub fn chain(&self, channel: usize) -> Option<&FilterChain> {
        self.chains.get(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::MovingAverageSettings;

    fn record(t: f64, value: f64) -> InertialRecord {
        InertialRecord {
            timestamp: t,
            channels: [value; CHANNEL_COUNT],
        }
    }

    #[test]
    fn test_empty_pipeline_yields_no_values() {
        let mut pipeline = SensorPipeline::new(4, &[]);
        assert_eq!(pipeline.process(&record(0.0, 1.0)), [None; CHANNEL_COUNT]);
        assert_eq!(pipeline.processed(), 1);
    }

    #[test]
    fn test_moving_average_over_bounded_history() {
        let configs = [FilterConfig::MovingAverage(MovingAverageSettings {
            window_size: 2,
        })];
        let mut pipeline = SensorPipeline::new(3, &configs);

        assert_eq!(pipeline.process(&record(0.0, 2.0))[0], Some(2.0));
        assert_eq!(pipeline.process(&record(1.0, 4.0))[0], Some(3.0));
        assert_eq!(pipeline.process(&record(2.0, 8.0))[3], Some(6.0));
        // History is now [4, 8, 16]
        assert_eq!(pipeline.process(&record(3.0, 16.0))[5], Some(12.0));
        assert_eq!(
            pipeline.history().channel(0).map(|c| c.to_vec()),
            Some(vec![4.0, 8.0, 16.0])
        );
        assert_eq!(
            pipeline.chain(0).map(|c| c.filter_names()),
            Some(vec!["moving_average"])
        );
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Bounded per-channel sample history

use std::collections::VecDeque;

use super::record::{InertialRecord, CHANNEL_COUNT};

/// Most recent samples of one channel, oldest first
///
/// Once `capacity` samples are stored, pushing a new sample drops the oldest.
///
/// ### Examples
///
/// ```
/// use rust_filters::acquisition::ChannelHistory;
///
/// let mut history = ChannelHistory::new(2);
/// history.push(1.0);
/// history.push(2.0);
/// history.push(3.0);
/// assert_eq!(history.to_vec(), vec![2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistory {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl ChannelHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::new(),
        }
    }

    /// Append a sample, dropping the oldest ones beyond the capacity
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copy of the stored samples, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// One [`ChannelHistory`] per sensor channel
#[derive(Debug, Clone, PartialEq)]
pub struct SensorHistory {
    channels: [ChannelHistory; CHANNEL_COUNT],
}

impl SensorHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: std::array::from_fn(|_| ChannelHistory::new(capacity)),
        }
    }

    /// Push every channel of `record` into its history
    pub fn push(&mut self, record: &InertialRecord) {
        for (history, value) in self.channels.iter_mut().zip(record.channels) {
            history.push(value);
        }
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelHistory> {
        self.channels.get(index)
    }

    pub fn channels(&self) -> &[ChannelHistory; CHANNEL_COUNT] {
        &self.channels
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Sequential composition of filters
//!
//! A [`FilterChain`] owns an ordered list of boxed filters and two
//! containers: the chain input and the chain output. Applying the chain feeds
//! the filtered signal of filter `i` as the original signal of filter `i + 1`
//! and stores the last filtered signal as the chain output.

use std::fmt;

use crate::config::FilterConfig;
use crate::error::{FilterError, FilterResult};
use crate::preprocessing::Filter;
use crate::signal::SignalContainer;

/// Ordered list of filters applied one after the other
///
/// ### Examples
///
/// ```
/// use rust_filters::preprocessing::{create_median_filter, create_moving_average_filter};
/// use rust_filters::preprocessing::{MedianSettings, MovingAverageSettings};
/// use rust_filters::processing::FilterChain;
///
/// let mut chain = FilterChain::new();
/// chain.add_filter(create_median_filter(MedianSettings { window_size: 3 }));
/// chain.add_filter(create_moving_average_filter(MovingAverageSettings { window_size: 2 }));
/// chain.set_signal(vec![1.0, 5.0, 2.0, 8.0, 3.0]);
/// chain.apply_filters();
/// assert_eq!(chain.get_filtered_signal(), vec![5.0, 6.5, 8.0, 8.0, 8.0]);
/// ```
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
    original: SignalContainer,
    filtered: SignalContainer,
}

impl FilterChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from an ordered list of filter descriptions
    ///
    /// ### Arguments
    ///
    /// * `configs` - Filter descriptions, in application order
    pub fn from_configs(configs: &[FilterConfig]) -> Self {
        let mut chain = Self::new();
        for config in configs {
            chain.add_filter(config.build());
        }
        log::debug!("Built filter chain: {}", chain);
        chain
    }

    /// Append a filter at the end of the chain
    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    /// Remove and return the filter at `index`
    ///
    /// ### Returns
    ///
    /// The removed filter, or [`FilterError::IndexOutOfRange`] if there is no
    /// filter at `index`
    pub fn remove_filter(&mut self, index: usize) -> FilterResult<Box<dyn Filter>> {
        if index >= self.filters.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.filters.len(),
            });
        }
        Ok(self.filters.remove(index))
    }

    pub fn filter(&self, index: usize) -> FilterResult<&dyn Filter> {
        let len = self.filters.len();
        self.filters
            .get(index)
            .map(|f| f.as_ref())
            .ok_or(FilterError::IndexOutOfRange { index, len })
    }

    pub fn filter_mut(&mut self, index: usize) -> FilterResult<&mut Box<dyn Filter>> {
        let len = self.filters.len();
        self.filters
            .get_mut(index)
            .ok_or(FilterError::IndexOutOfRange { index, len })
    }

    /// Remove every filter, keeping the chain containers
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Kind names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Replace the chain input signal
    pub fn set_signal(&mut self, samples: Vec<f64>) {
        self.original.set_signal(samples);
    }

    /// Copy of the chain output signal
    pub fn get_filtered_signal(&self) -> Vec<f64> {
        self.filtered.get_signal()
    }

    pub fn original(&self) -> &SignalContainer {
        &self.original
    }

    pub fn original_mut(&mut self) -> &mut SignalContainer {
        &mut self.original
    }

    pub fn filtered(&self) -> &SignalContainer {
        &self.filtered
    }

    /// Run every filter in order
    ///
    /// An empty chain leaves its output container untouched. Otherwise each
    /// filter receives the output of the previous one, starting from the
    /// chain input.
    pub fn apply_filters(&mut self) {
        if self.filters.is_empty() {
            log::debug!("apply_filters called on an empty chain");
            return;
        }

        let mut working = self.original.get_signal();
        for filter in self.filters.iter_mut() {
            filter.set_signal(working);
            filter.apply_filter();
            working = filter.get_signal();
            log::trace!("{} produced {} samples", filter.name(), working.len());
        }

        self.filtered.set_signal(working);
        self.filtered.set_timestamp(self.original.timestamp());
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filter_names())
            .field("original_len", &self.original.len())
            .field("filtered_len", &self.filtered.len())
            .finish()
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filters.is_empty() {
            return write!(f, "(empty)");
        }
        write!(f, "{}", self.filter_names().join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::{
        create_median_filter, create_moving_average_filter, MedianSettings, MovingAverageSettings,
    };

    #[test]
    fn test_empty_chain_is_a_no_op() {
        let mut chain = FilterChain::new();
        chain.set_signal(vec![1.0, 2.0]);
        chain.apply_filters();
        assert!(chain.filtered().is_empty());
        assert_eq!(chain.to_string(), "(empty)");
    }

    #[test]
    fn test_empty_chain_keeps_previous_output() {
        let mut chain = FilterChain::new();
        chain.add_filter(create_moving_average_filter(MovingAverageSettings {
            window_size: 2,
        }));
        chain.set_signal(vec![2.0, 4.0, 6.0]);
        chain.apply_filters();
        assert_eq!(chain.get_filtered_signal(), vec![2.0, 3.0, 5.0]);

        chain.clear_filters();
        chain.set_signal(vec![100.0, 200.0]);
        chain.apply_filters();
        assert_eq!(chain.get_filtered_signal(), vec![2.0, 3.0, 5.0]);
        assert_eq!(chain.original().get_signal(), vec![100.0, 200.0]);
    }

    #[test]
    fn test_remove_and_access_by_index() {
        let mut chain = FilterChain::new();
        chain.add_filter(create_median_filter(MedianSettings { window_size: 3 }));
        chain.add_filter(create_moving_average_filter(MovingAverageSettings {
            window_size: 2,
        }));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.to_string(), "median -> moving_average");
        assert_eq!(chain.filter(1).map(|f| f.name()).ok(), Some("moving_average"));

        assert!(matches!(
            chain.remove_filter(5),
            Err(FilterError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(chain.filter(2).is_err());
        assert!(chain.filter_mut(2).is_err());

        let removed = chain.remove_filter(0).map(|f| f.name());
        assert_eq!(removed.ok(), Some("median"));
        assert_eq!(chain.filter_names(), vec!["moving_average"]);

        chain.clear_filters();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_filters_see_previous_output() {
        let mut chain = FilterChain::new();
        chain.add_filter(create_median_filter(MedianSettings { window_size: 3 }));
        chain.add_filter(create_moving_average_filter(MovingAverageSettings {
            window_size: 2,
        }));
        chain.set_signal(vec![1.0, 5.0, 2.0, 8.0, 3.0]);
        chain.apply_filters();

        let median_output = chain.filter(0).map(|f| f.get_signal()).ok();
        assert_eq!(median_output, Some(vec![5.0, 8.0, 8.0, 8.0, 8.0]));
        let average_input = chain.filter(1).map(|f| f.original().get_signal()).ok();
        assert_eq!(average_input, Some(vec![5.0, 8.0, 8.0, 8.0, 8.0]));
        assert_eq!(chain.get_filtered_signal(), vec![5.0, 6.5, 8.0, 8.0, 8.0]);
    }

    #[test]
    fn test_timestamp_follows_the_signal() {
        let mut chain = FilterChain::new();
        chain.add_filter(create_moving_average_filter(MovingAverageSettings {
            window_size: 1,
        }));
        chain.set_signal(vec![1.0]);
        chain.original_mut().set_timestamp(Some(1234));
        chain.apply_filters();
        assert_eq!(chain.filtered().timestamp(), Some(1234));
    }
}

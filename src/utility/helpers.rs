// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-filters project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Numeric helpers shared by the filters
//!
//! This module provides the hybrid run-based merge sort used by the median
//! filter and the population statistics used by the adaptive filters.
//!
//! # Sorting
//!
//! [`tim_sort`] splits the slice into runs of [`DEFAULT_RUN_SIZE`] elements,
//! insertion-sorts every run in place and then merges adjacent runs, doubling
//! the merged span on each pass until a single run remains. The result is a
//! stable ascending sort.
//!
//! ```
//! use rust_filters::utility::helpers::tim_sort;
//!
//! let mut window = vec![5.0, 1.0, 4.0, 2.0, 3.0];
//! tim_sort(&mut window);
//! assert_eq!(window, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
//! ```
//!
//! # Statistics
//!
//! [`variance`] is the population variance (divisor `N`), computed around the
//! arithmetic mean returned by [`mean`].

/// Number of elements insertion-sorted together before merging starts
pub const DEFAULT_RUN_SIZE: usize = 32;

/// Sort a slice of a run of values in place with insertion sort
///
/// Elements are only moved past strictly greater ones, which keeps equal
/// elements in their original order.
pub fn insertion_sort<T: PartialOrd + Copy>(values: &mut [T]) {
    for i in 1..values.len() {
        let key = values[i];
        let mut j = i;
        while j > 0 && values[j - 1] > key {
            values[j] = values[j - 1];
            j -= 1;
        }
        values[j] = key;
    }
}

/// Merge two adjacent sorted runs in place
///
/// `values[..middle]` and `values[middle..]` must both be sorted. On equal
/// elements the left run wins, so the merge is stable.
///
/// ### Arguments
///
/// * `values` - Slice holding the two runs back to back
/// * `middle` - Index where the right run starts
pub fn merge_runs<T: PartialOrd + Copy>(values: &mut [T], middle: usize) {
    if middle == 0 || middle >= values.len() {
        return;
    }

    let left: Vec<T> = values[..middle].to_vec();
    let right: Vec<T> = values[middle..].to_vec();

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            values[k] = left[i];
            i += 1;
        } else {
            values[k] = right[j];
            j += 1;
        }
        k += 1;
    }

    while i < left.len() {
        values[k] = left[i];
        i += 1;
        k += 1;
    }

    while j < right.len() {
        values[k] = right[j];
        j += 1;
        k += 1;
    }
}

/// Sort a slice in ascending order with the default run size
///
/// See [`tim_sort_with_run`].
pub fn tim_sort<T: PartialOrd + Copy>(values: &mut [T]) {
    tim_sort_with_run(values, DEFAULT_RUN_SIZE);
}

/// Sort a slice in ascending order using runs of `run_size` elements
///
/// ### Arguments
///
/// * `values` - Slice to sort in place
/// * `run_size` - Length of the insertion-sorted runs (a zero run size is treated as one)
///
/// ### Examples
///
/// ```
/// use rust_filters::utility::helpers::tim_sort_with_run;
///
/// let mut values: Vec<f64> = (0..100).rev().map(|v| v as f64).collect();
/// tim_sort_with_run(&mut values, 8);
/// assert!(values.windows(2).all(|w| w[0] <= w[1]));
/// ```
pub fn tim_sort_with_run<T: PartialOrd + Copy>(values: &mut [T], run_size: usize) {
    let n = values.len();
    let run = run_size.max(1);

    let mut start = 0;
    while start < n {
        let end = (start + run).min(n);
        insertion_sort(&mut values[start..end]);
        start += run;
    }

    let mut size = run;
    while size < n {
        let mut left = 0;
        while left < n {
            let middle = (left + size).min(n);
            let right = (left + 2 * size).min(n);
            if middle < right {
                merge_runs(&mut values[left..right], middle - left);
            }
            left += 2 * size;
        }
        size *= 2;
    }
}

/// Return a sorted copy of `values`
pub fn sorted<T: PartialOrd + Copy>(values: &[T]) -> Vec<T> {
    let mut buffer = values.to_vec();
    tim_sort(&mut buffer);
    buffer
}

/// Arithmetic mean, or `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divisor `N`), or `None` for an empty slice
///
/// ### Examples
///
/// ```
/// use rust_filters::utility::helpers::variance;
///
/// let v = variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((v - 4.0).abs() < 1e-12);
/// assert!(variance(&[]).is_none());
/// ```
pub fn variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(squared / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, Copy)]
    struct Keyed {
        key: i32,
        tag: usize,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    fn pseudo_random(n: usize) -> Vec<f64> {
        let mut state: u32 = 0x2545_F491;
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state % 1000) as f64 / 10.0
            })
            .collect()
    }

    #[test]
    fn test_insertion_sort_small_run() {
        let mut values = vec![3.0, -1.0, 2.5, 2.5, 0.0];
        insertion_sort(&mut values);
        assert_eq!(values, vec![-1.0, 0.0, 2.5, 2.5, 3.0]);
    }

    #[test]
    fn test_merge_runs_interleaves() {
        let mut values = vec![1, 4, 7, 2, 3, 8, 9];
        merge_runs(&mut values, 3);
        assert_eq!(values, vec![1, 2, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn test_merge_runs_ignores_degenerate_split() {
        let mut values = vec![3, 1, 2];
        merge_runs(&mut values, 0);
        assert_eq!(values, vec![3, 1, 2]);
        merge_runs(&mut values, 3);
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn test_tim_sort_matches_std_sort() {
        for n in [0usize, 1, 2, 31, 32, 33, 64, 65, 200, 1000] {
            let mut values = pseudo_random(n);
            let mut expected = values.clone();
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
            tim_sort(&mut values);
            assert_eq!(values, expected, "mismatch for length {}", n);
        }
    }

    #[test]
    fn test_tim_sort_small_runs_uneven_tail() {
        let mut values = pseudo_random(77);
        let mut expected = values.clone();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        tim_sort_with_run(&mut values, 4);
        assert_eq!(values, expected);

        let mut values = pseudo_random(10);
        let mut expected = values.clone();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        tim_sort_with_run(&mut values, 0);
        assert_eq!(values, expected);
    }

    #[test]
    fn test_tim_sort_is_stable() {
        let mut values: Vec<Keyed> = (0..100)
            .map(|tag| Keyed {
                key: (tag % 7) as i32,
                tag,
            })
            .collect();
        tim_sort_with_run(&mut values, 5);

        for pair in values.windows(2) {
            assert!(pair[0].key <= pair[1].key);
            if pair[0].key == pair[1].key {
                assert!(pair[0].tag < pair[1].tag, "equal keys were reordered");
            }
        }
    }

    #[test]
    fn test_sorted_leaves_input_untouched() {
        let input = [3.0, 1.0, 2.0];
        let output = sorted(&input);
        assert_eq!(input, [3.0, 1.0, 2.0]);
        assert_eq!(output, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_population_variance() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&values).unwrap(), 2.5);
        // Population variance divides by N, not N - 1
        assert_relative_eq!(variance(&values).unwrap(), 1.25);
        assert_relative_eq!(variance(&[7.0]).unwrap(), 0.0);
        assert!(mean(&[]).is_none());
    }
}

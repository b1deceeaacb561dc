//! Stable top-down merge sort
//!
//! The input is split at its midpoint, both halves are sorted recursively and
//! then merged. On ties the merge always takes the left element first, which
//! keeps equal elements in their original order. The sort consumes its input
//! and allocates the output, so it needs O(n) auxiliary memory.

use super::{Algorithm, AlgorithmConfig, AlgorithmInfo, AlgorithmStats};
use crate::error::{AlgometerError, Result};
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::time::Instant;

/// Sorts `data` in ascending order
///
/// # Examples
///
/// ```rust
/// use algometer::merge_sort;
///
/// assert_eq!(merge_sort(vec![5, 1, 4, 1, 3]), vec![1, 1, 3, 4, 5]);
/// ```
pub fn merge_sort<T: Ord>(data: Vec<T>) -> Vec<T> {
    merge_sort_by(data, Ord::cmp)
}

/// Sorts `data` with `compare`, keeping equal elements in input order
pub fn merge_sort_by<T, F>(data: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_recursive(data, &mut compare)
}

/// Sorts strings ignoring case; strings equal under that policy keep input order
///
/// ```rust
/// use algometer::sort_strings_case_insensitive;
///
/// let sorted = sort_strings_case_insensitive(vec!["banana", "Apple", "cherry", "apple"]);
/// assert_eq!(sorted, vec!["Apple", "apple", "banana", "cherry"]);
/// ```
pub fn sort_strings_case_insensitive<S: AsRef<str>>(data: Vec<S>) -> Vec<S> {
    merge_sort_by(data, |a, b| compare_ignore_case(a.as_ref(), b.as_ref()))
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Expected comparisons for `n` elements, `floor(n * log2(n))`
pub fn estimate_comparisons(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    (n as f64 * (n as f64).log2()).floor() as usize
}

fn sort_recursive<T, F>(mut data: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if data.len() <= 1 {
        return data;
    }

    let mid = data.len() / 2;
    let right = data.split_off(mid);
    let left = sort_recursive(data, compare);
    let right = sort_recursive(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}

/// Static descriptor of merge sort
pub fn info() -> AlgorithmInfo {
    AlgorithmInfo {
        name: "Merge Sort",
        strategy: "Divide and Conquer",
        time_complexity: "O(n log n)",
        space_complexity: "O(n)",
        advantages: &[
            "Stable",
            "Guaranteed O(n log n) on every input",
            "Predictable for linked or streamed data",
        ],
        disadvantages: &["Needs O(n) auxiliary memory", "Not in place"],
        use_cases: &[
            "Sorting records by a secondary key",
            "External sorting of large data sets",
        ],
    }
}

/// [`merge_sort`] behind the [`Algorithm`] trait
///
/// Records timing, comparison count and auxiliary memory of the last run.
pub struct MergeSort<T> {
    stats: Mutex<AlgorithmStats>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> MergeSort<T> {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(AlgorithmStats::default()),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MergeSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Algorithm for MergeSort<T> {
    type Config = AlgorithmConfig;
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn execute(&self, config: &Self::Config, input: Self::Input) -> Result<Self::Output> {
        let items = input.len();
        let memory = self.estimate_memory(items);
        if memory > config.memory_budget {
            return Err(AlgometerError::configuration(format!(
                "merge sort of {} items needs {} bytes, budget is {}",
                items, memory, config.memory_budget
            )));
        }

        let start = Instant::now();
        let mut comparisons = 0;
        let sorted = merge_sort_by(input, |a, b| {
            comparisons += 1;
            a.cmp(b)
        });

        *self.stats.lock() = AlgorithmStats {
            items_processed: items,
            processing_time_us: start.elapsed().as_micros() as u64,
            memory_used: memory,
            comparisons,
        };
        Ok(sorted)
    }

    fn stats(&self) -> AlgorithmStats {
        self.stats.lock().clone()
    }

    fn estimate_memory(&self, input_size: usize) -> usize {
        input_size.saturating_mul(std::mem::size_of::<T>())
    }
}

//! Binary search family over sorted slices
//!
//! Every lookup assumes the slice is already sorted by the same ordering that
//! is used for the comparison. Unsorted input is not detected and yields an
//! unspecified (but memory-safe) answer.

use super::AlgorithmInfo;
use std::cell::Cell;
use std::cmp::Ordering;

/// Binary search with a per-call comparison counter
///
/// The counter is reset at the start of every lookup, so
/// [`comparisons`](Self::comparisons) always reports the cost of the most
/// recent call. The counter is a `Cell`, which makes the searcher `!Sync`;
/// give each thread its own instance.
///
/// # Examples
///
/// ```rust
/// use algometer::BinarySearch;
///
/// let searcher = BinarySearch::new();
/// let data = [1, 3, 3, 3, 5, 7];
///
/// assert_eq!(searcher.find_first(&data, &3), Some(1));
/// assert_eq!(searcher.find_last(&data, &3), Some(3));
/// assert_eq!(searcher.range_search(&[1, 3, 3, 5, 7, 9], &2, &6), &[3, 3, 5]);
/// assert!(searcher.comparisons() > 0);
/// ```
#[derive(Debug, Default)]
pub struct BinarySearch {
    comparisons: Cell<usize>,
}

impl BinarySearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element comparisons performed by the last lookup
    pub fn comparisons(&self) -> usize {
        self.comparisons.get()
    }

    #[inline]
    fn counted<T, F>(&self, compare: &mut F, a: &T, b: &T) -> Ordering
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.comparisons.set(self.comparisons.get() + 1);
        compare(a, b)
    }

    /// Index of any element equal to `target`
    pub fn search<T: Ord>(&self, data: &[T], target: &T) -> Option<usize> {
        self.search_by(data, target, Ord::cmp)
    }

    /// Index of any element equal to `target` under `compare`
    pub fn search_by<T, F>(&self, data: &[T], target: &T, mut compare: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.comparisons.set(0);

        let (mut low, mut high) = (0, data.len());
        while low < high {
            let mid = low + (high - low) / 2;
            match self.counted(&mut compare, &data[mid], target) {
                Ordering::Equal => return Some(mid),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }
        None
    }

    /// Index of the leftmost element equal to `target`
    pub fn find_first<T: Ord>(&self, data: &[T], target: &T) -> Option<usize> {
        self.find_first_by(data, target, Ord::cmp)
    }

    /// Index of the leftmost element equal to `target` under `compare`
    pub fn find_first_by<T, F>(&self, data: &[T], target: &T, mut compare: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.comparisons.set(0);

        let (mut low, mut high) = (0, data.len());
        let mut found = None;
        while low < high {
            let mid = low + (high - low) / 2;
            match self.counted(&mut compare, &data[mid], target) {
                Ordering::Equal => {
                    found = Some(mid);
                    high = mid;
                }
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }
        found
    }

    /// Index of the rightmost element equal to `target`
    pub fn find_last<T: Ord>(&self, data: &[T], target: &T) -> Option<usize> {
        self.find_last_by(data, target, Ord::cmp)
    }

    /// Index of the rightmost element equal to `target` under `compare`
    pub fn find_last_by<T, F>(&self, data: &[T], target: &T, mut compare: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.comparisons.set(0);

        let (mut low, mut high) = (0, data.len());
        let mut found = None;
        while low < high {
            let mid = low + (high - low) / 2;
            match self.counted(&mut compare, &data[mid], target) {
                Ordering::Equal => {
                    found = Some(mid);
                    low = mid + 1;
                }
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }
        found
    }

    /// Sub-slice of elements in `min..=max`
    ///
    /// Returns an empty slice when `min > max`.
    pub fn range_search<'a, T: Ord>(&self, data: &'a [T], min: &T, max: &T) -> &'a [T] {
        self.range_search_by(data, min, max, Ord::cmp)
    }

    /// Sub-slice of elements between `min` and `max` inclusive under `compare`
    pub fn range_search_by<'a, T, F>(&self, data: &'a [T], min: &T, max: &T, mut compare: F) -> &'a [T]
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.comparisons.set(0);
        if self.counted(&mut compare, min, max) == Ordering::Greater {
            return &[];
        }

        // Leftmost element >= min
        let (mut low, mut high) = (0, data.len());
        while low < high {
            let mid = low + (high - low) / 2;
            if self.counted(&mut compare, &data[mid], min) == Ordering::Less {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        let start = low;

        // One past the rightmost element <= max
        let (mut low, mut high) = (start, data.len());
        while low < high {
            let mid = low + (high - low) / 2;
            if self.counted(&mut compare, &data[mid], max) == Ordering::Greater {
                high = mid;
            } else {
                low = mid + 1;
            }
        }

        &data[start..low]
    }

    /// True if `data` is in non-decreasing order
    pub fn is_sorted<T: Ord>(data: &[T]) -> bool {
        Self::is_sorted_by(data, Ord::cmp)
    }

    /// True if `data` is non-decreasing under `compare`
    pub fn is_sorted_by<T, F>(data: &[T], mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        data.windows(2).all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
    }

    /// Static descriptor of binary search
    pub fn info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Binary Search",
            strategy: "Divide and Conquer",
            time_complexity: "O(log n)",
            space_complexity: "O(1)",
            advantages: &[
                "Logarithmic lookups on large inputs",
                "Boundary variants locate runs of duplicates",
            ],
            disadvantages: &["Requires sorted input", "Poor locality on very large arrays"],
            use_cases: &["Lookups in sorted indexes", "Range queries over ordered data"],
        }
    }
}

//! Linear search family
//!
//! Sequential scans with no ordering precondition. Ties resolve to the
//! earliest position: `find_min_by` and `find_max_by` return the first
//! extreme element they see.

use super::AlgorithmInfo;
use crate::statistics::timing::time_it;
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Duration;

/// Index of the first element equal to `target`
pub fn search<T: PartialEq>(data: &[T], target: &T) -> Option<usize> {
    data.iter().position(|item| item == target)
}

/// Index of the first element accepted by `predicate`
pub fn search_by<T, P>(data: &[T], predicate: P) -> Option<usize>
where
    P: FnMut(&T) -> bool,
{
    data.iter().position(predicate)
}

/// Index of the last element equal to `target`
pub fn find_last<T: PartialEq>(data: &[T], target: &T) -> Option<usize> {
    data.iter().rposition(|item| item == target)
}

/// Indices of every element equal to `target`, ascending
pub fn find_all<T: PartialEq>(data: &[T], target: &T) -> Vec<usize> {
    find_all_by(data, |item| item == target)
}

/// Indices of every element accepted by `predicate`, ascending
pub fn find_all_by<T, P>(data: &[T], mut predicate: P) -> Vec<usize>
where
    P: FnMut(&T) -> bool,
{
    data.iter()
        .enumerate()
        .filter(|(_, item)| predicate(item))
        .map(|(i, _)| i)
        .collect()
}

/// First smallest element under `compare`
pub fn find_min_by<T, F>(data: &[T], mut compare: F) -> Option<&T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut iter = data.iter();
    let mut best = iter.next()?;
    for item in iter {
        if compare(item, best) == Ordering::Less {
            best = item;
        }
    }
    Some(best)
}

/// First largest element under `compare`
pub fn find_max_by<T, F>(data: &[T], mut compare: F) -> Option<&T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut iter = data.iter();
    let mut best = iter.next()?;
    for item in iter {
        if compare(item, best) == Ordering::Greater {
            best = item;
        }
    }
    Some(best)
}

pub fn find_min<T: Ord>(data: &[T]) -> Option<&T> {
    find_min_by(data, Ord::cmp)
}

pub fn find_max<T: Ord>(data: &[T]) -> Option<&T> {
    find_max_by(data, Ord::cmp)
}

/// Number of elements equal to `target`
pub fn count<T: PartialEq>(data: &[T], target: &T) -> usize {
    count_by(data, |item| item == target)
}

/// Number of elements accepted by `predicate`
pub fn count_by<T, P>(data: &[T], mut predicate: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    data.iter().filter(|item| predicate(item)).count()
}

pub fn contains<T: PartialEq>(data: &[T], target: &T) -> bool {
    search(data, target).is_some()
}

pub fn any_match<T, P>(data: &[T], predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    data.iter().any(predicate)
}

/// True for an empty slice
pub fn all_match<T, P>(data: &[T], predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    data.iter().all(predicate)
}

/// Outcome and cost of an instrumented scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMetrics {
    /// Elements compared before the scan stopped
    pub comparisons: usize,
    pub elapsed: Duration,
    pub found: bool,
    pub index: Option<usize>,
}

/// Scans for `target`, counting comparisons and timing the scan
pub fn search_with_metrics<T: PartialEq>(data: &[T], target: &T) -> SearchMetrics {
    let mut comparisons = 0;
    let (index, elapsed) = time_it(|| {
        data.iter().position(|item| {
            comparisons += 1;
            item == target
        })
    });

    SearchMetrics {
        comparisons,
        elapsed,
        found: index.is_some(),
        index,
    }
}

/// Static descriptor of linear search
pub fn info() -> AlgorithmInfo {
    AlgorithmInfo {
        name: "Linear Search",
        strategy: "Sequential Scan",
        time_complexity: "O(n)",
        space_complexity: "O(1)",
        advantages: &[
            "Works on unsorted data",
            "Supports arbitrary predicates",
            "Cache friendly sequential access",
        ],
        disadvantages: &["Linear cost on every lookup"],
        use_cases: &["Small or unsorted collections", "One-off filtered scans"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_and_last() {
        let data = [4, 2, 7, 2, 9];
        assert_eq!(search(&data, &2), Some(1));
        assert_eq!(find_last(&data, &2), Some(3));
        assert_eq!(search(&data, &5), None);
        assert_eq!(search_by(&data, |x| *x > 5), Some(2));
    }

    #[test]
    fn test_find_all() {
        let data = ["a", "b", "a", "c", "a"];
        assert_eq!(find_all(&data, &"a"), vec![0, 2, 4]);
        assert!(find_all(&data, &"z").is_empty());
        assert_eq!(find_all_by(&data, |s| *s != "a"), vec![1, 3]);
    }

    #[test]
    fn test_min_max_first_tie() {
        let data = [(3, 'a'), (1, 'b'), (5, 'c'), (1, 'd'), (5, 'e')];
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        assert_eq!(find_min_by(&data, by_key), Some(&(1, 'b')));
        assert_eq!(find_max_by(&data, by_key), Some(&(5, 'c')));

        assert_eq!(find_min::<i32>(&[]), None);
        assert_eq!(find_max(&[3, 8, 1]), Some(&8));
    }

    #[test]
    fn test_counting_and_matching() {
        let data = [1, 2, 3, 4, 5, 6];
        assert_eq!(count(&data, &3), 1);
        assert_eq!(count_by(&data, |x| x % 2 == 0), 3);
        assert!(contains(&data, &6));
        assert!(!contains(&data, &7));
        assert!(any_match(&data, |x| *x > 5));
        assert!(all_match(&data, |x| *x > 0));
        assert!(all_match::<i32, _>(&[], |_| false));
    }

    #[test]
    fn test_search_with_metrics() {
        let data: Vec<u32> = (0..100).collect();

        let hit = search_with_metrics(&data, &41);
        assert!(hit.found);
        assert_eq!(hit.index, Some(41));
        assert_eq!(hit.comparisons, 42);

        let miss = search_with_metrics(&data, &500);
        assert!(!miss.found);
        assert_eq!(miss.index, None);
        assert_eq!(miss.comparisons, 100);
    }
}

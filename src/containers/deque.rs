//! Growable double-ended queue
//!
//! Storage is a circular slot arena. When every slot is taken the arena is
//! doubled and the items are copied over starting at the logical front, so
//! the new arena begins linearized at index 0.

use super::ContainerMetrics;
use crate::algorithms::AlgorithmInfo;
use crate::config::ContainerConfig;
use crate::error::{check_bounds, AlgometerError, Result};
use std::fmt;

/// Initial capacity used by [`Deque::default`]
pub const DEFAULT_DEQUE_CAPACITY: usize = 16;

/// Double-ended queue with amortized O(1) insertion at both ends
///
/// # Examples
///
/// ```rust
/// use algometer::Deque;
///
/// let mut deque = Deque::new(2)?;
/// deque.add_back(2);
/// deque.add_front(1);
/// deque.add_back(3); // doubles to 4 slots
///
/// assert_eq!(deque.capacity(), 4);
/// assert_eq!(deque.remove_front(), Some(1));
/// assert_eq!(deque.remove_back(), Some(3));
/// # Ok::<(), algometer::AlgometerError>(())
/// ```
pub struct Deque<T> {
    slots: Vec<Option<T>>,
    /// Index of the first item
    front: usize,
    /// Index one past the last item
    back: usize,
    size: usize,
    resizes: usize,
}

impl<T> Deque<T> {
    /// Creates an empty deque with `capacity` initial slots
    ///
    /// # Errors
    ///
    /// Returns `AlgometerError::Configuration` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        ContainerConfig::validate_capacity(capacity)?;
        Ok(Self::with_slots(capacity))
    }

    /// Creates a deque with `config.capacity` initial slots
    pub fn with_config(config: &ContainerConfig) -> Result<Self> {
        Self::new(config.capacity)
    }

    fn with_slots(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            front: 0,
            back: 0,
            size: 0,
            resizes: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of times the arena has doubled
    #[inline]
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    /// Inserts an item before the current front
    pub fn add_front(&mut self, item: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        let capacity = self.capacity();
        self.front = (self.front + capacity - 1) % capacity;
        self.slots[self.front] = Some(item);
        self.size += 1;
    }

    /// Inserts an item after the current back
    pub fn add_back(&mut self, item: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        self.slots[self.back] = Some(item);
        self.back = (self.back + 1) % self.capacity();
        self.size += 1;
    }

    /// Removes and returns the front item
    pub fn remove_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.size -= 1;
        self.reset_if_empty();
        item
    }

    /// Removes and returns the back item
    pub fn remove_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let capacity = self.capacity();
        self.back = (self.back + capacity - 1) % capacity;
        let item = self.slots[self.back].take();
        self.size -= 1;
        self.reset_if_empty();
        item
    }

    pub fn peek_front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    pub fn peek_back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let capacity = self.capacity();
        self.slots[(self.back + capacity - 1) % capacity].as_ref()
    }

    /// Returns the item `index` positions behind the front
    ///
    /// # Errors
    ///
    /// Returns `AlgometerError::OutOfBounds` if `index >= len()`
    pub fn get(&self, index: usize) -> Result<&T> {
        check_bounds(index, self.size)?;
        self.slots[(self.front + index) % self.capacity()]
            .as_ref()
            .ok_or_else(|| AlgometerError::out_of_bounds(index, self.size))
    }

    /// Removes every item, keeping the current capacity
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.front = 0;
        self.back = 0;
        self.size = 0;
    }

    /// Ratio of stored items to slots
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            front: self.front,
            remaining: self.size,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Snapshot of occupancy and complexity figures
    pub fn performance_metrics(&self) -> ContainerMetrics {
        ContainerMetrics {
            time_complexity: "O(1) amortized",
            space_complexity: "O(n)",
            utilization: (self.load_factor() * 100.0).round(),
            len: self.size,
            capacity: self.capacity(),
            remaining: self.capacity() - self.size,
            collisions: None,
            resize_count: Some(self.resizes),
            average_chain_length: None,
        }
    }

    /// Static descriptor of the deque's strategy and costs
    pub fn info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Deque",
            strategy: "Growable Circular Array",
            time_complexity: "O(1) amortized at both ends",
            space_complexity: "O(n)",
            advantages: &["Constant-time access at both ends", "Contiguous storage"],
            disadvantages: &["O(n) pause when the arena doubles"],
            use_cases: &["Work-stealing queues", "Sliding-window algorithms", "Undo history"],
        }
    }

    fn reset_if_empty(&mut self) {
        if self.size == 0 {
            self.front = 0;
            self.back = 0;
        }
    }

    /// Doubles the arena, copying from the logical front so items land at 0..size
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2).max(1);

        let mut slots = Vec::with_capacity(new_capacity);
        for i in 0..self.size {
            slots.push(self.slots[(self.front + i) % old_capacity].take());
        }
        slots.resize_with(new_capacity, || None);

        self.slots = slots;
        self.front = 0;
        self.back = self.size % new_capacity;
        self.resizes += 1;

        log::debug!(
            "Deque grew from {} to {} slots ({} items)",
            old_capacity,
            new_capacity,
            self.size
        );
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::with_slots(DEFAULT_DEQUE_CAPACITY)
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deque({}/{}): ", self.size, self.capacity())?;
        super::write_preview(f, self.iter(), self.size)
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add_back(item);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::default();
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over a [`Deque`]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    front: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.front].as_ref();
        self.front = (self.front + 1) % self.slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.slots[(self.front + self.remaining) % self.slots.len()].as_ref()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deque_rejects_zero_capacity() {
        assert!(Deque::<u32>::new(0).is_err());
        let deque: Deque<u32> = Deque::default();
        assert_eq!(deque.capacity(), DEFAULT_DEQUE_CAPACITY);
    }

    #[test]
    fn test_deque_both_ends() -> Result<()> {
        let mut deque = Deque::new(4)?;
        deque.add_back(2);
        deque.add_back(3);
        deque.add_front(1);
        deque.add_front(0);

        assert_eq!(deque.to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(deque.peek_front(), Some(&0));
        assert_eq!(deque.peek_back(), Some(&3));

        assert_eq!(deque.remove_back(), Some(3));
        assert_eq!(deque.remove_front(), Some(0));
        assert_eq!(deque.len(), 2);
        Ok(())
    }

    #[test]
    fn test_deque_stack_and_queue_orders() -> Result<()> {
        let mut deque = Deque::new(2)?;
        for i in 0..5 {
            deque.add_back(i);
        }
        // Same end: LIFO
        let lifo: Vec<_> = std::iter::from_fn(|| deque.remove_back()).collect();
        assert_eq!(lifo, vec![4, 3, 2, 1, 0]);

        for i in 0..5 {
            deque.add_back(i);
        }
        // Opposite end: FIFO
        let fifo: Vec<_> = std::iter::from_fn(|| deque.remove_front()).collect();
        assert_eq!(fifo, vec![0, 1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_deque_growth_relinearizes() -> Result<()> {
        let mut deque = Deque::new(4)?;
        deque.add_back(1);
        deque.add_back(2);
        deque.remove_front();
        deque.add_back(3);
        deque.add_back(4);
        deque.add_front(0); // arena is full and wrapped now
        assert_eq!(deque.capacity(), 4);

        deque.add_back(5);
        assert_eq!(deque.capacity(), 8);
        assert_eq!(deque.resize_count(), 1);
        assert_eq!(deque.front, 0);
        assert_eq!(deque.to_vec(), vec![0, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn test_deque_growth_from_front() -> Result<()> {
        let mut deque = Deque::new(1)?;
        for i in 0..9 {
            deque.add_front(i);
        }
        assert_eq!(deque.capacity(), 16);
        assert_eq!(deque.resize_count(), 4);
        assert_eq!(deque.to_vec(), (0..9).rev().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_deque_cursors_reset_when_emptied() -> Result<()> {
        let mut deque = Deque::new(4)?;
        deque.add_back('a');
        deque.add_back('b');
        deque.remove_front();
        deque.remove_back();
        assert!(deque.is_empty());
        assert_eq!((deque.front, deque.back), (0, 0));
        assert_eq!(deque.remove_front(), None);
        assert_eq!(deque.peek_back(), None);
        Ok(())
    }

    #[test]
    fn test_deque_get_and_iter() -> Result<()> {
        let mut deque = Deque::new(3)?;
        deque.add_front(2);
        deque.add_front(1);
        deque.add_back(3);

        assert_eq!(*deque.get(0)?, 1);
        assert_eq!(*deque.get(2)?, 3);
        assert!(deque.get(3).is_err());
        assert_eq!(deque.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(deque.iter().len(), 3);
        Ok(())
    }

    #[test]
    fn test_deque_clear_keeps_capacity() {
        let mut deque: Deque<String> = (0..20).map(|i| i.to_string()).collect();
        let capacity = deque.capacity();
        deque.clear();
        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), capacity);
        deque.add_back("x".to_string());
        assert_eq!(deque.peek_front().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_deque_metrics_and_display() -> Result<()> {
        let mut deque = Deque::new(4)?;
        deque.extend([1, 2, 3]);
        assert_eq!(deque.load_factor(), 0.75);

        let metrics = deque.performance_metrics();
        assert_eq!(metrics.utilization, 75.0);
        assert_eq!(metrics.remaining, 1);
        assert_eq!(metrics.resize_count, Some(0));

        assert_eq!(deque.to_string(), "Deque(3/4): [1, 2, 3]");
        deque.extend([4, 5, 6]);
        assert_eq!(deque.to_string(), "Deque(6/8): [1, 2, 3, 4, 5...]");
        Ok(())
    }
}

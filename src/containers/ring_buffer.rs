//! Fixed-capacity ring buffer
//!
//! A circular FIFO over an owned slot arena. Cursors are plain indices that
//! wrap with modular arithmetic; nothing ever reallocates after construction.

use super::ContainerMetrics;
use crate::algorithms::AlgorithmInfo;
use crate::config::ContainerConfig;
use crate::error::{check_bounds, Result};
use std::fmt;

/// Capacity used by [`RingBuffer::default`]
pub const DEFAULT_RING_CAPACITY: usize = 50;

/// Fixed-capacity circular FIFO queue
///
/// # Performance Characteristics
///
/// - **O(1) enqueue/dequeue/peek** with no allocation after construction
/// - **Bounded** - a full buffer rejects new items instead of growing
/// - **O(n) clear** - every slot is emptied so held values are dropped eagerly
///
/// # Examples
///
/// ```rust
/// use algometer::RingBuffer;
///
/// let mut buffer = RingBuffer::new(2)?;
/// assert!(buffer.enqueue("a"));
/// assert!(buffer.enqueue("b"));
/// assert!(!buffer.enqueue("c")); // full
///
/// assert_eq!(buffer.dequeue(), Some("a"));
/// assert!(buffer.enqueue("c")); // wraps around
/// assert_eq!(buffer.peek_rear(), Some(&"c"));
/// # Ok::<(), algometer::AlgometerError>(())
/// ```
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    /// Read position
    front: usize,
    /// Next write position
    rear: usize,
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring buffer holding at most `capacity` items
    ///
    /// # Errors
    ///
    /// Returns `AlgometerError::Configuration` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        ContainerConfig::validate_capacity(capacity)?;

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            front: 0,
            rear: 0,
            count: 0,
        })
    }

    /// Creates a ring buffer sized by `config.capacity`
    pub fn with_config(config: &ContainerConfig) -> Result<Self> {
        Self::new(config.capacity)
    }

    /// Returns the fixed capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of queued items
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if nothing is queued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if no further item can be enqueued
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Returns the number of free slots
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity() - self.count
    }

    /// Adds an item at the rear, returning false if the buffer is full
    ///
    /// The rejected item is dropped; use [`try_enqueue`](Self::try_enqueue)
    /// to get it back.
    pub fn enqueue(&mut self, item: T) -> bool {
        self.try_enqueue(item).is_ok()
    }

    /// Adds an item at the rear, handing it back if the buffer is full
    pub fn try_enqueue(&mut self, item: T) -> std::result::Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        self.slots[self.rear] = Some(item);
        self.rear = (self.rear + 1) % self.capacity();
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the front item
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.count -= 1;

        if self.count == 0 {
            self.front = 0;
            self.rear = 0;
        }
        item
    }

    /// Returns the front item without removing it
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    /// Returns the most recently enqueued item without removing it
    pub fn peek_rear(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let capacity = self.capacity();
        self.slots[(self.rear + capacity - 1) % capacity].as_ref()
    }

    /// Returns the item `index` positions behind the front
    ///
    /// # Errors
    ///
    /// Returns `AlgometerError::OutOfBounds` if `index >= len()`
    pub fn get(&self, index: usize) -> Result<&T> {
        check_bounds(index, self.count)?;
        let slot = (self.front + index) % self.capacity();
        self.slots[slot]
            .as_ref()
            .ok_or_else(|| crate::error::AlgometerError::out_of_bounds(index, self.count))
    }

    /// Removes every item and resets both cursors
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.front = 0;
        self.rear = 0;
        self.count = 0;
    }

    /// Fill level as a rounded percentage (0-100)
    pub fn utilization(&self) -> f64 {
        (self.count as f64 / self.capacity() as f64 * 100.0).round()
    }

    /// Iterates front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            position: self.front,
            remaining: self.count,
        }
    }

    /// Copies the queued items front to back
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Snapshot of occupancy and complexity figures
    pub fn performance_metrics(&self) -> ContainerMetrics {
        ContainerMetrics {
            time_complexity: "O(1)",
            space_complexity: "O(k)",
            utilization: self.utilization(),
            len: self.count,
            capacity: self.capacity(),
            remaining: self.remaining_capacity(),
            collisions: None,
            resize_count: None,
            average_chain_length: None,
        }
    }

    /// Static descriptor of the ring buffer's strategy and costs
    pub fn info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Ring Buffer",
            strategy: "Circular Array",
            time_complexity: "O(1) enqueue/dequeue",
            space_complexity: "O(k)",
            advantages: &["No reallocation after construction", "Bounded memory"],
            disadvantages: &["Rejects items when full", "Capacity fixed up front"],
            use_cases: &["Producer/consumer queues", "Recent-history windows"],
        }
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        let mut slots = Vec::with_capacity(DEFAULT_RING_CAPACITY);
        slots.resize_with(DEFAULT_RING_CAPACITY, || None);
        Self {
            slots,
            front: 0,
            rear: 0,
            count: 0,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RingBuffer({}/{}): ", self.count, self.capacity())?;
        super::write_preview(f, self.iter(), self.count)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over a [`RingBuffer`]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    position: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.position].as_ref();
        self.position = (self.position + 1) % self.slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

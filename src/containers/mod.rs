//! Circular containers
//!
//! This module provides the buffer-backed containers. Both keep an owned
//! slot arena and move plain index cursors over it, so no operation ever
//! chases pointers.
//!
//! ## Containers
//!
//! - **`RingBuffer<T>`** - Fixed-capacity FIFO that rejects items when full
//! - **`Deque<T>`** - Double-ended queue that doubles its arena when full
//!
//! The chaining hash table lives in [`crate::hash_map`] and reports the same
//! [`ContainerMetrics`] snapshot.

mod deque;
mod ring_buffer;

pub use deque::{Deque, DEFAULT_DEQUE_CAPACITY};
pub use ring_buffer::{RingBuffer, DEFAULT_RING_CAPACITY};

use serde::Serialize;
use std::fmt;

/// Number of items shown by the containers' `Display` output
pub(crate) const PREVIEW_ITEMS: usize = 5;

/// Occupancy and complexity snapshot of a container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerMetrics {
    /// Big-O cost of the primary operations
    pub time_complexity: &'static str,
    /// Big-O storage cost
    pub space_complexity: &'static str,
    /// Fill level as a percentage of capacity
    pub utilization: f64,
    /// Number of stored items
    pub len: usize,
    /// Current slot or bucket count
    pub capacity: usize,
    /// Free slots before the next rejection or resize
    pub remaining: usize,
    /// Inserts that landed in an occupied bucket (hash table only)
    pub collisions: Option<usize>,
    /// Number of capacity doublings so far (growable containers only)
    pub resize_count: Option<usize>,
    /// Mean length of the non-empty chains (hash table only)
    pub average_chain_length: Option<f64>,
}

/// Writes `[a, b, c, d, e...]` showing at most [`PREVIEW_ITEMS`] entries
pub(crate) fn write_preview<'a, T, I>(f: &mut fmt::Formatter<'_>, items: I, len: usize) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: Iterator<Item = &'a T>,
{
    f.write_str("[")?;
    for (i, item) in items.take(PREVIEW_ITEMS).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    if len > PREVIEW_ITEMS {
        f.write_str("...")?;
    }
    f.write_str("]")
}

//! # Algometer: Instrumented Containers, Search/Sort and Complexity Analysis
//!
//! This crate bundles a small set of classic data structures and algorithms
//! with the measurement tooling to observe them:
//!
//! ## Key Features
//!
//! - **Containers**: fixed-capacity ring buffer, growable circular deque and
//!   a separate-chaining hash table, each reporting a [`ContainerMetrics`]
//!   snapshot
//! - **Search and Sort**: binary search with a comparison counter, linear
//!   search helpers and a stable merge sort
//! - **Operation Metrics**: a process-wide tracker that aggregates time and
//!   heap deltas per named operation
//! - **Complexity Analysis**: empirical classification of how an algorithm's
//!   time or memory grows with input size
//!
//! ## Quick Start
//!
//! ```rust
//! use algometer::{merge_sort, BinarySearch, Deque, HashTable, RingBuffer};
//!
//! let mut ring = RingBuffer::new(3)?;
//! assert!(ring.enqueue(1));
//! assert_eq!(ring.dequeue(), Some(1));
//!
//! let mut deque = Deque::new(2)?;
//! deque.add_front(1);
//! deque.add_back(2);
//! deque.add_back(3);
//! assert_eq!(deque.capacity(), 4);
//!
//! let mut table = HashTable::new(16, 0.75)?;
//! table.put("alpha", 1);
//! assert_eq!(table.get("alpha"), Some(&1));
//!
//! let sorted = merge_sort(vec![5, 3, 9, 1]);
//! let search = BinarySearch::new();
//! assert_eq!(search.search(&sorted, &9), Some(3));
//! assert!(search.comparisons() <= 3);
//! # Ok::<(), algometer::AlgometerError>(())
//! ```
//!
//! Heap figures require installing the counting allocator in the final binary:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: algometer::CountingAllocator = algometer::CountingAllocator;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod algorithms;
pub mod analysis;
pub mod config;
pub mod containers;
pub mod error;
pub mod hash_map;
pub mod statistics;

// Re-export core types
pub use error::{AlgometerError, Result};

// Containers
pub use containers::{ContainerMetrics, Deque, RingBuffer};
pub use hash_map::HashTable;

// Search and sort
pub use algorithms::{
    linear_search, merge_sort, merge_sort_by, sort_strings_case_insensitive, Algorithm, AlgorithmConfig,
    AlgorithmInfo, AlgorithmStats, BinarySearch, MergeSort, SearchMetrics,
};

// Measurement
pub use analysis::{
    CombinedComplexityResult, ComplexityAnalyzer, ComplexityClass, ComplexityResult, ComplexityType,
    MeasurementPoint,
};
pub use config::{AnalyzerConfig, Config, ContainerConfig};
pub use statistics::{
    AllocatorProbe, CountingAllocator, MeasurementContext, MemoryProbe, MetricsTracker, OperationMetrics,
    SortMetric,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing algometer v{}", VERSION);
}

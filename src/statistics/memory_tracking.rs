//! Heap Usage Tracking
//!
//! [`CountingAllocator`] wraps the system allocator and keeps process-wide
//! byte counters. Applications opt in by installing it:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: algometer::CountingAllocator = algometer::CountingAllocator;
//! ```
//!
//! Consumers read heap usage through the [`MemoryProbe`] trait so that tests
//! and embedders can substitute their own source. Without the counting
//! allocator installed, [`AllocatorProbe`] reports 0 and memory figures stay
//! flat.

use serde::Serialize;
use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static DEALLOCATED: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Global allocator that counts bytes allocated and freed
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator;

#[inline]
fn record_alloc(size: usize) {
    if !ACTIVE.load(Ordering::Relaxed) {
        ACTIVE.store(true, Ordering::Relaxed);
    }
    let allocated = ALLOCATED.fetch_add(size, Ordering::Relaxed).wrapping_add(size);
    let in_use = allocated.saturating_sub(DEALLOCATED.load(Ordering::Relaxed));
    PEAK.fetch_max(in_use, Ordering::Relaxed);
}

#[inline]
fn record_dealloc(size: usize) {
    DEALLOCATED.fetch_add(size, Ordering::Relaxed);
}

// SAFETY: every call is forwarded unchanged to `System`; the counters are
// plain atomics and never allocate.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::alloc` contract
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::alloc_zeroed` contract
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by this allocator with `layout`
        unsafe { System.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::realloc` contract
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

/// Point-in-time copy of the allocator counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllocationSnapshot {
    /// Bytes handed out since process start
    pub allocated: usize,
    /// Bytes returned since process start
    pub deallocated: usize,
    /// Highest observed `in_use`
    pub peak: usize,
}

impl AllocationSnapshot {
    /// Reads the current counters
    pub fn capture() -> Self {
        Self {
            allocated: ALLOCATED.load(Ordering::Relaxed),
            deallocated: DEALLOCATED.load(Ordering::Relaxed),
            peak: PEAK.load(Ordering::Relaxed),
        }
    }

    /// Bytes currently live
    pub fn in_use(&self) -> usize {
        self.allocated.saturating_sub(self.deallocated)
    }
}

impl fmt::Display for AllocationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "in use: {} bytes, peak: {} bytes, allocated: {} bytes, freed: {} bytes",
            self.in_use(),
            self.peak,
            self.allocated,
            self.deallocated
        )
    }
}

impl CountingAllocator {
    /// True once the counting allocator has served at least one allocation
    pub fn is_active() -> bool {
        ACTIVE.load(Ordering::Relaxed)
    }

    pub fn snapshot() -> AllocationSnapshot {
        AllocationSnapshot::capture()
    }

    /// Lowers the peak watermark to the current usage
    pub fn reset_peak() {
        PEAK.store(Self::snapshot().in_use(), Ordering::Relaxed);
    }
}

/// Source of heap usage readings
pub trait MemoryProbe: Send + Sync + fmt::Debug {
    /// Bytes of heap currently in use
    fn heap_in_use(&self) -> usize;

    /// Best-effort hint to settle the heap before a reading
    fn stabilize(&self) {}
}

/// Probe backed by [`CountingAllocator`]
///
/// Reports 0 until the counting allocator is installed and has served an
/// allocation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllocatorProbe;

impl MemoryProbe for AllocatorProbe {
    fn heap_in_use(&self) -> usize {
        if CountingAllocator::is_active() {
            AllocationSnapshot::capture().in_use()
        } else {
            0
        }
    }

    fn stabilize(&self) {
        // Nothing to collect; give concurrent threads a chance to finish frees
        std::thread::yield_now();
    }
}

//! # Unique Id Allocation
//!
//! Monotonic id source for vertex data stores. The process-wide allocator
//! backs [`VertexData::new`](crate::VertexData::new); tests inject their
//! own allocator to get deterministic ids.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out monotonically increasing ids, starting at zero.
///
/// # Example
///
/// ```rust
/// use vertex_data::IdAllocator;
///
/// let ids = IdAllocator::new();
/// assert_eq!(ids.allocate(), 0);
/// assert_eq!(ids.allocate(), 1);
/// ```
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is zero.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Returns the next id.
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the id the next call to [`IdAllocator::allocate`] will produce.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

static GLOBAL_IDS: IdAllocator = IdAllocator::new();

/// The process-wide allocator used by default constructors.
pub fn global() -> &'static IdAllocator {
    &GLOBAL_IDS
}

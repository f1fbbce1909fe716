use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Source of process-unique, monotonically increasing identifiers.
pub trait IdAllocator {
    fn next_id(&self) -> u64;
}

impl<T: IdAllocator + ?Sized> IdAllocator for &T {
    fn next_id(&self) -> u64 {
        (**self).next_id()
    }
}

impl<T: IdAllocator + ?Sized> IdAllocator for Arc<T> {
    fn next_id(&self) -> u64 {
        (**self).next_id()
    }
}

/// Counter shared by all generation requests of a host.
///
/// The counter is advanced atomically, so a single allocator may be used from
/// several threads at once.
#[derive(Debug)]
pub struct SequentialIds {
    first: u64,
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            first,
            next: AtomicU64::new(first),
        }
    }

    /// Rewind to the first identifier.
    pub fn reset(&self) {
        self.next.store(self.first, Ordering::SeqCst);
    }

    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The number of *other* live handles that share one [`Storage`](super::Storage). A value of 0
/// means that the handle looking at it is the only one left.
pub(crate) struct ShareCount(AtomicUsize);

impl ShareCount {
    pub const fn new() -> ShareCount {
        ShareCount(AtomicUsize::new(0))
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Records one more sharer, returning the new count.
    pub fn acquire(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Records one fewer sharer, returning the count observed before the decrement. The count
    /// saturates at zero, so releasing a sole owner is a no-op.
    pub fn release(&self) -> usize {
        match self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1)) {
            Ok(prev) | Err(prev) => prev,
        }
    }
}

impl Debug for ShareCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

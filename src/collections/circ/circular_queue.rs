use std::fmt::{self, Debug, Formatter};
use std::mem::MaybeUninit;
use std::ops::Index;

use super::{Iter, QueueFull};
use crate::util::error::IndexOutOfBounds;
use crate::util::result::ResultExtension;

/// A fixed-capacity first-in first-out queue, stored in a ring of slots.
///
/// The capacity is chosen up front and never changes: pushing into a full queue fails rather than
/// reallocating. Values are written into the slot after the current back, wrapping around to the
/// first slot once the end of the ring is reached.
///
/// # Time Complexity
/// Every operation other than `clear` and dropping is `O(1)`. Those two are `O(n)`, where `n` is
/// the number of items in the queue.
pub struct CircularQueue<T> {
    pub(crate) buf: Box<[MaybeUninit<T>]>,
    pub(crate) start: usize,
    pub(crate) len: usize,
}

impl<T> CircularQueue<T> {
    /// Creates a new, empty CircularQueue with exactly `cap` slots. A capacity of 0 is allowed and
    /// produces a queue which is both empty and full.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::circ::CircularQueue;
    /// let queue: CircularQueue<u8> = CircularQueue::with_cap(3);
    /// assert_eq!(queue.cap(), 3);
    /// assert!(queue.is_empty());
    /// ```
    pub fn with_cap(cap: usize) -> CircularQueue<T> {
        CircularQueue {
            buf: Box::new_uninit_slice(cap),
            start: 0,
            len: 0,
        }
    }

    /// Returns the number of items in the queue.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of slots in the queue.
    pub fn cap(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the queue contains no items.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if every slot of the queue is occupied.
    pub fn is_full(&self) -> bool {
        self.len == self.cap()
    }

    /// Pushes `value` onto the back of the queue, or returns it inside a [`QueueFull`] error if
    /// there is no free slot.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::circ::{CircularQueue, QueueFull};
    /// let mut queue = CircularQueue::with_cap(2);
    /// assert!(queue.push(1).is_ok());
    /// assert!(queue.push(2).is_ok());
    /// assert_eq!(queue.push(3), Err(QueueFull(3)));
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), QueueFull<T>> {
        if self.is_full() {
            return Err(QueueFull(value));
        }

        let slot = self.physical(self.len);
        self.buf[slot].write(value);
        self.len += 1;
        Ok(())
    }

    /// Removes the item at the front of the queue and returns it, or None if the queue is empty.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::circ::CircularQueue;
    /// let mut queue = CircularQueue::with_cap(2);
    /// queue.push('a').unwrap();
    /// queue.push('b').unwrap();
    /// assert_eq!(queue.pop(), Some('a'));
    /// assert_eq!(queue.pop(), Some('b'));
    /// assert_eq!(queue.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // SAFETY: The queue isn't empty, so the slot at start is initialized. Advancing start and
        // decrementing len below marks it as uninitialized again, so the value is read only once.
        let value = unsafe { self.buf[self.start].assume_init_read() };
        self.start = self.physical(1);
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the item at the front of the queue, which is the next to be popped.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the item at the back of the queue, which was most recently pushed.
    pub fn back(&self) -> Option<&T> {
        self.get(self.len.checked_sub(1)?)
    }

    /// Returns a reference to the item `index` places from the front of the queue.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        // SAFETY: All slots from start, for len slots (wrapping), are initialized.
        Some(unsafe { self.buf[self.physical(index)].assume_init_ref() })
    }

    /// Removes and drops every item in the queue, leaving its capacity unchanged.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
        self.start = 0;
    }

    /// Returns an iterator over the items in the queue, from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Converts an offset from the front of the queue into an index into the ring.
    pub(crate) fn physical(&self, offset: usize) -> usize {
        // start < cap and offset <= cap, so this can't overflow for any reachable capacity.
        let index = self.start + offset;
        if index >= self.cap() {
            index - self.cap()
        } else {
            index
        }
    }
}

impl<T> Index<usize> for CircularQueue<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index` is not less than the length of the queue.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
            .ok_or(IndexOutOfBounds { index, len: self.len })
            .throw()
    }
}

impl<T> Drop for CircularQueue<T> {
    fn drop(&mut self) {
        // Drop the initialized values in place, the boxed slice of MaybeUninit then deallocates
        // without dropping anything else.
        self.clear();
    }
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        let mut queue = CircularQueue::with_cap(self.cap());
        // The clone starts at slot 0. len is bumped per item so a panicking clone only drops the
        // items written so far.
        for (slot, value) in queue.buf.iter_mut().zip(self.iter()) {
            slot.write(value.clone());
            queue.len += 1;
        }
        queue
    }
}

impl<T: PartialEq> PartialEq for CircularQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularQueue<T> {}

impl<T: Debug> Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularQueue")
            .field("contents", &DebugItems(self))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

struct DebugItems<'a, T>(&'a CircularQueue<T>);

impl<T: Debug> Debug for DebugItems<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

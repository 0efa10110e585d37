#![cfg(test)]

use std::iter;

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

/// Reads every slot of the ring, in physical order, for queues of Copy values that have been
/// filled at least once.
fn slots<T: Copy>(queue: &CircularQueue<T>) -> Vec<T> {
    // SAFETY: Only called in tests after every slot has been written at least once. Popped slots
    // still hold their old bit pattern for Copy types.
    queue.buf.iter().map(|s| unsafe { s.assume_init() }).collect()
}

#[test]
fn test_push_pop_wrapping() {
    let mut queue = CircularQueue::with_cap(3);

    assert!(queue.is_empty());
    assert!(!queue.is_full());
    assert_eq!(queue.front(), None, "An empty queue should have no front.");
    assert_eq!(queue.back(), None, "An empty queue should have no back.");
    assert_eq!(queue.pop(), None);

    assert!(queue.push(1).is_ok());
    assert!(queue.push(2).is_ok());
    assert!(queue.push(3).is_ok());
    assert_eq!(queue.push(4), Err(QueueFull(4)), "Pushing into a full queue should fail.");

    assert_eq!(slots(&queue), [1, 2, 3]);
    assert!(!queue.is_empty());
    assert!(queue.is_full());
    assert_eq!(queue.front(), Some(&1));
    assert_eq!(queue.back(), Some(&3));

    assert_eq!(queue.pop(), Some(1));
    assert!(!queue.is_empty());
    assert!(!queue.is_full());
    assert!(queue.push(4).is_ok());

    assert_eq!(slots(&queue), [4, 2, 3], "The next push should wrap around to the first slot.");
    assert_eq!(queue.front(), Some(&2));
    assert_eq!(queue.back(), Some(&4));

    assert_eq!(queue.pop(), Some(2));
    assert_eq!(queue.pop(), Some(3));
    assert_eq!(queue.pop(), Some(4));
    assert_eq!(queue.pop(), None);

    assert!(queue.is_empty());
    assert!(!queue.is_full());
}

#[test]
fn test_zero_cap() {
    let mut queue = CircularQueue::with_cap(0);

    assert!(queue.is_empty());
    assert!(queue.is_full(), "A queue with no slots is always full.");
    assert_eq!(queue.push("a"), Err(QueueFull("a")));
    assert_eq!(queue.pop(), None);
}

#[test]
fn test_indexing_and_iteration() {
    let mut queue = CircularQueue::with_cap(4);
    for i in 0..4 {
        queue.push(i).unwrap();
    }
    queue.pop();
    queue.pop();
    queue.push(4).unwrap();

    assert_eq!(queue[0], 2, "Indexing should be relative to the front of the queue.");
    assert_eq!(queue[2], 4);
    assert_eq!(queue.get(3), None);
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
    assert_eq!(queue.iter().rev().copied().collect::<Vec<_>>(), [4, 3, 2]);
    assert_eq!(queue.iter().len(), 3);
    assert_eq!(format!("{:?}", queue), "CircularQueue { contents: [2, 3, 4], len: 3, cap: 4 }");

    assert_eq!(queue.clone(), queue, "A clone should hold the same items in the same order.");

    assert_panics!({
        let queue: CircularQueue<u8> = CircularQueue::with_cap(2);
        queue[0]
    });
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut queue = CircularQueue::with_cap(10);
    for item in iter::repeat_with(|| counter.clone()).take(10) {
        assert!(queue.push(item).is_ok());
    }

    drop(queue.pop());
    drop(queue.pop());
    assert_eq!(counter.count(), 2, "Popped items should be dropped by the caller.");

    assert!(queue.push(counter.clone()).is_ok());
    drop(queue);
    assert_eq!(counter.count(), 11, "Dropping the queue should drop every remaining item once.");
}

#[test]
fn test_clear() {
    let counter = CountedDrop::new(0);
    let mut queue = CircularQueue::with_cap(3);
    for item in iter::repeat_with(|| counter.clone()).take(3) {
        assert!(queue.push(item).is_ok());
    }

    queue.clear();
    assert_eq!(counter.count(), 3);
    assert!(queue.is_empty());
    assert_eq!(queue.cap(), 3, "Clearing shouldn't change the capacity.");
}

#[test]
fn test_clone() {
    let counter = CountedDrop::new(0);
    let mut queue = CircularQueue::with_cap(3);
    for _ in 0..3 {
        queue.push(counter.clone()).unwrap();
    }
    drop(queue.pop());
    queue.push(counter.clone()).unwrap();
    assert_eq!(queue.start, 1, "The original should have wrapped around.");
    assert_eq!(counter.count(), 1);

    let mut cloned = queue.clone();
    assert_eq!(cloned.start, 0, "A clone should be laid out from the first slot.");
    assert_eq!(cloned.len(), 3);
    assert!(cloned.is_full());

    drop(cloned.pop());
    assert!(cloned.push(counter.clone()).is_ok());
    assert_eq!(queue.len(), 3, "Changes to a clone shouldn't affect the original.");
    assert_eq!(counter.count(), 2);

    drop(cloned);
    assert_eq!(counter.count(), 5, "Dropping the clone should only drop its own items.");
    drop(queue);
    assert_eq!(counter.count(), 8);
}

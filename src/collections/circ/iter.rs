use std::iter::FusedIterator;

use super::CircularQueue;

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A borrowed iterator over the items of a [`CircularQueue`], from front to back.
pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    // Offsets from the front of the queue, not indices into the ring.
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) const fn new(queue: &'a CircularQueue<T>) -> Iter<'a, T> {
        Iter {
            queue,
            front: 0,
            back: queue.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let item = self.queue.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        self.queue.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

use std::fmt::{self, Debug, Display, Formatter};
use std::iter::FusedIterator;
use std::slice;
use std::sync::atomic::{AtomicU8, Ordering};

/// A borrowed, read-only view of the bytes behind a [`CowBuffer`](super::CowBuffer).
///
/// A View is obtained through [`CowBuffer::view`](super::CowBuffer::view) and borrows the handle
/// it came from, so it can't outlive the handle or be held across an
/// [`update`](super::CowBuffer::update) or [`close`](super::CowBuffer::close) of it. No bytes are
/// copied to create one.
///
/// Because storage can be written in place by another handle while it is still shared (see
/// [`CowBuffer::update`](super::CowBuffer::update)), a View reads its bytes one at a time rather
/// than handing out a `&[u8]`.
#[derive(Clone, Copy)]
pub struct View<'a> {
    bytes: &'a [AtomicU8],
}

impl<'a> View<'a> {
    pub(crate) const fn new(bytes: &'a [AtomicU8]) -> View<'a> {
        View { bytes }
    }

    /// Returns the number of bytes in the View.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the View contains no bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the byte at `index`, or None if it is out of bounds.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).map(|b| b.load(Ordering::Relaxed))
    }

    /// Returns an iterator over the bytes of the View, from first to last.
    pub fn iter(&self) -> Iter<'a> {
        Iter(self.bytes.iter())
    }

    /// Copies the current bytes of the View into an owned [`Vec`].
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Returns a pointer to the first byte of the underlying storage. Two Views with the same
    /// pointer (and length) are looking at the same storage.
    pub const fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr().cast()
    }
}

impl<'a> IntoIterator for View<'a> {
    type Item = u8;

    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &View<'a> {
    type Item = u8;

    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the bytes of a [`View`].
pub struct Iter<'a>(slice::Iter<'a, AtomicU8>);

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|b| b.load(Ordering::Relaxed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|b| b.load(Ordering::Relaxed))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl PartialEq<[u8]> for View<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter().copied())
    }
}

impl PartialEq<&[u8]> for View<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        *self == **other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for View<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self == other[..]
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for View<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        *self == other[..]
    }
}

impl PartialEq<str> for View<'_> {
    fn eq(&self, other: &str) -> bool {
        *self == *other.as_bytes()
    }
}

impl PartialEq<&str> for View<'_> {
    fn eq(&self, other: &&str) -> bool {
        *self == *other.as_bytes()
    }
}

impl<'b> PartialEq<View<'b>> for View<'_> {
    fn eq(&self, other: &View<'b>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for View<'_> {}

impl Debug for View<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Display for View<'_> {
    /// Writes the bytes as UTF-8, replacing invalid sequences.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_vec()))
    }
}

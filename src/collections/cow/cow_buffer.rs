use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use tracing::{debug, trace};

use super::{ShareCount, Storage, View};
use crate::util::error::IndexOutOfBounds;

/// A copy-on-write handle onto a byte array.
///
/// Cloning a CowBuffer produces another handle onto the same bytes and increments a share count
/// held by all of them. Nothing is copied until [`update`](CowBuffer::update) is called on a handle
/// whose share count is greater than 1, at which point that handle detaches onto a private copy.
///
/// The share count counts *other* handles: with `k` handles on one storage, it is `k - 1`.
///
/// Note that the detach threshold is "more than one *other* handle". A pair of handles (share count
/// 1) writes in place, and the write is visible through the other handle of the pair.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the buffer.
///
/// | Method | Complexity |
/// |-|-|
/// | `new` | `O(1)` |
/// | `clone` | `O(1)` |
/// | `get` | `O(1)` |
/// | `view` | `O(1)` |
/// | `update` | `O(1)`, `O(n)`* |
/// | `close` | `O(1)`** |
///
/// \* If the buffer has to detach, `update` copies every byte.
///
/// \** Freeing the storage when the last handle closes is `O(1)` plus the deallocation.
pub struct CowBuffer {
    pub(crate) storage: Arc<Storage>,
    pub(crate) shares: Arc<ShareCount>,
}

impl CowBuffer {
    /// Creates a new CowBuffer which takes ownership of `bytes`, without copying them. The new
    /// handle is the sole owner of its storage.
    ///
    /// Anything that converts into a `Box<[u8]>` is accepted. A [`Vec`] whose length matches its
    /// capacity keeps its allocation, otherwise the conversion reallocates once.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::cow::CowBuffer;
    /// let bytes: Box<[u8]> = Box::new(*b"abcd");
    /// let ptr = bytes.as_ptr();
    /// let buf = CowBuffer::new(bytes);
    /// assert_eq!(buf.as_ptr(), ptr);
    /// assert_eq!(buf.share_count(), 0);
    /// ```
    pub fn new(bytes: impl Into<Box<[u8]>>) -> CowBuffer {
        let storage = Storage::from_boxed(bytes.into());
        trace!(len = storage.len(), storage = ?storage.as_ptr(), "creating CowBuffer");

        CowBuffer {
            storage: Arc::new(storage),
            shares: Arc::new(ShareCount::new()),
        }
    }

    /// Returns the number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the buffer contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the byte at `index`, or None if it is out of bounds.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.storage.load(index)
    }

    /// Returns a borrowed view of the current bytes of this handle, without copying them.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::cow::CowBuffer;
    /// let buf = CowBuffer::from("abcd");
    /// assert_eq!(buf.view(), "abcd");
    /// assert_eq!(buf.view().to_string(), "abcd");
    /// ```
    pub fn view(&self) -> View<'_> {
        View::new(self.storage.bytes())
    }

    /// Returns the number of other handles currently sharing this handle's storage, as recorded by
    /// the share count.
    pub fn share_count(&self) -> usize {
        self.shares.get()
    }

    /// Returns a pointer to the first byte of this handle's storage. The pointer identifies the
    /// storage and changes when the handle detaches.
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    /// Returns true if self and `other` point at the same storage (not merely equal bytes).
    pub fn shares_storage_with(&self, other: &CowBuffer) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Sets the byte at `index` to `value`, returning false (and changing nothing) if `index` is
    /// out of bounds.
    ///
    /// If the share count is greater than 1, this handle first detaches: it leaves the shared
    /// count, copies the bytes into new storage and takes a new count of its own. Otherwise the
    /// write happens in place.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::cow::CowBuffer;
    /// let mut buf = CowBuffer::from("abcd");
    /// let a = buf.clone();
    /// let b = buf.clone();
    ///
    /// assert!(buf.update(0, b'g'));
    /// assert!(!buf.update(4, b'g'));
    /// assert_eq!(buf.view(), "gbcd");
    /// assert_eq!(a.view(), "abcd");
    /// assert!(a.shares_storage_with(&b));
    /// ```
    pub fn update(&mut self, index: usize, value: u8) -> bool {
        self.try_update(index, value).is_ok()
    }

    /// Sets the byte at `index` to `value`, following the same rules as
    /// [`update`](CowBuffer::update), but reporting an out of bounds index as an error.
    pub fn try_update(&mut self, index: usize, value: u8) -> Result<(), IndexOutOfBounds> {
        let len = self.len();
        if index >= len {
            return Err(IndexOutOfBounds { index, len });
        }

        let shares = self.shares.get();
        if shares > 1 {
            self.detach(shares);
        }

        // The index was checked against this length and detaching preserves it.
        self.storage.store(index, value);
        Ok(())
    }

    /// Closes this handle, giving up its share of the storage. The storage itself is freed once no
    /// handle points at it.
    ///
    /// Dropping a CowBuffer has the same effect, this method only exists to make the intent
    /// explicit.
    pub fn close(self) {
        drop(self);
    }

    /// Replaces this handle's storage and share count with a private copy and a fresh count.
    fn detach(&mut self, observed: usize) {
        let storage = Arc::new(self.storage.duplicate());
        debug!(
            shares = observed,
            from = ?self.storage.as_ptr(),
            to = ?storage.as_ptr(),
            len = storage.len(),
            "detaching CowBuffer from shared storage"
        );

        self.shares.release();
        self.storage = storage;
        self.shares = Arc::new(ShareCount::new());
    }
}

impl Clone for CowBuffer {
    fn clone(&self) -> Self {
        let shares = self.shares.acquire();
        trace!(shares, storage = ?self.storage.as_ptr(), "cloning CowBuffer");

        CowBuffer {
            storage: Arc::clone(&self.storage),
            shares: Arc::clone(&self.shares),
        }
    }
}

impl Drop for CowBuffer {
    fn drop(&mut self) {
        let shares = self.shares.release();
        trace!(shares, storage = ?self.storage.as_ptr(), "closing CowBuffer");
        // The Arc fields are dropped after this, releasing the storage if this was the last
        // handle pointing at it.
    }
}

impl From<Box<[u8]>> for CowBuffer {
    fn from(value: Box<[u8]>) -> Self {
        CowBuffer::new(value)
    }
}

impl From<Vec<u8>> for CowBuffer {
    fn from(value: Vec<u8>) -> Self {
        CowBuffer::new(value)
    }
}

impl From<&[u8]> for CowBuffer {
    fn from(value: &[u8]) -> Self {
        CowBuffer::new(value)
    }
}

impl<const N: usize> From<[u8; N]> for CowBuffer {
    fn from(value: [u8; N]) -> Self {
        CowBuffer::new(value)
    }
}

impl From<&str> for CowBuffer {
    fn from(value: &str) -> Self {
        CowBuffer::from(value.as_bytes())
    }
}

impl From<String> for CowBuffer {
    fn from(value: String) -> Self {
        CowBuffer::from(value.into_bytes())
    }
}

impl FromIterator<u8> for CowBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        CowBuffer::new(iter.into_iter().collect::<Box<[u8]>>())
    }
}

impl PartialEq for CowBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.view() == other.view()
    }
}

impl Eq for CowBuffer {}

impl Debug for CowBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowBuffer")
            .field("contents", &self.view())
            .field("shares", &self.shares)
            .field("storage", &self.as_ptr())
            .finish()
    }
}

impl Display for CowBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view())
    }
}

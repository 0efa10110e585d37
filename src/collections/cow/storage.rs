use std::sync::atomic::{AtomicU8, Ordering};

/// The backing bytes of one or more [`CowBuffer`](super::CowBuffer)s.
///
/// Bytes are stored as [`AtomicU8`] so that a handle which is allowed to write in place can do so
/// while another handle still holds the same storage, without that being a data race. Loads and
/// stores are relaxed: ordering between handles is the caller's responsibility.
pub(crate) struct Storage {
    bytes: Box<[AtomicU8]>,
}

impl Storage {
    /// Takes ownership of `bytes` without copying them.
    pub fn from_boxed(bytes: Box<[u8]>) -> Storage {
        let raw = Box::into_raw(bytes) as *mut [AtomicU8];
        // SAFETY: AtomicU8 has the same size, alignment and bit validity as u8, so the allocation
        // is a valid [AtomicU8] of the same length and layout. The pointer came from Box::into_raw
        // and ownership is reclaimed exactly once.
        let bytes = unsafe { Box::from_raw(raw) };
        Storage { bytes }
    }

    /// Allocates a new Storage holding a byte-for-byte copy of self.
    pub fn duplicate(&self) -> Storage {
        Storage {
            bytes: self.bytes
                .iter()
                .map(|b| AtomicU8::new(b.load(Ordering::Relaxed)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn load(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).map(|b| b.load(Ordering::Relaxed))
    }

    /// Writes `value` at `index`, returning false if the index is out of bounds.
    pub fn store(&self, index: usize, value: u8) -> bool {
        match self.bytes.get(index) {
            Some(b) => {
                b.store(value, Ordering::Relaxed);
                true
            },
            None => false,
        }
    }

    pub fn bytes(&self) -> &[AtomicU8] {
        &self.bytes
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr().cast()
    }
}

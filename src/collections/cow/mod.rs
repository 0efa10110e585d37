//! A module containing [`CowBuffer`] and associated types.
//!
//! A [`CowBuffer`] is a handle onto a byte array that may be shared with other handles. Cloning a
//! handle never copies bytes, it only bumps a share count that every handle on the same storage
//! points at. Writing through a handle consults that count and, if the storage is shared with more
//! than one other handle, forks a private copy first.
//!
//! The share count is only ever used to make that decision. Freeing the bytes is left to
//! [`Arc`](std::sync::Arc), so storage lives exactly as long as the last handle that points at it,
//! even if the share count has already reached zero.
//!
//! [`View`] provides borrowed, zero-copy read access to a handle's current bytes.

mod cow_buffer;
mod share_count;
mod storage;
mod tests;
mod view;

pub use cow_buffer::*;
pub(crate) use share_count::*;
pub(crate) use storage::*;
pub use view::*;

#[doc(inline)]
pub use crate::util::error::IndexOutOfBounds;

//! Collections backed by a binary search tree. Currently only [`BinaryTreeMap`].

pub mod map;

#[doc(inline)]
pub use map::BinaryTreeMap;

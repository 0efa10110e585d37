//! Various collection types.
//!
//! # Purpose
//! Each type here is an exercise in one particular idea: [`cow`] in shared ownership and atomic
//! bookkeeping, [`circ`] in index arithmetic over uninitialized storage and [`binary_tree`] in
//! recursive ownership through boxed nodes.

#[cfg(feature = "binary-tree")]
pub mod binary_tree;
#[cfg(feature = "circ")]
pub mod circ;
#[cfg(feature = "cow")]
pub mod cow;

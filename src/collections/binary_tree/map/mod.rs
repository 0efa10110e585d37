//! A module containing [`BinaryTreeMap`] and associated types.
//!
//! Other than the map itself, the included types are for iteration: owned and borrowed iteration
//! over entries in ascending key order, as well as borrowed iteration over just keys or values.
//!
//! [`BinaryTreeMap`] is also re-exported under the parent module.

mod binary_tree_map;
mod iter;
mod node;

pub use binary_tree_map::*;
pub use iter::*;
pub(crate) use node::*;

//! A small collection library built around a copy-on-write shared byte buffer.
//!
//! # Purpose
//! This crate is a set of data-structure exercises. Each one is small enough to read in one
//! sitting, but written to a level where it could be used for real. The centrepiece is
//! [`CowBuffer`](collections::cow::CowBuffer), a byte buffer that can be cloned for the price of an
//! atomic increment and only copies its bytes once a write would otherwise be seen by too many
//! other handles.
//!
//! Alongside it live two textbook structures:
//! - [`CircularQueue`](collections::circ::CircularQueue), a bounded FIFO queue over a fixed ring
//!   of slots.
//! - [`BinaryTreeMap`](collections::binary_tree::BinaryTreeMap), an ordered map backed by an
//!   unbalanced binary search tree.
//!
//! # Error Handling
//! Operations that can fail in ordinary use return either a [`bool`] / [`Option`] (when there is
//! nothing interesting to say about the failure) or a [`Result`] with a strongly typed error
//! struct. Error structs implement [`Error`](std::error::Error) and are mostly derived with
//! `derive_more`, rather than being boxed into a dynamic error type.
//!
//! Panics are reserved for indexing with `[]`, where the caller has opted out of checking.
//!
//! # Dependencies
//! - `derive_more` for the repetitive `Display` / `Error` implementations on error types.
//! - `tracing` (with the `cow` feature) for debug events when a buffer forks its storage. The
//!   crate never installs a subscriber, so these are free unless the application asks for them.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;

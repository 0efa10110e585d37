//! A module containing [`CircularQueue`] and associated types.
//!
//! Other than the queue itself, this includes [`QueueFull`], returned when pushing into a queue
//! with no free slots, and [`Iter`] for borrowed iteration from front to back.

mod circular_queue;
mod error;
mod iter;
mod tests;

pub use circular_queue::*;
pub use error::*;
pub use iter::*;

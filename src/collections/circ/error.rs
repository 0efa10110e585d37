use std::error::Error;
use std::fmt::Debug;

use derive_more::Display;

/// An error returned when pushing into a full [`CircularQueue`](super::CircularQueue). The
/// rejected value is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Unable to push into a full queue!")]
pub struct QueueFull<T>(pub T);

impl<T> QueueFull<T> {
    /// Takes back the value that couldn't be pushed.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Debug> Error for QueueFull<T> {}

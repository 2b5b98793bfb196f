//! Error type for heap operations
//!
//! Every failure is a local precondition violation, reported synchronously at
//! the offending call. Preconditions are checked before any mutation, so a
//! failed operation leaves the heap exactly as it was.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The operation requires a minimum element but the heap is empty
    EmptyHeap,
    /// The new priority passed to `decrease_key` is greater than the current one
    InvalidPriority,
    /// The handle refers to an element that has already been extracted
    StaleHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "the heap is empty"),
            HeapError::InvalidPriority => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::StaleHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

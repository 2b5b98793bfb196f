//! Fibonacci heap priority queue
//!
//! This crate provides a Fibonacci heap: a forest of heap-ordered multi-way
//! trees whose roots are linked in a circular doubly linked list. It offers:
//!
//! - O(1) amortized `insert`, `find_min`, `merge`, and `decrease_key`
//! - O(log n) amortized `delete_min` and `delete`
//!
//! The cheap `decrease_key` is what makes the structure the classical backing
//! store for Dijkstra's shortest-path and Prim's minimum-spanning-tree
//! algorithms, which decrease priorities far more often than they extract.
//!
//! `insert` returns a [`FibonacciHandle`] that must be retained to later call
//! [`FibonacciHeap::decrease_key`] or [`FibonacciHeap::delete`] on that
//! element. Handles detect extraction: using one after its element left the
//! heap reports [`HeapError::StaleHandle`] instead of corrupting the
//! structure.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_heap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let _a = heap.insert(5, "five");
//! let b = heap.insert(8, "eight");
//! heap.decrease_key(&b, 1).unwrap();
//! assert_eq!(heap.peek(), Some((&1, &"eight")));
//! assert_eq!(heap.delete_min(), Ok((1, "eight")));
//! assert_eq!(heap.delete_min(), Ok((5, "five")));
//! assert!(heap.is_empty());
//! ```
//!
//! The heap is single-threaded: it has no internal locking, and callers that
//! share one across threads must serialize every operation externally.

pub mod error;
pub mod fibonacci;

pub use error::HeapError;
pub use fibonacci::{FibonacciHandle, FibonacciHeap};

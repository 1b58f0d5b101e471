//! Data structures for concurrent collections.
//!
//! # Organization
//!
//! - [`parallel_list`] - Lazy sorted set with lock-free reads and per-node locks
//! - [`list_iter`] - External iterator over a `ParallelList`
//! - `list_node` - Node representation (crate-internal)

pub mod list_iter;
pub(crate) mod list_node;
pub mod parallel_list;

pub use list_iter::ListIter;
pub use parallel_list::ParallelList;

//! Concurrent ordered set with lock-free reads and fine-grained locked writes.
//!
//! # Usage
//!
//! ```
//! use parallel_list_core::{DeferredGuard, ParallelList};
//!
//! let list: ParallelList<i64, DeferredGuard> = ParallelList::new();
//! assert!(list.insert(5));
//! assert!(list.insert(3));
//! assert!(!list.insert(5));
//! assert!(list.contains(&3));
//! assert!(list.delete(&3));
//! assert_eq!(list.to_vec(), vec![5]);
//! assert_eq!(list.len(), 1);
//! ```
//!
//! For production use pick an epoch-based guard, see `parallel-list-crossbeam`.

pub mod common_tests;
pub mod data_structures;
pub mod guard;

// Re-exports for convenience
pub use data_structures::{ListIter, ParallelList};
pub use guard::{DeferredGuard, Guard};

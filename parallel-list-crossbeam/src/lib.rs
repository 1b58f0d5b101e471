//! Crossbeam-based memory reclamation for parallel-list collections.
//!
//! This crate provides `EpochGuard`, an implementation of the `Guard` trait
//! using crossbeam-epoch.
//!
//! # Usage
//!
//! ```
//! use parallel_list_crossbeam::EpochParallelList;
//!
//! let list: EpochParallelList<i64> = EpochParallelList::new();
//! list.insert(42);
//! assert!(list.contains(&42));
//! ```

pub mod epoch_guard;

use parallel_list_core::ParallelList;

// Export the Guard implementation
pub use epoch_guard::EpochGuard;

/// A `ParallelList` whose unlinked nodes are reclaimed with crossbeam-epoch.
pub type EpochParallelList<T> = ParallelList<T, EpochGuard>;

//! Epoch-based guard implementation using crossbeam-epoch.
//!
//! # Design
//!
//! `EpochGuard` is a zero-sized type that schedules destruction using the global
//! epoch collector. Lists parameterized with `EpochGuard` get epoch-based
//! memory reclamation:
//!
//! ```text
//! ParallelList<i64, EpochGuard>
//!     │
//!     └── Uses crossbeam-epoch for memory safety
//! ```
//!
//! Every list operation pins the current thread for the length of its
//! traversal. A node unlinked by `delete` is only freed after all threads
//! pinned at that moment have unpinned, so a reader still standing on it
//! never touches freed memory.
//!
//! # Example
//!
//! ```rust
//! use parallel_list_core::ParallelList;
//! use parallel_list_crossbeam::EpochGuard;
//!
//! let list: ParallelList<i64, EpochGuard> = ParallelList::new();
//!
//! list.insert(42);
//! list.insert(17);
//! assert!(list.delete(&42));
//! assert_eq!(list.to_vec(), vec![17]);
//! ```
//!
//! # Key requirements
//!
//! A deleted key is dropped by whichever thread collects the epoch garbage,
//! possibly after the deleting call returned. `delete` therefore requires
//! `T: Send + 'static`. Keys that are not `Send` are rejected:
//!
//! ```compile_fail
//! use std::rc::Rc;
//! use parallel_list_crossbeam::EpochParallelList;
//!
//! let list: EpochParallelList<Rc<i32>> = EpochParallelList::new();
//! list.insert(Rc::new(1));
//! list.delete(&Rc::new(1));
//! ```
//!
//! and so are borrowed keys:
//!
//! ```compile_fail
//! use parallel_list_crossbeam::EpochParallelList;
//!
//! let x = 5;
//! let list: EpochParallelList<&i32> = EpochParallelList::new();
//! list.insert(&x);
//! list.delete(&&x);
//! ```

use crossbeam_epoch::{self as epoch, Guard as CrossbeamGuard};
use parallel_list_core::Guard;

/// Epoch-based memory reclamation guard.
///
/// Nodes are not freed until all threads have advanced past the epoch
/// in which they were retired.
///
/// When `defer_destroy` is called, it:
/// 1. Pins the current thread to the current epoch
/// 2. Schedules the destruction to run after all threads have advanced
/// 3. Unpins immediately (the destruction is managed globally)
///
/// # Performance
///
/// - **Pin overhead**: Very low (thread-local check)
/// - **Reclamation**: Batched, amortized O(1) per node
/// - **Memory**: May accumulate while a thread stays pinned, e.g. a long-lived iterator
///
#[derive(Clone, Copy, Default)]
pub struct EpochGuard {
    // Zero-sized - all state is in the global epoch collector
}

impl EpochGuard {
    /// Create a new epoch guard.
    ///
    /// No-op: pinning happens per operation.
    pub fn new() -> Self {
        EpochGuard {}
    }
}

impl Guard for EpochGuard {
    /// A pinned crossbeam guard that protects reads until dropped.
    type ReadGuard = CrossbeamGuard;

    fn pin() -> Self::ReadGuard {
        epoch::pin()
    }

    unsafe fn defer_destroy<N: Send + 'static>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        let guard = epoch::pin();
        unsafe {
            guard.defer_unchecked(move || {
                dealloc(node);
            });
        }
        // guard dropped here - unpins the thread
    }
}

//! Guard trait for memory reclamation strategies.
//!
//! `ParallelList` unlinks deleted nodes while other threads may still be
//! walking over them. A node can only be freed once no reader can reach it,
//! so the list is generic over how that moment is decided:
//!
//! ```text
//! ParallelList<T, G: Guard>
//!     │
//!     ├── ParallelList<T, EpochGuard>      (production, parallel-list-crossbeam)
//!     └── ParallelList<T, DeferredGuard>   (testing)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use parallel_list_core::ParallelList;
//! use parallel_list_crossbeam::EpochGuard;
//!
//! let list: ParallelList<i64, EpochGuard> = ParallelList::new();
//! list.insert(42);
//! assert!(list.delete(&42));
//! ```

mod deferred_guard;

pub use deferred_guard::DeferredGuard;

/// A memory reclamation guard that protects concurrent access to nodes.
///
/// # Safety Contract
///
/// Implementations must ensure that a node passed to `defer_destroy` is not
/// freed while any thread holding a `ReadGuard` pinned before the call may
/// still dereference it.
///
/// Destruction may run on any thread and at any later time, so retired nodes
/// must be `Send + 'static`.
///
/// # Design Note
///
/// The guard instance stored in a list is only used to schedule destruction.
/// Reader protection happens per operation through [`Guard::pin`].
///
pub trait Guard: Sized + Default + Send + Sync {
    /// An active guard that protects reads for its lifetime.
    ///
    /// For epoch-based guards this is a pinned `crossbeam_epoch::Guard`.
    /// For deferred guards it is `()`, the stored guard already keeps every
    /// retired node alive until the list is dropped.
    ///
    type ReadGuard: Sized;

    /// Pin an active read guard.
    ///
    fn pin() -> Self::ReadGuard;

    /// Schedule a node for deferred destruction.
    ///
    /// # Safety
    ///
    /// - `node` must be a valid pointer allocated by the list
    /// - `node` must already be unlinked (not reachable from head)
    /// - `node` must be retired at most once
    /// - `dealloc` must be the correct deallocation function for `node`
    ///
    unsafe fn defer_destroy<N: Send + 'static>(&self, node: *mut N, dealloc: unsafe fn(*mut N));
}

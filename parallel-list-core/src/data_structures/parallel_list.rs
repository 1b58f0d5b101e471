use std::cmp;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicIsize, Ordering};

use crossbeam::utils::Backoff;

use crate::data_structures::list_iter::ListIter;
use crate::data_structures::list_node::{ListNode, NodePtr};
use crate::guard::Guard;

///
/// Concurrent sorted set based on the lazy list of Heller et al., 'A Lazy Concurrent List-Based Set Algorithm'.
/// Readers (contains, range, iter, len) never lock. Writers lock at most two adjacent nodes.
///
// =============================================================================
// LIST INVARIANTS
// =============================================================================
//
// ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
// │ HEAD │───►│  10  │───►│  20  │───►│  30  │───► NULL
// │(sent)│    │      │    │      │    │      │
// └──────┘    └──────┘    └──────┘    └──────┘
//
// 1. Keys reachable from HEAD are strictly ascending, no duplicates
// 2. HEAD is never marked or removed
// 3. A node is marked and unlinked under the same pair of locks
// 4. An unlinked node keeps its next pointer; readers standing on it can
//    still walk forward
//
// =============================================================================
// DELETE (lock target, then predecessor)
// =============================================================================
//
// Before:  pred ──────► target ──────► succ
//
// Lock target, check unmarked. Lock pred, check pred.next == target and
// pred unmarked. Then mark target and swing pred.next:
//
//          pred ───────────────────────► succ
//                       target ──────► succ   (marked, retired to the guard)
//
// Locks are always taken in descending key order (target before pred, HEAD
// sorts below every key), so writers cannot deadlock.
//
// =============================================================================
// INSERT (lock predecessor)
// =============================================================================
//
// Lock pred, check pred.next == succ and pred unmarked, then publish:
//
//          pred ──────► new ──────► succ
//
// The unmarked check matters: a deleted pred keeps pointing at succ, so
// "pred.next == succ" alone would accept a splice into an unlinked node and
// lose the insert.
//
pub struct ParallelList<T, G: Guard> {
    head: NodePtr<T>,
    length: AtomicIsize,
    /// Shared guard instance for deferred destruction of unlinked nodes.
    guard: G,
    _phantom: PhantomData<T>,
}

// Represents the window a key falls into.
//
#[derive(Debug)]
struct NodeLocation<T> {
    pred: NodePtr<T>,
    curr: NodePtr<T>,
}

/// Why a mutator had to start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryCause {
    PredecessorChanged,
    PredecessorMarked,
    TargetMarked,
}

impl RetryCause {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            RetryCause::PredecessorChanged => "predecessor_changed",
            RetryCause::PredecessorMarked => "predecessor_marked",
            RetryCause::TargetMarked => "target_marked",
        }
    }
}

impl<T, G> ParallelList<T, G>
where
    T: Ord,
    G: Guard,
{
    pub fn new() -> Self {
        // Create sentinel head node without a value.
        //
        let head_node = Box::into_raw(Box::new(ListNode::new_sentinel()));
        ParallelList {
            head: head_node,
            length: AtomicIsize::new(0),
            guard: G::default(),
            _phantom: PhantomData,
        }
    }

    /// Get the shared guard instance for this list.
    pub fn guard(&self) -> &G {
        &self.guard
    }

    /// Insert a key.
    ///
    /// Returns `true` if the key was inserted, `false` if it was already present.
    ///
    pub fn insert(&self, mut key: T) -> bool {
        let _guard = G::pin();
        let backoff = Backoff::new();

        loop {
            let location = self.find(&key);
            match self.link_after(location, key) {
                Ok(inserted) => return inserted,
                Err((cause, returned)) => {
                    key = returned;
                    Self::on_retry("insert", cause, &backoff);
                }
            }
        }
    }

    // Validate a window from `find` under pred's lock and splice `key` in.
    // On a failed validation the key is handed back so the caller can retry.
    // The caller must hold a read guard.
    //
    fn link_after(&self, location: NodeLocation<T>, key: T) -> Result<bool, (RetryCause, T)> {
        let (pred, succ) = (location.pred, location.curr);

        let pred = unsafe { &*pred };
        let pred_lock = pred.lock();

        if pred.get_next() != succ {
            return Err((RetryCause::PredecessorChanged, key));
        }

        if pred.is_marked() {
            return Err((RetryCause::PredecessorMarked, key));
        }

        // Check for duplicate.
        //
        if !succ.is_null() && unsafe { (*succ).key() } == &key {
            return Ok(false);
        }

        // The node is fully built before the release store publishes it.
        //
        let new_node = Box::into_raw(Box::new(ListNode::new(key, succ)));
        pred.set_next(new_node);
        drop(pred_lock);

        self.length.fetch_add(1, Ordering::Release);

        #[cfg(feature = "tracing")]
        tracing::trace!(op = "insert", "committed");

        Ok(true)
    }

    /// Delete a key.
    ///
    /// Returns `true` if the key was removed, `false` if it was not present.
    /// The unlinked node is handed to the guard for deferred destruction, which
    /// may drop the key on another thread after this call returns; hence
    /// `T: Send + 'static`.
    ///
    pub fn delete(&self, key: &T) -> bool
    where
        T: Send + 'static,
    {
        let _guard = G::pin();
        let backoff = Backoff::new();

        loop {
            let location = self.find(key);
            let (pred, target) = (location.pred, location.curr);

            // Absent keys are reported without retrying.
            //
            if target.is_null() || unsafe { (*target).key() } != key {
                return false;
            }

            let (pred, target_ref) = unsafe { (&*pred, &*target) };

            let target_lock = target_ref.lock();

            if target_ref.is_marked() {
                // Another thread is deleting the same node.
                drop(target_lock);
                Self::on_retry("delete", RetryCause::TargetMarked, &backoff);
                continue;
            }

            let pred_lock = pred.lock();

            if pred.get_next() != target {
                drop(pred_lock);
                drop(target_lock);
                Self::on_retry("delete", RetryCause::PredecessorChanged, &backoff);
                continue;
            }

            if pred.is_marked() {
                drop(pred_lock);
                drop(target_lock);
                Self::on_retry("delete", RetryCause::PredecessorMarked, &backoff);
                continue;
            }

            // Logical then physical removal, both under the two locks.
            //
            target_ref.mark();
            pred.set_next(target_ref.get_next());

            drop(pred_lock);
            drop(target_lock);

            unsafe {
                self.guard.defer_destroy(target, ListNode::dealloc_ptr);
            }

            self.length.fetch_sub(1, Ordering::Release);

            #[cfg(feature = "tracing")]
            tracing::trace!(op = "delete", "committed");

            return true;
        }
    }

    /// Check if a key is present and not logically deleted.
    ///
    /// Lock-free. Stops early once the walk passes the key's position.
    ///
    pub fn contains(&self, key: &T) -> bool {
        let _guard = G::pin();
        let mut curr = unsafe { (*self.head).get_next() };

        while !curr.is_null() {
            let node = unsafe { &*curr };
            match node.key().cmp(key) {
                cmp::Ordering::Less => curr = node.get_next(),
                cmp::Ordering::Equal => return !node.is_marked(),
                cmp::Ordering::Greater => return false,
            }
        }

        false
    }

    /// Visit keys in ascending order until `visitor` returns `false`.
    ///
    /// Lock-free and weakly consistent. Unlike [`contains`](Self::contains),
    /// marked nodes are not filtered: a node deleted after the walk stepped
    /// onto it is still reported. Concurrent inserts may or may not be seen
    /// depending on where the walk is.
    ///
    pub fn range<F>(&self, mut visitor: F)
    where
        F: FnMut(&T) -> bool,
    {
        let _guard = G::pin();
        let mut curr = unsafe { (*self.head).get_next() };

        while !curr.is_null() {
            let node = unsafe { &*curr };
            if !visitor(node.key()) {
                return;
            }
            curr = node.get_next();
        }
    }

    /// Returns an iterator over the keys in ascending order.
    ///
    /// Same consistency as [`range`](Self::range).
    ///
    pub fn iter(&self) -> ListIter<'_, T, G> {
        ListIter::new(self, G::pin(), unsafe { (*self.head).get_next() })
    }

    /// Collects all keys into a Vec.
    ///
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().collect()
    }

    /// Net number of committed inserts minus committed deletes.
    ///
    /// O(1). The counter is updated after each commit's locks are released,
    /// so it can briefly lag a concurrent traversal. It can even dip below
    /// zero for an instant when a delete of a fresh node beats the insert's
    /// increment; that is reported as 0.
    ///
    pub fn len(&self) -> usize {
        self.length.load(Ordering::Acquire).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Core operation: lock-free search for the window around `key`.
    // Returns NodeLocation (pred, curr) where curr is null or the first node
    // with key >= `key`. The caller must hold a read guard and re-validate.
    //
    fn find(&self, key: &T) -> NodeLocation<T> {
        let mut pred = self.head;
        let mut curr = unsafe { (*pred).get_next() };

        while !curr.is_null() && unsafe { (*curr).key() } < key {
            pred = curr;
            curr = unsafe { (*curr).get_next() };
        }

        NodeLocation { pred, curr }
    }

    #[inline]
    fn on_retry(op: &'static str, cause: RetryCause, backoff: &Backoff) {
        #[cfg(feature = "tracing")]
        tracing::trace!(op, cause = cause.as_str(), "validation failed, retrying");
        #[cfg(not(feature = "tracing"))]
        let _ = (op, cause);

        backoff.snooze();
    }
}

impl<T, G> Default for ParallelList<T, G>
where
    T: Ord,
    G: Guard,
{
    fn default() -> Self {
        Self::new()
    }
}

// Safety: all shared node state is accessed through atomics or node locks,
// and retired nodes are owned by the guard.
unsafe impl<T: Send + Sync, G: Guard> Send for ParallelList<T, G> {}
unsafe impl<T: Send + Sync, G: Guard> Sync for ParallelList<T, G> {}

impl<T, G: Guard> Drop for ParallelList<T, G> {
    fn drop(&mut self) {
        // Free every node still reachable, including the sentinel. Retired
        // nodes are not reachable and belong to the guard.
        //
        let mut curr = self.head;

        while !curr.is_null() {
            unsafe {
                let node = &*curr;
                debug_assert!(
                    node.is_sentinel() || !node.is_marked(),
                    "INVARIANT VIOLATION: marked node still reachable at drop time"
                );

                let next = node.get_next();
                ListNode::dealloc_ptr(curr);
                curr = next;
            }
        }
    }
}

// ============================================================================
// Tests - Unique to ParallelList internals
// ============================================================================
// Note: Common tests are in common_tests and run from tests/

use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};

use parking_lot::{Mutex, MutexGuard};

pub(crate) type NodePtr<T> = *mut ListNode<T>;

/// A node of a `ParallelList`.
///
/// The key is immutable after construction. `marked` flips false → true exactly
/// once, by the delete that unlinks the node. `next` is left intact after
/// unlinking so that a reader already standing on the node can keep walking.
///
/// The lock guards structural changes to this node's `next` field and to its
/// role as a predecessor. Readers never take it.
///
#[derive(Debug)]
pub struct ListNode<T> {
    data: Option<T>,
    marked: AtomicBool,
    next: AtomicPtr<ListNode<T>>,
    lock: Mutex<()>,
}

impl<T> ListNode<T> {
    pub(crate) fn new(key: T, next: NodePtr<T>) -> Self {
        ListNode {
            data: Some(key),
            marked: AtomicBool::new(false),
            next: AtomicPtr::new(next),
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn new_sentinel() -> Self {
        ListNode {
            data: None,
            marked: AtomicBool::new(false),
            next: AtomicPtr::new(ptr::null_mut()),
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn is_sentinel(&self) -> bool {
        self.data.is_none()
    }

    pub fn key(&self) -> &T {
        self.data
            .as_ref()
            .expect("Cannot get key from sentinel node")
    }

    // =========================================================================
    // Next pointer accessors
    // =========================================================================

    /// Load next pointer (Acquire ordering)
    #[inline]
    pub(crate) fn get_next(&self) -> NodePtr<T> {
        self.next.load(Ordering::Acquire)
    }

    /// Store next pointer (Release ordering)
    #[inline]
    pub(crate) fn set_next(&self, ptr: NodePtr<T>) {
        self.next.store(ptr, Ordering::Release)
    }

    // =========================================================================
    // Logical deletion
    // =========================================================================

    #[inline]
    pub(crate) fn mark(&self) {
        self.marked.store(true, Ordering::Release)
    }

    #[inline]
    pub(crate) fn is_marked(&self) -> bool {
        self.marked.load(Ordering::Acquire)
    }

    /// Acquire this node's lock. Released when the returned guard drops.
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock()
    }

    /// Deallocate a node created with `Box::new`.
    ///
    /// # Safety
    /// - `ptr` must come from `Box::into_raw` of a `ListNode<T>`
    /// - Must only be called once, and no thread may access the node afterwards
    ///
    pub(crate) unsafe fn dealloc_ptr(ptr: NodePtr<T>) {
        unsafe { drop(Box::from_raw(ptr)) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_unmarked() {
        let node = ListNode::new(5, ptr::null_mut());
        assert_eq!(*node.key(), 5);
        assert!(!node.is_marked());
        assert!(node.get_next().is_null());
        assert!(!node.is_sentinel());
    }

    #[test]
    fn test_mark_is_idempotent() {
        let node = ListNode::new(1, ptr::null_mut());
        node.mark();
        node.mark();
        assert!(node.is_marked());
    }

    #[test]
    fn test_set_next_publishes_pointer() {
        let tail = Box::into_raw(Box::new(ListNode::new(2, ptr::null_mut())));
        let node = ListNode::new(1, ptr::null_mut());

        node.set_next(tail);
        assert_eq!(node.get_next(), tail);

        unsafe { ListNode::dealloc_ptr(tail) };
    }

    #[test]
    fn test_lock_is_exclusive() {
        let node: ListNode<i32> = ListNode::new_sentinel();
        assert!(node.is_sentinel());

        let held = node.lock();
        assert!(node.lock.try_lock().is_none());
        drop(held);
        assert!(node.lock.try_lock().is_some());
    }

    #[test]
    #[should_panic(expected = "sentinel")]
    fn test_sentinel_has_no_key() {
        let node: ListNode<i32> = ListNode::new_sentinel();
        let _ = node.key();
    }
}

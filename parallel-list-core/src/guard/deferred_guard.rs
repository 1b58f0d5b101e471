//! Deferred guard implementation for testing.
//!
//! `DeferredGuard` keeps every retired node alive until the guard itself is
//! dropped, which happens when the owning list is dropped.

use std::collections::HashSet;

use parking_lot::Mutex;

use super::Guard;

/// A simple guard that defers all node destruction until the guard is dropped.
///
/// Useful for tests where destruction timing must be predictable. Memory
/// grows with every delete, so it is not meant for long-running use.
///
/// In debug builds every retired address is remembered, and retiring the
/// same node twice panics. A double retire means two deletes both believed
/// they unlinked the node.
///
pub struct DeferredGuard {
    retired: Mutex<Vec<RetiredNode>>,
    #[cfg(debug_assertions)]
    seen: Mutex<HashSet<usize>>,
}

struct RetiredNode {
    ptr: *mut (),
    dealloc: unsafe fn(*mut ()),
}

// Safety: the pointer is only dereferenced by `dealloc` when the guard drops,
// and access to the vector is serialized by the mutex.
unsafe impl Send for RetiredNode {}

impl DeferredGuard {
    /// Create a new deferred guard.
    pub fn new() -> Self {
        DeferredGuard {
            retired: Mutex::new(Vec::new()),
            #[cfg(debug_assertions)]
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Number of nodes retired so far and waiting for the guard to drop.
    pub fn retired_count(&self) -> usize {
        self.retired.lock().len()
    }
}

impl Default for DeferredGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeferredGuard {
    fn drop(&mut self) {
        let nodes = self.retired.get_mut();

        let mut seen: HashSet<usize> = HashSet::with_capacity(nodes.len());
        let dup_count = nodes
            .iter()
            .filter(|node| !seen.insert(node.ptr as usize))
            .count();
        if dup_count > 0 {
            eprintln!(
                "Total duplicates: {}, total retired nodes: {}",
                dup_count,
                nodes.len()
            );
            panic!("Found {} duplicate pointer(s) in retired list", dup_count);
        }

        for node in nodes.drain(..) {
            unsafe {
                (node.dealloc)(node.ptr);
            }
        }
    }
}

impl Guard for DeferredGuard {
    /// No-op: the stored guard protects every retired node until it drops.
    type ReadGuard = ();

    fn pin() -> Self::ReadGuard {}

    unsafe fn defer_destroy<N: Send + 'static>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        #[cfg(debug_assertions)]
        {
            let addr = node as usize;
            if !self.seen.lock().insert(addr) {
                panic!("DUPLICATE defer_destroy at {:#x}", addr);
            }
        }

        let node = RetiredNode {
            ptr: node as *mut (),
            dealloc: unsafe {
                std::mem::transmute::<unsafe fn(*mut N), unsafe fn(*mut ())>(dealloc)
            },
        };
        self.retired.lock().push(node);
    }
}

//! External iterator over a `ParallelList`.

use std::marker::PhantomData;

use crate::data_structures::ParallelList;
use crate::data_structures::list_node::NodePtr;
use crate::guard::Guard;

/// Iterator over the keys of a `ParallelList`, in ascending order.
///
/// Holds a read guard for the whole iteration, so every node the cursor
/// reaches stays allocated until the iterator is dropped. Consistency is the
/// same as `ParallelList::range`: logically deleted nodes the cursor has
/// already reached are still yielded.
///
pub struct ListIter<'a, T, G: Guard> {
    _guard: G::ReadGuard,
    current: NodePtr<T>,
    _list: PhantomData<&'a ParallelList<T, G>>,
}

impl<'a, T, G> ListIter<'a, T, G>
where
    T: Ord,
    G: Guard,
{
    pub(crate) fn new(
        _list: &'a ParallelList<T, G>,
        guard: G::ReadGuard,
        first: NodePtr<T>,
    ) -> Self {
        Self {
            _guard: guard,
            current: first,
            _list: PhantomData,
        }
    }
}

impl<T, G> Iterator for ListIter<'_, T, G>
where
    T: Ord + Clone,
    G: Guard,
{
    // Cloned keys: a reference could not outlive the guard moved into self.
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }

        // Safety: the read guard keeps the node allocated
        let node = unsafe { &*self.current };
        self.current = node.get_next();

        Some(node.key().clone())
    }
}

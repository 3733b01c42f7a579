use std::{rc::Rc, sync::Arc};

/// Reference identity for nodes handed to an [`IdMap`](crate::IdMap).
///
/// The map never compares nodes by value. Release checks that the caller is
/// naming the slot's current occupant, and allocate rejects a node that is
/// already registered; both go through `identity`.
///
/// The returned address must stay stable for as long as the node is in the
/// map, and must differ from every other registered node's. The provided
/// `Arc`/`Rc` impls use the allocation address, so two clones of the same
/// pointer are the same node and separate allocations never collide.
pub trait NodeRef {
    /// Returns the stable address identifying this node.
    fn identity(&self) -> usize;
}

impl<T: ?Sized> NodeRef for Arc<T> {
    fn identity(&self) -> usize {
        Arc::as_ptr(self) as *const () as usize
    }
}

impl<T: ?Sized> NodeRef for Rc<T> {
    fn identity(&self) -> usize {
        Rc::as_ptr(self) as *const () as usize
    }
}

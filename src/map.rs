use crate::{Error, NodeRef, Result};
use rustc_hash::FxHashSet;
use std::num::NonZeroU32;

#[cfg(test)]
mod tests;

/// Sentinel ending the free list. Never a valid slot index: a slot here
/// would need an id of `u32::MAX + 1`.
const NIL: u32 = u32::MAX;

/// Opaque 1-based handle to a node registered in an [`IdMap`].
///
/// The numeric value is the node's slot index plus one. `0` never names a
/// node, so `Option<ItemId>` round-trips through a raw `u32` with `0`
/// standing for `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(NonZeroU32);

impl ItemId {
    /// Converts a raw integer into a handle. Returns `None` for `0`.
    ///
    /// The result is well formed but not necessarily live; pass it to
    /// [`IdMap::get`] to find out.
    pub fn from_raw(raw: u32) -> Option<ItemId> {
        NonZeroU32::new(raw).map(ItemId)
    }

    /// Returns the raw integer value of the handle.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    fn from_index(index: usize) -> ItemId {
        assert!(index < NIL as usize, "item id space exhausted");

        match NonZeroU32::new(index as u32 + 1) {
            Some(raw) => ItemId(raw),
            None => unreachable!(),
        }
    }

    fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

enum Slot<N> {
    Occupied(N),

    /// Vacant slot holding the index of the next free slot, [`NIL`] at the
    /// end of the chain.
    Vacant(u32),
}

/// Bidirectional map between nodes and 1-based integer handles.
///
/// Allocation pops the most recently freed slot when one exists and appends
/// otherwise, so the table never shrinks and stays proportional to the peak
/// number of live nodes. A handle keeps resolving to its node until that
/// exact node is released; nothing else changes the mapping.
///
/// The map has no internal locking. It is meant to be owned by the single
/// context that mutates the hierarchy; see [`MapHandle`](crate::MapHandle)
/// for routing access from several threads through one owner.
pub struct IdMap<N> {
    /// Head of the free list threaded through vacant slots.
    free: u32,
    slots: Vec<Slot<N>>,

    /// Identities of every node currently occupying a slot.
    live: FxHashSet<usize>,
}

impl<N: NodeRef> IdMap<N> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            free: NIL,
            slots: Vec::new(),
            live: FxHashSet::default(),
        }
    }

    /// Registers `node` and returns its handle.
    ///
    /// The handle stays valid until [`release`](Self::release) is called with
    /// this node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already registered in this map. A node can hold
    /// only one live handle at a time; allocating it twice is a bug in the
    /// owning tree.
    pub fn allocate(&mut self, node: N) -> ItemId {
        assert!(
            self.live.insert(node.identity()),
            "node is already registered in this map"
        );

        let index = self.free;

        if index != NIL {
            let slot = &mut self.slots[index as usize];
            if let Slot::Vacant(next) = *slot {
                self.free = next;
                *slot = Slot::Occupied(node);
                return ItemId::from_index(index as usize);
            } else {
                panic!("free list head points at an occupied slot");
            }
        }

        let index = self.slots.len();
        let id = ItemId::from_index(index);

        self.slots.push(Slot::Occupied(node));
        id
    }

    /// Removes `node` from the map, retiring its handle.
    ///
    /// `id` must be the handle [`allocate`](Self::allocate) returned for this
    /// exact node. Anything else fails with [`ErrorKind::InvalidState`]: an
    /// id that was never issued, an id already released, or an id whose slot
    /// is occupied by a different node. A failed release leaves the map
    /// untouched.
    ///
    /// The freed slot becomes the first candidate for the next allocation.
    ///
    /// [`ErrorKind::InvalidState`]: crate::ErrorKind::InvalidState
    pub fn release(&mut self, node: &N, id: ItemId) -> Result<()> {
        let index = id.index();

        let Some(slot) = self.slots.get_mut(index) else {
            return Err(Error::invalid_release(id));
        };
        match slot {
            Slot::Occupied(occupant) if occupant.identity() == node.identity() => {}
            _ => return Err(Error::invalid_release(id)),
        }

        *slot = Slot::Vacant(self.free);
        self.free = index as u32;
        self.live.remove(&node.identity());

        Ok(())
    }

    /// Returns the node registered under `id`, if any.
    pub fn get(&self, id: ItemId) -> Option<&N> {
        match self.slots.get(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns the node registered under the raw handle value `raw`.
    ///
    /// Total over all integers: `0`, values past the end of the table and
    /// released handles all return `None`.
    pub fn lookup(&self, raw: u32) -> Option<&N> {
        self.get(ItemId::from_raw(raw)?)
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns the size of the slot table, vacant slots included.
    ///
    /// Never decreases. Bounded by the peak number of simultaneously live
    /// nodes, not by the number of allocations performed.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl<N: NodeRef> Default for IdMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use super::handle::Handle;

/// Shared by every arena, so a `(handle, stamp)` pair issued by one tree never matches a
/// node of another tree.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// One arena slot. `stamp` records which allocation currently lives here.
struct Slot<T> {
    stamp: u64,
    element: Option<T>,
}

/// Slot storage for tree nodes.
///
/// Freed slots are recycled through a free list. Every allocation draws a fresh stamp
/// from a crate-wide counter, so a stale or foreign `(handle, stamp)` pair never matches
/// the current occupant of a slot.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let stamp = next_stamp();

        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Slot {
                stamp,
                element: Some(element),
            };
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot {
                stamp,
                element: Some(element),
            });
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Iterates the occupied slots in slot order (not key order).
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.element.as_mut().map(|element| (Handle::from_index(index), element)))
    }

    /// Returns the number of slots ever handed out, occupied or free.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the stamp of the allocation currently occupying `handle`.
    #[inline]
    pub(crate) fn stamp(&self, handle: Handle) -> u64 {
        self.slots[handle.to_index()].stamp
    }

    /// Returns true if `handle` is occupied by the allocation stamped `stamp`.
    pub(crate) fn is_live(&self, handle: Handle, stamp: u64) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.stamp == stamp && slot.element.is_some())
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].element.take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    /// Empties the arena. The stamp counter is not reset, so ids issued before the clear stay dead.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

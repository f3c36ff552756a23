use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot inside the tree's arena.
///
/// Links between nodes (`left`, `right`, `parent`) are plain handles, so a child never
/// owns its parent and the arena is the only owner of every node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Identifies one node of a [`Tree`](crate::Tree), [`TreeMap`](crate::TreeMap) or
/// [`TreeSet`](crate::TreeSet).
///
/// A `NodeId` is returned by insertion and lookup and stays valid until its node is
/// removed or the container is cleared. Every allocation is stamped, so an id whose node
/// has gone is rejected even after the slot has been reused by a later insert.
///
/// Stamps are unique across all containers, so an id handed to a container that did not
/// issue it (a clone included) is rejected too. Swapping two containers carries their
/// ids along with their contents.
///
/// # Examples
///
/// ```
/// use boundary_tree::Tree;
///
/// let mut tree = Tree::new();
/// let (id, _) = tree.insert(7, "seven");
/// assert_eq!(tree.node(id).map(|n| *n.key()), Some(7));
///
/// tree.remove(&7);
/// assert!(tree.node(id).is_none());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    pub(crate) handle: Handle,
    pub(crate) stamp: u64,
}

impl NodeId {
    #[inline]
    pub(crate) const fn new(handle: Handle, stamp: u64) -> Self {
        Self {
            handle,
            stamp,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // `Option<Handle>` links must cost nothing over a bare handle.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn node_ids_differ_by_stamp() {
        let handle = Handle::from_index(3);
        assert_ne!(NodeId::new(handle, 0), NodeId::new(handle, 1));
        assert_eq!(NodeId::new(handle, 5), NodeId::new(handle, 5));
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            assert_eq!(handle.to_index(), index);
        }
    }
}

use super::handle::Handle;

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single tree vertex.
///
/// `left` and `right` are owning links in the sense that a node is reachable from the
/// root only through them; `parent` is a plain back-reference used for traversal.
/// `is_min`/`is_max` mark the node currently holding the tree-wide extreme key.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    is_min: bool,
    is_max: bool,
}

impl<K, V> Node<K, V> {
    /// Creates a detached node with no links and no boundary flags.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent: None,
            is_min: false,
            is_max: false,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) fn key_value_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    /// Replaces the value, returning the old one.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_key_value(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn is_min(&self) -> bool {
        self.is_min
    }

    #[inline]
    pub(crate) const fn is_max(&self) -> bool {
        self.is_max
    }

    pub(crate) fn set_min(&mut self, is_min: bool) {
        self.is_min = is_min;
    }

    pub(crate) fn set_max(&mut self, is_max: bool) {
        self.is_max = is_max;
    }

    /// Returns the boundary flag guarding steps towards `side`: stepping right stops at
    /// the maximum, stepping left stops at the minimum.
    #[inline]
    pub(crate) const fn is_boundary(&self, side: Side) -> bool {
        match side {
            Side::Left => self.is_min,
            Side::Right => self.is_max,
        }
    }

    /// Copies key, value and boundary flags into a fresh, unlinked node.
    pub(crate) fn detached_clone(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            left: None,
            right: None,
            parent: None,
            is_min: self.is_min,
            is_max: self.is_max,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_detached() {
        let node = Node::new(25, "v");
        assert_eq!(*node.key(), 25);
        assert_eq!(*node.value(), "v");
        assert!(node.left().is_none() && node.right().is_none());
        assert!(node.parent().is_none());
        assert!(!node.is_min());
        assert!(!node.is_max());
    }

    #[test]
    fn child_by_side() {
        let mut node = Node::new(1, ());
        let h = Handle::from_index(4);
        node.set_child(Side::Right, Some(h));
        assert_eq!(node.child(Side::Right), Some(h));
        assert_eq!(node.child(Side::Right.opposite()), None);
        assert_eq!(node.left(), None);
    }

    #[test]
    fn detached_clone_keeps_flags_drops_links() {
        let mut node = Node::new(3, 30);
        node.set_min(true);
        node.set_parent(Some(Handle::from_index(0)));
        node.set_child(Side::Left, Some(Handle::from_index(1)));

        let copy = node.detached_clone();
        assert!(copy.is_min());
        assert!(copy.is_boundary(Side::Left));
        assert!(!copy.is_boundary(Side::Right));
        assert!(copy.left().is_none() && copy.right().is_none());
        assert!(copy.parent().is_none());
        assert_eq!(copy.into_key_value(), (3, 30));
    }
}

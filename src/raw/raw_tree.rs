use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::{Handle, NodeId};
use super::node::{Node, Side};

/// The unbalanced binary search tree backing `Tree`, `TreeMap` and `TreeSet`.
///
/// Every node lives in `nodes`; `root`, `min` and `max` are handles into it. The node
/// at `min` is the only node flagged `is_min`, and likewise for `max`.
pub(crate) struct RawTree<K, V> {
    /// Arena owning every node of the tree.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
    /// Handle to the node holding the smallest key.
    min: Option<Handle>,
    /// Handle to the node holding the largest key.
    max: Option<Handle>,
}

/// Pending work for the iterative subtree copy: source node, copied parent, and which
/// child slot of the copied parent the copy goes into.
type CopyStack = SmallVec<[(Handle, Option<Handle>, Side); 32]>;

impl<K, V> RawTree<K, V> {
    /// Largest number of nodes one tree can address.
    pub(crate) const MAX_LEN: usize = Handle::MAX + 1;

    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            min: None,
            max: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            min: None,
            max: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the node capacity of the arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) const fn min(&self) -> Option<Handle> {
        self.min
    }

    pub(crate) const fn max(&self) -> Option<Handle> {
        self.max
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the public id of the node at `handle`.
    pub(crate) fn id(&self, handle: Handle) -> NodeId {
        NodeId::new(handle, self.nodes.stamp(handle))
    }

    /// Maps a public id back to a handle, if its node is still in the tree.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<Handle> {
        self.nodes.is_live(id.handle, id.stamp).then_some(id.handle)
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        trace!(len = self.len, "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.min = None;
        self.max = None;
    }

    /// Exchanges the contents of two trees without touching any node.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Follows `side` links from `handle` until there are none left.
    pub(crate) fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Returns the in-order neighbour of `handle` towards `side` (`Right` is the successor),
    /// ignoring boundary flags.
    ///
    /// With a child on `side`, the neighbour is the opposite-most node of that subtree.
    /// Otherwise climb while the current node hangs off its parent's `side` slot; the
    /// first parent reached from the other slot is the neighbour.
    pub(crate) fn neighbour(&self, handle: Handle, side: Side) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(child) = node.child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = handle;
        let mut parent = node.parent();
        while let Some(p) = parent {
            let parent_node = self.nodes.get(p);
            if parent_node.child(side) != Some(current) {
                break;
            }
            current = p;
            parent = parent_node.parent();
        }
        parent
    }

    /// Steps from `handle` towards `side`, stopping at the flagged boundary node.
    ///
    /// Returns `None` when `handle` is the boundary in that direction.
    #[inline]
    pub(crate) fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if self.nodes.get(handle).is_boundary(side) {
            None
        } else {
            self.neighbour(handle, side)
        }
    }

    /// Returns the handles of every node in key order.
    pub(crate) fn in_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.min;
        while let Some(handle) = current {
            handles.push(handle);
            current = self.step(handle, Side::Right);
        }
        handles
    }

    /// Returns the handles of every node in pre-order (node, left subtree, right subtree).
    pub(crate) fn pre_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            handles.push(handle);
            let node = self.nodes.get(handle);
            stack.extend(node.right());
            stack.extend(node.left());
        }
        handles
    }

    /// Returns every key with a mutable reference to its value, in key order.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.in_order_handles();
        let mut by_slot: Vec<Option<(&K, &mut V)>> = (0..self.nodes.slot_count()).map(|_| None).collect();
        for (handle, node) in self.nodes.iter_mut() {
            by_slot[handle.to_index()] = Some(node.key_value_mut());
        }
        order.into_iter().filter_map(|handle| by_slot[handle.to_index()].take()).collect()
    }

    /// Drains all key-value pairs from the tree in key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.in_order_handles();
        let result: Vec<(K, V)> = order.into_iter().map(|handle| self.nodes.take(handle).into_key_value()).collect();
        self.clear();
        result
    }

    /// Points the link that referenced `old` (its parent's child slot, or the root) at `new`.
    fn replace_link(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.left() == Some(old) {
                    parent_node.set_child(Side::Left, new);
                } else {
                    parent_node.set_child(Side::Right, new);
                }
            }
        }
    }

    /// Moves the boundary flag on `side` off `handle` onto its in-order neighbour.
    ///
    /// The neighbour of the minimum is always its successor (the minimum has no left
    /// child), so the recomputed extreme is exact.
    fn hand_off_bound(&mut self, handle: Handle, side: Side) {
        let next = self.neighbour(handle, side.opposite());
        match side {
            Side::Left => self.min = next,
            Side::Right => self.max = next,
        }
        if let Some(next) = next {
            let node = self.nodes.get_mut(next);
            match side {
                Side::Left => node.set_min(true),
                Side::Right => node.set_max(true),
            }
            trace!(from = ?handle, to = ?next, ?side, "moved boundary flag");
        }
    }

    /// Unlinks the node at `handle` and returns its key and value.
    pub(crate) fn remove_handle(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.get(handle);
        let (is_min, is_max) = (node.is_min(), node.is_max());
        let (left, right, parent) = (node.left(), node.right(), node.parent());

        // Extremes are recomputed before any link changes.
        if is_min {
            self.hand_off_bound(handle, Side::Left);
        }
        if is_max {
            self.hand_off_bound(handle, Side::Right);
        }

        let replacement = match (left, right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => Some(self.splice_successor(handle, left, right)),
        };

        if let Some(replacement) = replacement {
            self.nodes.get_mut(replacement).set_parent(parent);
        }
        self.replace_link(parent, handle, replacement);

        self.len -= 1;
        let entry = self.nodes.take(handle).into_key_value();
        debug_assert_eq!(self.nodes.len(), self.len);
        entry
    }

    /// Detaches the leftmost node of `right` and gives it the children of the node being
    /// removed. Returns the successor, which still needs its parent link set.
    fn splice_successor(&mut self, removed: Handle, left: Handle, right: Handle) -> Handle {
        let successor = self.extreme(right, Side::Left);

        if successor != right {
            let successor_node = self.nodes.get(successor);
            let successor_parent =
                successor_node.parent().expect("`RawTree::splice_successor()` - successor below `right` has no parent!");
            let successor_right = successor_node.right();

            // The successor's right subtree takes its place under its old parent.
            self.nodes.get_mut(successor_parent).set_child(Side::Left, successor_right);
            if let Some(r) = successor_right {
                self.nodes.get_mut(r).set_parent(Some(successor_parent));
            }

            self.nodes.get_mut(successor).set_child(Side::Right, Some(right));
            self.nodes.get_mut(right).set_parent(Some(successor));
        }

        self.nodes.get_mut(successor).set_child(Side::Left, Some(left));
        self.nodes.get_mut(left).set_parent(Some(successor));

        trace!(?removed, ?successor, "spliced in-order successor");
        successor
    }

    /// Copies the subtree rooted at `top` into a fresh tree.
    ///
    /// When `top` is the root, boundary flags and cached extremes carry over as they are.
    /// For any other subtree they are recomputed for the subtree's own extremes.
    pub(crate) fn copy_subtree(&self, top: Handle) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let whole = self.root == Some(top);
        let mut copy = Self::with_capacity(if whole { self.len } else { 0 });

        let mut stack: CopyStack = SmallVec::new();
        stack.push((top, None, Side::Left));

        while let Some((source, new_parent, side)) = stack.pop() {
            let node = self.nodes.get(source);
            let mut duplicate = node.detached_clone();
            duplicate.set_parent(new_parent);
            if !whole {
                duplicate.set_min(false);
                duplicate.set_max(false);
            }

            let handle = copy.nodes.alloc(duplicate);
            match new_parent {
                None => copy.root = Some(handle),
                Some(p) => copy.nodes.get_mut(p).set_child(side, Some(handle)),
            }
            if whole && node.is_min() {
                copy.min = Some(handle);
            }
            if whole && node.is_max() {
                copy.max = Some(handle);
            }
            copy.len += 1;

            if let Some(right) = node.right() {
                stack.push((right, Some(handle), Side::Right));
            }
            if let Some(left) = node.left() {
                stack.push((left, Some(handle), Side::Left));
            }
        }

        if !whole {
            copy.flag_extremes();
        }
        copy
    }

    /// Flags the leftmost and rightmost nodes and caches them.
    fn flag_extremes(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        let min = self.extreme(root, Side::Left);
        let max = self.extreme(root, Side::Right);
        self.nodes.get_mut(min).set_min(true);
        self.nodes.get_mut(max).set_max(true);
        self.min = Some(min);
        self.max = Some(max);
    }
}

impl<K: Ord, V> RawTree<K, V> {
    /// Searches for a key and returns the handle of its node if found.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.nodes.get(handle).value())
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.nodes.get(self.search(key)?);
        Some((node.key(), node.value()))
    }

    /// Returns true if the tree contains the specified key.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts `key` unless it is already present.
    ///
    /// Returns the handle of the node holding `key` and whether a node was created.
    /// `value` is only called for a new node; an existing node is left untouched.
    pub(crate) fn insert_with<F>(&mut self, key: K, value: F) -> (Handle, bool)
    where
        F: FnOnce() -> V,
    {
        let Some(mut current) = self.root else {
            let mut node = Node::new(key, value());
            node.set_min(true);
            node.set_max(true);
            let handle = self.nodes.alloc(node);
            self.root = Some(handle);
            self.min = Some(handle);
            self.max = Some(handle);
            self.len = 1;
            trace!(root = ?handle, "created root");
            return (handle, true);
        };

        let side = loop {
            let node = self.nodes.get(current);
            let side = match key.cmp(node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return (current, false),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let new_min = self.min.filter(|&m| key < *self.nodes.get(m).key());
        let new_max = self.max.filter(|&m| key > *self.nodes.get(m).key());

        let mut node = Node::new(key, value());
        node.set_parent(Some(current));
        node.set_min(new_min.is_some());
        node.set_max(new_max.is_some());
        let handle = self.nodes.alloc(node);
        self.nodes.get_mut(current).set_child(side, Some(handle));

        if let Some(old) = new_min {
            self.nodes.get_mut(old).set_min(false);
            self.min = Some(handle);
            trace!(from = ?old, to = ?handle, "new minimum");
        }
        if let Some(old) = new_max {
            self.nodes.get_mut(old).set_max(false);
            self.max = Some(handle);
            trace!(from = ?old, to = ?handle, "new maximum");
        }

        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        (handle, true)
    }

    /// Inserts `key` with `value`, keeping the existing node on a duplicate key.
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        self.insert_with(key, || value)
    }

    /// Inserts `key` with `value`, overwriting the value of an existing node.
    ///
    /// Returns the node handle and the replaced value, if any.
    pub(crate) fn insert_or_assign(&mut self, key: K, value: V) -> (Handle, Option<V>) {
        match self.search(&key) {
            Some(handle) => {
                let old = self.nodes.get_mut(handle).replace_value(value);
                (handle, Some(old))
            }
            None => (self.insert(key, value).0, None),
        }
    }

    /// Removes a key from the tree, returning the stored key and value if it was present.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.remove_handle(handle))
    }

    /// Moves every entry of `other` whose key is absent here into `self`.
    ///
    /// Entries with conflicting keys stay in `other`. Entries move in `other`'s pre-order,
    /// so a reasonably shaped `other` does not turn into a chain on arrival.
    pub(crate) fn merge(&mut self, other: &mut Self) {
        let movable: Vec<Handle> = other
            .pre_order_handles()
            .into_iter()
            .filter(|&handle| !self.contains_key(other.node(handle).key()))
            .collect();

        // Handles stay valid while other nodes are unlinked around them.
        for handle in movable {
            let (key, value) = other.remove_handle(handle);
            self.insert(key, value);
        }
    }
}

impl<K: Clone, V: Clone> Clone for RawTree<K, V> {
    fn clone(&self) -> Self {
        match self.root {
            Some(root) => self.copy_subtree(root),
            None => Self::new(),
        }
    }
}

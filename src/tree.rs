use core::borrow::Borrow;
use core::fmt;

use crate::cursor::Cursor;
use crate::raw::{Handle, NodeId, RawTree};
use crate::tree_map::{IntoIter, Iter, IterMut};

/// An unbalanced binary search tree with boundary-flagged nodes.
///
/// `Tree` is the engine underneath [`TreeMap`](crate::TreeMap) and
/// [`TreeSet`](crate::TreeSet), exposed directly for callers who want to work with node
/// ids, inspect the node graph, or drive a [`Cursor`].
///
/// Each node stores a key, a value, links to its children and its parent, and two
/// boundary flags. Exactly one node is flagged as the minimum and exactly one as the
/// maximum whenever the tree is non-empty; both flags are maintained on every insert and
/// remove, which lets cursors stop at the ends without sentinel nodes.
///
/// The tree performs no rebalancing. Operations cost O(h) where h is the height, so keys
/// inserted in sorted order produce a chain and linear-time operations. Nothing in the
/// tree recurses, so even a chain of any length is safe to clone and drop.
///
/// # Examples
///
/// ```
/// use boundary_tree::Tree;
///
/// let mut tree = Tree::new();
/// for key in [12, 2, 16, 13] {
///     tree.insert(key, ());
/// }
///
/// assert_eq!(tree.min(), Some(&2));
/// assert_eq!(tree.max(), Some(&16));
///
/// let root = tree.root().unwrap();
/// assert_eq!(*root.key(), 12);
/// let thirteen = tree.search(&13).unwrap();
/// assert_eq!(root.right().and_then(|n| n.left()).map(|n| n.id()), Some(thirteen));
///
/// tree.remove(&12);
/// assert_eq!(*tree.root().unwrap().key(), 13);
/// assert_eq!(tree.len(), 3);
/// ```
pub struct Tree<K, V> {
    raw: RawTree<K, V>,
}

/// A borrowed view of one node and its links.
///
/// Created by [`Tree::root`], [`Tree::node`] and [`Cursor::node`].
pub struct NodeRef<'a, K, V> {
    tree: &'a RawTree<K, V>,
    handle: Handle,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) const fn new(tree: &'a RawTree<K, V>, handle: Handle) -> Self {
        Self {
            tree,
            handle,
        }
    }

    fn wrap(&self, handle: Option<Handle>) -> Option<NodeRef<'a, K, V>> {
        handle.map(|handle| NodeRef::new(self.tree, handle))
    }

    /// Returns the node's key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.tree.node(self.handle).key()
    }

    /// Returns the node's value.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.tree.node(self.handle).value()
    }

    /// Returns the left child.
    #[must_use]
    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.wrap(self.tree.node(self.handle).left())
    }

    /// Returns the right child.
    #[must_use]
    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.wrap(self.tree.node(self.handle).right())
    }

    /// Returns the parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a, K, V>> {
        self.wrap(self.tree.node(self.handle).parent())
    }

    /// Returns true if this node holds the smallest key in the tree.
    #[must_use]
    pub fn is_min(&self) -> bool {
        self.tree.node(self.handle).is_min()
    }

    /// Returns true if this node holds the largest key in the tree.
    #[must_use]
    pub fn is_max(&self) -> bool {
        self.tree.node(self.handle).is_max()
    }

    /// Returns the node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.tree.id(self.handle)
    }

    /// Returns a cursor positioned on this node.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'a, K, V> {
        Cursor::new(self.tree, self.handle)
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("is_min", &self.is_min())
            .field("is_max", &self.is_max())
            .finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Makes a new, empty `Tree`. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawTree::new(),
        }
    }

    /// Creates an empty tree with room for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every node. Ids issued before the clear stop resolving.
    ///
    /// # Complexity
    ///
    /// O(n), without recursion.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents of two trees in O(1).
    ///
    /// Node ids follow their nodes into the other tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::Tree;
    ///
    /// let mut a: Tree<_, _> = [(1, ()), (2, ())].into_iter().collect();
    /// let mut b = Tree::new();
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b.len(), 2);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(1) - the minimum node is cached.
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.raw.min().map(|handle| self.raw.node(handle).key())
    }

    /// Returns the largest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(1) - the maximum node is cached.
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.raw.max().map(|handle| self.raw.node(handle).key())
    }

    /// Returns a view of the root node.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.raw.root().map(|handle| NodeRef::new(&self.raw, handle))
    }

    /// Returns a view of the node named by `id`, or `None` if it has been removed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.raw.resolve(id).map(|handle| NodeRef::new(&self.raw, handle))
    }

    /// Returns a mutable reference to the value of the node named by `id`.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        let handle = self.raw.resolve(id)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns a cursor on the minimum, or `None` if the tree is empty.
    #[must_use]
    pub fn begin(&self) -> Option<Cursor<'_, K, V>> {
        self.raw.min().map(|handle| Cursor::new(&self.raw, handle))
    }

    /// Returns a cursor on the maximum, or `None` if the tree is empty.
    ///
    /// This is the last element itself, not a position past it.
    #[must_use]
    pub fn end(&self) -> Option<Cursor<'_, K, V>> {
        self.raw.max().map(|handle| Cursor::new(&self.raw, handle))
    }

    /// Returns a cursor on the node named by `id`.
    #[must_use]
    pub fn cursor_at(&self, id: NodeId) -> Option<Cursor<'_, K, V>> {
        self.raw.resolve(id).map(|handle| Cursor::new(&self.raw, handle))
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.raw)
    }

    /// Gets a mutable iterator over the entries of the tree, sorted by key.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.raw)
    }

    /// Removes the node named by `id`, returning its key and value.
    ///
    /// Returns `None` if the id no longer names a node.
    pub fn remove_node(&mut self, id: NodeId) -> Option<(K, V)> {
        let handle = self.raw.resolve(id)?;
        Some(self.raw.remove_handle(handle))
    }

    /// Deep-copies the subtree rooted at `id` into a standalone tree.
    ///
    /// The copy's boundary flags mark the subtree's own extremes. Copying from the root
    /// is the same as [`Clone::clone`].
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::Tree;
    ///
    /// let tree: Tree<_, _> = [12, 2, 16, 13, 20].into_iter().map(|k| (k, ())).collect();
    /// let sixteen = tree.search(&16).unwrap();
    /// let copy = tree.copy_subtree(sixteen).unwrap();
    /// assert_eq!(copy.min(), Some(&13));
    /// assert_eq!(copy.max(), Some(&20));
    /// assert_eq!(copy.len(), 3);
    /// ```
    #[must_use]
    pub fn copy_subtree(&self, id: NodeId) -> Option<Self>
    where
        K: Clone,
        V: Clone,
    {
        let handle = self.raw.resolve(id)?;
        Some(Self {
            raw: self.raw.copy_subtree(handle),
        })
    }
}

impl<K: Ord, V> Tree<K, V> {
    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns the id of the node holding `key` and whether a node was created. On a
    /// duplicate key nothing changes and `value` is dropped; search first and use
    /// [`value_mut`](Self::value_mut) to overwrite.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let (first, inserted) = tree.insert(1, "a");
    /// assert!(inserted);
    /// let (again, inserted) = tree.insert(1, "b");
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (NodeId, bool) {
        let (handle, inserted) = self.raw.insert(key, value);
        (self.raw.id(handle), inserted)
    }

    /// Returns the id of the node holding `key`.
    pub fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|handle| self.raw.id(handle))
    }

    /// Returns a cursor on the node holding `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|handle| Cursor::new(&self.raw, handle))
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns true if the tree holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Removes `key`, returning the stored key and value. Absent keys are a no-op.
    ///
    /// A node with two children is replaced by its in-order successor. The cached
    /// minimum and maximum are recomputed exactly.
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }
}

impl<K: Clone, V: Clone> Clone for Tree<K, V> {
    /// Deep-copies every node. Shape, boundary flags and cached extremes carry over.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.raw.drain_to_vec())
    }
}

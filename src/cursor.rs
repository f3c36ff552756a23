use core::fmt;

use crate::raw::{Handle, NodeId, RawTree, Side};
use crate::tree::NodeRef;

/// A read-only cursor positioned on one node of a tree.
///
/// Cursors have no past-the-end position. [`Tree::begin`](crate::Tree::begin) yields the
/// node flagged as the minimum and [`Tree::end`](crate::Tree::end) the node flagged as the
/// maximum; both are real elements, so a full walk covers `[begin, end]` inclusively.
/// Moving past either boundary is a no-op.
///
/// A cursor borrows its tree, so the tree cannot be modified while the cursor is alive.
///
/// # Examples
///
/// ```
/// use boundary_tree::Tree;
///
/// let tree: Tree<_, _> = [(12, 'a'), (2, 'b'), (16, 'c'), (13, 'd')].into_iter().collect();
///
/// let mut cursor = tree.begin().unwrap();
/// let end = tree.end().unwrap();
/// let mut keys = vec![*cursor.key()];
/// while cursor != end {
///     cursor.move_next();
///     keys.push(*cursor.key());
/// }
/// assert_eq!(keys, [2, 12, 13, 16]);
///
/// // The maximum is sticky.
/// assert!(!cursor.move_next());
/// assert_eq!(*cursor.key(), 16);
/// ```
pub struct Cursor<'a, K, V> {
    tree: &'a RawTree<K, V>,
    handle: Handle,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn new(tree: &'a RawTree<K, V>, handle: Handle) -> Self {
        Self {
            tree,
            handle,
        }
    }

    /// Returns the key at the cursor.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.tree.node(self.handle).key()
    }

    /// Returns the value at the cursor.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.tree.node(self.handle).value()
    }

    /// Returns the key and value at the cursor.
    #[must_use]
    pub fn key_value(&self) -> (&'a K, &'a V) {
        let node = self.tree.node(self.handle);
        (node.key(), node.value())
    }

    /// Returns the id of the node at the cursor.
    ///
    /// The id outlives the cursor, so it can be handed to an `erase` once the borrow ends.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.tree.id(self.handle)
    }

    /// Returns a view of the node at the cursor, including its links.
    #[must_use]
    pub fn node(&self) -> NodeRef<'a, K, V> {
        NodeRef::new(self.tree, self.handle)
    }

    /// Returns true if the cursor is on the minimum key.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.tree.node(self.handle).is_min()
    }

    /// Returns true if the cursor is on the maximum key.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.tree.node(self.handle).is_max()
    }

    /// Moves to the next key in order. Does nothing on the maximum.
    ///
    /// Returns true if the cursor moved.
    ///
    /// # Complexity
    ///
    /// O(h) worst case, amortized O(1) over a full walk.
    pub fn move_next(&mut self) -> bool {
        self.shift(Side::Right)
    }

    /// Moves to the previous key in order. Does nothing on the minimum.
    ///
    /// Returns true if the cursor moved.
    pub fn move_prev(&mut self) -> bool {
        self.shift(Side::Left)
    }

    /// Returns the entry after the cursor without moving, or `None` on the maximum.
    #[must_use]
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        self.peek(Side::Right)
    }

    /// Returns the entry before the cursor without moving, or `None` on the minimum.
    #[must_use]
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        self.peek(Side::Left)
    }

    fn shift(&mut self, side: Side) -> bool {
        match self.tree.step(self.handle, side) {
            Some(next) => {
                self.handle = next;
                true
            }
            None => false,
        }
    }

    fn peek(&self, side: Side) -> Option<(&'a K, &'a V)> {
        let node = self.tree.node(self.tree.step(self.handle, side)?);
        Some((node.key(), node.value()))
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

/// Two cursors are equal when they sit on the same node of the same tree.
impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::Tree;
    use alloc::vec::Vec;

    fn sample() -> Tree<i32, i32> {
        let mut tree = Tree::new();
        for key in [12, 2, 16, 13, 0] {
            tree.insert(key, key * 10);
        }
        tree
    }

    #[test]
    fn walks_forward_and_back_with_sticky_ends() {
        let tree = sample();
        let root = tree.root().unwrap();
        let mut cursor = root.left().unwrap().cursor();
        let start = cursor;
        assert_eq!(*cursor.key(), 2);

        cursor.move_next(); // 12
        cursor.move_next(); // 13
        assert_ne!(cursor, start);
        cursor.move_next(); // 16
        assert!(!cursor.move_next());
        assert!(!cursor.move_next());
        assert_eq!(*cursor.key(), 16);

        cursor.move_prev(); // 13
        cursor.move_prev(); // 12
        cursor.move_prev(); // 2
        cursor.move_prev(); // 0
        assert!(!cursor.move_prev());
        assert_eq!(*cursor.key(), 0);
        cursor.move_next(); // 2

        assert_eq!(cursor, start);
        assert_eq!(*cursor.key(), 2);
        assert_eq!(*cursor.value(), 20);
    }

    #[test]
    fn peeks_do_not_move() {
        let tree = sample();
        let cursor = tree.find(&12).unwrap();
        assert_eq!(cursor.peek_next(), Some((&13, &130)));
        assert_eq!(cursor.peek_prev(), Some((&2, &20)));
        assert_eq!(*cursor.key(), 12);

        assert_eq!(tree.begin().unwrap().peek_prev(), None);
        assert_eq!(tree.end().unwrap().peek_next(), None);
    }

    #[test]
    fn begin_and_end_are_flagged_nodes() {
        let tree = sample();
        let begin = tree.begin().unwrap();
        let end = tree.end().unwrap();
        assert!(begin.is_begin() && !begin.is_end());
        assert!(end.is_end() && !end.is_begin());
        assert_eq!(*begin.key(), 0);
        assert_eq!(*end.key(), 16);
    }

    #[test]
    fn single_node_is_both_ends() {
        let mut tree = Tree::new();
        tree.insert(1, ());
        let mut cursor = tree.begin().unwrap();
        assert_eq!(cursor, tree.end().unwrap());
        assert!(!cursor.move_next());
        assert!(!cursor.move_prev());
    }

    #[test]
    fn cursors_of_different_trees_differ() {
        let a = sample();
        let b = sample();
        assert_ne!(a.begin().unwrap(), b.begin().unwrap());
    }

    #[test]
    fn id_survives_the_cursor() {
        let mut tree = sample();
        let id = tree.find(&13).unwrap().id();
        assert_eq!(tree.remove_node(id), Some((13, 130)));
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, [0, 2, 12, 16]);
    }
}

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::raw::{Handle, NodeId, RawIter, RawTree};

mod capacity;

/// An ordered map based on an unbalanced [binary search tree].
///
/// Keys must implement [`Ord`]. Iterators produced by [`TreeMap::iter`],
/// [`TreeMap::into_iter`], [`TreeMap::keys`] and [`TreeMap::values`] yield entries in key
/// order.
///
/// Unlike `BTreeMap`, [`insert`](TreeMap::insert) never overwrites: inserting a key that
/// is already present leaves the stored value alone and reports `false`. Use
/// [`insert_or_assign`](TreeMap::insert_or_assign) to overwrite.
///
/// The tree is not rebalanced. Lookups, inserts and removals cost O(h) where h is the
/// height of the tree, which is O(log n) for keys arriving in random order and O(n) for
/// keys arriving sorted.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `TreeMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use boundary_tree::TreeMap;
///
/// let mut capitals = TreeMap::new();
/// capitals.insert("England", "London");
/// capitals.insert("France", "Paris");
/// capitals.insert("Peru", "Lima");
///
/// assert_eq!(capitals["France"], "Paris");
///
/// // Inserting an existing key keeps the first value.
/// let (_, inserted) = capitals.insert("France", "Lyon");
/// assert!(!inserted);
/// assert_eq!(capitals["France"], "Paris");
///
/// capitals.remove("Peru");
/// let countries: Vec<_> = capitals.keys().copied().collect();
/// assert_eq!(countries, ["England", "France"]);
/// ```
///
/// A `TreeMap` with a known list of items can be initialized from an array:
///
/// ```
/// use boundary_tree::TreeMap;
///
/// let solar_distance = TreeMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.first_key_value(), Some((&"Earth", &1.0)));
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
pub struct TreeMap<K, V> {
    raw: RawTree<K, V>,
}

/// An iterator over the entries of a `TreeMap`.
///
/// This `struct` is created by the [`iter`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use boundary_tree::TreeMap;
///
/// let map = TreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: TreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// A mutable iterator over the entries of a `TreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// [`iter_mut`]: TreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: alloc::vec::IntoIter<(&'a K, &'a mut V)>,
}

/// An owning iterator over the entries of a `TreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `TreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`TreeMap`].
///
/// [`keys`]: TreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values`] method on [`TreeMap`].
///
/// [`values`]: TreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`TreeMap`].
///
/// [`values_mut`]: TreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// An owning iterator over the keys of a `TreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`TreeMap`].
///
/// [`into_keys`]: TreeMap::into_keys
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`TreeMap`].
///
/// [`into_values`]: TreeMap::into_values
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> TreeMap<K, V> {
    /// Makes a new, empty `TreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> TreeMap<K, V> {
        TreeMap {
            raw: RawTree::new(),
        }
    }

    /// Clears the map, removing all elements.
    ///
    /// Node ids issued before the clear no longer resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the first key-value pair in the map. The key in this pair is the minimum
    /// key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.min().map(|handle| self.cursor_on(handle).key_value())
    }

    /// Returns the last key-value pair in the map. The key in this pair is the maximum
    /// key in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.max().map(|handle| self.cursor_on(handle).key_value())
    }

    /// Returns a cursor on the first entry, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let map = TreeMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// let mut cursor = map.begin().unwrap();
    /// assert_eq!(cursor.key_value(), (&1, &'a'));
    /// cursor.move_next();
    /// assert_eq!(*cursor.key(), 2);
    /// ```
    #[must_use]
    pub fn begin(&self) -> Option<Cursor<'_, K, V>> {
        self.raw.min().map(|handle| self.cursor_on(handle))
    }

    /// Returns a cursor on the last entry, or `None` if the map is empty.
    ///
    /// The cursor sits on a real entry; there is no past-the-end position.
    #[must_use]
    pub fn end(&self) -> Option<Cursor<'_, K, V>> {
        self.raw.max().map(|handle| self.cursor_on(handle))
    }

    fn cursor_on(&self, handle: Handle) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, handle)
    }

    /// Visits entries root first, then the left subtree, then the right subtree.
    ///
    /// Inserting the entries into an empty map in this order rebuilds the same shape.
    #[cfg(any(feature = "serde", test))]
    pub(crate) fn pre_order(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.raw.pre_order_handles().into_iter().map(|handle| self.cursor_on(handle).key_value())
    }

    /// Removes the entry named by `id`, returning its key and value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the entry has already been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::{Error, TreeMap};
    ///
    /// let mut map = TreeMap::from([(1, "a"), (2, "b")]);
    /// let id = map.find(&1).unwrap().id();
    /// assert_eq!(map.erase(id), Ok((1, "a")));
    /// assert_eq!(map.erase(id), Err(Error::KeyNotFound));
    /// ```
    pub fn erase(&mut self, id: NodeId) -> Result<(K, V)> {
        let handle = self.raw.resolve(id).ok_or(Error::KeyNotFound)?;
        Ok(self.raw.remove_handle(handle))
    }

    /// Swaps the contents of `self` and `other` in O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut a = TreeMap::from([(1, "a")]);
    /// let mut b = TreeMap::from([(2, "b"), (3, "c")]);
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(b.get(&1), Some(&"a"));
    /// ```
    pub fn swap(&mut self, other: &mut TreeMap<K, V>) {
        self.raw.swap(&mut other.raw);
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.raw)
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map["c"], 13);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) to set up; each step is then O(1).
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.raw)
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter(),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let map = TreeMap::from([(2, "b"), (1, "hello")]);
    /// let values: Vec<&str> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello", "b"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.iter(),
        }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::from([(1, String::from("hello")), (2, String::from("goodbye"))]);
    /// for value in map.values_mut() {
    ///     value.push('!');
    /// }
    /// let values: Vec<String> = map.values().cloned().collect();
    /// assert_eq!(values, ["hello!", "goodbye!"]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Returns a reference to the value for `key`, or an error if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the map does not contain `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::{Error, TreeMap};
    ///
    /// let map = TreeMap::from([("a", 1)]);
    /// assert_eq!(map.at("a"), Ok(&1));
    /// assert_eq!(map.at("b"), Err(Error::OutOfRange));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).ok_or(Error::OutOfRange)
    }

    /// Returns a mutable reference to the value for `key`, or an error if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the map does not contain `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key).ok_or(Error::OutOfRange)
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()` first
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut counts: TreeMap<&str, u32> = TreeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts["a"], 2);
    /// assert_eq!(counts["b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let (handle, _) = self.raw.insert_with(key, V::default);
        self.raw.node_mut(handle).value_mut()
    }

    /// Returns a cursor on the entry for `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|handle| self.cursor_on(handle))
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// Returns a cursor on the entry holding `key` and `true` if it was inserted. When the
    /// key is already present the map is unchanged and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let (cursor, inserted) = map.insert(37, "a");
    /// assert!(inserted);
    /// assert_eq!(*cursor.value(), "a");
    ///
    /// let (cursor, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(*cursor.value(), "a");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool) {
        let (handle, inserted) = self.raw.insert(key, value);
        (self.cursor_on(handle), inserted)
    }

    /// Inserts a key-value pair, overwriting the value if the key is already present.
    ///
    /// Returns a cursor on the entry and `true` if a new entry was created.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::from([(1, "a")]);
    /// let (cursor, inserted) = map.insert_or_assign(1, "z");
    /// assert!(!inserted);
    /// assert_eq!(*cursor.value(), "z");
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool) {
        let (handle, old) = self.raw.insert_or_assign(key, value);
        (self.cursor_on(handle), old.is_none())
    }

    /// Removes a key from the map, returning the value at the key if the key was
    /// previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key was
    /// previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Moves every entry of `other` whose key is not in `self` into `self`.
    ///
    /// Entries whose key is already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let mut a = TreeMap::from([(1, "a"), (2, "b")]);
    /// let mut b = TreeMap::from([(2, "x"), (3, "c")]);
    /// a.merge(&mut b);
    ///
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a[&2], "b");
    /// assert_eq!(b.into_iter().collect::<Vec<_>>(), [(2, "x")]);
    /// ```
    pub fn merge(&mut self, other: &mut TreeMap<K, V>) {
        self.raw.merge(&mut other.raw);
    }
}

impl<K: Clone, V: Clone> Clone for TreeMap<K, V> {
    fn clone(&self) -> Self {
        TreeMap {
            raw: self.raw.clone(),
        }
    }
}

impl<K: Hash, V: Hash> Hash for TreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for TreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for TreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for TreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        TreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    /// Inserts every pair. A key that is already present keeps its current value.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for TreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut TreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let map = TreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.raw.drain_to_vec())
    }
}

impl<K, Q, V> Index<&Q> for TreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `TreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

// ─── Iter ───────────────────────────────────────────────────────────────────

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        Iter {
            inner: RawIter::new(tree),
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── IterMut ────────────────────────────────────────────────────────────────

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(tree: &'a mut RawTree<K, V>) -> Self {
        IterMut {
            inner: tree.entries_mut().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.inner.len()).finish()
    }
}

// ─── IntoIter ───────────────────────────────────────────────────────────────

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: alloc::vec::Vec<(K, V)>) -> Self {
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `tree_map::IntoIter`.
    ///
    /// ```
    /// # use boundary_tree::tree_map;
    /// let iter: tree_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter::new(alloc::vec::Vec::new())
    }
}

// ─── Keys / Values ──────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.len()).finish()
    }
}

// ─── IntoKeys / IntoValues ──────────────────────────────────────────────────

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoKeys").field("len", &self.inner.len()).finish()
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoValues").field("len", &self.inner.len()).finish()
    }
}

// ─── serde ──────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TreeMap;

    /// Entries are written in pre-order, so inserting them back in the order read
    /// rebuilds the same shape.
    impl<K: Serialize, V: Serialize> Serialize for TreeMap<K, V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.pre_order() {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    struct TreeMapVisitor<K, V> {
        marker: PhantomData<fn() -> TreeMap<K, V>>,
    }

    impl<'de, K, V> Visitor<'de> for TreeMapVisitor<K, V>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
    {
        type Value = TreeMap<K, V>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut map = TreeMap::new();
            // A repeated key keeps its last value.
            while let Some((k, v)) = access.next_entry()? {
                map.insert_or_assign(k, v);
            }
            Ok(map)
        }
    }

    impl<'de, K, V> Deserialize<'de> for TreeMap<K, V>
    where
        K: Deserialize<'de> + Ord,
        V: Deserialize<'de>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(TreeMapVisitor {
                marker: PhantomData,
            })
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::raw::assert_invariants;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn insert_does_not_overwrite() {
        let mut map = TreeMap::new();
        assert!(map.insert(1, "a").1);
        assert!(!map.insert(1, "b").1);
        assert_eq!(map[&1], "a");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn insert_or_assign_overwrites() {
        let mut map = TreeMap::new();
        assert!(map.insert_or_assign(1, "a").1);
        assert!(!map.insert_or_assign(1, "b").1);
        assert_eq!(map[&1], "b");
        assert_invariants(&map.raw);
    }

    #[test]
    fn at_reports_out_of_range() {
        let mut map = TreeMap::from([(1, 10)]);
        assert_eq!(map.at(&2), Err(Error::OutOfRange));
        *map.at_mut(&1).unwrap() = 11;
        assert_eq!(map.at(&1), Ok(&11));
        assert_eq!(map.at_mut(&3), Err(Error::OutOfRange));
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_panics_when_absent() {
        let map: TreeMap<i32, i32> = TreeMap::new();
        let _ = map[&1];
    }

    #[test]
    fn get_or_insert_default_inserts_once() {
        let mut map: TreeMap<i32, String> = TreeMap::new();
        map.get_or_insert_default(5).push('x');
        map.get_or_insert_default(5).push('y');
        assert_eq!(map.get(&5).map(String::as_str), Some("xy"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn erase_by_cursor_id() {
        let mut map = TreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
        let id = map.find(&2).unwrap().id();
        assert_eq!(map.erase(id), Ok((2, 'b')));
        assert_eq!(map.erase(id), Err(Error::KeyNotFound));
        map.insert(2, 'z');
        assert_eq!(map.erase(id), Err(Error::KeyNotFound));
        assert_invariants(&map.raw);
    }

    #[test]
    fn begin_end_cover_all_entries() {
        let map = TreeMap::from([(5, ()), (3, ()), (8, ()), (4, ())]);
        let mut cursor = map.begin().unwrap();
        let end = map.end().unwrap();
        let mut keys = alloc::vec![*cursor.key()];
        while cursor != end {
            cursor.move_next();
            keys.push(*cursor.key());
        }
        assert_eq!(keys, [3, 4, 5, 8]);
        assert_eq!(map.first_key_value(), Some((&3, &())));
        assert_eq!(map.last_key_value(), Some((&8, &())));
    }

    #[test]
    fn empty_map_has_no_cursors() {
        let map: TreeMap<u8, u8> = TreeMap::default();
        assert!(map.begin().is_none());
        assert!(map.end().is_none());
        assert!(map.first_key_value().is_none());
        assert_eq!(map.iter().next(), None);
    }

    #[test]
    fn merge_moves_only_absent_keys() {
        let mut a = TreeMap::from([(1, 1), (5, 5)]);
        let mut b = TreeMap::from([(5, 50), (3, 30), (7, 70)]);
        a.merge(&mut b);
        assert_eq!(a.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), [(1, 1), (3, 30), (5, 5), (7, 70)]);
        assert_eq!(b.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), [(5, 50)]);
        assert_invariants(&a.raw);
        assert_invariants(&b.raw);
    }

    #[test]
    fn iterators_agree() {
        let mut map: TreeMap<i32, i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().map(|k| (k, k * k)).collect();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(map.keys().rev().copied().collect::<Vec<_>>(), [7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(map.values().len(), 7);

        let mut iter = map.iter();
        assert_eq!(iter.next(), Some((&1, &1)));
        assert_eq!(iter.next_back(), Some((&7, &49)));
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.last(), Some((&6, &36)));

        for value in map.values_mut() {
            *value = -*value;
        }
        assert_eq!(map.values().copied().sum::<i32>(), -140);
        assert_eq!(map.clone().into_keys().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(map.into_values().next_back(), Some(-49));
    }

    #[test]
    fn equality_ignores_shape() {
        let a = TreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
        let b = TreeMap::from([(3, 'c'), (2, 'b'), (1, 'a')]);
        assert_eq!(a, b);
        assert_ne!(a, TreeMap::from([(1, 'a')]));
    }

    #[test]
    fn pre_order_rebuilds_shape() {
        let map = TreeMap::from([(12, ()), (2, ()), (16, ()), (13, ()), (0, ())]);
        let keys: Vec<i32> = map.pre_order().map(|(k, _)| *k).collect();
        assert_eq!(keys, [12, 2, 0, 16, 13]);

        let rebuilt: TreeMap<i32, ()> = map.pre_order().map(|(k, v)| (*k, *v)).collect();
        let rebuilt_keys: Vec<i32> = rebuilt.pre_order().map(|(k, _)| *k).collect();
        assert_eq!(rebuilt_keys, keys);
    }

    #[test]
    fn debug_output() {
        let map = TreeMap::from([(2, "b"), (1, "a")]);
        assert_eq!(alloc::format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    }
}

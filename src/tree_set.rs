use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::raw::NodeId;
use crate::tree_map::{self, TreeMap};

mod capacity;

/// An ordered set based on an unbalanced binary search tree.
///
/// See [`TreeMap`]'s documentation for a detailed discussion of this collection's
/// performance benefits and drawbacks.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `TreeSet` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use boundary_tree::TreeSet;
///
/// let mut books = TreeSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.remove("The Odyssey");
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `TreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use boundary_tree::TreeSet;
///
/// let set = TreeSet::from([1, 2, 3]);
/// ```
pub struct TreeSet<T> {
    map: TreeMap<T, ()>,
}

/// An iterator over the items of a `TreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`TreeSet`].
///
/// [`iter`]: TreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    iter: tree_map::Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `TreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: TreeSet#method.into_iter
pub struct IntoIter<T> {
    iter: tree_map::IntoKeys<T, ()>,
}

impl<T> TreeSet<T> {
    /// Makes a new, empty `TreeSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let mut set: TreeSet<i32> = TreeSet::new();
    /// ```
    #[must_use]
    pub const fn new() -> TreeSet<T> {
        TreeSet {
            map: TreeMap::new(),
        }
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a reference to the first element in the set, if any. This element is
    /// always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any. This element is
    /// always the maximum of all elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Returns a cursor on the smallest element, or `None` if the set is empty.
    #[must_use]
    pub fn begin(&self) -> Option<Cursor<'_, T, ()>> {
        self.map.begin()
    }

    /// Returns a cursor on the largest element, or `None` if the set is empty.
    #[must_use]
    pub fn end(&self) -> Option<Cursor<'_, T, ()>> {
        self.map.end()
    }

    /// Removes the element named by `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if the element has
    /// already been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let mut set = TreeSet::from([3, 1, 2]);
    /// let id = set.begin().unwrap().id();
    /// assert_eq!(set.erase(id), Ok(1));
    /// assert!(set.erase(id).is_err());
    /// ```
    pub fn erase(&mut self, id: NodeId) -> Result<T> {
        self.map.erase(id).map(|(k, ())| k)
    }

    /// Swaps the contents of `self` and `other` in O(1).
    pub fn swap(&mut self, other: &mut TreeSet<T>) {
        self.map.swap(&mut other.map);
    }

    /// Gets an iterator that visits the elements in the `TreeSet` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let set = TreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            iter: self.map.keys(),
        }
    }
}

impl<T: Ord> TreeSet<T> {
    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Returns a cursor on the element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let set = TreeSet::from([10, 20, 30]);
    /// let mut cursor = set.find(&20).unwrap();
    /// cursor.move_prev();
    /// assert_eq!(*cursor.key(), 10);
    /// assert!(set.find(&25).is_none());
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Option<Cursor<'_, T, ()>>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.find(value)
    }

    /// Adds a value to the set unless an equal value is already present.
    ///
    /// Returns a cursor on the element equal to `value` and whether it was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// assert!(set.insert(2).1);
    /// assert!(!set.insert(2).1);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn insert(&mut self, value: T) -> (Cursor<'_, T, ()>, bool) {
        self.map.insert(value, ())
    }

    /// If the set contains an element equal to the value, removes it from the set and
    /// drops it. Returns whether such an element was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to the value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Moves every element of `other` that is not in `self` into `self`.
    ///
    /// Elements already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let mut a = TreeSet::from([1, 2]);
    /// let mut b = TreeSet::from([2, 3]);
    /// a.merge(&mut b);
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(b.iter().collect::<Vec<_>>(), [&2]);
    /// ```
    pub fn merge(&mut self, other: &mut TreeSet<T>) {
        self.map.merge(&mut other.map);
    }
}

impl<T: Hash> Hash for TreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for TreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq> Eq for TreeSet<T> {}

impl<T: PartialOrd> PartialOrd for TreeSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T: Ord> Ord for TreeSet<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl<T: Clone> Clone for TreeSet<T> {
    fn clone(&self) -> Self {
        TreeSet {
            map: self.map.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for TreeSet<T> {
    fn default() -> Self {
        TreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for TreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for TreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for TreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for TreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `TreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let set = TreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            iter: self.map.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            iter: self.iter.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.iter.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.iter).finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TreeSet;

    /// Elements are written in pre-order, so reading them back rebuilds the same shape.
    impl<T: Serialize> Serialize for TreeSet<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (elem, ()) in self.map.pre_order() {
                seq.serialize_element(elem)?;
            }
            seq.end()
        }
    }

    struct TreeSetVisitor<T> {
        marker: PhantomData<fn() -> TreeSet<T>>,
    }

    impl<'de, T> Visitor<'de> for TreeSetVisitor<T>
    where
        T: Deserialize<'de> + Ord,
    {
        type Value = TreeSet<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut set = TreeSet::new();
            while let Some(elem) = access.next_element()? {
                set.insert(elem);
            }
            Ok(set)
        }
    }

    impl<'de, T> Deserialize<'de> for TreeSet<T>
    where
        T: Deserialize<'de> + Ord,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(TreeSetVisitor {
                marker: PhantomData,
            })
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Error;
    use alloc::vec::Vec;

    #[test]
    fn insert_reports_duplicates() {
        let mut set = TreeSet::new();
        let (cursor, inserted) = set.insert(5);
        assert!(inserted);
        assert_eq!(*cursor.key(), 5);
        assert!(!set.insert(5).1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn first_and_last_track_removals() {
        let mut set = TreeSet::from([12, 2, 16, 13]);
        assert_eq!((set.first(), set.last()), (Some(&2), Some(&16)));
        assert!(set.remove(&16));
        assert!(!set.remove(&16));
        assert_eq!(set.last(), Some(&13));
        assert_eq!(set.take(&2), Some(2));
        assert_eq!(set.first(), Some(&12));
    }

    #[test]
    fn erase_stale_id() {
        let mut set = TreeSet::from([1, 2]);
        let id = set.find(&2).unwrap().id();
        assert_eq!(set.erase(id), Ok(2));
        assert_eq!(set.erase(id), Err(Error::KeyNotFound));
    }

    #[test]
    fn cursor_walk_is_inclusive() {
        let set: TreeSet<u8> = (0..10).rev().collect();
        let mut cursor = set.begin().unwrap();
        let mut seen = Vec::new();
        loop {
            seen.push(*cursor.key());
            if !cursor.move_next() {
                break;
            }
        }
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(cursor, set.end().unwrap());
    }

    #[test]
    fn swap_and_merge() {
        let mut a = TreeSet::from([1, 3]);
        let mut b = TreeSet::from([3, 5]);
        a.swap(&mut b);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), [3, 5]);
        a.merge(&mut b);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
        assert_eq!(b.into_iter().collect::<Vec<_>>(), [3]);
    }

    #[test]
    fn get_returns_stored_element() {
        let set = TreeSet::from([alloc::string::String::from("a")]);
        assert_eq!(set.get("a").map(alloc::string::String::as_str), Some("a"));
        assert!(set.contains("a"));
        assert!(!set.contains("b"));
    }

    #[test]
    fn debug_output() {
        let set = TreeSet::from([2, 1]);
        assert_eq!(alloc::format!("{set:?}"), "{1, 2}");
    }
}

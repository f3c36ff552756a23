use super::TreeSet;
use crate::TreeMap;

impl<T> TreeSet<T> {
    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeSet;
    ///
    /// let set: TreeSet<i32> = TreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreeSet {
            map: TreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the largest number of elements a set can hold.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.map.max_size()
    }
}

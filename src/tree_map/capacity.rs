use super::TreeMap;
use crate::raw::RawTree;

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries.
    ///
    /// Removed entries leave their slot for the next insert, so a map that stays below
    /// `capacity` never reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let map: TreeMap<i32, i32> = TreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreeMap {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of entries a map can hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_tree::TreeMap;
    ///
    /// let map: TreeMap<u8, u8> = TreeMap::new();
    /// assert_eq!(map.max_size(), u32::MAX as usize);
    /// ```
    #[must_use]
    pub const fn max_size(&self) -> usize {
        RawTree::<K, V>::MAX_LEN
    }
}

use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};

use super::{Branch, Iter, Keys, Values};

/// An ordered map, based on an unbalanced binary search tree.
///
/// Entries are kept in ascending key order, which is the order used by every iterator. Because
/// the tree never rebalances, inserting keys in sorted order degrades it into a list.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the map.
/// - `h`: The height of the tree, between `log2 n` and `n`.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(h)` |
/// | `remove` | `O(h)` |
/// | `get` | `O(h)` |
/// | `contains_key` | `O(h)` |
/// | `first_entry` | `O(h)` |
/// | `iter` | `O(n)` total |
pub struct BinaryTreeMap<K: Ord, V> {
    pub(crate) root: Branch<K, V>,
    pub(crate) len: usize,
}

impl<K: Ord, V> BinaryTreeMap<K, V> {
    /// Creates a new, empty BinaryTreeMap. No memory is allocated until an entry is inserted.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::binary_tree::BinaryTreeMap;
    /// let map: BinaryTreeMap<u8, &str> = BinaryTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub const fn new() -> BinaryTreeMap<K, V> {
        BinaryTreeMap {
            root: Branch::empty(),
            len: 0,
        }
    }

    /// Returns the number of entries in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `value` under `key`. If the map already contained the key, its value is replaced
    /// and the old value returned, leaving the length unchanged.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::binary_tree::BinaryTreeMap;
    /// let mut map = BinaryTreeMap::new();
    /// assert_eq!(map.insert(10, "ten"), None);
    /// assert_eq!(map.insert(10, "TEN"), Some("ten"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old = self.root.insert(key, value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Removes the entry for `key`, returning it if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized
    {
        let result = self.root.remove_entry(key);
        if result.is_some() {
            self.len -= 1;
        }
        result
    }

    /// Removes the entry for `key`, returning its value if it was present.
    ///
    /// # Examples
    /// ```
    /// # use shared_collections::collections::binary_tree::BinaryTreeMap;
    /// let mut map: BinaryTreeMap<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// assert_eq!(map.remove(&2), Some('b'));
    /// assert_eq!(map.remove(&2), None);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Returns the entry for `key`, if the map contains one.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.root.get_entry(key)
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.get_entry(key).map(|e| e.1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.root.get_mut(key)
    }

    /// Returns true if the map contains an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized
    {
        self.get_entry(key).is_some()
    }

    /// Returns the entry with the smallest key.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.root.first_entry()
    }

    /// Returns the value with the smallest key.
    pub fn first(&self) -> Option<&V> {
        self.first_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the smallest key.
    pub fn take_first_entry(&mut self) -> Option<(K, V)> {
        let result = self.root.take_first_entry();
        if result.is_some() {
            self.len -= 1;
        }
        result
    }

    /// Removes and returns the value with the smallest key.
    pub fn take_first(&mut self) -> Option<V> {
        self.take_first_entry().map(|e| e.1)
    }

    /// Returns the entry with the largest key.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.root.last_entry()
    }

    /// Returns the value with the largest key.
    pub fn last(&self) -> Option<&V> {
        self.last_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the largest key.
    pub fn take_last_entry(&mut self) -> Option<(K, V)> {
        let result = self.root.take_last_entry();
        if result.is_some() {
            self.len -= 1;
        }
        result
    }

    /// Removes and returns the value with the largest key.
    pub fn take_last(&mut self) -> Option<V> {
        self.take_last_entry().map(|e| e.1)
    }

    /// Returns the height of the underlying tree. An empty map has height 0.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Calls `action` on every entry of the map, in ascending key order.
    pub fn for_each_entry<F: FnMut(&K, &V)>(&self, mut action: F) {
        for (key, value) in self.iter() {
            action(key, value);
        }
    }

    /// Returns an iterator over the entries of the map, in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over the keys of the map, in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over the values of the map, in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.root = Branch::empty();
        self.len = 0;
    }
}

impl<K: Ord, V> Default for BinaryTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for BinaryTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BinaryTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BinaryTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V: PartialEq> PartialEq for BinaryTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for BinaryTreeMap<K, V> {}

impl<K: Ord + Debug, V: Debug> Debug for BinaryTreeMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTreeMap")
            .field("nodes", &DebugTree(&self.root))
            .field("len", &self.len)
            .finish()
    }
}

struct DebugTree<'a, K: Ord, V>(&'a Branch<K, V>);

impl<K: Ord + Debug, V: Debug> Debug for DebugTree<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\n{:?}\n", self.0)
    }
}

impl<K: Ord + Debug, V: Debug> Display for BinaryTreeMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

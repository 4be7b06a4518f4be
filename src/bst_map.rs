use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::repeat_with;
use core::ops::Index;

use compare::{Compare, Natural, natural};

use crate::allocator::{Arena, CapacityError, NodeAllocator};
use crate::bst_tree::{BstTree, Position};
use crate::key::SelectFirst;
use crate::raw::Node;

mod iter;

pub use self::iter::{IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};

/// An ordered map backed by an unbalanced binary search tree.
///
/// Entries are stored as `(K, V)` pairs in a [`BstTree`] keyed on the first field. Keys are
/// unique, and inserting an existing key never replaces the mapped value.
///
/// Iterators obtained from [`iter`](Self::iter), [`keys`](Self::keys),
/// [`values`](Self::values) or [`into_iter`](IntoIterator::into_iter) produce their items in
/// key order.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to
/// any other key changes while it is in the map. This is normally only possible through
/// [`Cell`](core::cell::Cell), [`RefCell`](core::cell::RefCell), global state or I/O. The
/// behavior resulting from such a logic error is not specified, but will not be undefined
/// behavior.
///
/// # Examples
///
/// ```
/// use bst_tree::BstMap;
///
/// let mut movie_reviews = BstMap::new();
/// movie_reviews.insert("Office Space", "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction", "Masterpiece.");
/// movie_reviews.insert("The Godfather", "Very enjoyable.");
///
/// // An existing key keeps its value.
/// assert!(!movie_reviews.insert("Pulp Fiction", "Meh."));
/// assert_eq!(movie_reviews[&"Pulp Fiction"], "Masterpiece.");
///
/// movie_reviews.remove(&"The Godfather");
/// assert_eq!(movie_reviews.len(), 2);
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
pub struct BstMap<K, V, C = Natural<K>, A = Arena<Node<(K, V)>>> {
    tree: BstTree<(K, V), SelectFirst, C, A>,
}

/// Orders map entries by comparing their keys with the map's key comparator.
///
/// This `struct` is created by the [`value_comp`](BstMap::value_comp) method on [`BstMap`].
///
/// # Examples
///
/// ```
/// use bst_tree::BstMap;
/// use compare::Compare;
///
/// let map: BstMap<i32, &str> = BstMap::new();
/// assert!(map.value_comp().compares_lt(&(1, "z"), &(2, "a")));
/// ```
pub struct ValueCompare<'a, C> {
    comp: &'a C,
}

impl<K, V, C: Compare<K>> Compare<(K, V)> for ValueCompare<'_, C> {
    fn compare(&self, l: &(K, V), r: &(K, V)) -> Ordering {
        self.comp.compare(&l.0, &r.0)
    }

    fn compares_lt(&self, l: &(K, V), r: &(K, V)) -> bool {
        self.comp.compares_lt(&l.0, &r.0)
    }
}

impl<C> Clone for ValueCompare<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ValueCompare<'_, C> {}

impl<C: fmt::Debug> fmt::Debug for ValueCompare<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueCompare").field(self.comp).finish()
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap` ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }

    /// Makes a new, empty `BstMap` with room for `capacity` entries before its arena grows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_allocator(natural(), Arena::with_capacity(capacity))
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Makes a new, empty `BstMap` ordered by `comp`.
    #[must_use]
    pub fn with_comparator(comp: C) -> Self {
        Self::with_allocator(comp, Arena::new())
    }
}

impl<K, V, C, A> BstMap<K, V, C, A> {
    /// Makes a new, empty `BstMap` ordered by `comp` whose nodes are stored in `nodes`.
    #[must_use]
    pub const fn with_allocator(comp: C, nodes: A) -> Self {
        Self {
            tree: BstTree::with_allocator(comp, nodes),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns a reference to the key comparator.
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        self.tree.key_comp()
    }

    /// Returns a comparator that orders `(K, V)` entries by key.
    #[must_use]
    pub const fn value_comp(&self) -> ValueCompare<'_, C> {
        ValueCompare {
            comp: self.tree.key_comp(),
        }
    }

    /// Returns the underlying tree, for position-based navigation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let map = BstMap::from([(1, "a"), (2, "b"), (3, "c")]);
    /// let tree = map.as_tree();
    /// let second = tree.next(tree.begin());
    /// assert_eq!(tree.get(second), Some(&(2, "b")));
    /// ```
    #[must_use]
    pub const fn as_tree(&self) -> &BstTree<(K, V), SelectFirst, C, A> {
        &self.tree
    }

    /// Exchanges the contents of two maps.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }
}

impl<K, V, C, A: NodeAllocator<(K, V)>> BstMap<K, V, C, A> {
    /// Returns the largest number of entries the allocator can hold.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Returns the position of the first entry, or [`end`](Self::end) if empty.
    #[must_use]
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the one-past-the-last position.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position after `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    #[must_use]
    pub fn next(&self, position: Position) -> Position {
        self.tree.next(position)
    }

    /// Returns the position before `position`; the end steps back to the last entry.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the first entry, or if the map is empty.
    #[must_use]
    pub fn prev(&self, position: Position) -> Position {
        self.tree.prev(position)
    }

    /// Returns the entry at `position`, or `None` for the end.
    #[must_use]
    pub fn get_at(&self, position: Position) -> Option<(&K, &V)> {
        self.tree.get(position).map(|(k, v)| (k, v))
    }

    /// Returns the entry at `position` with a mutable value, or `None` for the end.
    #[must_use]
    pub fn get_at_mut(&mut self, position: Position) -> Option<(&K, &mut V)> {
        self.tree.get_mut(position).map(|(k, v)| (&*k, v))
    }

    /// Removes the entry at `position` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    pub fn erase(&mut self, position: Position) -> (K, V) {
        self.tree.erase(position)
    }

    /// Removes every entry in `[first, last)` and returns how many were removed.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not reachable from `first`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map: BstMap<_, _> = (0..10).map(|k| (k, k * 10)).collect();
    /// let removed = map.erase_range(map.lower_bound(&3), map.lower_bound(&7));
    /// assert_eq!(removed, 4);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 7, 8, 9]);
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
        self.tree.erase_range(first, last)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// assert_eq!(map.last_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter::new(self.tree.iter())
    }

    /// Gets an iterator over the entries between two positions, `[first, last)`.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not reachable from `first`.
    pub fn iter_between(&self, first: Position, last: Position) -> Iter<'_, K, V, A> {
        Iter::new(self.tree.iter_between(first, last))
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// Nodes are collected in key order up front, so creating the iterator costs O(n) time and
    /// memory before the first entry is yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map = BstMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let raw = self.tree.raw_mut();
        let handles = raw.handles();
        let span = handles.iter().map(|handle| handle.to_index() + 1).max().unwrap_or(0);

        // Index every live node by its handle, then hand them out in key order.
        let mut slots: Vec<Option<&mut Node<(K, V)>>> = repeat_with(|| None).take(span).collect();
        for (handle, node) in raw.nodes_mut().iter_nodes_mut() {
            if let Some(slot) = slots.get_mut(handle.to_index()) {
                *slot = Some(node);
            }
        }

        let entries = handles
            .into_iter()
            .filter_map(|handle| slots[handle.to_index()].take())
            .map(|node| {
                let (k, v) = &mut node.value;
                (&*k, v)
            })
            .collect();
        IterMut::new(entries)
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V, A> {
        Keys::new(self.iter())
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V, A> {
        Values::new(self.iter())
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// Shares the O(n) setup of [`BstMap::iter_mut`].
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<i32> = map.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys::new(self.into_iter())
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues::new(self.into_iter())
    }
}

impl<K, V, C, A> BstMap<K, V, C, A>
where
    C: Compare<K>,
    A: NodeAllocator<(K, V)>,
{
    /// Inserts `value` under `key` unless `key` is already present.
    ///
    /// Returns `true` if the entry was inserted. An existing entry keeps its value, and the
    /// supplied `key` and `value` are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the allocator is full. Use [`try_insert`](Self::try_insert) to handle that.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert!(map.insert(37, "a"));
    /// assert!(!map.insert(37, "b"));
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert((key, value)).1
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `key` is new and the allocator is full.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, CapacityError> {
        self.tree.try_insert((key, value)).map(|(_, inserted)| inserted)
    }

    /// Inserts an entry using `hint` as a guess for the position that will follow it.
    ///
    /// Returns the position of the entry holding `key`.
    ///
    /// # Panics
    ///
    /// Panics if the allocator is full.
    pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> Position {
        self.tree.insert_hint(hint, (key, value))
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get_by_key(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.get_by_key(key).map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = self.tree.find(key);
        self.tree.get_mut(position).map(|(_, v)| v)
    }

    /// Returns the value for `key`, inserting `V::default()` first if `key` is absent.
    ///
    /// # Panics
    ///
    /// Panics if `key` is new and the allocator is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut counts: BstMap<&str, u32> = BstMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let raw = self.tree.raw_mut();
        let handle = match raw.find(&key) {
            Some(handle) => handle,
            None => match raw.try_insert((key, V::default())) {
                Ok((handle, _)) => handle,
                Err(error) => panic!("`BstMap::get_or_insert_default()` - {error}"),
            },
        };
        &mut raw.value_mut(handle).1
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Returns the number of entries with `key`: 0 or 1.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// Returns the position of the entry for `key`, or the end.
    #[must_use]
    pub fn find(&self, key: &K) -> Position {
        self.tree.find(key)
    }

    /// Returns the first position whose key does not order before `key`.
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Position {
        self.tree.lower_bound(key)
    }

    /// Returns the first position whose key orders after `key`.
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Position {
        self.tree.upper_bound(key)
    }

    /// Returns `(lower_bound(key), upper_bound(key))`.
    #[must_use]
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        self.tree.equal_range(key)
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, v)| v)
    }

    /// Removes `key` from the map, returning the stored key and value if present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove(key)
    }

    /// Removes `key` from the map, returning how many entries were removed: 0 or 1.
    pub fn erase_key(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }
}

impl<K: Clone, V: Clone, C: Clone, A: NodeAllocator<(K, V)>> Clone for BstMap<K, V, C, A> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K: Hash, V: Hash, C, A: NodeAllocator<(K, V)>> Hash for BstMap<K, V, C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K: PartialEq, V: PartialEq, C, A: NodeAllocator<(K, V)>> PartialEq for BstMap<K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C, A: NodeAllocator<(K, V)>> Eq for BstMap<K, V, C, A> {}

impl<K: PartialOrd, V: PartialOrd, C, A: NodeAllocator<(K, V)>> PartialOrd for BstMap<K, V, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C, A: NodeAllocator<(K, V)>> Ord for BstMap<K, V, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, A: NodeAllocator<(K, V)>> fmt::Debug for BstMap<K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default, A: Default> Default for BstMap<K, V, C, A> {
    fn default() -> Self {
        Self::with_allocator(C::default(), A::default())
    }
}

impl<K, V, C, A> FromIterator<(K, V)> for BstMap<K, V, C, A>
where
    C: Compare<K> + Default,
    A: NodeAllocator<(K, V)> + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K, V, C, A> Extend<(K, V)> for BstMap<K, V, C, A>
where
    C: Compare<K>,
    A: NodeAllocator<(K, V)>,
{
    /// Inserts every entry in order; later duplicates of a key are dropped.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.tree.extend(iter);
    }
}

impl<'a, K: 'a, V: 'a, C, A: NodeAllocator<(K, V)>> IntoIterator for &'a BstMap<K, V, C, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Iter<'a, K, V, A> {
        self.iter()
    }
}

impl<'a, K: 'a, V: 'a, C, A: NodeAllocator<(K, V)>> IntoIterator for &'a mut BstMap<K, V, C, A> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C, A: NodeAllocator<(K, V)>> IntoIterator for BstMap<K, V, C, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.tree.into_iter())
    }
}

impl<K, V, C, A> Index<&K> for BstMap<K, V, C, A>
where
    C: Compare<K>,
    A: NodeAllocator<(K, V)>,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("`BstMap::index()` - no entry found for key!")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;

use compare::{Compare, Natural, natural};

use crate::allocator::{Arena, CapacityError, NodeAllocator};
use crate::key::{Identity, KeyOf};
use crate::raw::{Node, RawBstTree};

mod iter;
mod position;

pub use iter::{IntoIter, Iter};
pub use position::{Cursor, Position, ReversePosition};

/// An ordered container of unique keys backed by an unbalanced binary search tree.
///
/// Values of type `T` are ordered by the key that `X` extracts from them, using the
/// comparator `C`. Nodes live in the allocator `A` and are linked to their parent as well as
/// their children, so traversal in both directions needs no auxiliary stack.
///
/// The tree never rebalances: inserting keys in sorted order produces a chain and makes
/// every operation O(n). Random insertion order gives O(log n) expected depth.
///
/// Two families of navigation are offered:
///
/// - [`Position`]s (`begin`, `end`, `find`, `lower_bound`, ...), detached tokens that survive
///   mutations of other elements and can be handed back to `erase` or `insert_hint`;
/// - Rust iterators ([`iter`](Self::iter), [`into_iter`](IntoIterator::into_iter)).
///
/// It is a logic error to modify a stored key, through [`get_mut`](Self::get_mut) or
/// interior mutability, so that its order relative to other keys changes.
///
/// # Examples
///
/// ```
/// use bst_tree::BstTree;
///
/// let mut tree = BstTree::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(key);
/// }
///
/// let keys: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
///
/// assert_eq!(tree.get(tree.lower_bound(&4)), Some(&4));
/// assert_eq!(tree.get(tree.upper_bound(&4)), Some(&5));
///
/// assert_eq!(tree.erase_key(&5), 1);
/// assert!(tree.find(&100).is_end());
/// assert_eq!(tree.count(&8), 1);
/// ```
pub struct BstTree<T, X = Identity, C = Natural<T>, A = Arena<Node<T>>> {
    raw: RawBstTree<T, X, C, A>,
}

impl<T: Ord> BstTree<T> {
    /// Makes a new, empty tree ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstTree;
    ///
    /// let mut tree = BstTree::new();
    /// tree.insert("a");
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }

    /// Makes a new, empty tree with room for `capacity` elements before its arena grows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_allocator(natural(), Arena::with_capacity(capacity))
    }
}

impl<T, X, C> BstTree<T, X, C> {
    /// Makes a new, empty tree ordered by `comp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::{BstTree, Identity, LessBy};
    ///
    /// let mut tree: BstTree<i32, Identity, _> = BstTree::with_comparator(LessBy::new(|a: &i32, b: &i32| a > b));
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(comp: C) -> Self {
        Self::with_allocator(comp, Arena::new())
    }
}

impl<T, X, C, A> BstTree<T, X, C, A> {
    /// Makes a new, empty tree ordered by `comp` whose nodes are stored in `nodes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::{Arena, BstTree};
    /// use compare::natural;
    ///
    /// let mut tree: BstTree<u8> = BstTree::with_allocator(natural(), Arena::with_limit(1));
    /// assert!(tree.try_insert(1).is_ok());
    /// assert!(tree.try_insert(2).is_err());
    /// ```
    #[must_use]
    pub const fn with_allocator(comp: C, nodes: A) -> Self {
        Self {
            raw: RawBstTree::from_parts(comp, nodes),
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns a reference to the key comparator.
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        self.raw.comp()
    }

    /// Exchanges the contents of two trees, including comparators and allocators.
    ///
    /// No element is moved or copied. Positions keep designating the same elements, which
    /// now live in the other tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }

    pub(crate) const fn raw(&self) -> &RawBstTree<T, X, C, A> {
        &self.raw
    }

    pub(crate) fn raw_mut(&mut self) -> &mut RawBstTree<T, X, C, A> {
        &mut self.raw
    }
}

impl<T, X, C, A: NodeAllocator<T>> BstTree<T, X, C, A> {
    /// Returns the largest number of elements the allocator can hold.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.raw.max_size()
    }

    /// Returns the position of the smallest element, or [`end`](Self::end) if empty.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn begin(&self) -> Position {
        Position::at(self.raw.first())
    }

    /// Returns the one-past-the-last position.
    #[must_use]
    pub const fn end(&self) -> Position {
        Position::at(None)
    }

    /// Returns the reverse position designating the largest element.
    #[must_use]
    pub const fn rbegin(&self) -> ReversePosition {
        ReversePosition::new(self.end())
    }

    /// Returns the one-past-the-smallest reverse position.
    #[must_use]
    pub fn rend(&self) -> ReversePosition {
        ReversePosition::new(self.begin())
    }

    /// Returns the position after `position` in key order.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    #[must_use]
    pub fn next(&self, position: Position) -> Position {
        let handle = position.node().expect("`BstTree::next()` - cannot advance past the end!");
        Position::at(self.raw.successor(handle))
    }

    /// Returns the position before `position` in key order; the end steps back to the
    /// largest element.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the first element, or if the tree is empty.
    #[must_use]
    pub fn prev(&self, position: Position) -> Position {
        let handle = match position.node() {
            None => self.raw.last().expect("`BstTree::prev()` - the tree is empty!"),
            Some(handle) => {
                self.raw.predecessor(handle).expect("`BstTree::prev()` - cannot step before the beginning!")
            }
        };
        Position::at(Some(handle))
    }

    /// Advances a reverse position towards smaller keys.
    ///
    /// # Panics
    ///
    /// Panics if `position` is [`rend`](Self::rend).
    #[must_use]
    pub fn next_rev(&self, position: ReversePosition) -> ReversePosition {
        ReversePosition::new(self.prev(position.base()))
    }

    /// Steps a reverse position back towards larger keys.
    ///
    /// # Panics
    ///
    /// Panics if `position` is [`rbegin`](Self::rbegin).
    #[must_use]
    pub fn prev_rev(&self, position: ReversePosition) -> ReversePosition {
        ReversePosition::new(self.next(position.base()))
    }

    /// Returns the element at `position`, or `None` for the end.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        position.node().map(|handle| self.raw.value(handle))
    }

    /// Returns the element at `position` mutably, or `None` for the end.
    ///
    /// Changing the element's key in a way that alters its order is a logic error.
    #[must_use]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        position.node().map(|handle| self.raw.value_mut(handle))
    }

    /// Returns the element designated by a reverse position, or `None` for
    /// [`rend`](Self::rend).
    #[must_use]
    pub fn get_rev(&self, position: ReversePosition) -> Option<&T> {
        let designated = match position.base().node() {
            None => self.raw.last(),
            Some(handle) => self.raw.predecessor(handle),
        };
        designated.map(|handle| self.raw.value(handle))
    }

    /// Returns a borrowing cursor starting at `position`.
    #[must_use]
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, A> {
        Cursor::new(self.raw.nodes(), self.raw.root(), position)
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.value(handle))
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.value(handle))
    }

    /// Gets an iterator over the elements in key order.
    ///
    /// The iterator is double-ended: `.rev()` walks from the largest element down.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self.raw.nodes(), self.raw.first(), self.raw.last(), self.raw.len())
    }

    /// Gets an iterator over the elements in `[first, last)`.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not reachable from `first`.
    ///
    /// # Complexity
    ///
    /// O(k) to create, where k is the number of elements in the range.
    pub fn iter_between(&self, first: Position, last: Position) -> Iter<'_, T, A> {
        let remaining = self.raw.distance(first.node(), last.node());
        let back = match last.node() {
            None => self.raw.last(),
            Some(handle) => self.raw.predecessor(handle),
        };
        Iter::new(self.raw.nodes(), first.node(), back, remaining)
    }

    /// Removes the element at `position` and returns it.
    ///
    /// Positions of all other elements stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn erase(&mut self, position: Position) -> T {
        let handle = position.node().expect("`BstTree::erase()` - cannot erase the end position!");
        self.raw.erase(handle)
    }

    /// Removes every element in `[first, last)` and returns how many were removed.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not reachable from `first`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
        self.raw.erase_range(first.node(), last.node())
    }

    /// Removes every element.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstTree;
    ///
    /// let mut tree = BstTree::from([1, 2]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.raw.first()?;
        Some(self.raw.erase(handle))
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.raw.last()?;
        Some(self.raw.erase(handle))
    }
}

impl<T, X, C, A> BstTree<T, X, C, A>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
    A: NodeAllocator<T>,
{
    /// Inserts `value` unless an element with an equivalent key is present.
    ///
    /// Returns the position of the element holding the key and `true` if `value` was
    /// inserted. When the key already exists, `value` is dropped and the stored element is
    /// left untouched.
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
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        self.try_insert(value).unwrap_or_else(|error| panic!("`BstTree::insert()` - {error}"))
    }

    /// Inserts `value` unless an element with an equivalent key is present.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if a new node is needed and the allocator is full. The tree
    /// is unchanged in that case.
    pub fn try_insert(&mut self, value: T) -> Result<(Position, bool), CapacityError> {
        let (handle, inserted) = self.raw.try_insert(value)?;
        Ok((Position::at(Some(handle)), inserted))
    }

    /// Inserts `value`, using `hint` as a guess for the position that will follow it.
    ///
    /// When `value` belongs immediately before `hint` it is linked in without searching from
    /// the root; otherwise this behaves like [`insert`](Self::insert). Returns the position
    /// of the element holding the key.
    ///
    /// # Panics
    ///
    /// Panics if the allocator is full.
    pub fn insert_hint(&mut self, hint: Position, value: T) -> Position {
        self.try_insert_hint(hint, value).unwrap_or_else(|error| panic!("`BstTree::insert_hint()` - {error}"))
    }

    /// Fallible version of [`insert_hint`](Self::insert_hint).
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if a new node is needed and the allocator is full.
    pub fn try_insert_hint(&mut self, hint: Position, value: T) -> Result<Position, CapacityError> {
        let (handle, _) = self.raw.try_insert_hint(hint.node(), value)?;
        Ok(Position::at(Some(handle)))
    }

    /// Inserts every value of `iter` in order; later duplicates of a key are dropped.
    ///
    /// # Errors
    ///
    /// Stops at the first value that cannot be stored and returns [`CapacityError`]. Values
    /// inserted before that point remain in the tree.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), CapacityError> {
        for value in iter {
            self.raw.try_insert(value)?;
        }
        Ok(())
    }

    /// Returns the position of the element whose key is equivalent to `key`, or the end.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn find(&self, key: &X::Key) -> Position {
        Position::at(self.raw.find(key))
    }

    /// Returns the element whose key is equivalent to `key`.
    #[must_use]
    pub fn get_by_key(&self, key: &X::Key) -> Option<&T> {
        self.raw.find(key).map(|handle| self.raw.value(handle))
    }

    /// Returns `true` if an element with a key equivalent to `key` is present.
    #[must_use]
    pub fn contains(&self, key: &X::Key) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns the number of elements with a key equivalent to `key`: 0 or 1.
    #[must_use]
    pub fn count(&self, key: &X::Key) -> usize {
        usize::from(self.contains(key))
    }

    /// Returns the first position whose key does not order before `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstTree;
    ///
    /// let tree = BstTree::from([10, 20, 30]);
    /// assert_eq!(tree.get(tree.lower_bound(&20)), Some(&20));
    /// assert_eq!(tree.get(tree.lower_bound(&21)), Some(&30));
    /// assert!(tree.lower_bound(&31).is_end());
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &X::Key) -> Position {
        Position::at(self.raw.lower_bound(key))
    }

    /// Returns the first position whose key orders after `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_tree::BstTree;
    ///
    /// let tree = BstTree::from([10, 20, 30]);
    /// assert_eq!(tree.get(tree.upper_bound(&20)), Some(&30));
    /// assert_eq!(tree.get(tree.upper_bound(&5)), Some(&10));
    /// assert!(tree.upper_bound(&30).is_end());
    /// ```
    #[must_use]
    pub fn upper_bound(&self, key: &X::Key) -> Position {
        Position::at(self.raw.upper_bound(key))
    }

    /// Returns `(lower_bound(key), upper_bound(key))`, spanning at most one element.
    #[must_use]
    pub fn equal_range(&self, key: &X::Key) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Removes the element whose key is equivalent to `key`, returning how many were
    /// removed: 0 or 1.
    pub fn erase_key(&mut self, key: &X::Key) -> usize {
        usize::from(self.raw.remove(key).is_some())
    }

    /// Removes and returns the element whose key is equivalent to `key`.
    pub fn remove(&mut self, key: &X::Key) -> Option<T> {
        self.raw.remove(key)
    }
}

impl<T, X, C, A> Clone for BstTree<T, X, C, A>
where
    T: Clone,
    C: Clone,
    A: NodeAllocator<T>,
{
    /// Copies the elements in key order into a fresh tree with the same comparator and an
    /// empty allocator of the same configuration.
    ///
    /// The copy is structurally independent of `self`. Its shape is that of the elements
    /// inserted in ascending order, whatever the shape of `self`.
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }

    /// Discards every element of `self`, then copies the elements of `source` in key order.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T: Hash, X, C, A: NodeAllocator<T>> Hash for BstTree<T, X, C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: PartialEq, X, C, A: NodeAllocator<T>> PartialEq for BstTree<T, X, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, X, C, A: NodeAllocator<T>> Eq for BstTree<T, X, C, A> {}

impl<T: PartialOrd, X, C, A: NodeAllocator<T>> PartialOrd for BstTree<T, X, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, X, C, A: NodeAllocator<T>> Ord for BstTree<T, X, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: fmt::Debug, X, C, A: NodeAllocator<T>> fmt::Debug for BstTree<T, X, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, X, C: Default, A: Default> Default for BstTree<T, X, C, A> {
    fn default() -> Self {
        Self::with_allocator(C::default(), A::default())
    }
}

impl<T, X, C, A> FromIterator<T> for BstTree<T, X, C, A>
where
    X: KeyOf<T>,
    C: Compare<X::Key> + Default,
    A: NodeAllocator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, X, C, A> Extend<T> for BstTree<T, X, C, A>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
    A: NodeAllocator<T>,
{
    /// Inserts every value in order; later duplicates of a key are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the allocator fills up. Use [`BstTree::try_extend`] to handle that.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, X, C, A: NodeAllocator<T>> IntoIterator for &'a BstTree<T, X, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Iter<'a, T, A> {
        self.iter()
    }
}

impl<T, X, C, A: NodeAllocator<T>> IntoIterator for BstTree<T, X, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an owning iterator over the elements in key order.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter::new(self.raw.drain_to_vec())
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BstTree<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

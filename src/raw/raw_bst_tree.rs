use alloc::vec::Vec;
use core::marker::PhantomData;

use compare::Compare;

use super::handle::Handle;
use super::node::{Node, maximum, minimum, predecessor, successor};
use crate::allocator::{CapacityError, NodeAllocator};
use crate::key::KeyOf;

/// The unbalanced binary search tree backing `BstTree` and `BstMap`.
///
/// `X` extracts the key from a stored `T`, `C` orders keys and `A` provides node storage.
/// No rebalancing is ever performed: the shape is fully determined by insertion order.
pub(crate) struct RawBstTree<T, X, C, A> {
    /// Storage for every node of the tree.
    nodes: A,
    /// The root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of nodes reachable from `root`.
    len: usize,
    /// Strict weak order over keys.
    comp: C,
    _key: PhantomData<fn(&T) -> X>,
}

/// Where a new node is linked in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Slot {
    Root,
    Left(Handle),
    Right(Handle),
}

impl<T, X, C, A> RawBstTree<T, X, C, A> {
    /// Creates an empty tree.
    pub(crate) const fn from_parts(comp: C, nodes: A) -> Self {
        Self {
            nodes,
            root: None,
            len: 0,
            comp,
            _key: PhantomData,
        }
    }

    /// Returns the number of stored values.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no values.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root node, if any.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the key comparator.
    pub(crate) const fn comp(&self) -> &C {
        &self.comp
    }

    /// Returns the node storage.
    pub(crate) const fn nodes(&self) -> &A {
        &self.nodes
    }
}

impl<T, X, C, A: NodeAllocator<T>> RawBstTree<T, X, C, A> {
    /// Returns the maximum number of values the allocator can hold.
    pub(crate) fn max_size(&self) -> usize {
        self.nodes.max_size()
    }

    /// Returns the node storage mutably.
    pub(crate) fn nodes_mut(&mut self) -> &mut A {
        &mut self.nodes
    }

    /// Returns the value stored at `handle`.
    pub(crate) fn value(&self, handle: Handle) -> &T {
        &self.nodes.node(handle).value
    }

    /// Returns the value stored at `handle` mutably.
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.nodes.node_mut(handle).value
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| minimum(&self.nodes, root))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| maximum(&self.nodes, root))
    }

    /// Returns the in-order successor of `handle`.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        successor(&self.nodes, handle)
    }

    /// Returns the in-order predecessor of `handle`.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        predecessor(&self.nodes, handle)
    }

    /// Returns every node handle in key order.
    pub(crate) fn handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor(handle);
        }
        handles
    }

    /// Counts the nodes in `[first, last)`, where `None` stands for the end position.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not reachable from `first`.
    pub(crate) fn distance(&self, mut first: Option<Handle>, last: Option<Handle>) -> usize {
        let mut count = 0;
        while first != last {
            let handle = first.expect("`RawBstTree::distance()` - `last` is not reachable from `first`!");
            first = self.successor(handle);
            count += 1;
        }
        count
    }

    /// Stores `value` as the right child of `after`, or as the root when `after` is `None`.
    ///
    /// The caller guarantees that `after` is the current maximum and that `value` orders
    /// after it. This is how ordered copies are rebuilt without re-descending from the root.
    pub(crate) fn try_push_greatest(&mut self, after: Option<Handle>, value: T) -> Result<Handle, CapacityError> {
        let slot = after.map_or(Slot::Root, Slot::Right);
        let handle = self.nodes.try_allocate(Node::new(value))?;
        self.link(slot, handle);
        Ok(handle)
    }

    /// Redirects the parent link that names `current` to `replacement`.
    ///
    /// The children of `current` are left untouched; the caller relinks them.
    fn transplant(&mut self, current: Handle, replacement: Option<Handle>) {
        let parent = self.nodes.node(current).parent;
        match parent {
            None => self.root = replacement,
            Some(parent) => {
                let parent_node = self.nodes.node_mut(parent);
                if parent_node.left == Some(current) {
                    parent_node.left = replacement;
                } else {
                    parent_node.right = replacement;
                }
            }
        }
        if let Some(replacement) = replacement {
            self.nodes.node_mut(replacement).parent = parent;
        }
    }

    /// Unlinks the node at `handle`, frees it and returns its value.
    ///
    /// Nodes other than `handle` keep their handles, so positions naming them stay valid.
    pub(crate) fn erase(&mut self, handle: Handle) -> T {
        let (left, right) = {
            let node = self.nodes.node(handle);
            (node.left, node.right)
        };

        match (left, right) {
            (None, _) => self.transplant(handle, right),
            (Some(_), None) => self.transplant(handle, left),
            (Some(left), Some(right)) => {
                let successor = minimum(&self.nodes, right);
                if self.nodes.node(successor).parent != Some(handle) {
                    let successor_right = self.nodes.node(successor).right;
                    self.transplant(successor, successor_right);
                    self.nodes.node_mut(successor).right = Some(right);
                    self.nodes.node_mut(right).parent = Some(successor);
                }
                self.transplant(handle, Some(successor));
                self.nodes.node_mut(successor).left = Some(left);
                self.nodes.node_mut(left).parent = Some(successor);
            }
        }

        let node = self.nodes.deallocate(handle);
        self.len -= 1;
        node.into_value()
    }

    /// Erases every node in `[first, last)` and returns how many were removed.
    ///
    /// The successor is computed before each node is freed.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not reachable from `first`.
    pub(crate) fn erase_range(&mut self, mut first: Option<Handle>, last: Option<Handle>) -> usize {
        let mut count = 0;
        while first != last {
            let handle = first.expect("`RawBstTree::erase_range()` - `last` is not reachable from `first`!");
            first = self.successor(handle);
            drop(self.erase(handle));
            count += 1;
        }
        count
    }

    /// Removes every value.
    pub(crate) fn clear(&mut self) {
        let first = self.first();
        self.erase_range(first, None);
        self.nodes.clear();
    }

    /// Removes every value, returning them in key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let handles = self.handles();
        let values = handles.into_iter().map(|handle| self.nodes.deallocate(handle).into_value()).collect();
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        values
    }

    fn link(&mut self, slot: Slot, handle: Handle) {
        let parent = match slot {
            Slot::Root => {
                self.root = Some(handle);
                None
            }
            Slot::Left(parent) => {
                self.nodes.node_mut(parent).left = Some(handle);
                Some(parent)
            }
            Slot::Right(parent) => {
                self.nodes.node_mut(parent).right = Some(handle);
                Some(parent)
            }
        };
        self.nodes.node_mut(handle).parent = parent;
        self.len += 1;
    }
}

impl<T, X, C, A> RawBstTree<T, X, C, A>
where
    X: KeyOf<T>,
    C: Compare<X::Key>,
    A: NodeAllocator<T>,
{
    #[inline]
    fn key(&self, handle: Handle) -> &X::Key {
        X::key(&self.nodes.node(handle).value)
    }

    /// Descends from the root looking for `key`.
    ///
    /// Returns the node holding an equivalent key, or the empty slot where it belongs.
    fn locate(&self, key: &X::Key) -> Result<Handle, Slot> {
        let Some(mut current) = self.root else {
            return Err(Slot::Root);
        };

        loop {
            let node = self.nodes.node(current);
            let node_key = X::key(&node.value);
            if self.comp.compares_lt(key, node_key) {
                match node.left {
                    Some(left) => current = left,
                    None => return Err(Slot::Left(current)),
                }
            } else if self.comp.compares_lt(node_key, key) {
                match node.right {
                    Some(right) => current = right,
                    None => return Err(Slot::Right(current)),
                }
            } else {
                return Ok(current);
            }
        }
    }

    /// Returns the node holding a key equivalent to `key`.
    pub(crate) fn find(&self, key: &X::Key) -> Option<Handle> {
        self.locate(key).ok()
    }

    /// Inserts `value` unless an equivalent key is present.
    ///
    /// Returns the handle of the node holding the key and whether it was newly inserted.
    /// On an existing key, `value` is dropped and the stored value is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the allocator is full; the tree is unchanged.
    pub(crate) fn try_insert(&mut self, value: T) -> Result<(Handle, bool), CapacityError> {
        match self.locate(X::key(&value)) {
            Ok(existing) => Ok((existing, false)),
            Err(slot) => {
                let handle = self.nodes.try_allocate(Node::new(value))?;
                self.link(slot, handle);
                Ok((handle, true))
            }
        }
    }

    /// Like [`try_insert`](Self::try_insert), but first tries to place `value` immediately
    /// before `hint` (`None` meaning the end position) without descending from the root.
    pub(crate) fn try_insert_hint(&mut self, hint: Option<Handle>, value: T) -> Result<(Handle, bool), CapacityError> {
        let key = X::key(&value);
        let slot = match hint {
            None => match self.last() {
                None => Some(Slot::Root),
                Some(last) if self.comp.compares_lt(self.key(last), key) => Some(Slot::Right(last)),
                Some(_) => None,
            },
            Some(hint) if self.comp.compares_lt(key, self.key(hint)) => match self.predecessor(hint) {
                None => Some(Slot::Left(hint)),
                Some(prev) if self.comp.compares_lt(self.key(prev), key) => {
                    if self.nodes.node(hint).left.is_none() {
                        Some(Slot::Left(hint))
                    } else {
                        Some(Slot::Right(prev))
                    }
                }
                Some(_) => None,
            },
            Some(_) => None,
        };

        match slot {
            Some(slot) => {
                let handle = self.nodes.try_allocate(Node::new(value))?;
                self.link(slot, handle);
                Ok((handle, true))
            }
            None => self.try_insert(value),
        }
    }

    /// Returns the first node whose key does not order before `key`.
    pub(crate) fn lower_bound(&self, key: &X::Key) -> Option<Handle> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.node(handle);
            if self.comp.compares_lt(X::key(&node.value), key) {
                current = node.right;
            } else {
                candidate = Some(handle);
                current = node.left;
            }
        }
        candidate
    }

    /// Returns the first node whose key orders after `key`.
    pub(crate) fn upper_bound(&self, key: &X::Key) -> Option<Handle> {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.node(handle);
            if self.comp.compares_lt(key, X::key(&node.value)) {
                candidate = Some(handle);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        candidate
    }

    /// Erases the node holding `key`, returning its value.
    pub(crate) fn remove(&mut self, key: &X::Key) -> Option<T> {
        let handle = self.find(key)?;
        Some(self.erase(handle))
    }

    /// Checks every structural invariant, panicking with a description on the first violation.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "empty tree reports a non-zero length");
            return;
        };
        assert_eq!(self.nodes.node(root).parent, None, "root has a parent");

        let mut reachable = 0;
        let mut stack = alloc::vec![root];
        while let Some(handle) = stack.pop() {
            reachable += 1;
            let node = self.nodes.node(handle);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.nodes.node(child).parent, Some(handle), "child does not point back to its parent");
                stack.push(child);
            }
        }
        assert_eq!(reachable, self.len, "reachable node count differs from len");

        let handles = self.handles();
        assert_eq!(handles.len(), self.len, "in-order walk length differs from len");
        for pair in handles.windows(2) {
            assert!(
                self.comp.compares_lt(self.key(pair[0]), self.key(pair[1])),
                "in-order walk is not strictly increasing"
            );
        }
    }
}

impl<T, X, C, A> Clone for RawBstTree<T, X, C, A>
where
    T: Clone,
    C: Clone,
    A: NodeAllocator<T>,
{
    /// Rebuilds the tree by appending the source's values in key order.
    ///
    /// The copy is structurally independent; its shape is a right-leaning chain regardless of
    /// the source's shape.
    fn clone(&self) -> Self {
        let mut tree = Self::from_parts(self.comp.clone(), self.nodes.empty_like());
        tree.extend_sorted_from(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.comp = source.comp.clone();
        self.extend_sorted_from(source);
    }
}

impl<T: Clone, X, C, A: NodeAllocator<T>> RawBstTree<T, X, C, A> {
    fn extend_sorted_from(&mut self, source: &Self) {
        let mut last = self.last();
        let mut current = source.first();
        while let Some(handle) = current {
            let value = source.value(handle).clone();
            let pushed = self.try_push_greatest(last, value);
            last = Some(pushed.unwrap_or_else(|error| panic!("`RawBstTree::clone()` - {error}")));
            current = source.successor(handle);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::key::Identity;
    use crate::raw::Arena;
    use alloc::vec;
    use compare::{Natural, natural};
    use proptest::prelude::*;

    type Tree = RawBstTree<u32, Identity, Natural<u32>, Arena<Node<u32>>>;

    fn tree_of(keys: &[u32]) -> Tree {
        let mut tree = Tree::from_parts(natural(), Arena::new());
        for &key in keys {
            tree.try_insert(key).unwrap();
        }
        tree.validate();
        tree
    }

    fn keys(tree: &Tree) -> Vec<u32> {
        tree.handles().into_iter().map(|handle| *tree.value(handle)).collect()
    }

    #[test]
    fn insert_builds_sorted_tree() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(keys(&tree), [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.len(), 7);
        assert_eq!(*tree.value(tree.root().unwrap()), 5);
    }

    #[test]
    fn duplicate_returns_existing_node() {
        let mut tree = tree_of(&[5, 3]);
        let (root, inserted) = tree.try_insert(5).unwrap();
        assert!(!inserted);
        assert_eq!(Some(root), tree.root());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn erase_leaf() {
        let mut tree = tree_of(&[5, 3, 8]);
        let leaf = tree.find(&3).unwrap();
        assert_eq!(tree.erase(leaf), 3);
        tree.validate();
        assert_eq!(keys(&tree), [5, 8]);
    }

    #[test]
    fn erase_node_without_left_child() {
        let mut tree = tree_of(&[5, 3, 4]);
        tree.erase(tree.find(&3).unwrap());
        tree.validate();
        let four = tree.find(&4).unwrap();
        assert_eq!(tree.nodes().node(four).parent, tree.root());
    }

    #[test]
    fn erase_node_without_right_child() {
        let mut tree = tree_of(&[5, 3, 2]);
        tree.erase(tree.find(&3).unwrap());
        tree.validate();
        assert_eq!(keys(&tree), [2, 5]);
    }

    #[test]
    fn erase_with_direct_right_successor() {
        // 8's successor is 9, its direct right child.
        let mut tree = tree_of(&[5, 3, 8, 7, 9]);
        let nine = tree.find(&9).unwrap();
        tree.erase(tree.find(&8).unwrap());
        tree.validate();
        assert_eq!(tree.nodes().node(tree.root().unwrap()).right, Some(nine));
        assert_eq!(keys(&tree), [3, 5, 7, 9]);
    }

    #[test]
    fn erase_with_deep_successor() {
        // 5's successor is 6, the leftmost node of the right subtree, which has a right child.
        let mut tree = tree_of(&[5, 3, 9, 6, 7, 10]);
        let six = tree.find(&6).unwrap();
        assert_eq!(tree.erase(tree.root().unwrap()), 5);
        tree.validate();
        assert_eq!(tree.root(), Some(six));
        assert_eq!(keys(&tree), [3, 6, 7, 9, 10]);
    }

    #[test]
    fn erase_last_node_empties_tree() {
        let mut tree = tree_of(&[1]);
        tree.erase(tree.root().unwrap());
        tree.validate();
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
    }

    #[test]
    fn bounds() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let at = |handle: Option<Handle>| handle.map(|h| *tree.value(h));
        assert_eq!(at(tree.lower_bound(&4)), Some(4));
        assert_eq!(at(tree.upper_bound(&4)), Some(5));
        assert_eq!(at(tree.lower_bound(&6)), Some(7));
        assert_eq!(at(tree.upper_bound(&6)), Some(7));
        assert_eq!(at(tree.lower_bound(&0)), Some(1));
        assert_eq!(at(tree.lower_bound(&10)), None);
        assert_eq!(at(tree.upper_bound(&9)), None);
    }

    #[test]
    fn hint_before_matching_node_is_used() {
        let mut tree = tree_of(&[10, 20, 30]);
        let thirty = tree.find(&30).unwrap();
        let (handle, inserted) = tree.try_insert_hint(Some(thirty), 25).unwrap();
        assert!(inserted);
        tree.validate();
        assert_eq!(tree.successor(handle), Some(thirty));

        // Wrong hint: falls back to a normal insert.
        let ten = tree.find(&10).unwrap();
        tree.try_insert_hint(Some(ten), 27).unwrap();
        tree.try_insert_hint(None, 15).unwrap();
        tree.try_insert_hint(None, 40).unwrap();
        tree.validate();
        assert_eq!(keys(&tree), [10, 15, 20, 25, 27, 30, 40]);
    }

    #[test]
    fn hint_on_duplicate_reports_existing() {
        let mut tree = tree_of(&[10, 20]);
        let twenty = tree.find(&20).unwrap();
        assert_eq!(tree.try_insert_hint(Some(twenty), 20).unwrap(), (twenty, false));
        assert!(!tree.try_insert_hint(None, 10).unwrap().1);
        tree.validate();
    }

    #[test]
    fn failed_allocation_leaves_tree_untouched() {
        let mut tree = Tree::from_parts(natural(), Arena::with_limit(2));
        tree.try_insert(2).unwrap();
        tree.try_insert(1).unwrap();
        assert_eq!(tree.try_insert(3), Err(CapacityError::new(2)));
        assert_eq!(tree.try_insert_hint(None, 3), Err(CapacityError::new(2)));
        tree.validate();
        assert_eq!(keys(&tree), [1, 2]);
        // An existing key never needs an allocation.
        assert_eq!(tree.try_insert(1).map(|(_, inserted)| inserted), Ok(false));
    }

    #[test]
    fn erase_range_advances_before_freeing() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let first = tree.find(&3);
        let last = tree.find(&8);
        assert_eq!(tree.distance(first, last), 4);
        assert_eq!(tree.erase_range(first, last), 4);
        tree.validate();
        assert_eq!(keys(&tree), [1, 8, 9]);
    }

    #[test]
    fn clone_is_independent() {
        let tree = tree_of(&[5, 3, 8, 1]);
        let mut copy = tree.clone();
        copy.validate();
        assert_eq!(keys(&copy), keys(&tree));
        copy.remove(&3);
        assert_eq!(keys(&tree), [1, 3, 5, 8]);

        copy.clone_from(&tree);
        copy.validate();
        assert_eq!(keys(&copy), [1, 3, 5, 8]);
    }

    #[test]
    fn drain_returns_sorted_values() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.drain_to_vec(), vec![1, 2, 3]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        tree.validate();
    }

    proptest! {
        #[test]
        fn structure_survives_random_operations(
            ops in prop::collection::vec((any::<bool>(), 0u32..64), 0..400)
        ) {
            let mut tree = tree_of(&[]);
            let mut model = alloc::collections::BTreeSet::new();
            for (insert, key) in ops {
                if insert {
                    let (_, inserted) = tree.try_insert(key).unwrap();
                    prop_assert_eq!(inserted, model.insert(key));
                } else {
                    prop_assert_eq!(tree.remove(&key).is_some(), model.remove(&key));
                }
                tree.validate();
            }
            prop_assert_eq!(keys(&tree), model.into_iter().collect::<Vec<_>>());
        }
    }
}

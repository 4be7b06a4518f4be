use core::fmt;
use core::marker::PhantomData;

use crate::allocator::NodeAllocator;
use crate::raw::{Handle, maximum, predecessor, successor};

/// A detached position in a [`BstTree`](crate::BstTree): either an element or the end.
///
/// Positions are the tree's counterpart of bidirectional iterators. They do not borrow the
/// tree, so they can be held across mutations and passed back to
/// [`erase`](crate::BstTree::erase) or [`insert_hint`](crate::BstTree::insert_hint).
/// Stepping goes through the tree ([`next`](crate::BstTree::next),
/// [`prev`](crate::BstTree::prev)), which supplies the root needed to step back from the
/// end.
///
/// A position is invalidated when the element it names is erased; using it afterwards is a
/// logic error that may panic or name an unrelated element, but never causes undefined
/// behavior. Erasing *other* elements leaves it valid. Positions from different trees must
/// not be mixed.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    node: Option<Handle>,
}

impl Position {
    pub(crate) const fn at(node: Option<Handle>) -> Self {
        Self { node }
    }

    pub(crate) const fn node(self) -> Option<Handle> {
        self.node
    }

    /// Returns `true` if this is the one-past-the-last position.
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.node.is_none()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(handle) => f.debug_tuple("Position").field(&handle.to_index()).finish(),
            None => f.write_str("Position(end)"),
        }
    }
}

/// A position traversed in descending key order.
///
/// A reverse position designates the element *before* its [`base`](Self::base), so
/// `rbegin()` wraps `end()` and designates the largest element, and `rend()` wraps
/// `begin()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ReversePosition(Position);

impl ReversePosition {
    /// Wraps `base`; the result designates the element before `base`.
    #[must_use]
    pub const fn new(base: Position) -> Self {
        Self(base)
    }

    /// Returns the forward position one past the designated element.
    #[must_use]
    pub const fn base(self) -> Position {
        self.0
    }
}

/// A read-only bidirectional cursor over a tree.
///
/// Unlike [`Position`], a cursor borrows the tree, so it carries everything it needs to
/// step in both directions.
///
/// # Examples
///
/// ```
/// use bst_tree::BstTree;
///
/// let tree = BstTree::from([20, 10, 30]);
/// let mut cursor = tree.cursor(tree.end());
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&30));
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&20));
/// cursor.move_next();
/// cursor.move_next();
/// assert!(cursor.position().is_end());
/// ```
pub struct Cursor<'a, T, A> {
    nodes: &'a A,
    root: Option<Handle>,
    node: Option<Handle>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, A: NodeAllocator<T>> Cursor<'a, T, A> {
    pub(crate) const fn new(nodes: &'a A, root: Option<Handle>, position: Position) -> Self {
        Self {
            nodes,
            root,
            node: position.node,
            _marker: PhantomData,
        }
    }

    /// Returns the element under the cursor, or `None` at the end.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        let nodes = self.nodes;
        self.node.map(|handle| nodes.node(handle).value())
    }

    /// Returns the detached position of the cursor.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::at(self.node)
    }

    /// Advances to the next element in key order, or to the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end.
    pub fn move_next(&mut self) {
        let handle = self.node.expect("`Cursor::move_next()` - cannot advance past the end!");
        self.node = successor(self.nodes, handle);
    }

    /// Steps back to the previous element; from the end this lands on the largest element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the first element, or at the end of an empty tree.
    pub fn move_prev(&mut self) {
        self.node = Some(match self.node {
            None => {
                let root = self.root.expect("`Cursor::move_prev()` - the tree is empty!");
                maximum(self.nodes, root)
            }
            Some(handle) => {
                predecessor(self.nodes, handle).expect("`Cursor::move_prev()` - cannot step before the beginning!")
            }
        });
    }
}

impl<T, A> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Cursor<'_, T, A> {}

impl<T, A> PartialEq for Cursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T, A> Eq for Cursor<'_, T, A> {}

impl<T: fmt::Debug, A: NodeAllocator<T>> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

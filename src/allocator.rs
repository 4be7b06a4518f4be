//! Pluggable node storage.
//!
//! Tree algorithms never touch memory directly: every node is created through
//! [`NodeAllocator::try_allocate`] and destroyed through [`NodeAllocator::deallocate`], and
//! links between nodes are [`Handle`]s issued by the allocator. The default strategy is
//! [`Arena`], a slot vector with a free list.

use core::fmt;

use crate::raw::{Handle, Node};

pub use crate::raw::Arena;

/// The error returned when node storage is exhausted.
///
/// A tree that reports this error is left exactly as it was before the failing call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CapacityError {
    max_size: usize,
}

impl CapacityError {
    /// Creates an error for an allocator that holds at most `max_size` nodes.
    #[must_use]
    pub const fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// The node limit that was hit.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node storage exhausted (max_size = {})", self.max_size)
    }
}

impl core::error::Error for CapacityError {}

/// A node-allocation strategy for [`BstTree`](crate::BstTree) and [`BstMap`](crate::BstMap).
///
/// Implementors own node storage; the tree owns the link structure. A handle returned by
/// `try_allocate` must keep naming the same node until it is passed to `deallocate`.
pub trait NodeAllocator<T> {
    /// Stores `node` and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if no further node can be stored. `node` is dropped.
    fn try_allocate(&mut self, node: Node<T>) -> Result<Handle, CapacityError>;

    /// Removes the node named by `handle` and returns it.
    ///
    /// # Panics
    ///
    /// May panic if `handle` does not name a live node.
    fn deallocate(&mut self, handle: Handle) -> Node<T>;

    /// Returns the node named by `handle`.
    fn node(&self, handle: Handle) -> &Node<T>;

    /// Returns the node named by `handle` mutably.
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T>;

    /// Visits every live node mutably, in no particular order.
    fn iter_nodes_mut<'a>(&'a mut self) -> impl Iterator<Item = (Handle, &'a mut Node<T>)>
    where
        T: 'a;

    /// The maximum number of live nodes this allocator can hold.
    fn max_size(&self) -> usize;

    /// Drops every node at once.
    fn clear(&mut self);

    /// Returns an empty allocator configured like `self` (same limit, no nodes).
    #[must_use]
    fn empty_like(&self) -> Self
    where
        Self: Sized;
}

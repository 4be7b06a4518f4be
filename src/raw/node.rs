use super::handle::Handle;
use crate::allocator::NodeAllocator;

/// A single tree entry: the stored value plus its three structural links.
///
/// `left` and `right` are owning in the logical sense (the tree frees a subtree through
/// them); `parent` is a back-reference used only for traversal and transplantation.
/// Allocators store and hand back nodes without ever looking inside them.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) value: T,
}

impl<T> Node<T> {
    /// Creates a detached node holding `value`.
    pub(crate) const fn new(value: T) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            value,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }
}

/// Returns the leftmost node of the subtree rooted at `handle`.
pub(crate) fn minimum<T, A>(nodes: &A, mut handle: Handle) -> Handle
where
    A: NodeAllocator<T> + ?Sized,
{
    while let Some(left) = nodes.node(handle).left {
        handle = left;
    }
    handle
}

/// Returns the rightmost node of the subtree rooted at `handle`.
pub(crate) fn maximum<T, A>(nodes: &A, mut handle: Handle) -> Handle
where
    A: NodeAllocator<T> + ?Sized,
{
    while let Some(right) = nodes.node(handle).right {
        handle = right;
    }
    handle
}

/// Returns the in-order successor of `handle`, or `None` if it holds the largest key.
pub(crate) fn successor<T, A>(nodes: &A, handle: Handle) -> Option<Handle>
where
    A: NodeAllocator<T> + ?Sized,
{
    if let Some(right) = nodes.node(handle).right {
        return Some(minimum(nodes, right));
    }

    let mut current = handle;
    let mut trailing = nodes.node(current).parent;
    while let Some(parent) = trailing {
        if nodes.node(parent).right != Some(current) {
            break;
        }
        current = parent;
        trailing = nodes.node(parent).parent;
    }
    trailing
}

/// Returns the in-order predecessor of `handle`, or `None` if it holds the smallest key.
pub(crate) fn predecessor<T, A>(nodes: &A, handle: Handle) -> Option<Handle>
where
    A: NodeAllocator<T> + ?Sized,
{
    if let Some(left) = nodes.node(handle).left {
        return Some(maximum(nodes, left));
    }

    let mut current = handle;
    let mut trailing = nodes.node(current).parent;
    while let Some(parent) = trailing {
        if nodes.node(parent).left != Some(current) {
            break;
        }
        current = parent;
        trailing = nodes.node(parent).parent;
    }
    trailing
}

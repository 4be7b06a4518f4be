use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::allocator::NodeAllocator;
use crate::raw::{Handle, predecessor, successor};

/// An iterator over the elements of a [`BstTree`](crate::BstTree) in key order.
///
/// This `struct` is created by [`BstTree::iter`](crate::BstTree::iter) and
/// [`BstTree::iter_between`](crate::BstTree::iter_between). Each step follows parent links,
/// so it takes O(depth) in the worst case and amortized O(1) over a full traversal.
///
/// # Examples
///
/// ```
/// use bst_tree::BstTree;
///
/// let tree = BstTree::from([2, 1, 3]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, A> {
    nodes: &'a A,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, A> Iter<'a, T, A> {
    /// `front` and `back` are the first and last elements yielded, inclusive.
    pub(crate) const fn new(nodes: &'a A, front: Option<Handle>, back: Option<Handle>, remaining: usize) -> Self {
        Self {
            nodes,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a, A: NodeAllocator<T>> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = successor(self.nodes, handle);
        let nodes = self.nodes;
        Some(nodes.node(handle).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, A: NodeAllocator<T>> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = predecessor(self.nodes, handle);
        let nodes = self.nodes;
        Some(nodes.node(handle).value())
    }
}

impl<'a, T: 'a, A: NodeAllocator<T>> ExactSizeIterator for Iter<'a, T, A> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, T: 'a, A: NodeAllocator<T>> FusedIterator for Iter<'a, T, A> {}

impl<T, A> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T, A> fmt::Debug for Iter<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

/// An owning iterator over the elements of a [`BstTree`](crate::BstTree), in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstTree`](crate::BstTree)
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: alloc::vec::Vec<T>) -> Self {
        Self {
            inner: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        Self::new(alloc::vec::Vec::new())
    }
}

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::allocator::{Arena, NodeAllocator};
use crate::bst_tree;
use crate::raw::Node;

/// An iterator over the entries of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`iter`](crate::BstMap::iter) method on
/// [`BstMap`](crate::BstMap).
///
/// # Examples
///
/// ```
/// use bst_tree::BstMap;
///
/// let map = BstMap::from([(2, "b"), (1, "a")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, A = Arena<Node<(K, V)>>> {
    inner: bst_tree::Iter<'a, (K, V), A>,
}

impl<'a, K, V, A> Iter<'a, K, V, A> {
    pub(crate) const fn new(inner: bst_tree::Iter<'a, (K, V), A>) -> Self {
        Self { inner }
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> DoubleEndedIterator for Iter<'a, K, V, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> ExactSizeIterator for Iter<'a, K, V, A> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> FusedIterator for Iter<'a, K, V, A> {}

impl<K, V, A> Clone for Iter<'_, K, V, A> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, A: NodeAllocator<(K, V)>> fmt::Debug for Iter<'_, K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over the entries of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`iter_mut`](crate::BstMap::iter_mut) method on
/// [`BstMap`](crate::BstMap). Creating it walks the tree once and collects one
/// `(&K, &mut V)` pair per entry.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: alloc::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(entries: Vec<(&'a K, &'a mut V)>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IterMut<'_, K, V> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// An owning iterator over the entries of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstMap`](crate::BstMap)
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: bst_tree::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) const fn new(inner: bst_tree::IntoIter<(K, V)>) -> Self {
        Self { inner }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        Self::new(bst_tree::IntoIter::default())
    }
}

/// An iterator over the keys of a [`BstMap`](crate::BstMap).
///
/// This `struct` is created by the [`keys`](crate::BstMap::keys) method on
/// [`BstMap`](crate::BstMap).
///
/// # Examples
///
/// ```
/// use bst_tree::BstMap;
///
/// let map = BstMap::from([(2, "b"), (1, "a")]);
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [1, 2]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, A = Arena<Node<(K, V)>>> {
    inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A> Keys<'a, K, V, A> {
    pub(crate) const fn new(inner: Iter<'a, K, V, A>) -> Self {
        Self { inner }
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> Iterator for Keys<'a, K, V, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> DoubleEndedIterator for Keys<'a, K, V, A> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> ExactSizeIterator for Keys<'a, K, V, A> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> FusedIterator for Keys<'a, K, V, A> {}

impl<K, V, A> Clone for Keys<'_, K, V, A> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, A: NodeAllocator<(K, V)>> fmt::Debug for Keys<'_, K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`values`](crate::BstMap::values) method on
/// [`BstMap`](crate::BstMap).
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, A = Arena<Node<(K, V)>>> {
    inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A> Values<'a, K, V, A> {
    pub(crate) const fn new(inner: Iter<'a, K, V, A>) -> Self {
        Self { inner }
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> Iterator for Values<'a, K, V, A> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> DoubleEndedIterator for Values<'a, K, V, A> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> ExactSizeIterator for Values<'a, K, V, A> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, K: 'a, V: 'a, A: NodeAllocator<(K, V)>> FusedIterator for Values<'a, K, V, A> {}

impl<K, V, A> Clone for Values<'_, K, V, A> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, A: NodeAllocator<(K, V)>> fmt::Debug for Values<'_, K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over the values of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`values_mut`](crate::BstMap::values_mut) method on
/// [`BstMap`](crate::BstMap).
///
/// # Examples
///
/// ```
/// use bst_tree::BstMap;
///
/// let mut map = BstMap::from([(1, String::from("hello")), (2, String::from("goodbye"))]);
/// for value in map.values_mut() {
///     value.push('!');
/// }
/// let values: Vec<_> = map.values().cloned().collect();
/// assert_eq!(values, ["hello!", "goodbye!"]);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(crate) const fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}

/// An owning iterator over the keys of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`into_keys`](crate::BstMap::into_keys) method on
/// [`BstMap`](crate::BstMap).
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> IntoKeys<K, V> {
    pub(crate) const fn new(inner: IntoIter<K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoKeys").field(&self.inner).finish()
    }
}

/// An owning iterator over the values of a [`BstMap`](crate::BstMap), in key order.
///
/// This `struct` is created by the [`into_values`](crate::BstMap::into_values) method on
/// [`BstMap`](crate::BstMap).
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> IntoValues<K, V> {
    pub(crate) const fn new(inner: IntoIter<K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoValues").field(&self.inner).finish()
    }
}

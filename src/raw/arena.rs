use alloc::vec::Vec;

use super::handle::Handle;
use super::node::Node;
use crate::allocator::{CapacityError, NodeAllocator};

/// The default node allocator: a vector of slots plus a free list of vacated handles.
///
/// Freed slots are reused before the vector grows, so handles stay small and dense.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
    limit: usize,
}

impl<T> Arena<T> {
    /// Creates an empty arena bounded only by [`Handle::MAX`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            limit: Handle::MAX,
        }
    }

    /// Creates an empty arena with room for `capacity` elements before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            limit: Handle::MAX,
        }
    }

    /// Creates an empty arena that refuses to hold more than `limit` live elements.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            limit: limit.min(Handle::MAX),
        }
    }

    /// Returns the number of elements the arena can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of live elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Returns `true` if no element is live.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of live elements.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Stores `element`, reusing a vacated slot when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when the arena already holds `limit` elements.
    pub fn try_alloc(&mut self, element: T) -> Result<Handle, CapacityError> {
        if self.len() >= self.limit {
            return Err(CapacityError::new(self.limit));
        }

        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            Ok(handle)
        } else {
            self.slots.push(Some(element));
            Ok(Handle::from_index(self.slots.len() - 1))
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeAllocator<T> for Arena<Node<T>> {
    fn try_allocate(&mut self, node: Node<T>) -> Result<Handle, CapacityError> {
        self.try_alloc(node)
    }

    fn deallocate(&mut self, handle: Handle) -> Node<T> {
        self.take(handle)
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<T> {
        self.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.get_mut(handle)
    }

    fn iter_nodes_mut<'a>(&'a mut self) -> impl Iterator<Item = (Handle, &'a mut Node<T>)>
    where
        T: 'a,
    {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|node| (Handle::from_index(index), node)))
    }

    fn max_size(&self) -> usize {
        self.limit
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn empty_like(&self) -> Self {
        Self::with_limit(self.limit)
    }
}

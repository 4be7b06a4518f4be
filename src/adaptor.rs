//! LIFO and FIFO container adaptors.
//!
//! [`Stack`] and [`Queue`] restrict a sequence container to one end (or one end for
//! insertion and the other for removal). The backing container is a type parameter: anything
//! implementing [`BackSequence`] can back a stack, anything also implementing
//! [`FrontSequence`] can back a queue. Implementations are provided for [`Vec`], [`VecDeque`]
//! and [`LinkedList`].
//!
//! Comparisons between two adaptors compare the underlying containers, front to back.

use alloc::collections::{LinkedList, VecDeque};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A sequence that grows and shrinks at its back.
pub trait BackSequence<T> {
    /// Appends `value` at the back.
    fn push_back(&mut self, value: T);

    /// Removes and returns the last element.
    fn pop_back(&mut self) -> Option<T>;

    /// Returns the last element.
    fn back(&self) -> Option<&T>;

    /// Returns the last element mutably.
    fn back_mut(&mut self) -> Option<&mut T>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`BackSequence`] that can also be consumed from its front.
pub trait FrontSequence<T>: BackSequence<T> {
    /// Removes and returns the first element.
    fn pop_front(&mut self) -> Option<T>;

    /// Returns the first element.
    fn front(&self) -> Option<&T>;

    /// Returns the first element mutably.
    fn front_mut(&mut self) -> Option<&mut T>;
}

impl<T> BackSequence<T> for Vec<T> {
    fn push_back(&mut self, value: T) {
        self.push(value);
    }

    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    fn back(&self) -> Option<&T> {
        self.last()
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> BackSequence<T> for VecDeque<T> {
    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }

    fn pop_back(&mut self) -> Option<T> {
        VecDeque::pop_back(self)
    }

    fn back(&self) -> Option<&T> {
        VecDeque::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        VecDeque::back_mut(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> FrontSequence<T> for VecDeque<T> {
    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }

    fn front(&self) -> Option<&T> {
        VecDeque::front(self)
    }

    fn front_mut(&mut self) -> Option<&mut T> {
        VecDeque::front_mut(self)
    }
}

impl<T> BackSequence<T> for LinkedList<T> {
    fn push_back(&mut self, value: T) {
        LinkedList::push_back(self, value);
    }

    fn pop_back(&mut self) -> Option<T> {
        LinkedList::pop_back(self)
    }

    fn back(&self) -> Option<&T> {
        LinkedList::back(self)
    }

    fn back_mut(&mut self) -> Option<&mut T> {
        LinkedList::back_mut(self)
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}

impl<T> FrontSequence<T> for LinkedList<T> {
    fn pop_front(&mut self) -> Option<T> {
        LinkedList::pop_front(self)
    }

    fn front(&self) -> Option<&T> {
        LinkedList::front(self)
    }

    fn front_mut(&mut self) -> Option<&mut T> {
        LinkedList::front_mut(self)
    }
}

/// A last-in, first-out adaptor over a [`BackSequence`].
///
/// # Examples
///
/// ```
/// use bst_tree::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(stack.top(), Some(&2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
pub struct Stack<T, S = Vec<T>> {
    container: S,
    _marker: PhantomData<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack backed by a [`Vec`].
    ///
    /// Use [`Stack::default`] or [`Stack::from_container`] for other backends.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_container(Vec::new())
    }
}

impl<T, S> Stack<T, S> {
    /// Wraps `container`; its last element becomes the top.
    pub const fn from_container(container: S) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying container.
    pub fn into_inner(self) -> S {
        self.container
    }
}

impl<T, S: BackSequence<T>> Stack<T, S> {
    /// Pushes `value` on top.
    pub fn push(&mut self, value: T) {
        self.container.push_back(value);
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Option<T> {
        self.container.pop_back()
    }

    /// Returns the top element.
    #[must_use]
    pub fn top(&self) -> Option<&T> {
        self.container.back()
    }

    /// Returns the top element mutably.
    #[must_use]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.container.back_mut()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Returns `true` if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }
}

/// A first-in, first-out adaptor over a [`FrontSequence`].
///
/// # Examples
///
/// ```
/// use bst_tree::Queue;
///
/// let mut queue = Queue::new();
/// queue.push('a');
/// queue.push('b');
/// assert_eq!(queue.front(), Some(&'a'));
/// assert_eq!(queue.back(), Some(&'b'));
/// assert_eq!(queue.pop(), Some('a'));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct Queue<T, S = VecDeque<T>> {
    container: S,
    _marker: PhantomData<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue backed by a [`VecDeque`].
    ///
    /// Use [`Queue::default`] or [`Queue::from_container`] for other backends.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_container(VecDeque::new())
    }
}

impl<T, S> Queue<T, S> {
    /// Wraps `container`; its first element is the next one popped.
    pub const fn from_container(container: S) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying container.
    pub fn into_inner(self) -> S {
        self.container
    }
}

impl<T, S: FrontSequence<T>> Queue<T, S> {
    /// Appends `value` at the back.
    pub fn push(&mut self, value: T) {
        self.container.push_back(value);
    }

    /// Removes and returns the front element.
    pub fn pop(&mut self) -> Option<T> {
        self.container.pop_front()
    }

    /// Returns the front element, the next one to be popped.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.container.front()
    }

    /// Returns the front element mutably.
    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.container.front_mut()
    }

    /// Returns the most recently pushed element.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.container.back()
    }

    /// Returns the most recently pushed element mutably.
    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.container.back_mut()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Returns `true` if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }
}

macro_rules! delegate_container_traits {
    ($adaptor:ident, $bound:ident) => {
        impl<T, S: $bound<T> + Default> Default for $adaptor<T, S> {
            fn default() -> Self {
                Self::from_container(S::default())
            }
        }

        impl<T, S: Clone> Clone for $adaptor<T, S> {
            fn clone(&self) -> Self {
                Self::from_container(self.container.clone())
            }
        }

        impl<T, S: fmt::Debug> fmt::Debug for $adaptor<T, S> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($adaptor)).field(&self.container).finish()
            }
        }

        impl<T, S: PartialEq> PartialEq for $adaptor<T, S> {
            fn eq(&self, other: &Self) -> bool {
                self.container == other.container
            }
        }

        impl<T, S: Eq> Eq for $adaptor<T, S> {}

        impl<T, S: PartialOrd> PartialOrd for $adaptor<T, S> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.container.partial_cmp(&other.container)
            }
        }

        impl<T, S: Ord> Ord for $adaptor<T, S> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.container.cmp(&other.container)
            }
        }

        impl<T, S: Hash> Hash for $adaptor<T, S> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.container.hash(state);
            }
        }

        impl<T, S: $bound<T>> Extend<T> for $adaptor<T, S> {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                for value in iter {
                    self.push(value);
                }
            }
        }
    };
}

delegate_container_traits!(Stack, BackSequence);
delegate_container_traits!(Queue, FrontSequence);

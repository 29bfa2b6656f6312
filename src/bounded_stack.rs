//! A fixed-capacity last-in-first-out sequence.
//!
//! The capacity is chosen at construction and never grows. Callers must size
//! the stack to the deepest use they can reach; [`AvlMap::kth_largest`] sizes
//! it to the tree's current element count, a safe but not tight bound.
//!
//! [`AvlMap::kth_largest`]: crate::AvlMap::kth_largest

use smallvec::SmallVec;

use crate::error::Error;

/// Inline slots before the backing storage spills to the heap. Rank queries
/// on trees up to a few thousand elements never allocate.
const INLINE: usize = 16;

/// A fixed-capacity LIFO stack.
///
/// [`push`](BoundedStack::push) fails with [`Error::CapacityExceeded`] when
/// the stack is full; [`pop`](BoundedStack::pop) and
/// [`peek`](BoundedStack::peek) fail with [`Error::EmptyStack`] when it is
/// empty.
///
/// # Examples
///
/// ```
/// use ravl_tree::BoundedStack;
///
/// let mut stack = BoundedStack::new(2);
/// stack.push('a')?;
/// stack.push('b')?;
/// assert!(stack.is_full());
/// assert_eq!(stack.pop()?, 'b');
/// assert_eq!(stack.peek()?, &'a');
/// # Ok::<(), ravl_tree::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct BoundedStack<T> {
    items: SmallVec<[T; INLINE]>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Creates an empty stack that holds at most `capacity` elements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: SmallVec::new(),
            capacity,
        }
    }

    /// Returns the number of elements currently on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if no further element can be pushed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Returns the fixed capacity chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes an element onto the top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the stack is full.
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::CapacityExceeded);
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the element at the top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStack`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T, Error> {
        self.items.pop().ok_or(Error::EmptyStack)
    }

    /// Returns a reference to the element at the top without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStack`] if the stack is empty.
    pub fn peek(&self) -> Result<&T, Error> {
        self.items.last().ok_or(Error::EmptyStack)
    }

    /// Removes every element. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

//! Circular Queue Module
//!
//! Generic FIFO container backed by a growable/shrinkable ring buffer with
//! amortized O(1) enqueue and dequeue.

use crate::error::QueueError;

/// Capacity floor; shrinking never goes below this.
pub const MIN_CAPACITY: usize = 16;

// == Circular Queue ==
/// FIFO queue over a ring buffer.
///
/// The backing buffer doubles when an enqueue finds it full and halves after
/// a dequeue leaves it under a quarter occupied (never below
/// [`MIN_CAPACITY`]). Growing and shrinking repack live elements in FIFO
/// order starting at index 0; neither ever loses or reorders elements.
#[derive(Debug)]
pub struct CircularQueue<T> {
    /// Ring storage; `None` marks a free slot
    buf: Vec<Option<T>>,
    /// Index of the front element
    head: usize,
    /// Index one past the back element, modulo capacity
    tail: usize,
    /// Number of live elements
    len: usize,
}

impl<T> CircularQueue<T> {
    // == Constructors ==
    /// Creates an empty queue with the default capacity of 16.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty queue with the given initial capacity (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: Self::empty_buf(capacity),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    fn empty_buf(capacity: usize) -> Vec<Option<T>> {
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        buf
    }

    // == Enqueue ==
    /// Appends an element at the back, doubling capacity first if full.
    pub fn enqueue(&mut self, value: T) {
        if self.len == self.capacity() {
            self.repack(self.capacity() * 2);
        }
        self.buf[self.tail] = Some(value);
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
    }

    // == Dequeue ==
    /// Removes and returns the front element, or `None` if empty.
    ///
    /// The vacated slot is cleared immediately so the element is not kept
    /// alive by the buffer. May halve capacity afterwards (see type docs).
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.buf[self.head].take();
        debug_assert!(value.is_some(), "live slot at head must be occupied");
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;

        if self.len > 0 && self.len < self.capacity() / 4 && self.capacity() > MIN_CAPACITY {
            self.repack((self.capacity() / 2).max(MIN_CAPACITY));
        }
        value
    }

    /// [`dequeue`](Self::dequeue) as a hard failure for callers that require
    /// a non-empty queue.
    pub fn try_dequeue(&mut self) -> Result<T, QueueError> {
        self.dequeue().ok_or(QueueError::Empty)
    }

    // == Peek ==
    /// Returns the front element without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.buf[self.head].as_ref()
    }

    /// [`peek`](Self::peek) as a hard failure.
    pub fn try_peek(&self) -> Result<&T, QueueError> {
        self.peek().ok_or(QueueError::Empty)
    }

    // == Size ==
    /// Number of elements currently queued (not the capacity).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current ring capacity.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    // == Clear ==
    /// Resets to empty, reallocating the backing storage at the current
    /// capacity.
    pub fn clear(&mut self) {
        self.buf = Self::empty_buf(self.capacity());
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates the elements front-to-back without mutating the queue.
    ///
    /// Restartable: each call re-reads the queue's state at that moment.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            offset: 0,
        }
    }

    // == Repack ==
    /// Moves live elements into a fresh buffer of `new_capacity`, front
    /// element at index 0.
    fn repack(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len, "repack must fit all elements");
        let mut buf = Self::empty_buf(new_capacity);
        let old_capacity = self.buf.len();
        for (i, slot) in buf.iter_mut().take(self.len).enumerate() {
            *slot = self.buf[(self.head + i) % old_capacity].take();
        }
        self.buf = buf;
        self.head = 0;
        self.tail = self.len % new_capacity;
    }
}

impl<T: Clone> CircularQueue<T> {
    // == To Vec ==
    /// Snapshot of the elements in FIFO order, independent of wrap-around.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Borrowing FIFO-order iterator over a [`CircularQueue`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.offset >= self.queue.len {
            return None;
        }
        let idx = (self.queue.head + self.offset) % self.queue.capacity();
        self.offset += 1;
        self.queue.buf[idx].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

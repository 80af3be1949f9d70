//! Lock-protected FIFO queue.
//!
//! A singly linked chain of entries stored in a [`SlotArena`] and linked by
//! [`SlotId`]. One `parking_lot::Mutex` serialises every operation, including
//! `peek` and `size`, so operations appear in a single total order consistent
//! with each thread's program order.
//!
//! ```text
//!   head                                tail
//!    │                                   │
//!    ▼                                   ▼
//!  [id_4: A] ──next──► [id_0: B] ──next──► [id_2: C] ──► None
//!   poll() takes here              offer() appends here
//! ```
//!
//! `size()` walks the chain: O(n) under the lock.

use parking_lot::Mutex;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::ConfigError;
use crate::traits::{Container, Queue};

#[derive(Debug)]
struct Entry<T> {
    value: T,
    next: Option<SlotId>,
}

#[derive(Debug)]
struct Chain<T> {
    arena: SlotArena<Entry<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> Chain<T> {
    fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    fn push_back(&mut self, value: T) {
        let id = self.arena.insert(Entry { value, next: None });
        match self.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(prev_tail) => prev_tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        let entry = self.arena.remove(head)?;
        self.head = entry.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(entry.value)
    }

    fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id))
            .map(|entry| &entry.value)
    }

    fn walk_len(&self) -> u64 {
        let mut count = 0u64;
        let mut current = self.head;
        while let Some(entry) = current.and_then(|id| self.arena.get(id)) {
            count += 1;
            current = entry.next;
        }
        count
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }
}

/// Mutex-guarded FIFO queue, optionally bounded.
///
/// # Example
///
/// ```
/// use collkit::ds::LinkedQueue;
///
/// let queue = LinkedQueue::new();
/// queue.offer("a").unwrap();
/// queue.offer("b").unwrap();
///
/// assert_eq!(queue.peek(), Some("a"));
/// assert_eq!(queue.poll(), Some("a"));
/// assert_eq!(queue.poll(), Some("b"));
/// assert_eq!(queue.poll(), None);
/// ```
#[derive(Debug)]
pub struct LinkedQueue<T> {
    inner: Mutex<Chain<T>>,
    capacity: Option<usize>,
}

impl<T> LinkedQueue<T> {
    /// Creates an unbounded queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Chain::new()),
            capacity: None,
        }
    }

    /// Creates a queue that holds at most `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("queue capacity must be > 0"));
        }
        Ok(Self {
            inner: Mutex::new(Chain::new()),
            capacity: Some(capacity),
        })
    }

    /// Returns the bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Appends `value` at the tail.
    ///
    /// A bounded queue that is full hands the value back as `Err(value)`.
    pub fn offer(&self, value: T) -> Result<(), T> {
        let mut chain = self.inner.lock();
        if let Some(cap) = self.capacity {
            if chain.arena.len() >= cap {
                return Err(value);
            }
        }
        chain.push_back(value);
        Ok(())
    }

    /// Removes and returns the head value, or `None` if empty.
    pub fn poll(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    /// Returns a clone of the head value without removing it.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().front().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().head.is_none()
    }

    /// Counts values by walking the chain under the lock. O(n).
    pub fn size(&self) -> u64 {
        self.inner.lock().walk_len()
    }

    /// Drops every queued value.
    pub fn clean(&self) {
        self.inner.lock().clear();
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Container for LinkedQueue<T> {
    fn is_empty(&self) -> bool {
        LinkedQueue::is_empty(self)
    }

    fn size(&self) -> u64 {
        LinkedQueue::size(self)
    }

    fn clean(&self) {
        LinkedQueue::clean(self)
    }
}

impl<T: Clone> Queue<T> for LinkedQueue<T> {
    fn offer(&self, value: T) -> Result<(), T> {
        LinkedQueue::offer(self, value)
    }

    fn poll(&self) -> Option<T> {
        LinkedQueue::poll(self)
    }

    fn peek(&self) -> Option<T> {
        LinkedQueue::peek(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_operations {
        use super::*;

        #[test]
        fn constructed_empty() {
            let queue: LinkedQueue<i32> = LinkedQueue::new();
            assert!(queue.is_empty());
            assert_eq!(queue.size(), 0);
            assert_eq!(queue.peek(), None);
            assert_eq!(queue.poll(), None);
        }

        #[test]
        fn poll_preserves_offer_order() {
            let queue = LinkedQueue::new();
            for i in 0..5 {
                queue.offer(i).unwrap();
            }
            let mut prev = queue.poll().unwrap();
            while let Some(next) = queue.poll() {
                assert_eq!(next, prev + 1, "wrong sequence");
                prev = next;
            }
            assert_eq!(prev, 4);
        }

        #[test]
        fn size_walks_whole_chain() {
            let queue = LinkedQueue::new();
            for i in 0..100 {
                queue.offer(i).unwrap();
            }
            assert_eq!(queue.size(), 100);
            let _ = queue.poll();
            assert_eq!(queue.size(), 99);
        }

        #[test]
        fn clean_empties_queue() {
            let queue = LinkedQueue::new();
            for i in 0..5 {
                queue.offer(i).unwrap();
            }
            queue.clean();
            assert!(queue.is_empty());

            queue.offer(9).unwrap();
            assert_eq!(queue.poll(), Some(9));
        }

        #[test]
        fn draining_then_refilling_reuses_slots() {
            let queue = LinkedQueue::new();
            queue.offer("a").unwrap();
            assert_eq!(queue.poll(), Some("a"));
            assert!(queue.is_empty());

            queue.offer("b").unwrap();
            queue.offer("c").unwrap();
            assert_eq!(queue.peek(), Some("b"));
            assert_eq!(queue.poll(), Some("b"));
            assert_eq!(queue.poll(), Some("c"));
        }
    }

    mod bounded {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            let err = LinkedQueue::<u8>::bounded(0).unwrap_err();
            assert!(err.to_string().contains("capacity"));
        }

        #[test]
        fn full_queue_returns_value() {
            let queue = LinkedQueue::bounded(2).unwrap();
            assert_eq!(queue.capacity(), Some(2));
            assert_eq!(queue.offer(1), Ok(()));
            assert_eq!(queue.offer(2), Ok(()));
            assert_eq!(queue.offer(3), Err(3));

            assert_eq!(queue.poll(), Some(1));
            assert_eq!(queue.offer(3), Ok(()));
            assert_eq!(queue.size(), 2);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: poll returns values in offer order
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_fifo_order(values in prop::collection::vec(any::<u32>(), 0..100)) {
                let queue = LinkedQueue::new();
                for &v in &values {
                    prop_assert!(queue.offer(v).is_ok());
                }
                let mut polled = Vec::new();
                while let Some(v) = queue.poll() {
                    polled.push(v);
                }
                prop_assert_eq!(polled, values);
            }

            /// Property: interleaved offer/poll keeps size == offered - polled
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_size_tracks_interleaving(ops in prop::collection::vec(any::<bool>(), 0..200)) {
                let queue = LinkedQueue::new();
                let mut expected = 0u64;
                for (i, offer) in ops.into_iter().enumerate() {
                    if offer {
                        prop_assert!(queue.offer(i).is_ok());
                        expected += 1;
                    } else if queue.poll().is_some() {
                        expected -= 1;
                    }
                    prop_assert_eq!(queue.size(), expected);
                }
            }
        }
    }
}

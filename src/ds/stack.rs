//! Lock-free LIFO stack (Treiber stack).
//!
//! ## Architecture
//!
//! ```text
//!   head: Atomic<Node<T>>
//!     │
//!     ▼
//!   ┌──────────┐    ┌──────────┐    ┌──────────┐
//!   │ value: C │───►│ value: B │───►│ value: A │───► null
//!   └──────────┘    └──────────┘    └──────────┘
//!     newest                          oldest
//! ```
//!
//! `push` builds a node pointing at the current head and retries a
//! compare-and-swap of `head` until it wins. `pop` reads the head, swaps it
//! for `head.next`, clones the value out and hands the node to
//! `crossbeam_epoch` for deferred destruction. A node, and the value it owns,
//! is only freed once no pinned thread can still hold a pointer to it, which
//! rules out use-after-free and ABA on the head.
//!
//! The value never leaves its node while the node is reachable by a pinned
//! reader, so a `peek` racing with the `pop` of the same node still clones a
//! live value. Both `pop` and `peek` therefore require `T: Clone`.
//!
//! ## Progress
//!
//! Lock-free: among contending threads at least one CAS always succeeds.
//! An individual thread may retry an unbounded number of times under
//! pathological contention.
//!
//! ## Cost
//!
//! `size()` walks the whole chain: O(n), and only a snapshot under
//! concurrent modification.

use std::sync::atomic::Ordering;

use crossbeam_epoch::{self as epoch, Atomic, Owned, Shared};
use log::trace;

#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsSnapshotProvider, StackMetrics, StackMetricsRecorder, StackMetricsSnapshot,
};
use crate::traits::{Container, Stack};

struct Node<T> {
    value: T,
    next: Atomic<Node<T>>,
}

/// Lock-free LIFO stack.
///
/// # Example
///
/// ```
/// use collkit::ds::TreiberStack;
///
/// let stack = TreiberStack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.peek(), Some(2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
pub struct TreiberStack<T> {
    head: Atomic<Node<T>>,
    #[cfg(feature = "metrics")]
    metrics: StackMetrics,
}

impl<T> TreiberStack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            head: Atomic::null(),
            #[cfg(feature = "metrics")]
            metrics: StackMetrics::new(),
        }
    }

    /// Pushes `value` on top of the stack.
    pub fn push(&self, value: T) {
        let mut node = Owned::new(Node {
            value,
            next: Atomic::null(),
        });

        let guard = epoch::pin();
        loop {
            let head = self.head.load(Ordering::Relaxed, &guard);
            node.next.store(head, Ordering::Relaxed);

            match self
                .head
                .compare_exchange(head, node, Ordering::Release, Ordering::Relaxed, &guard)
            {
                Ok(_) => break,
                Err(err) => {
                    node = err.new;
                    #[cfg(feature = "metrics")]
                    self.metrics.record_cas_retry();
                },
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_push();
    }

    /// Removes the top node and returns a clone of its value, or `None` if
    /// the stack is empty.
    ///
    /// The node's own copy is dropped by the epoch collector together with
    /// the node.
    pub fn pop(&self) -> Option<T>
    where
        T: Clone,
    {
        let guard = epoch::pin();
        loop {
            let head = self.head.load(Ordering::Acquire, &guard);
            // SAFETY: `head` was loaded under `guard`; nodes are only destroyed
            // through the epoch collector, so it stays valid while pinned.
            let node = match unsafe { head.as_ref() } {
                Some(node) => node,
                None => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_pop_empty();
                    return None;
                },
            };

            let next = node.next.load(Ordering::Relaxed, &guard);
            if self
                .head
                .compare_exchange(head, next, Ordering::AcqRel, Ordering::Relaxed, &guard)
                .is_ok()
            {
                #[cfg(feature = "metrics")]
                self.metrics.record_pop();
                let value = node.value.clone();
                // SAFETY: the CAS unlinked `head`, so only this thread retires
                // it. Pinned readers keep it alive until they unpin.
                unsafe {
                    guard.defer_destroy(head);
                }
                return Some(value);
            }

            #[cfg(feature = "metrics")]
            self.metrics.record_cas_retry();
        }
    }

    /// Returns a clone of the top value without removing it.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        let guard = epoch::pin();
        let head = self.head.load(Ordering::Acquire, &guard);
        // SAFETY: protected by `guard`, see `pop`. The value stays in the node
        // until the node is destroyed.
        unsafe { head.as_ref() }.map(|node| node.value.clone())
    }

    /// Returns `true` if the stack holds no values.
    pub fn is_empty(&self) -> bool {
        let guard = epoch::pin();
        self.head.load(Ordering::Acquire, &guard).is_null()
    }

    /// Counts the values by walking the chain. O(n).
    pub fn size(&self) -> u64 {
        let guard = epoch::pin();
        let mut count = 0u64;
        let mut current = self.head.load(Ordering::Acquire, &guard);
        // SAFETY: every node reachable from `head` is protected by `guard`.
        while let Some(node) = unsafe { current.as_ref() } {
            count += 1;
            current = node.next.load(Ordering::Acquire, &guard);
        }
        count
    }

    /// Detaches the whole chain in one swap. The detached nodes and their
    /// values are released once no pinned reader can observe them.
    pub fn clean(&self) {
        let guard = epoch::pin();
        let mut current = self.head.swap(Shared::null(), Ordering::AcqRel, &guard);
        let mut released = 0usize;

        // SAFETY: after the swap the chain is unreachable from `head`; readers
        // that loaded it earlier are pinned, so destruction is deferred.
        while let Some(node) = unsafe { current.as_ref() } {
            let next = node.next.load(Ordering::Acquire, &guard);
            unsafe {
                guard.defer_destroy(current);
            }
            released += 1;
            current = next;
        }

        trace!("treiber stack cleaned, {} nodes released", released);
        #[cfg(feature = "metrics")]
        self.metrics.record_clean();
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StackMetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<T> Default for TreiberStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for TreiberStack<T> {
    fn drop(&mut self) {
        // SAFETY: `&mut self` means no other thread can reach the chain.
        unsafe {
            let guard = epoch::unprotected();
            let mut current = self.head.load(Ordering::Relaxed, guard);
            while !current.is_null() {
                let owned = current.into_owned();
                current = owned.next.load(Ordering::Relaxed, guard);
                drop(owned);
            }
        }
    }
}

impl<T> std::fmt::Debug for TreiberStack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreiberStack")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

// SAFETY: values move between threads through push/pop and are cloned by
// reference in pop and peek; retired nodes may be dropped on any thread.
unsafe impl<T: Send> Send for TreiberStack<T> {}
unsafe impl<T: Send + Sync> Sync for TreiberStack<T> {}

impl<T> Container for TreiberStack<T> {
    fn is_empty(&self) -> bool {
        TreiberStack::is_empty(self)
    }

    fn size(&self) -> u64 {
        TreiberStack::size(self)
    }

    fn clean(&self) {
        TreiberStack::clean(self)
    }
}

impl<T: Clone> Stack<T> for TreiberStack<T> {
    fn push(&self, value: T) {
        TreiberStack::push(self, value)
    }

    fn pop(&self) -> Option<T> {
        TreiberStack::pop(self)
    }

    fn peek(&self) -> Option<T> {
        TreiberStack::peek(self)
    }
}

//! # Container Trait Hierarchy
//!
//! Contracts shared by the collections in this crate. Every method takes
//! `&self`: implementations synchronise internally and are meant to be shared
//! between threads (behind an `Arc` or a `'static`).
//!
//! ## Architecture
//!
//! ```text
//!              ┌──────────────────────────────┐
//!              │         Container            │
//!              │  is_empty() → bool           │
//!              │  size() → u64     (O(n)!)    │
//!              │  clean()                     │
//!              └──────────────┬───────────────┘
//!                             │
//!            ┌────────────────┴────────────────┐
//!            ▼                                 ▼
//!   ┌──────────────────────┐         ┌──────────────────────┐
//!   │      Stack<T>        │         │      Queue<T>        │
//!   │  push(T)             │         │  offer(T) → Result   │
//!   │  pop() → Option<T>   │         │  poll() → Option<T>  │
//!   │  peek() → Option<T>  │         │  peek() → Option<T>  │
//!   └──────────────────────┘         └──────────────────────┘
//!
//!   ┌──────────────────────────────┐  ┌──────────────────────────────┐
//!   │       RangeMap<K, V>         │  │         Cache<K, V>          │
//!   │  insert(Range, V) → Option   │  │  put(K, V)                   │
//!   │  find(&K) → RangeMatch       │  │  find(&K) → Option<Arc<V>>   │
//!   │  remove(&Range) → Option     │  │  find_or_load(&K, loader)    │
//!   │  is_empty / size / clear     │  └──────────────┬───────────────┘
//!   └──────────────────────────────┘                 │ uses
//!                                                    ▼
//!                                    ┌──────────────────────────────┐
//!                                    │     CacheLoader<K, V>        │
//!                                    │  load(&K) → V                │
//!                                    │  (blanket impl for Fn(&K)→V) │
//!                                    └──────────────────────────────┘
//! ```
//!
//! ## Absent values
//!
//! Nothing returns a null sentinel: empty containers yield `None`, range
//! lookups yield an empty [`RangeMatch`], and misuse yields a typed error.

use std::sync::Arc;

use crate::error::InvalidArgumentError;
use crate::range::{Range, RangeMatch};

/// Operations common to the stack and the queue.
pub trait Container {
    /// Returns `true` if the container holds no values.
    fn is_empty(&self) -> bool;

    /// Counts the values. Implementations walk their chain, so this is O(n).
    fn size(&self) -> u64;

    /// Drops every value.
    fn clean(&self);
}

/// LIFO container.
///
/// # Example
///
/// ```
/// use collkit::traits::{Container, Stack};
/// use collkit::ds;
///
/// fn drain<S: Stack<u32>>(stack: &S) -> Vec<u32> {
///     let mut out = Vec::new();
///     while let Some(v) = stack.pop() {
///         out.push(v);
///     }
///     out
/// }
///
/// let stack = ds::stack();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(drain(&stack), vec![2, 1]);
/// assert!(stack.is_empty());
/// ```
pub trait Stack<T>: Container {
    fn push(&self, value: T);

    fn pop(&self) -> Option<T>;

    fn peek(&self) -> Option<T>;
}

/// FIFO container.
pub trait Queue<T>: Container {
    /// Appends `value`; a bounded queue that is full returns it as `Err`.
    fn offer(&self, value: T) -> Result<(), T>;

    fn poll(&self) -> Option<T>;

    fn peek(&self) -> Option<T>;
}

/// Associative array from non-colliding ranges of keys to values.
pub trait RangeMap<K: Ord, V> {
    /// Inserts `value` under `range`.
    ///
    /// Returns the inserted value, or `None` when the map already holds a
    /// range that collides with `range`.
    fn insert(&self, range: Range<K>, value: V) -> Option<V>;

    /// Finds the value whose range contains `key` (both ends inclusive).
    fn find(&self, key: &K) -> RangeMatch<K, V>;

    /// Removes the value stored under exactly `range`.
    fn remove(&self, range: &Range<K>) -> Option<V>;

    fn is_empty(&self) -> bool;

    fn size(&self) -> u64;

    fn clear(&self);
}

/// Produces a value for a key that missed the cache.
pub trait CacheLoader<K, V> {
    fn load(&self, key: &K) -> V;
}

impl<K, V, F> CacheLoader<K, V> for F
where
    F: Fn(&K) -> V,
{
    fn load(&self, key: &K) -> V {
        self(key)
    }
}

/// In-memory cache contract.
pub trait Cache<K, V> {
    fn put(&self, key: K, value: V);

    fn find(&self, key: &K) -> Option<Arc<V>>;

    /// Looks `key` up and, on a miss, loads and stores a value for it.
    ///
    /// Always yields `Ok(None)`: call [`find`](Cache::find) again to read a
    /// freshly loaded value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] when `loader` is `None`.
    fn find_or_load<L>(
        &self,
        key: &K,
        loader: Option<&L>,
    ) -> Result<Option<Arc<V>>, InvalidArgumentError>
    where
        L: CacheLoader<K, V> + ?Sized;
}

//! AVL tree keyed by non-colliding [`Range`]s.
//!
//! ## Architecture
//!
//! ```text
//!   AvlTreeRangeMap<K, V>
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ root: RwLock<Option<Box<Node>>>                              │
//!   │                                                              │
//!   │                    [100, 200] h=3                            │
//!   │                   /              \                           │
//!   │          [-100, 0] h=2         [200, 300] h=1                │
//!   │                  \                                           │
//!   │               [0, 100] h=1                                   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every node owns its children, so dropping the root releases the whole
//! tree. After each mutation, for every node:
//! `height = 1 + max(h(left), h(right))` and `|h(right) - h(left)| <= 1`.
//!
//! ## Operations
//!
//! | Operation | Lock  | Time     | Notes                                   |
//! |-----------|-------|----------|-----------------------------------------|
//! | `insert`  | write | O(log n) | Colliding range → `None`, no mutation   |
//! | `find`    | read  | O(log n) | Point lookup, bounds inclusive          |
//! | `get`     | read  | O(log n) | Exact-range lookup                      |
//! | `remove`  | write | O(log n) | Exact-range match only                  |
//! | `size`    | read  | O(n)     | Iterative walk on a [`TreiberStack`]    |
//! | `clear`   | write | O(n)     | Drops the root                          |
//!
//! ## Thread Safety
//!
//! One `parking_lot::RwLock` guards the root: lookups share the read lock,
//! mutations take the write lock. Rotations rewrite several links at once,
//! so there is no per-node locking.
//!
//! Insert and remove recurse along one root-to-leaf path; the depth is
//! bounded by the AVL height, `O(log n)`.

use std::cmp::Ordering;

use log::{debug, trace};
use parking_lot::RwLock;

use crate::ds::TreiberStack;
use crate::error::InvariantError;
use crate::range::{Range, RangeMatch};
use crate::traits::RangeMap;

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    range: Range<K>,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: u8,
}

impl<K, V> Node<K, V> {
    fn new(range: Range<K>, value: V) -> Box<Self> {
        Box::new(Self {
            range,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    fn balance_factor(&self) -> i16 {
        i16::from(height(&self.right)) - i16::from(height(&self.left))
    }
}

fn height<K, V>(link: &Link<K, V>) -> u8 {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor<K, V>(link: &Link<K, V>) -> i16 {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

fn rotate_right<K, V>(mut p: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut q) = p.left.take() else {
        return p;
    };
    p.left = q.right.take();
    p.fix_height();
    q.right = Some(p);
    q.fix_height();
    q
}

fn rotate_left<K, V>(mut q: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut p) = q.right.take() else {
        return q;
    };
    q.right = p.left.take();
    q.fix_height();
    p.left = Some(q);
    p.fix_height();
    p
}

/// Restores the AVL condition at `p`, assuming both subtrees satisfy it.
fn balance<K, V>(mut p: Box<Node<K, V>>) -> Box<Node<K, V>> {
    p.fix_height();
    match p.balance_factor() {
        2 => {
            if balance_factor(&p.right) < 0 {
                p.right = p.right.take().map(rotate_right);
            }
            rotate_left(p)
        },
        -2 => {
            if balance_factor(&p.left) > 0 {
                p.left = p.left.take().map(rotate_left);
            }
            rotate_right(p)
        },
        _ => p,
    }
}

fn rebalance<K, V>(link: &mut Link<K, V>) {
    if let Some(node) = link.take() {
        *link = Some(balance(node));
    }
}

fn insert_at<K: Ord, V>(link: &mut Link<K, V>, range: Range<K>, value: V) -> bool {
    match link {
        None => {
            *link = Some(Node::new(range, value));
            true
        },
        Some(node) => {
            let inserted = match range.cmp_range(&node.range) {
                Ordering::Less => insert_at(&mut node.left, range, value),
                Ordering::Greater => insert_at(&mut node.right, range, value),
                Ordering::Equal => return false,
            };
            if inserted {
                rebalance(link);
            }
            inserted
        },
    }
}

/// Detaches the leftmost node of `node`'s subtree.
/// Returns the rebalanced remainder and the detached node.
fn take_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        },
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(balance(node)), min)
        },
    }
}

/// Joins the subtrees of a removed node; the in-order successor takes its place.
fn splice<K, V>(left: Link<K, V>, right: Link<K, V>) -> Link<K, V> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (left, Some(right)) => {
            let (rest, mut successor) = take_min(right);
            successor.left = left;
            successor.right = rest;
            Some(balance(successor))
        },
    }
}

fn remove_at<K: Ord, V>(link: &mut Link<K, V>, range: &Range<K>) -> Option<V> {
    let node = link.as_mut()?;
    if node.range == *range {
        let mut removed = link.take()?;
        *link = splice(removed.left.take(), removed.right.take());
        return Some(removed.value);
    }

    let removed = match range.cmp_range(&node.range) {
        Ordering::Less => remove_at(&mut node.left, range),
        Ordering::Greater => remove_at(&mut node.right, range),
        // Collides with a different range: nothing stored under `range`.
        Ordering::Equal => return None,
    };
    if removed.is_some() {
        rebalance(link);
    }
    removed
}

fn check_subtree<K: Ord, V>(link: &Link<K, V>) -> Result<u8, InvariantError> {
    let Some(node) = link else {
        return Ok(0);
    };
    let hl = check_subtree(&node.left)?;
    let hr = check_subtree(&node.right)?;
    let expected = hl.max(hr) + 1;
    if node.height != expected {
        return Err(InvariantError::new(format!(
            "stored height {} differs from computed height {}",
            node.height, expected
        )));
    }
    if (i16::from(hr) - i16::from(hl)).abs() > 1 {
        return Err(InvariantError::new(format!(
            "balance factor {} out of range",
            i16::from(hr) - i16::from(hl)
        )));
    }
    Ok(expected)
}

/// Range map backed by an AVL tree under a single reader/writer lock.
///
/// # Example
///
/// ```
/// use collkit::range::{AvlTreeRangeMap, Range};
///
/// let map = AvlTreeRangeMap::new();
/// map.insert(Range::new(0, 100).unwrap(), "low");
/// map.insert(Range::new(100, 200).unwrap(), "high");
///
/// // Overlapping ranges are rejected.
/// assert_eq!(map.insert(Range::new(50, 150).unwrap(), "bad"), None);
///
/// assert_eq!(map.find(&42).value(), Some(&"low"));
/// assert_eq!(map.find(&150).value(), Some(&"high"));
/// assert!(!map.find(&500).is_present());
/// assert_eq!(map.size(), 2);
/// ```
pub struct AvlTreeRangeMap<K, V> {
    root: RwLock<Link<K, V>>,
}

impl<K, V> AvlTreeRangeMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            root: RwLock::new(None),
        }
    }

    /// Returns `true` if the map holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.root.read().is_none()
    }

    /// Counts stored ranges with an iterative pre-order walk. O(n).
    pub fn size(&self) -> u64 {
        let root = self.root.read();
        let Some(top) = root.as_deref() else {
            return 0;
        };

        let pending = TreiberStack::new();
        pending.push(top);
        let mut count = 0u64;
        while let Some(node) = pending.pop() {
            count += 1;
            if let Some(left) = node.left.as_deref() {
                pending.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                pending.push(right);
            }
        }
        count
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> u8 {
        height(&self.root.read())
    }

    /// Removes every range.
    pub fn clear(&self) {
        let dropped = self.root.write().take();
        drop(dropped);
    }
}

impl<K: Ord, V> AvlTreeRangeMap<K, V> {
    /// Inserts `value` under `range`.
    ///
    /// Returns a copy of the inserted value, or `None` if `range` collides
    /// with a stored range (overlap, containment or duplicate); the tree is
    /// left unchanged in that case.
    pub fn insert(&self, range: Range<K>, value: V) -> Option<V>
    where
        V: Clone,
    {
        let copy = value.clone();
        let mut root = self.root.write();
        if insert_at(&mut root, range, value) {
            trace!("range inserted, tree height {}", height(&root));
            Some(copy)
        } else {
            debug!("range insert rejected: collides with a stored range");
            None
        }
    }

    /// Finds the range containing `key` (both ends inclusive).
    ///
    /// When `key` sits on an endpoint shared by two stored ranges, the one met
    /// first on the descent from the root wins.
    pub fn find(&self, key: &K) -> RangeMatch<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let root = self.root.read();
        let mut current = root.as_deref();
        while let Some(node) = current {
            current = match node.range.cmp_key(key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => {
                    return RangeMatch::found(node.range.clone(), node.value.clone());
                },
            };
        }
        RangeMatch::absent()
    }

    /// Returns the value stored under exactly `range`.
    pub fn get(&self, range: &Range<K>) -> Option<V>
    where
        V: Clone,
    {
        let root = self.root.read();
        let mut current = root.as_deref();
        while let Some(node) = current {
            current = match range.cmp_range(&node.range) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal if node.range == *range => return Some(node.value.clone()),
                Ordering::Equal => return None,
            };
        }
        None
    }

    /// Removes the value stored under exactly `range`.
    ///
    /// A stored range that merely collides with `range` is left alone.
    pub fn remove(&self, range: &Range<K>) -> Option<V> {
        let mut root = self.root.write();
        let removed = remove_at(&mut root, range);
        if removed.is_some() {
            trace!("range removed, tree height {}", height(&root));
        }
        removed
    }

    /// In-order snapshot of the stored ranges.
    pub fn ranges(&self) -> Vec<Range<K>>
    where
        K: Clone,
    {
        let root = self.root.read();
        let pending = TreiberStack::new();
        let mut out = Vec::new();
        let mut current = root.as_deref();
        loop {
            while let Some(node) = current {
                pending.push(node);
                current = node.left.as_deref();
            }
            match pending.pop() {
                Some(node) => {
                    out.push(node.range.clone());
                    current = node.right.as_deref();
                },
                None => break,
            }
        }
        out
    }

    /// Verifies heights, the AVL balance condition and range ordering.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Clone,
    {
        check_subtree(&self.root.read())?;
        let ranges = self.ranges();
        for pair in ranges.windows(2) {
            if pair[0].cmp_range(&pair[1]) != Ordering::Less {
                return Err(InvariantError::new(
                    "in-order ranges are not strictly sorted and disjoint",
                ));
            }
        }
        Ok(())
    }
}

impl<K, V> Default for AvlTreeRangeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for AvlTreeRangeMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvlTreeRangeMap")
            .field("size", &self.size())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl<K, V> RangeMap<K, V> for AvlTreeRangeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    fn insert(&self, range: Range<K>, value: V) -> Option<V> {
        AvlTreeRangeMap::insert(self, range, value)
    }

    fn find(&self, key: &K) -> RangeMatch<K, V> {
        AvlTreeRangeMap::find(self, key)
    }

    fn remove(&self, range: &Range<K>) -> Option<V> {
        AvlTreeRangeMap::remove(self, range)
    }

    fn is_empty(&self) -> bool {
        AvlTreeRangeMap::is_empty(self)
    }

    fn size(&self) -> u64 {
        AvlTreeRangeMap::size(self)
    }

    fn clear(&self) {
        AvlTreeRangeMap::clear(self)
    }
}

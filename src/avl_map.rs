//! An ordered map based on a height-balanced (AVL) binary search tree.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::error::Error;
use crate::raw::{Link, Node, RawAvlTree};

/// An ordered map based on a height-balanced (AVL) binary search tree.
///
/// Given a key type with a [total order], the map stores its entries in key
/// order: keys must implement [`Ord`]. Insert, removal, lookup, and the
/// descending rank query [`kth_largest`](AvlMap::kth_largest) all take
/// O(log n) time, because every mutation rebalances the tree bottom-up with
/// sub-tree rotations and the depth never exceeds `1.45 * log2(n + 1)`.
///
/// Two contracts distinguish `AvlMap` from `std::collections::BTreeMap`:
///
/// - Keys are unique and inserts never update: [`insert`](AvlMap::insert)
///   fails with [`Error::DuplicateKey`] when the key is already present.
/// - Lookups of absent keys are errors, not `None`: [`get`](AvlMap::get) and
///   [`remove`](AvlMap::remove) fail with [`Error::KeyNotFound`].
///
/// Every failing operation is atomic: the map is left exactly as it was
/// before the call.
///
/// The map is a single-owner, single-writer structure. Any number of
/// read-only traversals may run between mutations, each with its own
/// cursor, but the map performs no internal locking.
///
/// # Examples
///
/// ```
/// use ravl_tree::AvlMap;
///
/// let mut reviews = AvlMap::new();
///
/// reviews.insert("Office Space", "Deals with real issues in the workplace.")?;
/// reviews.insert("Pulp Fiction", "Masterpiece.")?;
/// reviews.insert("The Godfather", "Very enjoyable.")?;
///
/// assert_eq!(reviews.get(&"Pulp Fiction")?, &"Masterpiece.");
/// assert!(!reviews.contains_key(&"Les Miserables"));
///
/// // Entries iterate in ascending key order.
/// for (title, review) in &reviews {
///     println!("{title}: {review}");
/// }
/// # Ok::<(), ravl_tree::Error>(())
/// ```
///
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct AvlMap<K, V> {
    raw: RawAvlTree<K, V>,
}

impl<K, V> AvlMap<K, V> {
    /// Makes a new, empty `AvlMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> AvlMap<K, V> {
        AvlMap { raw: RawAvlTree::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1) - the count is maintained across mutations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the height of the underlying tree; 0 when empty, 1 for a
    /// single entry. Exposed because the AVL depth bound is part of this
    /// crate's contract and callers may want to observe it.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets a lazy iterator over the entries of the map, in ascending key
    /// order.
    ///
    /// Each iterator owns its own traversal stack and cursor, so several
    /// iterators over the same map can be interleaved freely; restarting is
    /// just calling `iter` again.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, "c")?;
    /// map.insert(1, "a")?;
    /// map.insert(2, "b")?;
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// # Ok::<(), ravl_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create; O(1) amortized per step; O(n) for a full pass.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            cursor: self.raw.root(),
            remaining: self.len(),
        };
        iter.stack.reserve(self.height());
        iter
    }

    /// Gets a lazy iterator over the keys of the map, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, "b")?;
    /// map.insert(1, "a")?;
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// # Ok::<(), ravl_tree::Error>(())
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Inserts a key-item pair into the map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already present; the
    /// existing entry and the tree shape are left untouched. There is no
    /// upsert: replacing an entry takes an explicit
    /// [`remove`](AvlMap::remove) followed by an insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(37, "a"), Ok(()));
    /// assert_eq!(map.insert(37, "b"), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&37), Ok(&"a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, item: V) -> Result<(), Error> {
        self.raw.insert(key, item)
    }

    /// Removes a key from the map, returning its item.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent; the map is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a")?;
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// # Ok::<(), ravl_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).map(|(_, item)| item)
    }

    /// Returns a reference to the item corresponding to the key.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the item corresponding to the key.
    ///
    /// Only the item is reachable this way; keys are never handed out
    /// mutably, so the ordering invariant cannot be broken from outside.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains an entry for the specified key.
    /// Never fails.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Returns the entry with the minimum key, or `None` if the map is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(log n) - leftmost descent.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first()
    }

    /// Returns the entry with the maximum key, or `None` if the map is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(log n) - rightmost descent.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last()
    }

    /// Returns the entry holding the k-th largest key. Ranks are 1-based and
    /// descending: `kth_largest(1)` is the maximum entry and
    /// `kth_largest(len())` the minimum.
    ///
    /// The walk is iterative over an explicit bounded stack and produces
    /// keys in strictly descending order without materializing the full
    /// sequence; thanks to the balance invariant it visits O(log n) nodes
    /// regardless of `k`. It never mutates the tree.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RankOutOfRange`] if `k` is outside `[1, len()]`
    /// (in particular, for any `k` on an empty map).
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
    ///     map.insert(key, ())?;
    /// }
    /// assert_eq!(map.kth_largest(1)?.0, &9);
    /// assert_eq!(map.kth_largest(5)?.0, &5);
    /// assert_eq!(map.kth_largest(9)?.0, &1);
    /// # Ok::<(), ravl_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn kth_largest(&self, k: usize) -> Result<(&K, &V), Error> {
        self.raw.kth_largest(k)
    }

    /// Verifies the cached-height and balance invariants over every node.
    ///
    /// Always `true` unless the structure has been corrupted; exposed so
    /// test suites can assert the AVL contract after arbitrary operation
    /// sequences.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.raw.is_balanced()
    }
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for AvlMap<K, V> {
    fn clone(&self) -> Self {
        AvlMap { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlMap<K, V> {}

/// Builds a map from key-item pairs. The map has no upsert, so the first
/// occurrence of a key wins and later duplicates are silently skipped.
impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

/// Extends the map with key-item pairs, skipping keys that are already
/// present (first write wins).
impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, item) in iter {
            let _ = self.insert(key, item);
        }
    }
}

/// A lazy iterator over the entries of an `AvlMap`, in ascending key order.
///
/// Created by [`AvlMap::iter`]. Holds its own explicit traversal stack and
/// cursor, independent of any other iterator over the same map.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    /// Ancestors whose entry has not been produced yet; the left spine of
    /// the subtree under the cursor is pushed before each pop.
    stack: Vec<&'a Node<K, V>>,
    cursor: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.cursor {
            self.stack.push(node);
            self.cursor = node.left.as_deref();
        }
        let node = self.stack.pop()?;
        self.cursor = node.right.as_deref();
        self.remaining -= 1;
        Some((&node.key, &node.item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A lazy iterator over the keys of an `AvlMap`, in ascending order.
///
/// Created by [`AvlMap::keys`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An owning iterator over the entries of an `AvlMap`, in ascending key
/// order.
///
/// Created by the [`into_iter`](IntoIterator::into_iter) method on `AvlMap`.
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for AvlMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        fn drain<K, V>(link: Link<K, V>, out: &mut Vec<(K, V)>) {
            if let Some(node) = link {
                // Recursion depth is the tree height, which the balance
                // invariant keeps logarithmic.
                drain(node.left, out);
                out.push((node.key, node.item));
                drain(node.right, out);
            }
        }
        let mut entries = Vec::with_capacity(self.len());
        drain(self.raw.into_root(), &mut entries);
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

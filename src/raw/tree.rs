use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use super::node::{Link, Node};
use crate::bounded_stack::BoundedStack;
use crate::error::Error;

/// The recursive AVL core backing `AvlMap`.
///
/// Mutations descend by key comparison and rebalance bottom-up on the unwind
/// path: after a recursive call returns from a child slot, the node's cached
/// height is recomputed and at most two rotations restore the balance
/// invariant before ownership is handed back to the parent. Failing
/// operations return before any structural change, so the tree is never left
/// in a half-mutated state.
pub(crate) struct RawAvlTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> RawAvlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of key-item pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every element.
    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the root node, if any. Used by the iterators.
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Consumes the tree and hands over ownership of its root link. Used by
    /// the owning iterator.
    pub(crate) fn into_root(self) -> Link<K, V> {
        self.root
    }

    /// Height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        Self::height_of(&self.root)
    }

    fn height_of(link: &Link<K, V>) -> usize {
        link.as_ref().map_or(0, |node| node.height)
    }

    fn update_height(node: &mut Node<K, V>) {
        node.height = 1 + Self::height_of(&node.left).max(Self::height_of(&node.right));
    }

    /// Balance factor is right height minus left height; positive means
    /// right-heavy.
    #[allow(clippy::cast_possible_wrap)]
    fn balance_factor(node: &Node<K, V>) -> isize {
        Self::height_of(&node.right) as isize - Self::height_of(&node.left) as isize
    }

    /// Left rotation: the right child becomes the new subtree root. Exactly
    /// one child pointer moves on each of the two nodes involved, and both
    /// heights are recomputed from the updated children.
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut pivot = node.right.take().expect("left rotation needs a right child");
        node.right = pivot.left.take();
        Self::update_height(&mut node);
        pivot.left = Some(node);
        Self::update_height(&mut pivot);
        pivot
    }

    /// Right rotation, mirror of [`Self::rotate_left`].
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut pivot = node.left.take().expect("right rotation needs a left child");
        node.left = pivot.right.take();
        Self::update_height(&mut node);
        pivot.right = Some(node);
        Self::update_height(&mut pivot);
        pivot
    }

    /// Recomputes this node's height and restores the balance invariant with
    /// at most one single or double rotation, returning the new subtree root.
    fn rebalance(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Self::update_height(&mut node);
        let balance = Self::balance_factor(&node);

        if balance >= 2 {
            // Right-heavy. A left-leaning right child needs a preliminary
            // right rotation first (the right-left double case).
            let right = node.right.as_ref().expect("right-heavy node has a right child");
            if Self::height_of(&right.left) > Self::height_of(&right.right) {
                let child = node.right.take().expect("checked right child above");
                node.right = Some(Self::rotate_right(child));
            }
            return Self::rotate_left(node);
        }

        if balance <= -2 {
            let left = node.left.as_ref().expect("left-heavy node has a left child");
            if Self::height_of(&left.right) > Self::height_of(&left.left) {
                let child = node.left.take().expect("checked left child above");
                node.left = Some(Self::rotate_left(child));
            }
            return Self::rotate_right(node);
        }

        node
    }

    /// Height update plus rebalancing for an occupied slot, in place.
    fn restore(link: &mut Link<K, V>) {
        if let Some(node) = link.take() {
            *link = Some(Self::rebalance(node));
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).map(|node| &node.item).ok_or(Error::KeyNotFound)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find_mut(key).map(|node| &mut node.item).ok_or(Error::KeyNotFound)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).is_some()
    }

    /// The minimum entry, reached by the leftmost descent from the root.
    pub(crate) fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.item))
    }

    /// The maximum entry, reached by the rightmost descent from the root.
    pub(crate) fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.item))
    }
}

impl<K: Ord, V> RawAvlTree<K, V> {
    pub(crate) fn insert(&mut self, key: K, item: V) -> Result<(), Error> {
        Self::insert_at(&mut self.root, key, item)?;
        self.len += 1;
        Ok(())
    }

    fn insert_at(link: &mut Link<K, V>, key: K, item: V) -> Result<(), Error> {
        let Some(node) = link else {
            *link = Some(Box::new(Node::new(key, item)));
            return Ok(());
        };
        match key.cmp(&node.key) {
            Ordering::Less => Self::insert_at(&mut node.left, key, item)?,
            Ordering::Greater => Self::insert_at(&mut node.right, key, item)?,
            // Duplicate rejection is unconditional; the error propagates
            // before any height or link has been touched.
            Ordering::Equal => return Err(Error::DuplicateKey),
        }
        Self::restore(link);
        Ok(())
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<(K, V), Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = Self::remove_at(&mut self.root, key)?;
        self.len -= 1;
        Ok(removed)
    }

    fn remove_at<Q>(link: &mut Link<K, V>, key: &Q) -> Result<(K, V), Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(node) = link else {
            return Err(Error::KeyNotFound);
        };
        match key.cmp(node.key.borrow()) {
            Ordering::Less => {
                let removed = Self::remove_at(&mut node.left, key)?;
                Self::restore(link);
                Ok(removed)
            }
            Ordering::Greater => {
                let removed = Self::remove_at(&mut node.right, key)?;
                Self::restore(link);
                Ok(removed)
            }
            Ordering::Equal => {
                let mut node = link.take().expect("slot matched occupied above");
                match (node.left.take(), node.right.take()) {
                    // A leaf is removed outright; the slot stays empty.
                    (None, None) => Ok((node.key, node.item)),
                    // A single child is spliced into the parent's slot.
                    (Some(child), None) | (None, Some(child)) => {
                        *link = Some(child);
                        Ok((node.key, node.item))
                    }
                    // Two children: the in-order successor (leftmost node of
                    // the right subtree) takes over this node's key and item,
                    // and the successor is the one physically removed. The
                    // detach rebalances the right spine it walked.
                    (Some(left), Some(right)) => {
                        let mut right = Some(right);
                        let (succ_key, succ_item) = Self::detach_min(&mut right);
                        let old_key = mem::replace(&mut node.key, succ_key);
                        let old_item = mem::replace(&mut node.item, succ_item);
                        node.left = Some(left);
                        node.right = right;
                        *link = Some(node);
                        Self::restore(link);
                        Ok((old_key, old_item))
                    }
                }
            }
        }
    }

    /// Detaches the leftmost node of a non-empty subtree and returns its key
    /// and item, rebalancing every slot on the descent path.
    fn detach_min(link: &mut Link<K, V>) -> (K, V) {
        let has_left = link.as_ref().is_some_and(|node| node.left.is_some());
        if has_left {
            let node = link.as_mut().expect("checked occupied above");
            let min = Self::detach_min(&mut node.left);
            Self::restore(link);
            min
        } else {
            let node = link.take().expect("detach_min called on an empty subtree");
            *link = node.right;
            (node.key, node.item)
        }
    }

    /// Returns the entry holding the k-th largest key; `k = 1` is the
    /// maximum.
    ///
    /// Iterative reverse in-order walk: push the rightmost spine onto an
    /// explicit stack, pop, count down, then descend into the popped node's
    /// left child and push its rightmost spine, until the count reaches zero.
    /// The balance invariant bounds the total number of pushed nodes by the
    /// tree height, so the walk is O(log n) regardless of `k`.
    ///
    /// The stack is sized to the current element count, a safe bound that can
    /// never overflow for a valid rank; hitting either stack error here would
    /// mean a broken structural invariant, not a caller mistake.
    pub(crate) fn kth_largest(&self, k: usize) -> Result<(&K, &V), Error> {
        if k < 1 || k > self.len {
            return Err(Error::RankOutOfRange { rank: k, len: self.len });
        }

        let mut stack: BoundedStack<&Node<K, V>> = BoundedStack::new(self.len);
        let mut cursor = self.root.as_deref();
        let mut remaining = k;
        loop {
            while let Some(node) = cursor {
                stack.push(node).expect("rank stack is sized to the tree length");
                cursor = node.right.as_deref();
            }
            let node = stack.pop().expect("a valid rank cannot exhaust the spine stack");
            remaining -= 1;
            if remaining == 0 {
                return Ok((&node.key, &node.item));
            }
            cursor = node.left.as_deref();
        }
    }

    /// Verifies the cached-height and balance invariants over the whole
    /// tree. Intended for tests and debug assertions.
    pub(crate) fn is_balanced(&self) -> bool {
        Self::check(&self.root).is_some()
    }

    /// Returns the verified height of the subtree, or `None` if any node's
    /// cached height or balance factor is wrong.
    fn check(link: &Link<K, V>) -> Option<usize> {
        let Some(node) = link else {
            return Some(0);
        };
        let left = Self::check(&node.left)?;
        let right = Self::check(&node.right)?;
        let height = 1 + left.max(right);
        (node.height == height && left.abs_diff(right) <= 1).then_some(height)
    }
}

impl<K: Clone, V: Clone> Clone for RawAvlTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

use alloc::boxed::Box;

/// An owned, nullable child slot. Ownership is strictly hierarchical: a
/// parent owns its children outright and no node is referenced from more
/// than one place.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// The tree's storage unit: key, item, two owned child slots, and the cached
/// height of the subtree rooted here.
///
/// `height` is 1 for a leaf; an absent subtree counts as height 0. It is
/// recomputed on the unwind path of every structural mutation, so between
/// public operations it always equals `1 + max(height(left), height(right))`.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) item: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) height: usize,
}

impl<K, V> Node<K, V> {
    /// Creates a detached leaf.
    pub(crate) fn new(key: K, item: V) -> Self {
        Self {
            key,
            item,
            left: None,
            right: None,
            height: 1,
        }
    }
}

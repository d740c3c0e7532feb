use super::handle::Handle;

/// Which child slot of a node a link lives in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Whether a node still logically holds its key.
///
/// A removed leaf is not unlinked on the spot: it is marked `Tombstone` (with a
/// size of zero) and its parent prunes it during the size-update pass that
/// immediately follows. Tombstones never survive past the end of a mutation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NodeState {
    Live,
    Tombstone,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    key: T,
    // Number of live keys in the subtree rooted here, this node included.
    size: usize,
    state: NodeState,
    left: Option<Handle>,
    right: Option<Handle>,
    // Non-owning; only used to walk back up after a mutation.
    parent: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a live, childless node.
    pub(crate) const fn leaf(key: T, parent: Option<Handle>) -> Self {
        Self {
            key,
            size: 1,
            state: NodeState::Live,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    /// Replaces the key, returning the previous one.
    pub(crate) fn replace_key(&mut self, key: T) -> T {
        core::mem::replace(&mut self.key, key)
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        debug_assert!(size > 0 || self.is_tombstone(), "only a tombstone may have size 0");
        self.size = size;
    }

    /// Adjusts the size by `delta`. Reaching zero turns the node into a tombstone.
    pub(crate) fn apply_delta(&mut self, delta: isize) {
        self.size = self
            .size
            .checked_add_signed(delta)
            .expect("`Node::apply_delta()` - subtree size underflow!");
        if self.size == 0 {
            debug_assert!(self.is_leaf(), "only a leaf can become a tombstone");
            self.state = NodeState::Tombstone;
        }
    }

    #[inline]
    pub(crate) const fn is_live(&self) -> bool {
        matches!(self.state, NodeState::Live)
    }

    #[inline]
    pub(crate) const fn is_tombstone(&self) -> bool {
        matches!(self.state, NodeState::Tombstone)
    }

    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Detaches both children, leaving this node a leaf.
    pub(crate) fn take_children(&mut self) -> (Option<Handle>, Option<Handle>) {
        (self.left.take(), self.right.take())
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Which side of `self` holds `child`, if either.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

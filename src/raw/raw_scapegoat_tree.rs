use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::Alpha;

/// Traversal stack; deep enough for any tree the weight balance allows in practice.
type Stack = SmallVec<[Handle; 32]>;

/// The scapegoat tree backing `ScapegoatSet`.
#[derive(Clone)]
pub(crate) struct RawScapegoatTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    alpha: Alpha,
}

/// Result of searching for a key.
pub(crate) enum SearchResult {
    /// The node holding the key.
    Found(Handle),
    /// The key is absent; it would become the `side` child of `anchor`.
    NotFound { anchor: Handle, side: Side },
}

/// Where a subtree hangs from.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Child { parent: Handle, side: Side },
}

impl<T> RawScapegoatTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(alpha: Alpha) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            alpha,
        }
    }

    /// Creates a new tree with room for `capacity` keys.
    pub(crate) fn with_capacity(alpha: Alpha, capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            alpha,
        }
    }

    pub(crate) const fn alpha(&self) -> Alpha {
        self.alpha
    }

    /// Returns the number of keys, read off the root's subtree size.
    pub(crate) fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes.get(root).size())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Descends from `root` towards `key`.
    ///
    /// Stops at the node holding `key`, or at the last node visited when the
    /// child slot in the required direction is empty (the insertion anchor).
    pub(crate) fn locate<Q>(&self, root: Handle, key: &Q) -> SearchResult
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = root;
        loop {
            let node = self.nodes.get(current);
            let side = match node.key().borrow().cmp(key) {
                Ordering::Equal => return SearchResult::Found(current),
                Ordering::Less => Side::Right,
                Ordering::Greater => Side::Left,
            };
            match node.child(side) {
                Some(child) => current = child,
                None => return SearchResult::NotFound { anchor: current, side },
            }
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.locate(self.root?, key) {
            SearchResult::Found(handle) => Some(self.nodes.get(handle).key()),
            SearchResult::NotFound { .. } => None,
        }
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(key).is_some()
    }

    /// Returns the smallest key.
    pub(crate) fn first(&self) -> Option<&T> {
        self.extreme(Side::Left)
    }

    /// Returns the largest key.
    pub(crate) fn last(&self) -> Option<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&T> {
        let mut current = self.root?;
        while let Some(child) = self.nodes.get(current).child(side) {
            current = child;
        }
        Some(self.nodes.get(current).key())
    }

    /// Inserts `key`, returning false if it was already present.
    pub(crate) fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.alloc(Node::leaf(key, None)));
            return true;
        };

        match self.locate(root, &key) {
            SearchResult::Found(_) => false,
            SearchResult::NotFound { anchor, side } => {
                let leaf = self.nodes.alloc(Node::leaf(key, Some(anchor)));
                self.nodes.get_mut(anchor).set_child(side, Some(leaf));
                self.update_sizes(anchor, 1);
                true
            }
        }
    }

    /// Removes `key`, returning false if it was absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(root) = self.root else {
            return false;
        };
        let SearchResult::Found(target) = self.locate(root, key) else {
            return false;
        };

        self.unlink(target);
        self.update_sizes(target, -1);

        // A removed root leaf has no parent to prune it.
        if let Some(root) = self.root {
            if self.nodes.get(root).is_tombstone() {
                tracing::trace!("last key removed; releasing tombstoned root");
                self.nodes.free(root);
                self.root = None;
            }
        }
        true
    }

    /// Detaches the key held by `target` from the tree structure.
    ///
    /// A leaf is left in place; the size-update pass that follows turns it into
    /// a tombstone and its parent prunes it.
    fn unlink(&mut self, target: Handle) {
        let node = self.nodes.get(target);
        match (node.left(), node.right()) {
            (None, None) => {}
            (Some(child), None) | (None, Some(child)) => self.absorb_child(target, child),
            (Some(_), Some(right)) => self.unlink_successor(target, right),
        }
    }

    /// Moves the only child's key and children into `target`, then frees the child.
    fn absorb_child(&mut self, target: Handle, child: Handle) {
        let mut child_node = self.nodes.take(child);
        let (left, right) = child_node.take_children();
        for grandchild in [left, right].into_iter().flatten() {
            self.nodes.get_mut(grandchild).set_parent(Some(target));
        }

        let target_node = self.nodes.get_mut(target);
        target_node.set_child(Side::Left, left);
        target_node.set_child(Side::Right, right);
        drop(target_node.replace_key(child_node.into_key()));
    }

    /// Replaces `target`'s key with its in-order successor's and unlinks the successor.
    ///
    /// The descent chain below `target` is not revisited by the upward size pass, so
    /// every node on it that loses the successor from its left subtree is decremented
    /// here.
    fn unlink_successor(&mut self, target: Handle, right: Handle) {
        let mut parent = target;
        let mut side = Side::Right;
        let mut successor = right;
        loop {
            let node = self.nodes.get_mut(successor);
            let Some(next) = node.left() else {
                break;
            };
            node.apply_delta(-1);
            parent = successor;
            side = Side::Left;
            successor = next;
        }

        let successor_node = self.nodes.take(successor);
        let orphan = successor_node.right();
        self.nodes.get_mut(parent).set_child(side, orphan);
        if let Some(orphan) = orphan {
            self.nodes.get_mut(orphan).set_parent(Some(parent));
        }
        drop(self.nodes.get_mut(target).replace_key(successor_node.into_key()));
    }

    /// Applies `delta` to `start`, then recomputes every ancestor's size on the way
    /// to the root, pruning tombstoned children. Afterwards the highest node found
    /// out of weight balance, if any, is rebuilt.
    fn update_sizes(&mut self, start: Handle, delta: isize) {
        let node = self.nodes.get_mut(start);
        node.apply_delta(delta);
        let mut scapegoat = (node.is_live() && self.is_unbalanced(start)).then_some(start);

        let mut current = self.nodes.get(start).parent();
        while let Some(handle) = current {
            self.recompute_size(handle);
            if self.is_unbalanced(handle) {
                scapegoat = Some(handle);
            }
            current = self.nodes.get(handle).parent();
        }

        if let Some(scapegoat) = scapegoat {
            self.rebuild(scapegoat);
        }
    }

    /// Sets `handle`'s size to `1 + size(left) + size(right)`, freeing any
    /// tombstoned child along the way.
    fn recompute_size(&mut self, handle: Handle) {
        let mut size = 1;
        for side in [Side::Left, Side::Right] {
            let Some(child) = self.nodes.get(handle).child(side) else {
                continue;
            };
            let child_node = self.nodes.get(child);
            if child_node.is_tombstone() {
                self.nodes.get_mut(handle).set_child(side, None);
                self.nodes.free(child);
            } else {
                size += child_node.size();
            }
        }
        self.nodes.get_mut(handle).set_size(size);
    }

    fn is_unbalanced(&self, handle: Handle) -> bool {
        let node = self.nodes.get(handle);
        [node.left(), node.right()]
            .into_iter()
            .flatten()
            .any(|child| self.alpha.is_violated_by(self.nodes.get(child).size(), node.size()))
    }

    /// Rebuilds the subtree rooted at `scapegoat` into a minimal-height tree and
    /// hangs it back where `scapegoat` was.
    fn rebuild(&mut self, scapegoat: Handle) {
        let slot = self.slot_of(scapegoat);
        let size = self.nodes.get(scapegoat).size();
        tracing::trace!(size, alpha = self.alpha.get(), "rebuilding scapegoat subtree");

        let mut sorted = Vec::with_capacity(size);
        self.drain_in_order(scapegoat, &mut sorted);
        let parent = match slot {
            Slot::Root => None,
            Slot::Child { parent, .. } => Some(parent),
        };
        let subtree = self.build_balanced(&sorted, parent);
        self.set_slot(slot, subtree);
    }

    /// Pushes the live nodes below `root` onto `sorted` in key order. Tombstones
    /// are freed instead.
    fn drain_in_order(&mut self, root: Handle, sorted: &mut Vec<Handle>) {
        let mut stack = Stack::new();
        let mut current = Some(root);
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.nodes.get(handle);
            current = node.right();
            if node.is_live() {
                sorted.push(handle);
            } else {
                self.nodes.free(handle);
            }
        }
    }

    /// Relinks the nodes of `sorted` into a minimal-height tree hanging from `parent`
    /// and returns its root. The midpoint of each range becomes the subtree root.
    fn build_balanced(&mut self, sorted: &[Handle], parent: Option<Handle>) -> Option<Handle> {
        if sorted.is_empty() {
            return None;
        }
        let mid = (sorted.len() - 1) / 2;
        let handle = sorted[mid];
        let left = self.build_balanced(&sorted[..mid], Some(handle));
        let right = self.build_balanced(&sorted[mid + 1..], Some(handle));

        let node = self.nodes.get_mut(handle);
        node.set_parent(parent);
        node.set_child(Side::Left, left);
        node.set_child(Side::Right, right);
        node.set_size(sorted.len());
        Some(handle)
    }

    fn slot_of(&self, handle: Handle) -> Slot {
        match self.nodes.get(handle).parent() {
            None => Slot::Root,
            Some(parent) => match self.nodes.get(parent).side_of(handle) {
                Some(side) => Slot::Child { parent, side },
                None => panic!("`RawScapegoatTree::slot_of()` - parent does not link back to `handle`!"),
            },
        }
    }

    fn set_slot(&mut self, slot: Slot, subtree: Option<Handle>) {
        match slot {
            Slot::Root => self.root = subtree,
            Slot::Child { parent, side } => self.nodes.get_mut(parent).set_child(side, subtree),
        }
    }

    /// Returns an in-order iterator over the keys.
    pub(crate) fn iter(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    /// Collects the keys in ascending order.
    pub(crate) fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::with_capacity(self.len());
        values.extend(self.iter().cloned());
        values
    }
}

/// In-order traversal over a [`RawScapegoatTree`], skipping tombstones.
pub(crate) struct InOrder<'a, T> {
    tree: &'a RawScapegoatTree<T>,
    stack: Stack,
    current: Option<Handle>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    fn new(tree: &'a RawScapegoatTree<T>) -> Self {
        Self {
            tree,
            stack: Stack::new(),
            current: tree.root(),
            remaining: tree.len(),
        }
    }
}

impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            while let Some(handle) = self.current {
                self.stack.push(handle);
                self.current = self.tree.node(handle).left();
            }
            let handle = self.stack.pop()?;
            let node = self.tree.node(handle);
            self.current = node.right();
            if node.is_live() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(node.key());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

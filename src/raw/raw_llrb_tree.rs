use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use log::{debug, trace};

use super::iter::{Direction, RawIter, RawIterMut};
use super::node::{Color, Link, Node, is_red};

/// The core LLRB implementation backing `LLRBTreeMap` and `LLRBTreeSet`.
///
/// Every mutation hands the current root to a recursive engine function and stores the
/// subtree root it returns, forcing it black.
pub(crate) struct RawLLRBTree<K, V> {
    /// Root of the tree, if the tree is non-empty.
    root: Link<K, V>,
}

impl<K, V> RawLLRBTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of entries in the tree by walking every node.
    pub(crate) fn len(&self) -> usize {
        count(self.root())
    }

    /// Returns true if the tree contains no entries.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node in the tree.
    pub(crate) fn clear(&mut self) {
        trace!("clearing tree");
        self.root = None;
    }

    /// Returns the root node, if any.
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the node holding the minimum key.
    pub(crate) fn first(&self) -> Option<&Node<K, V>> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node)
    }

    /// Returns the node holding the maximum key.
    pub(crate) fn last(&self) -> Option<&Node<K, V>> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node)
    }

    pub(crate) fn iter(&self, direction: Direction) -> RawIter<'_, K, V> {
        RawIter::new(self.root(), direction)
    }

    pub(crate) fn iter_mut(&mut self, direction: Direction) -> RawIterMut<'_, K, V> {
        RawIterMut::new(self.root.as_deref_mut(), direction)
    }

    /// Moves every entry out of the tree in ascending key order, leaving it empty.
    /// This is O(n) as it avoids rebalancing, unlike repeated `pop_min`/`pop_max`.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        drain_into(self.root.take(), &mut entries);
        trace!("drained {} entries", entries.len());
        entries
    }

    /// Removes and returns the entry with the minimum key.
    pub(crate) fn pop_min(&mut self) -> Option<(K, V)> {
        let (root, popped) = pop_min_recursive(self.root.take());
        self.set_root(root);
        popped.map(Node::into_entry)
    }

    /// Removes and returns the entry with the maximum key.
    pub(crate) fn pop_max(&mut self) -> Option<(K, V)> {
        let (root, popped) = pop_max_recursive(self.root.take());
        self.set_root(root);
        popped.map(Node::into_entry)
    }

    /// Stores a new root, forcing it black.
    fn set_root(&mut self, mut root: Link<K, V>) {
        if let Some(root) = root.as_deref_mut() {
            root.color = Color::Black;
        }
        self.root = root;
    }
}

impl<K: Ord, V> RawLLRBTree<K, V> {
    /// Searches for a key and returns its node if found.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Searches for a key and returns its node mutably if found.
    ///
    /// Callers may change the value freely; a key may only be replaced by one that compares equal.
    pub(crate) fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Inserts a key-value pair, overwriting the value of an existing equal key.
    ///
    /// Returns the previous value if the key was already present. The stored key is kept.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old_value) = insert_recursive(self.root.take(), key, value);
        self.set_root(Some(root));
        old_value
    }

    /// Replaces the stored key equal to `key`, or inserts it with `value` if absent.
    ///
    /// Returns the previously stored key if one was replaced.
    pub(crate) fn replace_key(&mut self, key: K, value: V) -> Option<K> {
        if let Some(node) = self.search_mut(&key) {
            return Some(mem::replace(&mut node.key, key));
        }
        self.insert(key, value);
        None
    }

    /// Removes a key, returning the stored key and value if it was present.
    ///
    /// Removing an absent key returns `None` and leaves the tree untouched, colors included.
    pub(crate) fn pop_key<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // The descent recolors and rotates on its way down, so a miss would still reshape.
        self.search(key)?;
        let (root, popped) = pop_key_recursive(self.root.take(), key);
        self.set_root(root);
        popped.map(Node::into_entry)
    }

    /// Returns true if every root-to-leaf path has the same number of black nodes.
    pub(crate) fn is_balanced(&self) -> bool {
        // Number of black links on the path from the root to the minimum.
        let mut black = 0;
        let mut node = self.root();
        while let Some(current) = node {
            if !is_red(Some(current)) {
                black += 1;
            }
            node = current.left();
        }

        let balanced = is_balanced_recursive(self.root(), black);
        if !balanced {
            debug!("black-balance check failed: not every path has {black} black links");
        }
        balanced
    }

    /// Returns true if an in-order walk never sees a key smaller than its predecessor.
    pub(crate) fn is_ordered(&self) -> bool {
        let mut previous: Option<&K> = None;
        for node in self.iter(Direction::Forward) {
            if previous.is_some_and(|previous| *previous > node.key) {
                debug!("order check failed: in-order walk decreased");
                return false;
            }
            previous = Some(&node.key);
        }
        true
    }

    /// Returns true if the tree is both black-balanced and ordered.
    pub(crate) fn is_valid(&self) -> bool {
        self.is_balanced() && self.is_ordered()
    }
}

impl<K: Clone, V: Clone> Clone for RawLLRBTree<K, V> {
    /// Deep-copies every node, preserving shape and colors.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

fn count<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| 1 + count(node.left()) + count(node.right()))
}

fn drain_into<K, V>(link: Link<K, V>, entries: &mut Vec<(K, V)>) {
    if let Some(node) = link {
        let Node {
            key,
            value,
            left,
            right,
            ..
        } = *node;
        drain_into(left, entries);
        entries.push((key, value));
        drain_into(right, entries);
    }
}

fn is_balanced_recursive<K, V>(node: Option<&Node<K, V>>, black: usize) -> bool {
    let Some(node) = node else {
        return black == 0;
    };
    let black = if is_red(Some(node)) {
        black
    } else {
        match black.checked_sub(1) {
            Some(black) => black,
            None => return false,
        }
    };
    is_balanced_recursive(node.left(), black) && is_balanced_recursive(node.right(), black)
}

fn insert_recursive<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
    let Some(mut node) = link else {
        return (Node::new(key, value), None);
    };

    let old_value = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, old_value) = insert_recursive(node.left.take(), key, value);
            node.left = Some(left);
            old_value
        }
        Ordering::Greater => {
            let (right, old_value) = insert_recursive(node.right.take(), key, value);
            node.right = Some(right);
            old_value
        }
        Ordering::Equal => Some(mem::replace(&mut node.value, value)),
    };

    (Node::fixup_insert(node), old_value)
}

/// Detaches the minimum node of the subtree. Returns the new subtree root and the detached node.
fn pop_min_recursive<K, V>(link: Link<K, V>) -> (Link<K, V>, Link<K, V>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    if node.left.is_none() {
        return (node.right.take(), Some(node));
    }
    if !is_red(node.left()) && !is_red(node.left().and_then(Node::left)) {
        node = Node::move_red_left(node);
    }
    let (left, popped) = pop_min_recursive(node.left.take());
    node.left = left;
    (Some(Node::fixup_remove(node)), popped)
}

/// Detaches the maximum node of the subtree. Returns the new subtree root and the detached node.
fn pop_max_recursive<K, V>(link: Link<K, V>) -> (Link<K, V>, Link<K, V>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    if is_red(node.left()) {
        node = Node::rotate_right(node);
    }
    if node.right.is_none() {
        return (node.left.take(), Some(node));
    }
    if !is_red(node.right()) && !is_red(node.right().and_then(Node::left)) {
        node = Node::move_red_right(node);
    }
    let (right, popped) = pop_max_recursive(node.right.take());
    node.right = right;
    (Some(Node::fixup_remove(node)), popped)
}

/// Detaches the node holding `key`, if any. Returns the new subtree root and the detached node.
fn pop_key_recursive<K, V, Q>(link: Link<K, V>, key: &Q) -> (Link<K, V>, Link<K, V>)
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let popped;
    if key.cmp(node.key.borrow()) == Ordering::Less {
        if node.left().is_some_and(|left| !is_red(Some(left)) && !is_red(left.left())) {
            node = Node::move_red_left(node);
        }
        let (left, popped_left) = pop_key_recursive(node.left.take(), key);
        node.left = left;
        popped = popped_left;
    } else {
        if is_red(node.left()) {
            node = Node::rotate_right(node);
        }
        let mut ordering = key.cmp(node.key.borrow());
        if ordering == Ordering::Equal && node.right.is_none() {
            return (node.left.take(), Some(node));
        }

        if node.right.is_none() {
            // The key is absent; there is nothing further right to search.
            popped = None;
        } else {
            if !is_red(node.right()) && !is_red(node.right().and_then(Node::left)) {
                node = Node::move_red_right(node);
                // A rotation may have brought a different key to this position.
                ordering = key.cmp(node.key.borrow());
            }

            if ordering == Ordering::Equal {
                let (right, successor) = pop_min_recursive(node.right.take());
                node.right = right;
                if let Some(mut successor) = successor {
                    // Splice the successor into this position; the original node is popped.
                    successor.left = node.left.take();
                    successor.right = node.right.take();
                    successor.color = node.color;
                    popped = Some(node);
                    node = successor;
                } else {
                    popped = None;
                }
            } else {
                let (right, popped_right) = pop_key_recursive(node.right.take(), key);
                node.right = right;
                popped = popped_right;
            }
        }
    }

    (Some(Node::fixup_remove(node)), popped)
}

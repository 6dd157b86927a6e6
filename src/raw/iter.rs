use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::Node;

/// The order in which a traversal visits keys.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    /// Ascending key order: left subtree, node, right subtree.
    #[default]
    Forward,
    /// Descending key order: right subtree, node, left subtree.
    Backward,
}

// The height of a valid LLRB tree is at most 2 * log2(n + 1), so the path stays inline for
// trees with fewer than 2^16 entries.
const INLINE_DEPTH: usize = 32;

/// In-order traversal of a tree, carrying its own path stack.
///
/// The stack holds the nodes whose own entry has not been yielded yet; the top of the stack is
/// always the next entry in traversal order.
pub(crate) struct RawIter<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>,
    direction: Direction,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, direction: Direction) -> Self {
        let mut iter = Self {
            stack: SmallVec::new(),
            direction,
        };
        iter.descend(root);
        iter
    }

    /// Pushes `node` and its chain of near-side children.
    fn descend(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = match self.direction {
                Direction::Forward => current.left(),
                Direction::Backward => current.right(),
            };
        }
    }
}

impl<'a, K, V> Iterator for RawIter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let far = match self.direction {
            Direction::Forward => node.right(),
            Direction::Backward => node.left(),
        };
        self.descend(far);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<K, V> FusedIterator for RawIter<'_, K, V> {}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            direction: self.direction,
        }
    }
}

impl<K, V> Default for RawIter<'_, K, V> {
    fn default() -> Self {
        Self {
            stack: SmallVec::new(),
            direction: Direction::Forward,
        }
    }
}

impl<K, V> fmt::Debug for RawIter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIter").field("pending", &self.stack.len()).field("direction", &self.direction).finish()
    }
}

/// A pending entry: the node's key, its value, and the subtree still to visit after it.
type PendingMut<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// Mutable in-order traversal.
///
/// Each node is split into disjoint borrows as it is pushed, so the near subtree can be walked
/// while the node's value and far subtree wait on the stack.
pub(crate) struct RawIterMut<'a, K, V> {
    stack: SmallVec<[PendingMut<'a, K, V>; INLINE_DEPTH]>,
    direction: Direction,
}

impl<'a, K, V> RawIterMut<'a, K, V> {
    pub(crate) fn new(root: Option<&'a mut Node<K, V>>, direction: Direction) -> Self {
        let mut iter = Self {
            stack: SmallVec::new(),
            direction,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut node: Option<&'a mut Node<K, V>>) {
        while let Some(current) = node {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = current;
            let (near, far) = match self.direction {
                Direction::Forward => (left, right),
                Direction::Backward => (right, left),
            };
            self.stack.push((&*key, value, far.as_deref_mut()));
            node = near.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for RawIterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, far) = self.stack.pop()?;
        self.descend(far);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<K, V> FusedIterator for RawIterMut<'_, K, V> {}

impl<K, V> Default for RawIterMut<'_, K, V> {
    fn default() -> Self {
        Self {
            stack: SmallVec::new(),
            direction: Direction::Forward,
        }
    }
}

impl<K, V> fmt::Debug for RawIterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIterMut").field("pending", &self.stack.len()).field("direction", &self.direction).finish()
    }
}

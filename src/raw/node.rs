use alloc::boxed::Box;

/// The color of the link from a node's parent to the node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    const fn toggle(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// An owning, possibly absent, child slot.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

// LLRB: Every node exclusively owns its children; there are no parent pointers.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

/// Returns true if `node` is present and red. An absent node is black.
#[inline]
pub(crate) fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.is_some_and(|node| node.color == Color::Red)
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf.
    pub(crate) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
        })
    }

    /// Consumes a detached node, returning its key and value.
    pub(crate) fn into_entry(node: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *node;
        (key, value)
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns true if the left child and its left child are both red.
    #[inline]
    fn is_left_left_red(&self) -> bool {
        self.left().is_some_and(|left| left.color == Color::Red && is_red(left.left()))
    }

    /// Toggles the color of this node and of both of its children.
    pub(crate) fn flip_color(&mut self) {
        self.color = self.color.toggle();
        if let Some(left) = self.left.as_deref_mut() {
            left.color = left.color.toggle();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.color = right.color.toggle();
        }
    }

    //          node                 right
    //          /  \                 /   \
    //         a   (r)     =>      (r)    c
    //             / \             / \
    //            b   c         node  b
    //                          /
    //                         a
    //
    /// Makes a right-leaning red link lean to the left.
    pub(crate) fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        let mut right = node.right.take().expect("`Node::rotate_left()` - `right` is absent!");
        node.right = right.left.take();
        right.color = node.color;
        node.color = Color::Red;
        right.left = Some(node);
        right
    }

    //          node                left
    //          /  \                /   \
    //        (r)   c     =>       a    (r)
    //        / \                       / \
    //       a   b                     b  node
    //                                       \
    //                                        c
    //
    /// Makes a left-leaning red link lean to the right.
    pub(crate) fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        let mut left = node.left.take().expect("`Node::rotate_right()` - `left` is absent!");
        node.left = left.right.take();
        left.color = node.color;
        node.color = Color::Red;
        left.right = Some(node);
        left
    }

    /// Restores the left-leaning invariants on the way back up from an insertion.
    ///
    /// The order of the checks matters: a right-leaning link is fixed before two reds in a row,
    /// which is fixed before a temporary 4-node is split.
    pub(crate) fn fixup_insert(mut node: Box<Self>) -> Box<Self> {
        if is_red(node.right()) && !is_red(node.left()) {
            node = Self::rotate_left(node);
        }
        if node.is_left_left_red() {
            node = Self::rotate_right(node);
        }
        if is_red(node.left()) && is_red(node.right()) {
            node.flip_color();
        }
        node
    }

    /// Restores the left-leaning invariants on the way back up from a deletion.
    pub(crate) fn fixup_remove(mut node: Box<Self>) -> Box<Self> {
        if is_red(node.right()) {
            node = Self::rotate_left(node);
        }
        if node.is_left_left_red() {
            node = Self::rotate_right(node);
        }
        if is_red(node.left()) && is_red(node.right()) {
            node.flip_color();
        }
        node
    }

    /// Assuming `node` is red and both `node.left` and `node.left.left` are black, makes
    /// `node.left` or one of its children red.
    pub(crate) fn move_red_left(mut node: Box<Self>) -> Box<Self> {
        node.flip_color();
        if node.right().is_some_and(|right| is_red(right.left())) {
            node.right = node.right.take().map(Self::rotate_right);
            node = Self::rotate_left(node);
            node.flip_color();
        }
        node
    }

    /// Assuming `node` is red and both `node.right` and `node.right.left` are black, makes
    /// `node.right` or one of its children red.
    pub(crate) fn move_red_right(mut node: Box<Self>) -> Box<Self> {
        node.flip_color();
        if node.left().is_some_and(|left| is_red(left.left())) {
            node = Self::rotate_right(node);
            node.flip_color();
        }
        node
    }
}

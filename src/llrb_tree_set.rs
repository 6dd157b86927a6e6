use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::llrb_tree_map::{IntoKeys, Keys};
use crate::{Error, LLRBTreeMap, Result};

#[cfg(feature = "serde")]
mod serde;

/// An ordered set of distinct elements, stored as the keys of an [`LLRBTreeMap`] with `()`
/// values.
///
/// Cost and balance guarantees are the map's. Element order comes from [`Ord`], so an element
/// whose ordering changes while it is stored leaves the set unable to find it, though never in
/// an unsafe state.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Error, LLRBTreeSet};
///
/// // Blocked IP suffixes, deduplicated and sorted.
/// let mut blocked = LLRBTreeSet::new();
/// assert!(blocked.insert(17));
/// assert!(blocked.insert(4));
/// assert!(!blocked.insert(17));
/// blocked.insert(250);
///
/// assert!(blocked.contains(&4));
/// assert_eq!(blocked.remove(&99), Err(Error::KeyNotFound));
/// blocked.discard(&4);
///
/// assert!(blocked.iter().copied().eq([17, 250]));
/// assert_eq!(blocked.pop_max_key(), Ok(250));
/// ```
///
/// Collecting from an iterator drops duplicates:
///
/// ```
/// use llrb_tree::LLRBTreeSet;
///
/// let letters: LLRBTreeSet<char> = "mississippi".chars().collect();
/// assert!(letters.iter().copied().eq(['i', 'm', 'p', 's']));
/// ```
pub struct LLRBTreeSet<T> {
    map: LLRBTreeMap<T, ()>,
}

/// Borrowing iterator over the elements of an [`LLRBTreeSet`].
///
/// Returned by [`LLRBTreeSet::iter`] (ascending) and [`LLRBTreeSet::iter_rev`] (descending).
///
/// ```
/// use llrb_tree::LLRBTreeSet;
///
/// let levels = LLRBTreeSet::from(["warn", "debug", "error"]);
/// let mut walk = levels.iter();
/// assert_eq!(walk.next(), Some(&"debug"));
/// assert_eq!(walk.next(), Some(&"error"));
/// assert_eq!(walk.next(), Some(&"warn"));
/// assert_eq!(walk.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// Owning iterator over the elements of an [`LLRBTreeSet`], ascending.
///
/// Produced by the set's [`IntoIterator`] impl; it can be walked from both ends.
///
/// ```
/// use llrb_tree::LLRBTreeSet;
///
/// let mut ends = LLRBTreeSet::from([30, 10, 20]).into_iter();
/// assert_eq!(ends.next_back(), Some(30));
/// assert_eq!(ends.next(), Some(10));
/// assert_eq!(ends.len(), 1);
/// ```
pub struct IntoIter<T> {
    inner: IntoKeys<T, ()>,
}

impl<T> LLRBTreeSet<T> {
    /// Creates an empty set without allocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> LLRBTreeSet<T> {
        LLRBTreeSet {
            map: LLRBTreeMap::new(),
        }
    }

    /// Drops every element.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let mut seen = LLRBTreeSet::from(["a.rs", "b.rs"]);
    /// seen.clear();
    /// assert!(seen.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Tells whether an element equal to `value` is stored.
    ///
    /// `value` can be any borrowed form of the element type that orders the same way.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let words = LLRBTreeSet::from([String::from("tree"), String::from("leaf")]);
    /// assert!(words.contains("leaf"));
    /// assert!(!words.contains("root"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Looks up the stored element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let words = LLRBTreeSet::from([String::from("tree")]);
    /// assert_eq!(words.get("tree").map(String::len), Some(4));
    /// assert_eq!(words.get("bush"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// The smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let mut ids: LLRBTreeSet<u32> = LLRBTreeSet::new();
    /// assert_eq!(ids.first(), None);
    /// ids.extend([42, 7, 19]);
    /// assert_eq!(ids.first(), Some(&7));
    /// ```
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// The largest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let ids = LLRBTreeSet::from([42, 7, 19]);
    /// assert_eq!(ids.last(), Some(&42));
    /// ```
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Adds `value` unless an equal element is already stored.
    ///
    /// Returns `true` when the set grew. An existing element is left in place; use
    /// [`replace`](LLRBTreeSet::replace) to swap it.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let mut tags = LLRBTreeSet::new();
    /// assert!(tags.insert("urgent"));
    /// assert!(!tags.insert("urgent"));
    /// assert_eq!(tags.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        self.map.insert(value, ()).is_none()
    }

    /// Adds `value`, swapping out an equal element if one is stored, and returns the element
    /// that was swapped out.
    ///
    /// # Examples
    ///
    /// Two buffers with equal contents compare equal, so the stored one can be exchanged for
    /// one with more room:
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let mut buffers = LLRBTreeSet::new();
    /// buffers.insert(Vec::<u8>::new());
    ///
    /// let old = buffers.replace(Vec::with_capacity(64));
    /// assert_eq!(old.map(|b| b.capacity()), Some(0));
    /// assert!(buffers.get(&[][..]).is_some_and(|b| b.capacity() >= 64));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn replace(&mut self, value: T) -> Option<T>
    where
        T: Ord,
    {
        self.map.replace_key(value, ())
    }

    /// Deletes the element equal to `value`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no such element is stored. The tree is not touched in that
    /// case.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeSet};
    ///
    /// let mut tags = LLRBTreeSet::from(["draft"]);
    /// assert_eq!(tags.remove("draft"), Ok(()));
    /// assert_eq!(tags.remove("draft"), Err(Error::KeyNotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> Result<()>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove(value)
    }

    /// Deletes the element equal to `value`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let mut tags = LLRBTreeSet::from(["draft", "review"]);
    /// tags.discard("draft");
    /// tags.discard("draft");
    /// assert!(tags.iter().copied().eq(["review"]));
    /// ```
    pub fn discard<Q>(&mut self, value: &Q)
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.discard(value);
    }

    /// Deletes the element equal to `value` and hands back the stored element.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no such element is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeSet};
    ///
    /// let mut names = LLRBTreeSet::from([String::from("ada"), String::from("grace")]);
    /// assert_eq!(names.take("ada"), Ok(String::from("ada")));
    /// assert_eq!(names.take("ada"), Err(Error::KeyNotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, value: &Q) -> Result<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k).ok_or(Error::KeyNotFound)
    }

    /// Like [`take`](LLRBTreeSet::take), but returns `default` on a miss.
    pub fn take_or<Q>(&mut self, value: &Q, default: T) -> T
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.take(value).unwrap_or(default)
    }

    /// Takes the smallest element out of the set.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the set holds nothing.
    ///
    /// # Examples
    ///
    /// Handing out the lowest free slot first:
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let mut free_slots: LLRBTreeSet<u32> = (0..3).collect();
    /// assert_eq!(free_slots.pop_min_key(), Ok(0));
    /// assert_eq!(free_slots.pop_min_key(), Ok(1));
    /// free_slots.insert(0);
    /// assert_eq!(free_slots.pop_min_key(), Ok(0));
    /// assert_eq!(free_slots.pop_min_key(), Ok(2));
    /// assert_eq!(free_slots.pop_min_key_or(u32::MAX), u32::MAX);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_min_key(&mut self) -> Result<T> {
        self.map.pop_min_key()
    }

    /// Like [`pop_min_key`](LLRBTreeSet::pop_min_key), but returns `default` on an empty set.
    pub fn pop_min_key_or(&mut self, default: T) -> T {
        self.map.pop_min_key_or(default)
    }

    /// Takes the largest element out of the set.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the set holds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeSet};
    ///
    /// let mut versions = LLRBTreeSet::from([(1, 4), (2, 0), (1, 9)]);
    /// assert_eq!(versions.pop_max_key(), Ok((2, 0)));
    /// assert_eq!(versions.pop_max_key(), Ok((1, 9)));
    /// assert_eq!(versions.pop_max_key(), Ok((1, 4)));
    /// assert_eq!(versions.pop_max_key(), Err(Error::EmptyCollection));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_max_key(&mut self) -> Result<T> {
        self.map.pop_max_key()
    }

    /// Like [`pop_max_key`](LLRBTreeSet::pop_max_key), but returns `default` on an empty set.
    pub fn pop_max_key_or(&mut self, default: T) -> T {
        self.map.pop_max_key_or(default)
    }

    /// Walks the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let primes = LLRBTreeSet::from([7, 2, 5, 3]);
    /// let below_six: Vec<_> = primes.iter().take_while(|&&p| p < 6).collect();
    /// assert_eq!(below_six, [&2, &3, &5]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Walks the elements in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let primes = LLRBTreeSet::from([7, 2, 5, 3]);
    /// assert_eq!(primes.iter_rev().next(), Some(&7));
    /// ```
    pub fn iter_rev(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys_rev(),
        }
    }

    /// Counts the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let dice: LLRBTreeSet<u8> = [3, 6, 3, 1, 6].into_iter().collect();
    /// assert_eq!(dice.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Tells whether the set holds no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Checks that the elements are strictly ascending and the tree is black-balanced.
    #[must_use]
    pub fn is_valid(&self) -> bool
    where
        T: Ord,
    {
        self.map.is_valid()
    }
}

impl<T: Hash> Hash for LLRBTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for LLRBTreeSet<T> {
    fn eq(&self, other: &LLRBTreeSet<T>) -> bool {
        self.map == other.map
    }
}

impl<T: Eq> Eq for LLRBTreeSet<T> {}

impl<T: PartialOrd> PartialOrd for LLRBTreeSet<T> {
    fn partial_cmp(&self, other: &LLRBTreeSet<T>) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T: Ord> Ord for LLRBTreeSet<T> {
    fn cmp(&self, other: &LLRBTreeSet<T>) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl<T: Clone> Clone for LLRBTreeSet<T> {
    fn clone(&self) -> Self {
        LLRBTreeSet {
            map: self.map.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LLRBTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for LLRBTreeSet<T> {
    fn default() -> Self {
        LLRBTreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for LLRBTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = LLRBTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for LLRBTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for LLRBTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for LLRBTreeSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a LLRBTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for LLRBTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Dismantles the tree into its elements, ascending.
    ///
    /// ```
    /// use llrb_tree::LLRBTreeSet;
    ///
    /// let sorted: Vec<i16> = LLRBTreeSet::from([4, -1, 4, 2]).into_iter().collect();
    /// assert_eq!(sorted, [-1, 2, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_keys(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// An iterator that is already exhausted.
    fn default() -> Self {
        Iter {
            inner: Keys::default(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// An owning iterator with nothing left to yield.
    fn default() -> Self {
        IntoIter {
            inner: IntoKeys::default(),
        }
    }
}

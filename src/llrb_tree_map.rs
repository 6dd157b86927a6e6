use alloc::vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{Direction, RawIter, RawIterMut, RawLLRBTree};
use crate::{Error, Result};

#[cfg(feature = "serde")]
mod serde;

/// An ordered map backed by a [left-leaning red-black tree].
///
/// Entries are kept sorted by key, so `K` must implement [`Ord`]. Lookups, upserts and removals
/// descend a single root-to-leaf path, and the tree's height never exceeds twice the height of a
/// perfectly balanced one.
///
/// Besides the usual `Option`-returning accessors, the map offers fallible variants that report
/// [`Error::KeyNotFound`] or [`Error::EmptyCollection`], and `_or` variants that fall back to a
/// caller-supplied default.
///
/// Keys are compared every time the tree is searched or rebalanced. If a key's ordering changes
/// while it is stored (through interior mutability, for example) later searches may miss it and
/// the tree may stop being ordered. [`is_valid`](LLRBTreeMap::is_valid) detects the second case.
/// No unsafe code is involved, so the damage stays inside the map.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Error, LLRBTreeMap};
///
/// // HTTP status codes, kept in numeric order.
/// let mut statuses = LLRBTreeMap::new();
/// statuses.insert(404, "Not Found");
/// statuses.insert(200, "OK");
/// statuses.insert(500, "Internal Server Error");
/// statuses.insert(301, "Moved Permanently");
///
/// assert_eq!(statuses.get(&200), Some(&"OK"));
/// assert_eq!(statuses.try_get(&418), Err(Error::KeyNotFound));
/// assert_eq!(statuses[&301], "Moved Permanently");
///
/// // upserting an existing code hands back the previous text.
/// assert_eq!(statuses.insert(404, "Gone Missing"), Some("Not Found"));
///
/// // removing an unknown code is harmless.
/// statuses.discard(&999);
///
/// let codes: Vec<_> = statuses.keys().copied().collect();
/// assert_eq!(codes, [200, 301, 404, 500]);
///
/// // the highest code comes off the top.
/// assert_eq!(statuses.pop_max_item(), Ok((500, "Internal Server Error")));
/// ```
///
/// Building a map from a fixed table:
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// let boiling_points = LLRBTreeMap::from([
///     ("water", 100.0),
///     ("ethanol", 78.4),
///     ("acetone", 56.1),
/// ]);
/// assert_eq!(boiling_points.first_key_value(), Some((&"acetone", &56.1)));
/// ```
///
/// # Background
///
/// A left-leaning red-black tree is a binary search tree that encodes a 2-3 tree: a red link
/// glues a node to its parent to form a 3-node, and red links may only lean left. Every
/// root-to-leaf path crosses the same number of black links, so the height is at most
/// 2·log<sub>2</sub>(n+1) and every lookup, insertion, and removal is O(log n).
///
/// Each node is individually heap-allocated and exclusively owned by its parent, so dropping
/// or replacing a subtree frees everything beneath it. [`len`](LLRBTreeMap::len) walks the tree
/// rather than caching a count.
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
pub struct LLRBTreeMap<K, V> {
    raw: RawLLRBTree<K, V>,
}

/// Borrowing iterator over the entries of an [`LLRBTreeMap`].
///
/// Returned by [`LLRBTreeMap::iter`] (ascending keys) and [`LLRBTreeMap::iter_rev`] (descending
/// keys). The traversal keeps its own stack of pending ancestors, so it holds no borrow on
/// anything but the tree.
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// let map = LLRBTreeMap::from([(20, 'b'), (10, 'a')]);
/// let mut entries = map.iter();
/// assert_eq!(entries.next(), Some((&10, &'a')));
/// assert_eq!(entries.next(), Some((&20, &'b')));
/// assert_eq!(entries.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// Ascending iterator over the entries of an [`LLRBTreeMap`] with mutable values.
///
/// Returned by [`LLRBTreeMap::iter_mut`]. Keys stay shared so the ordering can't be broken.
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// let mut stock = LLRBTreeMap::from([("bolts", 40), ("nuts", 15)]);
/// for (_, count) in stock.iter_mut() {
///     *count -= 5;
/// }
/// assert!(stock.values().copied().eq([35, 10]));
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K: 'a, V: 'a> {
    inner: RawIterMut<'a, K, V>,
}

/// Owning iterator over the entries of an [`LLRBTreeMap`], ascending by key.
///
/// Produced by the map's [`IntoIterator`] impl. The tree is dismantled up front, so the iterator
/// can be walked from either end and knows its exact length.
///
/// ```
/// use llrb_tree::LLRBTreeMap;
///
/// let mut drained = LLRBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]).into_iter();
/// assert_eq!(drained.len(), 3);
/// assert_eq!(drained.next_back(), Some((3, "c")));
/// assert_eq!(drained.next(), Some((1, "a")));
/// ```
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

/// Borrowing iterator over the keys of an [`LLRBTreeMap`].
///
/// Returned by [`LLRBTreeMap::keys`] and [`LLRBTreeMap::keys_rev`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// Borrowing iterator over the values of an [`LLRBTreeMap`], in key order.
///
/// Returned by [`LLRBTreeMap::values`] and [`LLRBTreeMap::values_rev`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// Mutable iterator over the values of an [`LLRBTreeMap`], in key order.
///
/// Returned by [`LLRBTreeMap::values_mut`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// Owning iterator over the keys of an [`LLRBTreeMap`].
///
/// Returned by [`LLRBTreeMap::into_keys`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// Owning iterator over the values of an [`LLRBTreeMap`], in key order.
///
/// Returned by [`LLRBTreeMap::into_values`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> LLRBTreeMap<K, V> {
    /// Creates an empty map. No node is allocated until the first insertion.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let map: LLRBTreeMap<u16, &str> = LLRBTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> LLRBTreeMap<K, V> {
        LLRBTreeMap {
            raw: RawLLRBTree::new(),
        }
    }

    /// Drops every node, leaving an empty map.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut sessions = LLRBTreeMap::from([(7, "alice"), (9, "bob")]);
    /// sessions.clear();
    /// assert_eq!(sessions.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Looks up the value stored under `key`.
    ///
    /// `key` can be any type the stored keys borrow as (`&str` for `String` keys, say), as long
    /// as it orders the same way.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut owners = LLRBTreeMap::new();
    /// owners.insert(String::from("/etc"), "root");
    /// assert_eq!(owners.get("/etc"), Some(&"root"));
    /// assert_eq!(owners.get("/home"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|node| &node.value)
    }

    /// Like [`get`](LLRBTreeMap::get), but falls back to `default` on a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let ports = LLRBTreeMap::from([("ssh", 22)]);
    /// assert_eq!(*ports.get_or("ssh", &0), 22);
    /// assert_eq!(*ports.get_or("ftp", &0), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.get(key).unwrap_or(default)
    }

    /// Looks up the value stored under `key`, reporting a miss as an error.
    ///
    /// Indexing (`map[&key]`) panics where this returns `Err`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no entry has that key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeMap};
    ///
    /// let ports = LLRBTreeMap::from([("ssh", 22)]);
    /// assert_eq!(ports.try_get("ssh"), Ok(&22));
    /// assert_eq!(ports.try_get("ftp"), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Looks up `key` and returns the stored key alongside its value.
    ///
    /// The stored key can differ from the probe when the key type has fields that don't take
    /// part in the ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut hosts = LLRBTreeMap::new();
    /// hosts.insert(String::from("db1"), 5432);
    /// assert_eq!(hosts.get_key_value("db1"), Some((&String::from("db1"), &5432)));
    /// assert_eq!(hosts.get_key_value("db2"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|node| (&node.key, &node.value))
    }

    /// Looks up the value stored under `key` for in-place modification.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut hits = LLRBTreeMap::from([("/index.html", 1)]);
    /// if let Some(count) = hits.get_mut("/index.html") {
    ///     *count += 1;
    /// }
    /// assert_eq!(hits["/index.html"], 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search_mut(key).map(|node| &mut node.value)
    }

    /// Tells whether an entry with this key is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let ports = LLRBTreeMap::from([(443, "https")]);
    /// assert!(ports.contains_key(&443));
    /// assert!(!ports.contains_key(&80));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// The entry with the smallest key, found by following left links from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut deadlines = LLRBTreeMap::new();
    /// assert_eq!(deadlines.first_key_value(), None);
    /// deadlines.insert(1700, "report");
    /// deadlines.insert(900, "standup");
    /// assert_eq!(deadlines.first_key_value(), Some((&900, &"standup")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|node| (&node.key, &node.value))
    }

    /// The entry with the largest key, found by following right links from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let deadlines = LLRBTreeMap::from([(1700, "report"), (900, "standup")]);
    /// assert_eq!(deadlines.last_key_value(), Some((&1700, &"report")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|node| (&node.key, &node.value))
    }

    /// Upserts an entry.
    ///
    /// A new key becomes a red leaf and the tree is rebalanced on the way back up; `None` is
    /// returned. For a key that is already stored only the value is swapped, and the old value
    /// is returned. The stored key is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut config = LLRBTreeMap::new();
    /// assert_eq!(config.insert("timeout", 30), None);
    /// assert_eq!(config.insert("timeout", 60), Some(30));
    /// assert_eq!(config["timeout"], 60);
    /// assert_eq!(config.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.insert(key, value)
    }

    /// Deletes the entry stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no entry has that key. The tree is not touched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeMap};
    ///
    /// let mut leases = LLRBTreeMap::from([("10.0.0.5", 3600)]);
    /// assert_eq!(leases.remove("10.0.0.5"), Ok(()));
    /// assert_eq!(leases.remove("10.0.0.5"), Err(Error::KeyNotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.pop_key(key).map(drop)
    }

    /// Deletes the entry stored under `key`, if there is one.
    ///
    /// A missing key leaves the tree exactly as it was, node colors included.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut leases = LLRBTreeMap::from([("10.0.0.5", 3600), ("10.0.0.9", 600)]);
    /// leases.discard("10.0.0.5");
    /// leases.discard("10.0.0.5");
    /// assert_eq!(leases.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn discard<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.pop_key(key);
    }

    /// Deletes the entry stored under `key` and hands back both the stored key and its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut queue = LLRBTreeMap::from([(4, "compile")]);
    /// assert_eq!(queue.remove_entry(&4), Some((4, "compile")));
    /// assert_eq!(queue.remove_entry(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.pop_key(key)
    }

    /// Deletes the entry stored under `key` and returns its value.
    ///
    /// When the node has two children its in-order successor is moved into its place, so only a
    /// single path is restructured.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when no entry has that key. The tree is not touched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeMap};
    ///
    /// let mut queue = LLRBTreeMap::from([(1, "fetch"), (2, "build"), (3, "test")]);
    /// assert_eq!(queue.pop_key(&2), Ok("build"));
    /// assert_eq!(queue.pop_key(&2), Err(Error::KeyNotFound));
    /// assert!(queue.keys().copied().eq([1, 3]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_key<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.pop_key(key).map(|(_, value)| value).ok_or(Error::KeyNotFound)
    }

    /// Like [`pop_key`](LLRBTreeMap::pop_key), but returns `default` on a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut queue = LLRBTreeMap::from([(1, "fetch")]);
    /// assert_eq!(queue.pop_key_or(&1, "idle"), "fetch");
    /// assert_eq!(queue.pop_key_or(&1, "idle"), "idle");
    /// ```
    pub fn pop_key_or<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.pop_key(key).unwrap_or(default)
    }

    /// Takes the entry with the smallest key out of the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the map holds nothing.
    ///
    /// # Examples
    ///
    /// Using the map as a priority queue, lowest priority number first:
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeMap};
    ///
    /// let mut jobs = LLRBTreeMap::from([(3, "index"), (1, "backup"), (2, "vacuum")]);
    /// let mut order = Vec::new();
    /// while let Ok((_, job)) = jobs.pop_min_item() {
    ///     order.push(job);
    /// }
    /// assert_eq!(order, ["backup", "vacuum", "index"]);
    /// assert_eq!(jobs.pop_min_item(), Err(Error::EmptyCollection));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_min_item(&mut self) -> Result<(K, V)> {
        self.raw.pop_min().ok_or(Error::EmptyCollection)
    }

    /// Like [`pop_min_item`](LLRBTreeMap::pop_min_item), but returns `default` on an empty map.
    pub fn pop_min_item_or(&mut self, default: (K, V)) -> (K, V) {
        self.pop_min_item().unwrap_or(default)
    }

    /// Takes the entry with the largest key out of the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the map holds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut bids = LLRBTreeMap::from([(120, "carol"), (95, "dave"), (150, "erin")]);
    /// assert_eq!(bids.pop_max_item(), Ok((150, "erin")));
    /// assert_eq!(bids.pop_max_item(), Ok((120, "carol")));
    /// assert_eq!(bids.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_max_item(&mut self) -> Result<(K, V)> {
        self.raw.pop_max().ok_or(Error::EmptyCollection)
    }

    /// Like [`pop_max_item`](LLRBTreeMap::pop_max_item), but returns `default` on an empty map.
    pub fn pop_max_item_or(&mut self, default: (K, V)) -> (K, V) {
        self.pop_max_item().unwrap_or(default)
    }

    /// Takes the entry with the smallest key out of the map and keeps only its value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the map holds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LLRBTreeMap};
    ///
    /// let mut timeline = LLRBTreeMap::from([(20, "lunch"), (8, "coffee")]);
    /// assert_eq!(timeline.pop_min_value(), Ok("coffee"));
    /// assert_eq!(timeline.pop_min_value(), Ok("lunch"));
    /// assert_eq!(timeline.pop_min_value(), Err(Error::EmptyCollection));
    /// assert_eq!(timeline.pop_min_value_or("nothing"), "nothing");
    /// ```
    pub fn pop_min_value(&mut self) -> Result<V> {
        self.pop_min_item().map(|(_, value)| value)
    }

    /// Like [`pop_min_value`](LLRBTreeMap::pop_min_value), but returns `default` on an empty map.
    pub fn pop_min_value_or(&mut self, default: V) -> V {
        self.pop_min_value().unwrap_or(default)
    }

    /// Takes the entry with the largest key out of the map and keeps only its value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the map holds nothing.
    pub fn pop_max_value(&mut self) -> Result<V> {
        self.pop_max_item().map(|(_, value)| value)
    }

    /// Like [`pop_max_value`](LLRBTreeMap::pop_max_value), but returns `default` on an empty map.
    pub fn pop_max_value_or(&mut self, default: V) -> V {
        self.pop_max_value().unwrap_or(default)
    }

    /// Takes the entry with the smallest key out of the map and keeps only its key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the map holds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut timeline = LLRBTreeMap::from([(20, "lunch"), (8, "coffee")]);
    /// assert_eq!(timeline.pop_min_key(), Ok(8));
    /// assert_eq!(timeline.pop_max_key(), Ok(20));
    /// assert_eq!(timeline.pop_max_key_or(-1), -1);
    /// ```
    pub fn pop_min_key(&mut self) -> Result<K> {
        self.pop_min_item().map(|(key, _)| key)
    }

    /// Like [`pop_min_key`](LLRBTreeMap::pop_min_key), but returns `default` on an empty map.
    pub fn pop_min_key_or(&mut self, default: K) -> K {
        self.pop_min_key().unwrap_or(default)
    }

    /// Takes the entry with the largest key out of the map and keeps only its key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the map holds nothing.
    pub fn pop_max_key(&mut self) -> Result<K> {
        self.pop_max_item().map(|(key, _)| key)
    }

    /// Like [`pop_max_key`](LLRBTreeMap::pop_max_key), but returns `default` on an empty map.
    pub fn pop_max_key_or(&mut self, default: K) -> K {
        self.pop_max_key().unwrap_or(default)
    }

    /// Consumes the map and yields its keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let owners = LLRBTreeMap::from([(String::from("zoe"), 1), (String::from("adam"), 2)]);
    /// let names: Vec<String> = owners.into_keys().collect();
    /// assert_eq!(names, ["adam", "zoe"]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Consumes the map and yields its values, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let steps = LLRBTreeMap::from([(2, String::from("link")), (1, String::from("compile"))]);
    /// let names: Vec<String> = steps.into_values().collect();
    /// assert_eq!(names, ["compile", "link"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Walks the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let versions = LLRBTreeMap::from([((1, 2), "beta"), ((1, 0), "first"), ((2, 0), "major")]);
    /// let labels: Vec<_> = versions.iter().map(|(_, label)| *label).collect();
    /// assert_eq!(labels, ["first", "beta", "major"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per iteration step.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.raw.iter(Direction::Forward),
        }
    }

    /// Walks the entries in descending key order.
    ///
    /// This is a separate mirrored traversal, not a reversal of [`iter`](LLRBTreeMap::iter).
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let scores = LLRBTreeMap::from([(71, "kim"), (88, "lee"), (64, "ng")]);
    /// let podium: Vec<_> = scores.iter_rev().take(2).map(|(_, name)| *name).collect();
    /// assert_eq!(podium, ["lee", "kim"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per iteration step.
    pub fn iter_rev(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.raw.iter(Direction::Backward),
        }
    }

    /// Walks the entries in ascending key order with mutable access to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut prices = LLRBTreeMap::from([("apple", 100), ("pear", 80), ("plum", 60)]);
    /// for (fruit, cents) in prices.iter_mut() {
    ///     if fruit.starts_with('p') {
    ///         *cents /= 2;
    ///     }
    /// }
    /// assert!(prices.values().copied().eq([100, 40, 30]));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.iter_mut(Direction::Forward),
        }
    }

    /// Walks the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let ports = LLRBTreeMap::from([(8080, "proxy"), (22, "ssh")]);
    /// assert!(ports.keys().copied().eq([22, 8080]));
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter(),
        }
    }

    /// Walks the keys in descending order.
    pub fn keys_rev(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.iter_rev(),
        }
    }

    /// Walks the values, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let ports = LLRBTreeMap::from([(8080, "proxy"), (22, "ssh")]);
    /// assert!(ports.values().copied().eq(["ssh", "proxy"]));
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.iter(),
        }
    }

    /// Walks the values, ordered by their keys from largest to smallest.
    pub fn values_rev(&self) -> Values<'_, K, V> {
        Values {
            inner: self.iter_rev(),
        }
    }

    /// Walks the values by key order, handing out mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut paths = LLRBTreeMap::from([(1, String::from("/usr")), (2, String::from("/opt"))]);
    /// for path in paths.values_mut() {
    ///     path.push_str("/bin");
    /// }
    /// assert_eq!(paths[&2], "/opt/bin");
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Counts the entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::new();
    /// map.insert('x', 1);
    /// map.insert('x', 2);
    /// map.insert('y', 3);
    /// assert_eq!(map.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n), every node is visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Tells whether the map has no root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map = LLRBTreeMap::from([('x', 1)]);
    /// assert!(!map.is_empty());
    /// map.discard(&'x');
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Checks the tree's structure: keys strictly ascending in order, and the same number of
    /// black links on every path from the root to a missing child.
    ///
    /// A map changed only through its own methods always passes; this exists for tests and
    /// debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let mut map: LLRBTreeMap<_, _> = (0..100).map(|i| (i, i * i)).collect();
    /// for i in (0..100).step_by(3) {
    ///     map.discard(&i);
    /// }
    /// assert!(map.is_valid());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_valid(&self) -> bool
    where
        K: Ord,
    {
        self.raw.is_valid()
    }
}

impl<K: Ord, V> LLRBTreeMap<K, V> {
    /// Upserts an entry, swapping in the new key as well as the value when an equal key is
    /// stored. Returns the key that was swapped out.
    pub(crate) fn replace_key(&mut self, key: K, value: V) -> Option<K> {
        self.raw.replace_key(key, value)
    }
}

impl<K: Clone, V: Clone> Clone for LLRBTreeMap<K, V> {
    /// Returns an independent deep copy of the map, with the same shape and colors.
    fn clone(&self) -> Self {
        LLRBTreeMap {
            raw: self.raw.clone(),
        }
    }
}

impl<K: Hash, V: Hash> Hash for LLRBTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LLRBTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for LLRBTreeMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for LLRBTreeMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for LLRBTreeMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LLRBTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for LLRBTreeMap<K, V> {
    fn default() -> Self {
        LLRBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LLRBTreeMap<K, V> {
    /// Builds a map by upserting every pair; later duplicates overwrite earlier ones.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = LLRBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for LLRBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for LLRBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LLRBTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut LLRBTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for LLRBTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Dismantles the tree into its entries, ascending by key.
    ///
    /// ```
    /// use llrb_tree::LLRBTreeMap;
    ///
    /// let owned: Vec<(u8, char)> = LLRBTreeMap::from([(2, 'y'), (1, 'x')]).into_iter().collect();
    /// assert_eq!(owned, [(1, 'x'), (2, 'y')]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for LLRBTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map. Use [`LLRBTreeMap::try_get`] to get an
    /// [`Error::KeyNotFound`] instead.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for LLRBTreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| (&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// An iterator that is already exhausted.
    ///
    /// ```
    /// use llrb_tree::llrb_tree_map::Iter;
    ///
    /// assert_eq!(Iter::<char, u32>::default().next(), None);
    /// ```
    fn default() -> Self {
        Iter {
            inner: RawIter::default(),
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("inner", &self.inner).finish()
    }
}

impl<K, V> Default for IterMut<'_, K, V> {
    fn default() -> Self {
        IterMut {
            inner: RawIterMut::default(),
        }
    }
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

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// An owning iterator with nothing left to yield.
    ///
    /// ```
    /// use llrb_tree::llrb_tree_map::IntoIter;
    ///
    /// assert_eq!(IntoIter::<char, u32>::default().len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: vec::IntoIter::default(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    fn default() -> Self {
        Keys {
            inner: Iter::default(),
        }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Values<'_, K, V> {
    fn default() -> Self {
        Values {
            inner: Iter::default(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("inner", &self.inner).finish()
    }
}

impl<K, V> Default for ValuesMut<'_, K, V> {
    fn default() -> Self {
        ValuesMut {
            inner: IterMut::default(),
        }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Default for IntoKeys<K, V> {
    fn default() -> Self {
        IntoKeys {
            inner: IntoIter::default(),
        }
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}

impl<K, V> Default for IntoValues<K, V> {
    fn default() -> Self {
        IntoValues {
            inner: IntoIter::default(),
        }
    }
}

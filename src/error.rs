use thiserror::Error;

/// The ways a map or set operation can fail.
///
/// Every failing operation leaves the collection unchanged.
///
/// # Examples
///
/// ```
/// use llrb_tree::{Error, LLRBTreeMap};
///
/// let mut map: LLRBTreeMap<i32, &str> = LLRBTreeMap::new();
/// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
/// assert_eq!(map.pop_min_item(), Err(Error::EmptyCollection));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The requested key is not present and no default was supplied.
    #[error("key not found")]
    KeyNotFound,
    /// An extremum was requested from an empty collection and no default was supplied.
    #[error("pop from empty tree")]
    EmptyCollection,
}

/// A `Result` whose error is this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

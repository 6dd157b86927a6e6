//! Left-leaning red-black tree collections for Rust.
//!
//! This crate provides [`LLRBTreeMap`] and [`LLRBTreeSet`], ordered collections backed by a
//! [left-leaning red-black tree]. Their APIs follow the standard library's `BTreeMap` and
//! `BTreeSet` where the operations overlap, and add:
//!
//! - [`pop_key`](LLRBTreeMap::pop_key) / [`remove`](LLRBTreeMap::remove) - Fallible removal that
//!   reports [`Error::KeyNotFound`], alongside the silent [`discard`](LLRBTreeMap::discard)
//! - [`pop_min_item`](LLRBTreeMap::pop_min_item) and friends - Extremum extraction that reports
//!   [`Error::EmptyCollection`], each with an `_or` variant taking a default
//! - [`iter_rev`](LLRBTreeMap::iter_rev) - Descending traversal as an independent order
//! - [`is_valid`](LLRBTreeMap::is_valid) - Black-balance and order validation
//!
//! # Example
//!
//! ```
//! use llrb_tree::{Error, LLRBTreeMap};
//!
//! let mut scores = LLRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Standard BTreeMap operations work as expected
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Extremum extraction in key order
//! assert_eq!(scores.pop_min_item(), Ok(("Alice", 100)));
//! assert_eq!(scores.pop_max_key(), Ok("Carol"));
//!
//! // Missing keys are reported, or silently ignored
//! assert_eq!(scores.pop_key(&"Dave"), Err(Error::KeyNotFound));
//! scores.discard(&"Dave");
//!
//! assert!(scores.is_valid());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Guaranteed O(log n)** - Insert, lookup, removal, and extremum extraction
//! - **`serde`** (optional) - `Serialize`/`Deserialize` for both collections
//!
//! # Implementation
//!
//! Every node exclusively owns its children, and each mutation is a recursive function that takes
//! ownership of a subtree and returns its (possibly rotated) replacement. Red links only lean
//! left, so insertion and deletion restore balance with three primitives: rotate left, rotate
//! right, and flip colors.
//!
//! [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod llrb_tree_map;
pub mod llrb_tree_set;

pub use error::{Error, Result};
pub use llrb_tree_map::LLRBTreeMap;
pub use llrb_tree_set::LLRBTreeSet;

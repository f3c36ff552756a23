//! Unbalanced binary search tree collections with boundary-flagged nodes.
//!
//! This crate provides [`Tree`], a plain binary search tree whose nodes keep a link to
//! their parent and carry two flags marking the current minimum and maximum, together
//! with the [`TreeMap`] and [`TreeSet`] adapters built on it.
//!
//! Traversal needs no sentinel node. [`begin`](Tree::begin) and [`end`](Tree::end) return
//! cursors on the real first and last elements, a walk covers `[begin, end]`
//! inclusively, and stepping past either end leaves the [`Cursor`] where it is.
//!
//! # Example
//!
//! ```
//! use boundary_tree::TreeMap;
//!
//! let mut scores = TreeMap::new();
//! scores.insert("Carol", 92);
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//!
//! // Walk from the first entry to the last one, both included.
//! let mut cursor = scores.begin().unwrap();
//! let mut names = vec![*cursor.key()];
//! while cursor.move_next() {
//!     names.push(*cursor.key());
//! }
//! assert_eq!(names, ["Alice", "Bob", "Carol"]);
//!
//! // The last entry is sticky.
//! assert!(!cursor.move_next());
//! assert!(cursor.is_end());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **O(1) min and max** - The extreme nodes are cached and flagged
//! - **Stable node ids** - A [`NodeId`] keeps naming its node until that node is removed
//! - **`serde`** - Optional cargo feature serializing [`TreeMap`] as a map and
//!   [`TreeSet`] as a sequence
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index, so parent back-links never
//! own anything. The tree is not rebalanced: operations cost O(h), and keys inserted in
//! sorted order degrade to a chain. Clearing, cloning and dropping never recurse, so a
//! chain of any length is handled without exhausting the stack.

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

mod cursor;
mod error;
mod raw;
mod tree;

pub mod tree_map;
pub mod tree_set;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use raw::NodeId;
pub use tree::{NodeRef, Tree};
pub use tree_map::TreeMap;
pub use tree_set::TreeSet;

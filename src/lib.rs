//! Unbalanced binary search tree collections for Rust.
//!
//! This crate provides [`BstTree`], an ordered container of unique keys backed by a plain
//! (never rebalanced) binary search tree with parent links, and [`BstMap`], an ordered map
//! built on top of it. Both expose two ways of navigating:
//!
//! - detached [`Position`]s, the counterpart of bidirectional iterators: `begin`, `end`,
//!   `find`, `lower_bound`, `upper_bound`, stepping with `next`/`prev`, and
//!   [`ReversePosition`]s for descending traversal;
//! - ordinary Rust iterators (`iter`, `into_iter`, ...), double-ended and exact-size.
//!
//! Small [`Stack`] and [`Queue`] adaptors over `Vec`, `VecDeque` and `LinkedList` round out
//! the collection set.
//!
//! # Example
//!
//! ```
//! use bst_tree::{BstMap, BstTree};
//!
//! let mut tree = BstTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key);
//! }
//!
//! // In-order traversal through positions.
//! let mut position = tree.begin();
//! let mut keys = Vec::new();
//! while position != tree.end() {
//!     keys.push(*tree.get(position).unwrap());
//!     position = tree.next(position);
//! }
//! assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
//!
//! // Bounds and erasure.
//! assert_eq!(tree.get(tree.upper_bound(&4)), Some(&5));
//! tree.erase(tree.find(&5));
//! assert!(!tree.contains(&5));
//!
//! // The map never overwrites an existing key on insert.
//! let mut ages = BstMap::new();
//! ages.insert("Alice", 31);
//! ages.insert("Alice", 99);
//! assert_eq!(ages[&"Alice"], 31);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Custom ordering** - Any [`compare::Compare`] comparator, or a plain "less than"
//!   closure through [`LessBy`]
//! - **Pluggable storage** - Nodes come from a [`NodeAllocator`]; the default [`Arena`] can be
//!   capped with [`Arena::with_limit`], and the `try_*` methods report exhaustion as
//!   [`CapacityError`]
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other through compact [`Handle`]s, so the tree
//! needs no `unsafe` code. No balancing is performed: the shape of the tree is fully
//! determined by insertion order, and sorted insertion degrades it to a linked list.

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

mod raw;

pub mod adaptor;
pub mod allocator;
pub mod bst_map;
pub mod bst_tree;
pub mod key;

pub use adaptor::{Queue, Stack};
pub use allocator::{Arena, CapacityError, NodeAllocator};
pub use bst_map::BstMap;
pub use bst_tree::{BstTree, Cursor, Position, ReversePosition};
pub use key::{Identity, KeyOf, LessBy, SelectFirst};
pub use raw::{Handle, Node};

//! A scapegoat-tree ordered set for Rust.
//!
//! [`ScapegoatSet`] keeps unique keys in a binary search tree that stores no
//! colors, heights or ranks: every node only knows the size of its subtree.
//! Balance is restored lazily. After a mutation, the sizes on the path back to
//! the root are refreshed and, if some node on that path has a child holding
//! more than [`Alpha`] times its own keys, the highest such node is rebuilt into
//! a perfectly balanced subtree.
//!
//! # Example
//!
//! ```
//! use scapegoat_tree::ScapegoatSet;
//!
//! let mut set = ScapegoatSet::new();
//!
//! // Sorted input is the worst case for a plain BST; rebuilds keep it shallow.
//! for key in 1..=1_000 {
//!     assert!(set.insert(key));
//! }
//! assert!(!set.insert(500));
//!
//! assert!(set.remove(&500));
//! assert!(!set.contains(&500));
//! assert_eq!(set.len(), 999);
//! assert_eq!(set.first(), Some(&1));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Amortized O(log n)** search, insertion and removal
//! - **Arena storage** - Nodes live in one slot vector and link to each other by index
//!
//! # Implementation
//!
//! Removing a leaf leaves a *tombstone* (a node of size zero) that its parent
//! prunes during the size refresh that immediately follows, so tombstones are
//! never observable between calls.

#![no_std]
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

mod alpha;
mod error;
mod raw;

pub mod scapegoat_set;

pub use alpha::Alpha;
pub use error::{Error, Result};
pub use scapegoat_set::ScapegoatSet;

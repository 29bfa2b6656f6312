//! Rank-augmented AVL tree collections for Rust.
//!
//! This crate provides [`AvlMap`], a height-balanced binary search tree with
//! O(log n) insert, remove, lookup, and descending rank queries:
//!
//! - [`kth_largest`](AvlMap::kth_largest) - Get the element at a given
//!   descending position without materializing the full sequence
//! - [`iter`](AvlMap::iter) - Lazy, restartable ascending iteration
//!
//! Unlike `BTreeMap`, inserting an already-present key is an error rather
//! than an update; the map never silently overwrites an entry.
//!
//! # Example
//!
//! ```
//! use ravl_tree::AvlMap;
//!
//! let mut prices = AvlMap::new();
//! prices.insert(500, "tonic")?;
//! prices.insert(2000, "elixir")?;
//! prices.insert(950, "salve")?;
//!
//! // Rank queries are 1-based and descending: k = 1 is the maximum key.
//! assert_eq!(prices.kth_largest(1)?, (&2000, &"elixir"));
//! assert_eq!(prices.kth_largest(3)?, (&500, &"tonic"));
//!
//! // Ascending iteration.
//! let keys: Vec<_> = prices.keys().copied().collect();
//! assert_eq!(keys, [500, 950, 2000]);
//! # Ok::<(), ravl_tree::Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Iterative reverse in-order walk over an
//!   explicit bounded stack; cost is proportional to tree height
//! - **Strict error contract** - Duplicate inserts, missing keys, and
//!   out-of-range ranks surface as [`Error`] values, never partial mutation
//!
//! # Companion modules
//!
//! The crate also ships the surrounding pieces of the market simulation this
//! structure was built for: a linear-probing catalog ([`ProbeTable`]), a
//! deterministic integer source ([`RandomGen`]), a prime sieve ([`primes`]),
//! a fixed-capacity stack ([`BoundedStack`]), and the [`market`]
//! orchestration layer that wires them together.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod error;
mod raw;

pub mod avl_map;
pub mod bounded_stack;
pub mod market;
pub mod primes;
pub mod probe_table;
pub mod random;

pub use avl_map::AvlMap;
pub use bounded_stack::BoundedStack;
pub use error::Error;
pub use market::{Listing, Market};
pub use probe_table::ProbeTable;
pub use random::{Lcg, RandomGen};

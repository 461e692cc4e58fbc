// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # Persistent CHAMP Maps
//!
//! This crate provides a persistent hash map built on a [compressed
//! hash-array mapped prefix tree][champ] (CHAMP).
//!
//! A persistent map is never changed in place. Every update returns a new
//! map and leaves the old one as it was. The new and old versions share
//! all the nodes the update didn't touch, so keeping old versions around is
//! cheap, and so is passing maps between threads: a map is just a pointer
//! to an immutable tree.
//!
//! ```
//! # use champ_map::ChampMap;
//! let fruit = ChampMap::new()
//!     .update("apple", 5)
//!     .update("banana", 3)
//!     .update("cherry", 8);
//! let changed = fruit.update("apple", 10).without("cherry");
//!
//! assert_eq!(Some(&5), fruit.get("apple"));
//! assert_eq!(Some(&10), changed.get("apple"));
//! assert_eq!(None, changed.get("cherry"));
//! assert_eq!(2, changed.len());
//! ```
//!
//! ## Canonical Form
//!
//! Each node of the trie keeps its entries and its subtrees in two
//! separate compacted arrays, indexed through a pair of bitmaps. Removing
//! an entry collapses any subtree left holding a single entry back into its
//! parent. As a result, the shape of a trie depends only on its contents
//! and its hasher, never on the order of the operations which built it.
//! Comparing two maps for equality walks both tries side by side, and
//! returns early at any subtree the two maps share.
//!
//! ```
//! # use champ_map::ChampMap;
//! let a = ChampMap::new().update(1, "one").update(2, "two");
//! let b = ChampMap::new().update(2, "two").update(3, "three").update(1, "one").without(&3);
//! assert_eq!(a, b);
//! assert_eq!(a.tree().to_string(), b.tree().to_string());
//! ```
//!
//! ## Hashing
//!
//! Keys are hashed down to 32 bits, five bits per trie level. Keys whose
//! 32-bit hashes are identical end up together in a collision node at the
//! bottom of the trie, which stores them in a plain list.
//!
//! The default hasher, [`FnvBuildHasher`][FnvBuildHasher], is
//! deterministic, because equality relies on equal maps hashing keys the
//! same way. Use [`GenericChampMap::with_hasher`][with_hasher] to pick a
//! different one.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! | ------- | ----------- |
//! | [`triomphe`](https://crates.io/crates/triomphe) | Use [`triomphe::Arc`](https://docs.rs/triomphe/latest/triomphe/struct.Arc.html) as the default shared pointer |
//! | [`proptest`](https://crates.io/crates/proptest) | Strategies for generating maps with proptest |
//! | [`quickcheck`](https://crates.io/crates/quickcheck) | [`quickcheck::Arbitrary`](https://docs.rs/quickcheck/latest/quickcheck/trait.Arbitrary.html) implementation |
//! | [`arbitrary`](https://crates.io/crates/arbitrary/) | [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/latest/arbitrary/trait.Arbitrary.html) implementation |
//! | [`serde`](https://crates.io/crates/serde) | [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) implementations |
//! | `debug` | Expose `assert_invariants`, which checks the trie's structure |
//! | `small-chunks` | Use two bits per trie level instead of five, to exercise deep tries in tests |
//!
//! [champ]: https://michael.steindorfer.name/publications/oopsla15.pdf
//! [FnvBuildHasher]: ./fnv/type.FnvBuildHasher.html
//! [with_hasher]: ./champmap/struct.GenericChampMap.html#method.with_hasher

#![forbid(rust_2018_idioms)]
#![deny(unsafe_code, nonstandard_style)]
#![warn(unreachable_pub, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod util;

mod config;
mod hash;
mod nodes;

pub mod champmap {
    //! An unordered persistent map.
    //!
    //! See [`GenericChampMap`][GenericChampMap].
    //!
    //! [GenericChampMap]: ./struct.GenericChampMap.html
    pub use crate::hash::map::*;
    pub use crate::nodes::format::TreeDump;
}

pub mod fnv {
    //! The default hasher.
    pub use crate::hash::fnv::*;
}

pub mod shared_ptr;

#[cfg(feature = "quickcheck")]
#[cfg_attr(docsrs, doc(cfg(feature = "quickcheck")))]
mod quickcheck;

#[cfg(feature = "arbitrary")]
#[cfg_attr(docsrs, doc(cfg(feature = "arbitrary")))]
mod arbitrary;

#[cfg(any(test, feature = "serde"))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod ser;

#[cfg(any(test, feature = "proptest"))]
#[cfg_attr(docsrs, doc(cfg(feature = "proptest")))]
pub mod proptest;

pub use crate::champmap::{ChampMap, GenericChampMap, TreeDump};
pub use crate::fnv::FnvBuildHasher;

#[cfg(test)]
mod test;

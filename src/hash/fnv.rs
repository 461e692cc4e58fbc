// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The default hasher: 32-bit FNV-1a.
//!
//! Structural equality between two maps relies on both of them laying out
//! their keys identically, so the default hasher must produce the same hash
//! for the same key in every map. [`RandomState`][RandomState] would give
//! each map its own keys; FNV-1a is unseeded and deterministic.
//!
//! [RandomState]: https://doc.rust-lang.org/std/collections/hash_map/struct.RandomState.html

use std::hash::{BuildHasherDefault, Hasher};

const OFFSET_BASIS: u32 = 0x811c_9dc5;
const PRIME: u32 = 0x0100_0193;

/// A 32-bit FNV-1a [`Hasher`][Hasher].
///
/// [Hasher]: https://doc.rust-lang.org/std/hash/trait.Hasher.html
#[derive(Clone, Copy, Debug)]
pub struct FnvHasher(u32);

impl Default for FnvHasher {
    #[inline]
    fn default() -> Self {
        FnvHasher(OFFSET_BASIS)
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut hash = self.0;
        for byte in bytes {
            hash ^= u32::from(*byte);
            hash = hash.wrapping_mul(PRIME);
        }
        self.0 = hash;
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.0)
    }
}

/// A [`BuildHasher`][BuildHasher] producing [`FnvHasher`]s.
///
/// [BuildHasher]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

#[cfg(test)]
mod test {
    use super::*;
    use std::hash::{BuildHasher, Hash};

    fn fnv(bytes: &[u8]) -> u64 {
        let mut hasher = FnvHasher::default();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn reference_vectors() {
        assert_eq!(0x811c_9dc5, fnv(b""));
        assert_eq!(0xe40c_292c, fnv(b"a"));
        assert_eq!(0xbf9c_f968, fnv(b"foobar"));
    }

    #[test]
    fn deterministic_across_builders() {
        let a = FnvBuildHasher::default();
        let b = FnvBuildHasher::default();
        let mut ha = a.build_hasher();
        let mut hb = b.build_hasher();
        "apple".hash(&mut ha);
        "apple".hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
        assert!(ha.finish() <= u64::from(u32::MAX));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Hashers which let tests decide where keys land in the trie.

use std::hash::{BuildHasherDefault, Hasher};

/// Hashes strings of binary digits to the number they spell, so `"101"`
/// hashes to `0b101`. Every other byte is ignored.
#[derive(Default)]
pub(crate) struct BinaryHasher(u64);

impl Hasher for BinaryHasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            match byte {
                b'0' => self.0 <<= 1,
                b'1' => self.0 = (self.0 << 1) | 1,
                _ => {}
            }
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub(crate) type BinaryState = BuildHasherDefault<BinaryHasher>;

/// A terrible hasher keeping only the low `N` bits of its input, so that
/// lots of distinct keys end up with identical hashes. `LolHasher<0>`
/// hashes everything to zero.
#[derive(Default)]
pub(crate) struct LolHasher<const N: u32 = 8> {
    state: u64,
}

impl<const N: u32> Hasher for LolHasher<N> {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state = self.state.rotate_left(8) ^ u64::from(*byte);
        }
    }

    fn finish(&self) -> u64 {
        if N >= 64 {
            self.state
        } else {
            self.state & ((1 << N) - 1)
        }
    }
}

pub(crate) type LolState<const N: u32> = BuildHasherDefault<LolHasher<N>>;

#[test]
fn binary_hasher_spells_hash() {
    use std::hash::{BuildHasher, Hash};
    let state = BinaryState::default();
    let mut hasher = state.build_hasher();
    "0000100000".hash(&mut hasher);
    assert_eq!(0b0000100000, hasher.finish());
}

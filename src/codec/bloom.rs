// Copyright 2025 Lisq Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bloom signatures for containment fast rejection
//!
//! A [`BloomSig`] is a 64-bit bitmap summarizing which element hashes occur
//! anywhere in a value. False positives are possible (says "maybe contained"
//! when not), false negatives are impossible, so a failed subset test is a
//! definitive rejection:
//!
//! ```text
//! needle_sig & !container_sig != 0  =>  needle is NOT contained
//! ```
//!
//! One word fits in a register, needs no allocation, and at k=4 bit
//! positions per element keeps the false-positive rate around 6% for
//! ten-element values, which is plenty for a pre-filter whose misses are
//! caught by the full scan.

use crate::codec::hash::rot32;
use crate::core::BLOOM_K;

/// 64-bit Bloom signature over the element hashes of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BloomSig(pub u64);

impl BloomSig {
    /// The empty signature
    pub const EMPTY: BloomSig = BloomSig(0);

    /// Signature of a single element, from its semantic hash
    ///
    /// Derives [`BLOOM_K`] bit positions from one hash via rotations.
    pub fn from_hash(elem_hash: u32) -> BloomSig {
        let mut sig = 0u64;
        for i in 0..BLOOM_K {
            let bit = rot32(elem_hash, i * 8) & 63;
            sig |= 1u64 << bit;
        }
        BloomSig(sig)
    }

    /// Union with another signature (Bloom combine)
    #[inline]
    pub fn union(self, other: BloomSig) -> BloomSig {
        BloomSig(self.0 | other.0)
    }

    /// Subset test: true if a needle with signature `needle` might be
    /// contained in a value with this signature, false if definitely not
    #[inline]
    pub fn may_contain(self, needle: BloomSig) -> bool {
        needle.0 & !self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hash::hash_bytes;

    #[test]
    fn test_sets_k_bits_at_most() {
        let sig = BloomSig::from_hash(hash_bytes(b"element"));
        let bits = sig.0.count_ones();
        assert!(bits >= 1 && bits <= BLOOM_K);
    }

    #[test]
    fn test_self_containment() {
        let sig = BloomSig::from_hash(hash_bytes(b"x"));
        assert!(sig.may_contain(sig));
        assert!(sig.may_contain(BloomSig::EMPTY));
    }

    #[test]
    fn test_union_preserves_members() {
        let a = BloomSig::from_hash(hash_bytes(b"a"));
        let b = BloomSig::from_hash(hash_bytes(b"b"));
        let both = a.union(b);
        assert!(both.may_contain(a));
        assert!(both.may_contain(b));
    }

    #[test]
    fn test_rejects_disjoint_element() {
        // Find an element whose bits are not all covered; with 4 of 64 bits
        // set, a handful of candidates is ample.
        let container = BloomSig::from_hash(hash_bytes(b"only"));
        let rejected = (0u32..64)
            .map(|i| BloomSig::from_hash(hash_bytes(format!("probe-{i}").as_bytes())))
            .any(|probe| !container.may_contain(probe));
        assert!(rejected);
    }
}

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

//! Stable hash primitives
//!
//! All semantic hashing goes through these helpers. The byte hash must be
//! stable across processes and releases because hash values are persisted
//! inside large-list headers and inverted-index keys; `FxHasher` is
//! deterministic and unseeded, folded to 32 bits.
//!
//! Semantic hash rules (these must mirror equality exactly):
//!
//! - Symbols hash by their text, never by their table index
//! - Small integers and integers hash as the same canonical i64
//! - Short and long strings hash identically for the same content
//! - `-0.0` is normalized to `+0.0` before hashing
//! - Lists combine child hashes with position-dependent rotation

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Hash arbitrary bytes to a stable 32-bit value
pub fn hash_bytes(data: &[u8]) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write(data);
    let folded = hasher.finish();
    (folded as u32) ^ ((folded >> 32) as u32)
}

/// Hash a u32 value
pub fn hash_u32(value: u32) -> u32 {
    hash_bytes(&value.to_le_bytes())
}

/// Hash an i64 value (canonical integer hash)
pub fn hash_i64(value: i64) -> u32 {
    hash_bytes(&value.to_le_bytes())
}

/// Hash a float, normalizing -0.0 to +0.0 so it matches equality
pub fn hash_f64(value: f64) -> u32 {
    let normalized = if value == 0.0 { 0.0 } else { value };
    hash_bytes(&normalized.to_le_bytes())
}

/// Hash content bytes under a kind tag so equal bytes of different kinds
/// (a symbol `abc` vs a string `"abc"`) hash apart
pub fn hash_tagged_bytes(tag: u8, data: &[u8]) -> u32 {
    combine(hash_u32(tag as u32), hash_bytes(data))
}

/// Avalanche mixer for folding one hash into another
#[inline]
pub fn combine(a: u32, b: u32) -> u32 {
    a ^ (b
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(a << 6)
        .wrapping_add(a >> 2))
}

/// Left rotation
#[inline]
pub fn rot32(x: u32, r: u32) -> u32 {
    x.rotate_left(r)
}

/// Fold a child hash into a list hash with position-dependent rotation,
/// making the list hash order-sensitive
#[inline]
pub fn combine_child(acc: u32, child_hash: u32, position: usize) -> u32 {
    combine(acc, rot32(child_hash, (position % 31) as u32))
}

/// Seed value for list hashes: count and kind, mixed
pub fn list_hash_seed(count: u32, list_tag: u8) -> u32 {
    combine(hash_u32(count), hash_u32(list_tag as u32))
}

/// Widen a 32-bit semantic hash to 64 bits under a caller seed
///
/// Seed 0 reproduces the base hash (zero-extended) so the extended hash
/// stays consistent with the plain one. The finalizer is splitmix64.
pub fn extend_hash(base: u32, seed: i64) -> i64 {
    if seed == 0 {
        return base as i64;
    }
    let mut x = (base as u64) ^ (seed as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    x as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes_deterministic() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
        assert_ne!(hash_bytes(b""), hash_bytes(b"\0"));
    }

    #[test]
    fn test_tagged_hash_separates_kinds() {
        assert_ne!(hash_tagged_bytes(0x80, b"abc"), hash_tagged_bytes(0xA0, b"abc"));
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(hash_f64(-0.0), hash_f64(0.0));
        assert_ne!(hash_f64(1.0), hash_f64(-1.0));
    }

    #[test]
    fn test_combine_order_sensitive() {
        let a = hash_bytes(b"a");
        let b = hash_bytes(b"b");
        assert_ne!(combine(a, b), combine(b, a));
    }

    #[test]
    fn test_child_position_matters() {
        let seed = list_hash_seed(2, 0xE0);
        let child = hash_bytes(b"x");
        assert_ne!(
            combine_child(seed, child, 0),
            combine_child(seed, child, 1)
        );
    }

    #[test]
    fn test_extend_hash_zero_seed_is_base() {
        let base = hash_bytes(b"value");
        assert_eq!(extend_hash(base, 0), base as i64);
        assert_ne!(extend_hash(base, 1), extend_hash(base, 2));
        // Deterministic for the same seed
        assert_eq!(extend_hash(base, 77), extend_hash(base, 77));
    }
}

// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SimHash Content Fingerprinting
//!
//! A 64-bit near-duplicate fingerprint over word shingles, used by the
//! similarity-check stage to compare a finished article against its batch
//! siblings. This is a coarse structural fingerprint distinct from the
//! rewrite engine's token-set Jaccard similarity, which measures how much a
//! single rewritten field diverged from its pre-rewrite text.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const SHINGLE_SIZE: usize = 3;
/// Hamming distance at or below this threshold flags two fingerprints as
/// near-duplicates.
pub const DUPLICATE_HAMMING_THRESHOLD: u32 = 12;

/// Computes the 64-bit SimHash fingerprint of `text` over word shingles of
/// size [`SHINGLE_SIZE`]. Whitespace-only or shorter-than-a-shingle input
/// hashes the whole text as a single shingle.
pub fn fingerprint(text: &str) -> u64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    let shingles: Vec<String> = if words.len() < SHINGLE_SIZE {
        vec![words.join(" ")]
    } else {
        words.windows(SHINGLE_SIZE).map(|w| w.join(" ")).collect()
    };

    let mut bit_weights = [0i64; 64];
    for shingle in &shingles {
        let mut hasher = DefaultHasher::new();
        shingle.hash(&mut hasher);
        let h = hasher.finish();
        for (bit, weight) in bit_weights.iter_mut().enumerate() {
            if (h >> bit) & 1 == 1 {
                *weight += 1;
            } else {
                *weight -= 1;
            }
        }
    }

    let mut fingerprint: u64 = 0;
    for (bit, weight) in bit_weights.iter().enumerate() {
        if *weight > 0 {
            fingerprint |= 1 << bit;
        }
    }
    fingerprint
}

/// Number of differing bits between two fingerprints.
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// True when `a` and `b` are within [`DUPLICATE_HAMMING_THRESHOLD`] bits of
/// each other.
pub fn is_near_duplicate(a: u64, b: u64) -> bool {
    hamming_distance(a, b) <= DUPLICATE_HAMMING_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_has_zero_distance() {
        let text = "the quick brown fox jumps over the lazy dog repeatedly";
        assert_eq!(hamming_distance(fingerprint(text), fingerprint(text)), 0);
    }

    #[test]
    fn near_identical_text_is_flagged_duplicate() {
        let a = "our platform helps customer service teams resolve tickets faster with ai";
        let b = "our platform helps customer support teams resolve tickets faster with ai";
        assert!(is_near_duplicate(fingerprint(a), fingerprint(b)));
    }

    #[test]
    fn unrelated_text_is_not_flagged_duplicate() {
        let a = "our platform helps customer service teams resolve tickets faster with ai";
        let b = "a completely different article about quarterly financial reporting standards in the banking sector";
        assert!(!is_near_duplicate(fingerprint(a), fingerprint(b)));
    }
}

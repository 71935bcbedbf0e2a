// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Token-Set Jaccard Similarity
//!
//! Used by the rewrite engine to validate that a surgical edit stayed
//! within its mode's similarity bounds: too low means the edit rewrote more
//! than instructed, too high means nothing material changed.

use std::collections::HashSet;

fn token_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()).filter(|w| !w.is_empty()).collect()
}

/// Jaccard similarity (`|A ∩ B| / |A ∪ B|`) between the word-level token
/// sets of `before` and `after`. Two empty token sets are defined as
/// identical (`1.0`).
pub fn jaccard_similarity(before: &str, after: &str) -> f64 {
    let a = token_set(before);
    let b = token_set(after);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    if union == 0 {
        1.0
    } else {
        intersection as f64 / union as f64
    }
}

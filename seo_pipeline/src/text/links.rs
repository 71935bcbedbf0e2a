// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Slug Normalization

use regex::Regex;
use std::sync::LazyLock;

static NON_SLUG_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Normalizes arbitrary title text into a URL-safe slug: lowercased,
/// non-alphanumeric runs collapsed to a single hyphen, leading/trailing
/// hyphens trimmed.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let collapsed = NON_SLUG_CHAR.replace_all(&lowered, "-");
    collapsed.trim_matches('-').to_string()
}

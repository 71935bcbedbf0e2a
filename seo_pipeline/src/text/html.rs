// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # HTML Tag Utilities
//!
//! Small, regex-based tag extraction/stripping shared by the rewrite
//! engine's structural-equality validator and the cleanup stage's plain-text
//! derivations (word counts, AEO scoring inputs).

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*[^>]*>").unwrap());
static CITATION_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());
static ANCHOR_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+href="([^"]*)"[^>]*>([^<]*)</a>"#).unwrap());

/// The ordered sequence of tag names (open and close) appearing in `html`,
/// e.g. `["p", "/p", "a", "/a"]`. Two fragments with the same sequence have
/// identical structure even if their text content differs.
pub fn tag_sequence(html: &str) -> Vec<String> {
    TAG.find_iter(html)
        .map(|m| {
            m.as_str()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string()
        })
        .collect()
}

/// Strips all HTML tags, leaving plain text with tag boundaries collapsed
/// to single spaces.
pub fn strip_tags(html: &str) -> String {
    let spaced = TAG.replace_all(html, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every `[n]`-style citation marker appearing in `html`, in order of
/// appearance (duplicates retained).
pub fn citation_markers(html: &str) -> Vec<String> {
    CITATION_MARKER.find_iter(html).map(|m| m.as_str().to_string()).collect()
}

/// Every `(anchor text, href)` pair from `<a href="...">text</a>` tags.
pub fn anchor_links(html: &str) -> Vec<(String, String)> {
    ANCHOR_HREF
        .captures_iter(html)
        .map(|c| (c.get(2).unwrap().as_str().to_string(), c.get(1).unwrap().as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tag_sequence() {
        let html = "<p>Hello <strong>world</strong></p>";
        assert_eq!(tag_sequence(html), vec!["p", "strong", "/strong", "/p"]);
    }

    #[test]
    fn strips_tags_to_plain_text() {
        assert_eq!(strip_tags("<p>Hello <strong>world</strong>.</p>"), "Hello world .");
    }

    #[test]
    fn finds_citation_markers_in_order() {
        assert_eq!(citation_markers("claim one [1], claim two [2], repeat [1]"), vec!["[1]", "[2]", "[1]"]);
    }

    #[test]
    fn extracts_anchor_links() {
        let html = r#"<p>See <a href="/magazine/pricing">pricing</a> for details.</p>"#;
        assert_eq!(anchor_links(html), vec![("pricing".to_string(), "/magazine/pricing".to_string())]);
    }
}

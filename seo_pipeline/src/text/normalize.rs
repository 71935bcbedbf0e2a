// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Deterministic Content Normalization
//!
//! Every content-shape fixup (punctuation, entity-encoding, link href
//! normalization) lives here, applied once by the cleanup stage, instead of
//! being scattered across generation/rewrite/export. Idempotent: running
//! `normalize` twice produces the same output as running it once.

use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([!?.,;:])\1+").unwrap());
static BARE_AMPERSAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?P<tail>\s|$|[^#a-zA-Z])").unwrap());

/// Applies the full normalization pass: dash substitution, punctuation-run
/// collapsing, then bare-`&` entity encoding.
pub fn normalize(text: &str) -> String {
    let text = substitute_dashes(text);
    let text = collapse_punctuation_runs(&text);
    encode_bare_ampersands(&text)
}

/// Em dash becomes a comma, en dash becomes a hyphen. Plain ASCII hyphens
/// are left untouched.
pub fn substitute_dashes(text: &str) -> String {
    text.replace('\u{2014}', ",").replace('\u{2013}', "-")
}

/// Collapses runs of the same punctuation mark (`!!!`, `??`, `,,`) down to
/// a single occurrence.
pub fn collapse_punctuation_runs(text: &str) -> String {
    PUNCTUATION_RUN.replace_all(text, "$1").into_owned()
}

/// Encodes any `&` not already part of a recognized entity (`&amp;`,
/// `&#39;`, ...) as `&amp;`.
pub fn encode_bare_ampersands(text: &str) -> String {
    BARE_AMPERSAND.replace_all(text, "&amp;$tail").into_owned()
}

/// Rewrites an internal-link anchor href to the canonical
/// `/magazine/{slug}` form, accepting the variants the generation stage is
/// observed to produce: bare slug, leading slash, trailing slash, full URL
/// with the site's own host, `www.` host, or already-canonical.
pub fn normalize_internal_href(href: &str, site_host: &str) -> String {
    let trimmed = href.trim();
    let stripped_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .map(|rest| {
            let without_www = rest.strip_prefix("www.").unwrap_or(rest);
            without_www.strip_prefix(site_host).unwrap_or(without_www)
        })
        .unwrap_or(trimmed);
    let without_magazine = stripped_host.strip_prefix("/magazine/").unwrap_or(stripped_host);
    let slug = without_magazine.trim_start_matches('/').trim_end_matches('/');
    format!("/magazine/{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn em_dash_becomes_comma() {
        assert_eq!(substitute_dashes("fast\u{2014}reliable"), "fast,reliable");
    }

    #[test]
    fn en_dash_becomes_hyphen() {
        assert_eq!(substitute_dashes("pages 10\u{2013}20"), "pages 10-20");
    }

    #[test]
    fn collapses_repeated_punctuation() {
        assert_eq!(collapse_punctuation_runs("Really??! Wow!!!"), "Really?! Wow!");
    }

    #[test]
    fn encodes_bare_ampersand_but_not_existing_entities() {
        assert_eq!(encode_bare_ampersands("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(encode_bare_ampersands("AT&amp;T"), "AT&amp;T");
        assert_eq!(encode_bare_ampersands("&#39;quoted&#39;"), "&#39;quoted&#39;");
    }

    #[test]
    fn normalizes_all_href_variants_to_canonical() {
        let host = "example.com";
        assert_eq!(normalize_internal_href("pricing", host), "/magazine/pricing");
        assert_eq!(normalize_internal_href("/pricing/", host), "/magazine/pricing");
        assert_eq!(normalize_internal_href("/magazine/pricing", host), "/magazine/pricing");
        assert_eq!(normalize_internal_href("https://example.com/pricing", host), "/magazine/pricing");
        assert_eq!(normalize_internal_href("https://www.example.com/pricing", host), "/magazine/pricing");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("Fast\u{2014}reliable!!! Tom & Jerry??");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}

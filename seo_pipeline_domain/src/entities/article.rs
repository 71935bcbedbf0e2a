// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Article Output Entity

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a feature/pricing comparison table embedded in the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A single FAQ entry, also the unit scored by the AEO "FAQ schema
/// readiness" rubric component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// One entry in the generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub anchor: String,
    pub short_label: String,
}

/// One internal link placed within a section: the href and the anchor
/// text it's rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    pub href: String,
    pub anchor_text: String,
}

/// One cited source: the marker it's referenced by in body text (e.g.
/// `"[1]"`), its URL, and its display title (used by citation UI and
/// JSON-LD rendering). `citation_map` stays the authoritative
/// marker -> URL mapping the cleanup and citations stages validate
/// against; `sources` carries the same markers with their titles attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub id: String,
    pub url: String,
    pub title: String,
}

/// The structured article body: named sections plus the ancillary content
/// blocks the AEO scorer and renderer both read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleOutput {
    pub title: String,
    pub subtitle: String,
    pub teaser: String,
    pub slug: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Ordered section field name -> HTML content, e.g.
    /// `"section_01_content" -> "<p>...</p>"`. Field names are the same
    /// identifiers [`crate::value_objects::RewriteTarget::Field`] addresses.
    pub sections: BTreeMap<String, String>,
    /// Preserves section declaration order independent of the `BTreeMap`'s
    /// lexicographic key order.
    pub section_order: Vec<String>,
    pub toc: Vec<TocEntry>,
    pub faq: Vec<FaqItem>,
    /// People-Also-Ask entries, scored alongside `faq` by the Q&A-format
    /// rubric component but rendered in their own block.
    pub paa: Vec<FaqItem>,
    pub comparison_tables: Vec<ComparisonTable>,
    /// Image placeholder id -> generated image URL.
    pub images: BTreeMap<String, String>,
    /// Section field name -> its ordered internal links.
    pub internal_links: BTreeMap<String, Vec<InternalLink>>,
    /// Citation marker (e.g. `"[1]"`) -> source URL, carried through
    /// cleanup so citations-stage salvage decisions remain traceable.
    pub citation_map: BTreeMap<String, String>,
    /// Cited sources with display titles, keyed by the same markers as
    /// `citation_map`.
    pub sources: Vec<SourceEntry>,
    pub word_count: u32,
}

impl ArticleOutput {
    /// Section content in declaration order, skipping any `section_order`
    /// entries that have no matching content (should not normally occur).
    pub fn ordered_sections(&self) -> Vec<(&str, &str)> {
        self.section_order
            .iter()
            .filter_map(|name| self.sections.get(name).map(|body| (name.as_str(), body.as_str())))
            .collect()
    }

    /// Concatenated section bodies, used for word counting, similarity
    /// fingerprinting, and rubric scoring.
    pub fn full_text(&self) -> String {
        self.ordered_sections()
            .into_iter()
            .map(|(_, body)| body)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Local Critical-Issue Detector
//!
//! Runs ahead of (and independent from) the AEO rubric: it flags concrete,
//! field-addressable defects the rewrite engine can fix surgically.
//! Every issue kind here has a corresponding template in
//! [`crate::rewrite::templates`].

use crate::text::html::strip_tags;
use seo_pipeline_domain::{ArticleOutput, CriticalIssue};

const AI_MARKERS: &[&str] = &["as an ai language model", "i cannot provide", "as of my last update", "i don't have access to real-time"];
const MIN_PARAGRAPH_WORDS: usize = 40;
const KEYWORD_MIN_OCCURRENCES: usize = 5;
const KEYWORD_MAX_OCCURRENCES: usize = 8;

fn paragraphs(html: &str) -> Vec<&str> {
    html.split("</p>").filter(|p| !p.trim().is_empty()).collect()
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.to_lowercase().matches(&needle.to_lowercase()).count()
}

fn has_unclosed_tags(html: &str) -> bool {
    let mut stack: Vec<String> = Vec::new();
    for tag in crate::text::html::tag_sequence(html) {
        if let Some(name) = tag.strip_prefix('/') {
            match stack.pop() {
                Some(open) if open == name => {}
                _ => return true,
            }
        } else if !matches!(tag.as_str(), "br" | "hr" | "img") {
            stack.push(tag);
        }
    }
    !stack.is_empty()
}

/// Detects field-level critical issues across every section of `article`.
pub fn detect(article: &ArticleOutput, primary_keyword: &str) -> Vec<CriticalIssue> {
    let mut issues = Vec::new();

    let total_keyword_hits: usize =
        article.sections.values().map(|body| count_occurrences(&strip_tags(body), primary_keyword)).sum();
    if total_keyword_hits > KEYWORD_MAX_OCCURRENCES {
        if let Some((field, _)) = article
            .sections
            .iter()
            .max_by_key(|(_, body)| count_occurrences(&strip_tags(body), primary_keyword))
        {
            issues.push(CriticalIssue {
                kind: "keyword_overuse".to_string(),
                field: field.clone(),
                detail: format!("primary keyword appears {total_keyword_hits} times, exceeds max {KEYWORD_MAX_OCCURRENCES}"),
            });
        }
    } else if total_keyword_hits < KEYWORD_MIN_OCCURRENCES && total_keyword_hits > 0 {
        if let Some((field, _)) = article.sections.iter().next() {
            issues.push(CriticalIssue {
                kind: "keyword_underuse".to_string(),
                field: field.clone(),
                detail: format!("primary keyword appears {total_keyword_hits} times, below min {KEYWORD_MIN_OCCURRENCES}"),
            });
        }
    }

    for (field, body) in &article.sections {
        for paragraph in paragraphs(body) {
            let word_count = strip_tags(paragraph).split_whitespace().count();
            if word_count > 0 && word_count < MIN_PARAGRAPH_WORDS {
                issues.push(CriticalIssue {
                    kind: "short_paragraph".to_string(),
                    field: field.clone(),
                    detail: format!("paragraph has {word_count} words, below min {MIN_PARAGRAPH_WORDS}"),
                });
                break;
            }
        }

        let lowered = strip_tags(body).to_lowercase();
        if AI_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            issues.push(CriticalIssue {
                kind: "ai_marker_residue".to_string(),
                field: field.clone(),
                detail: "field contains a residual AI-assistant disclaimer phrase".to_string(),
            });
        }

        if has_unclosed_tags(body) {
            issues.push(CriticalIssue {
                kind: "unclosed_tag".to_string(),
                field: field.clone(),
                detail: "field's HTML tags do not balance".to_string(),
            });
        }
    }

    issues
}

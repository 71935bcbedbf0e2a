// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # AEO Scoring Rubric
//!
//! Each component is an independently testable pure function over the
//! article and job context; [`score`] sums them into the final
//! `aeo_score` the quality gate reads.

use crate::text::html::{citation_markers, strip_tags};
use seo_pipeline_domain::ArticleOutput;

const FORBIDDEN_PHRASES: &[&str] = &["in today's fast-paced world", "it is important to note", "at the end of the day", "needless to say"];
const CONVERSATIONAL_MARKERS: &[&str] = &["you", "your", "let's", "imagine", "think about", "here's", "why does", "what if", "consider", "picture this"];

/// Direct-answer correctness: max 25.
pub fn direct_answer_score(direct_answer: &str, primary_keyword: &str) -> f64 {
    if direct_answer.trim().is_empty() {
        return 0.0;
    }
    let word_count = strip_tags(direct_answer).split_whitespace().count();
    let length_ok = (40..=60).contains(&word_count);
    let has_keyword = direct_answer.to_lowercase().contains(&primary_keyword.to_lowercase());
    let has_marker = !citation_markers(direct_answer).is_empty();

    let mut score = 0.0;
    if length_ok {
        score += 10.0;
    }
    if has_keyword {
        score += 10.0;
    }
    if has_marker {
        score += 5.0;
    }
    score
}

/// Q&A format: max 20.
pub fn qa_format_score(faq_count: usize, paa_count: usize, question_titles: usize) -> f64 {
    let mut score = 0.0;
    if (5..=6).contains(&faq_count) {
        score += 8.0;
    }
    if (3..=4).contains(&paa_count) {
        score += 7.0;
    }
    if question_titles >= 3 {
        score += 5.0;
    }
    score
}

/// Citation clarity: max 15.
pub fn citation_clarity_score(body_html: &str, source_count: usize) -> f64 {
    let markers = citation_markers(body_html);
    let unique_markers: std::collections::HashSet<&str> = markers.iter().map(String::as_str).collect();
    let balanced = !markers.is_empty() && unique_markers.len() <= source_count;

    let paragraphs: Vec<&str> = body_html.split("</p>").filter(|p| !p.trim().is_empty()).collect();
    let paragraphs_with_citations = paragraphs.iter().filter(|p| citation_markers(p).len() >= 2).count();
    let dense_ratio = if paragraphs.is_empty() { 0.0 } else { paragraphs_with_citations as f64 / paragraphs.len() as f64 };

    let mut score = 0.0;
    if balanced {
        score += 7.0;
    }
    if dense_ratio >= 0.60 {
        score += 8.0;
    }
    score
}

/// Natural-language: max 15.
pub fn natural_language_score(full_text: &str) -> f64 {
    let lowered = full_text.to_lowercase();
    let marker_count = CONVERSATIONAL_MARKERS.iter().filter(|m| lowered.contains(*m)).count();
    let has_forbidden = FORBIDDEN_PHRASES.iter().any(|p| lowered.contains(p));

    let mut score = 0.0;
    if marker_count >= 8 {
        score += 10.0;
    } else {
        score += 10.0 * (marker_count as f64 / 8.0).min(1.0);
    }
    if !has_forbidden {
        score += 5.0;
    }
    score
}

/// Structured data: max 10.
pub fn structured_data_score(list_count: usize, h2_count: usize) -> f64 {
    let mut score = 0.0;
    if list_count >= 3 {
        score += 5.0;
    }
    if h2_count >= 3 {
        score += 5.0;
    }
    score
}

/// E-E-A-T: max 15, populated only when an author record was provided.
pub fn eeat_score(author_present: bool) -> f64 {
    if author_present {
        15.0
    } else {
        0.0
    }
}

/// Per-component scores keyed by rubric component name, in the order the
/// rubric lists them.
pub fn component_scores(
    article: &ArticleOutput,
    primary_keyword: &str,
    direct_answer_field: &str,
    author_present: bool,
) -> std::collections::BTreeMap<String, f64> {
    let full_text = article.full_text();
    let direct_answer = article.sections.get(direct_answer_field).map(String::as_str).unwrap_or("");
    let question_titles = article.toc.iter().filter(|entry| entry.short_label.trim_end().ends_with('?')).count();
    let list_count = full_text.matches("<ul>").count() + full_text.matches("<ol>").count();
    let h2_count = full_text.matches("<h2").count();
    let source_count = article.citation_map.len();

    let mut scores = std::collections::BTreeMap::new();
    scores.insert("direct_answer".to_string(), direct_answer_score(direct_answer, primary_keyword));
    scores.insert("qa_format".to_string(), qa_format_score(article.faq.len(), article.paa.len(), question_titles));
    scores.insert("citation_clarity".to_string(), citation_clarity_score(&full_text, source_count));
    scores.insert("natural_language".to_string(), natural_language_score(&full_text));
    scores.insert("structured_data".to_string(), structured_data_score(list_count, h2_count));
    scores.insert("eeat".to_string(), eeat_score(author_present));
    scores
}

/// Sums the rubric's component scores into the final `aeo_score` in
/// `[0, 100]`.
pub fn score(
    article: &ArticleOutput,
    primary_keyword: &str,
    direct_answer_field: &str,
    author_present: bool,
) -> (f64, std::collections::BTreeMap<String, f64>) {
    let components = component_scores(article, primary_keyword, direct_answer_field, author_present);
    let total: f64 = components.values().sum();
    (total, components)
}

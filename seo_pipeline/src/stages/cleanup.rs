// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cleanup Stage (post, critical)
//!
//! Merges `parallel_results` into `structured_article` deterministically
//! (images into image slots, internal links into per-section lists,
//! validated citations back into `citation_map`) and validates every
//! data-model invariant. Performs only merge and linking; it must never
//! mutate text content.

use crate::stages::citations::CitationsOutput;
use crate::stages::image::ImageOutput;
use crate::stages::internal_links::InternalLinksOutput;
use crate::text::html::citation_markers;
use async_trait::async_trait;
use regex::Regex;
use seo_pipeline_domain::{ArticleOutput, CriticalIssue, ExecutionContext, InternalLink, Phase, PipelineError, QualityReport, SourceEntry, Stage, StageName};
use std::sync::LazyLock;
use std::time::Duration;

static INTERNAL_HREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^/magazine/[^/][^\s"]*$"#).unwrap());

pub struct CleanupStage;

impl CleanupStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CleanupStage {
    fn default() -> Self {
        Self::new()
    }
}

fn word_count(text: &str) -> usize {
    crate::text::html::strip_tags(text).split_whitespace().count()
}

fn validate_invariants(article: &ArticleOutput, primary_keyword: &str) -> Vec<CriticalIssue> {
    let mut issues = Vec::new();

    let headline_len = article.title.chars().count();
    if !(50..=60).contains(&headline_len) {
        issues.push(CriticalIssue { kind: "headline_length".to_string(), field: "title".to_string(), detail: format!("headline is {headline_len} characters, expected [50, 60]") });
    }

    if article.meta_title.chars().count() > 60 {
        issues.push(CriticalIssue { kind: "meta_title_length".to_string(), field: "meta_title".to_string(), detail: "meta_title exceeds 60 characters".to_string() });
    }

    let meta_description_len = article.meta_description.chars().count();
    if !(120..=160).contains(&meta_description_len) {
        issues.push(CriticalIssue { kind: "meta_description_length".to_string(), field: "meta_description".to_string(), detail: format!("meta_description is {meta_description_len} characters, expected [120, 160]") });
    }

    if let Some(direct_answer) = article.sections.get("direct_answer") {
        let words = word_count(direct_answer);
        if !(40..=60).contains(&words) {
            issues.push(CriticalIssue { kind: "direct_answer_length".to_string(), field: "direct_answer".to_string(), detail: format!("direct_answer is {words} words, expected [40, 60]") });
        }
    }

    if let Some(intro) = article.sections.get("intro") {
        let words = word_count(intro);
        if !(80..=120).contains(&words) {
            issues.push(CriticalIssue { kind: "intro_length".to_string(), field: "intro".to_string(), detail: format!("intro is {words} words, expected [80, 120]") });
        }
    }

    let keyword_occurrences: usize = article
        .sections
        .values()
        .map(|body| crate::text::html::strip_tags(body).to_lowercase().matches(&primary_keyword.to_lowercase()).count())
        .sum();
    if !(5..=8).contains(&keyword_occurrences) {
        issues.push(CriticalIssue { kind: "keyword_density".to_string(), field: "sections".to_string(), detail: format!("primary keyword appears {keyword_occurrences} times across sections, expected [5, 8]") });
    }

    let full_text = article.full_text();
    let markers: std::collections::HashSet<String> = citation_markers(&full_text).into_iter().collect();
    let sources: std::collections::HashSet<&String> = article.citation_map.keys().collect();
    if markers.len() != sources.len() || !markers.iter().all(|m| sources.contains(m)) {
        issues.push(CriticalIssue { kind: "citation_mismatch".to_string(), field: "citation_map".to_string(), detail: "citation markers and sources do not correspond one-to-one".to_string() });
    }

    for links in article.internal_links.values() {
        for link in links {
            let href = &link.href;
            let is_valid_relative = INTERNAL_HREF.is_match(href);
            let is_absolute = href.starts_with("http://") || href.starts_with("https://");
            let is_anchor = href.starts_with('#');
            if !is_valid_relative && !is_absolute && !is_anchor {
                issues.push(CriticalIssue { kind: "invalid_internal_href".to_string(), field: "internal_links".to_string(), detail: format!("href '{href}' matches none of: canonical, absolute, anchor") });
            }
        }
    }

    if full_text.contains('\u{2014}') || article.title.contains('\u{2014}') || article.meta_description.contains('\u{2014}') {
        issues.push(CriticalIssue { kind: "em_dash_present".to_string(), field: "content".to_string(), detail: "em-dash character found in content".to_string() });
    }

    issues
}

#[async_trait]
impl Stage for CleanupStage {
    fn ordinal(&self) -> u32 {
        20
    }

    fn name(&self) -> StageName {
        StageName::new("cleanup")
    }

    fn phase(&self) -> Phase {
        Phase::Post
    }

    fn critical(&self) -> bool {
        true
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let Some(mut article) = context.structured_article.clone() else {
            return Err(PipelineError::InvariantViolation("cleanup requires a structured_article".to_string()));
        };

        if let Some(raw) = context.parallel_results.get("citations") {
            if let Ok(output) = serde_json::from_str::<CitationsOutput>(raw) {
                article.citation_map = output.citation_map;
                article.sources.retain(|source| article.citation_map.contains_key(&source.id));
                for (marker, url) in &article.citation_map {
                    if !article.sources.iter().any(|s| &s.id == marker) {
                        article.sources.push(SourceEntry { id: marker.clone(), url: url.clone(), title: String::new() });
                    } else if let Some(source) = article.sources.iter_mut().find(|s| &s.id == marker) {
                        source.url = url.clone();
                    }
                }
                if output.below_threshold {
                    context.record_failure(seo_pipeline_domain::StageFailure {
                        stage: StageName::new("citations"),
                        kind: seo_pipeline_domain::PipelineErrorKind::ValidationFailure,
                        message: format!("citation valid ratio {:.2} below warning threshold", output.valid_ratio),
                        fatal: false,
                        occurred_at: chrono::Utc::now(),
                    });
                }
            }
        }

        if let Some(raw) = context.parallel_results.get("internal_links") {
            if let Ok(output) = serde_json::from_str::<InternalLinksOutput>(raw) {
                article.internal_links = output
                    .links_by_section
                    .into_iter()
                    .map(|(section, links)| {
                        let converted = links.into_iter().map(|l| InternalLink { href: l.href, anchor_text: l.anchor }).collect();
                        (section, converted)
                    })
                    .collect();
            }
        }

        if let Some(raw) = context.parallel_results.get("image") {
            if let Ok(output) = serde_json::from_str::<ImageOutput>(raw) {
                article.images = output.images;
            }
        }

        let invariant_issues = validate_invariants(&article, &context.job_config.primary_keyword);
        context.structured_article = Some(article);

        match context.quality_report.as_mut() {
            Some(report) => report.critical_issues.extend(invariant_issues),
            None => context.quality_report = Some(QualityReport { aeo_score: 0.0, component_scores: Default::default(), critical_issues: invariant_issues, quality_gate_failed: false }),
        }

        Ok(context)
    }
}

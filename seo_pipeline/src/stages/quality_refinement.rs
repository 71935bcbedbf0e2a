// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Quality-Refinement Stage (pre, non-critical)
//!
//! Applies deterministic normalization to every HTML/plain-text field,
//! then scores the result with the AEO rubric. Detected critical issues
//! and the resulting score are consumed by the workflow engine's quality
//! gate loop, which is solely responsible for dispatching surgical
//! rewrites or full regeneration; this stage never invokes the rewrite
//! engine itself, keeping the scoring pass side-effect free and
//! independently re-runnable (see [`rescore`]).

use crate::quality::{issues, scorer};
use crate::text::html::strip_tags;
use crate::text::normalize::normalize;
use async_trait::async_trait;
use seo_pipeline_domain::{ExecutionContext, Phase, PipelineError, QualityReport, Stage, StageName};
use std::time::Duration;

const DIRECT_ANSWER_FIELD: &str = "direct_answer";

pub struct QualityRefinementStage;

impl QualityRefinementStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QualityRefinementStage {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_article(context: &mut ExecutionContext) {
    let Some(article) = context.structured_article.as_mut() else { return };

    for body in article.sections.values_mut() {
        *body = normalize(body);
    }
    article.title = strip_tags(&normalize(&article.title));
    article.meta_description = strip_tags(&normalize(&article.meta_description));
    for entry in &mut article.toc {
        entry.short_label = strip_tags(&normalize(&entry.short_label));
    }
    for item in article.faq.iter_mut().chain(article.paa.iter_mut()) {
        item.question = strip_tags(&normalize(&item.question));
        item.answer = normalize(&item.answer);
    }
}

/// Re-scores `context.structured_article` without re-normalizing it,
/// used by the engine's quality gate loop after a surgical rewrite pass.
pub fn rescore(mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
    let Some(article) = context.structured_article.clone() else {
        return Ok(context);
    };
    let primary_keyword = context.job_config.primary_keyword.clone();
    let author_present = context.job_config.author.is_some();

    let critical_issues = issues::detect(&article, &primary_keyword);
    let (aeo_score, component_scores) = scorer::score(&article, &primary_keyword, DIRECT_ANSWER_FIELD, author_present);

    context.quality_report = Some(QualityReport { aeo_score, component_scores, critical_issues, quality_gate_failed: false });
    Ok(context)
}

#[async_trait]
impl Stage for QualityRefinementStage {
    fn ordinal(&self) -> u32 {
        3
    }

    fn name(&self) -> StageName {
        StageName::new("quality_refinement")
    }

    fn phase(&self) -> Phase {
        Phase::Pre
    }

    fn critical(&self) -> bool {
        false
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(15)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        normalize_article(&mut context);

        let Some(article) = context.structured_article.clone() else {
            return Ok(context);
        };
        let primary_keyword = context.job_config.primary_keyword.clone();
        let author_present = context.job_config.author.is_some();

        let critical_issues = issues::detect(&article, &primary_keyword);
        let (aeo_score, component_scores) = scorer::score(&article, &primary_keyword, DIRECT_ANSWER_FIELD, author_present);

        context.quality_report = Some(QualityReport { aeo_score, component_scores, critical_issues, quality_gate_failed: false });
        Ok(context)
    }
}

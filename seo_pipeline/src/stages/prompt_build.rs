// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Prompt-Build Stage (pre, critical)
//!
//! Emits `ctx.prompt`: a structured instruction enumerating every
//! constraint the quality scorer later checks. The variant depends on
//! `regeneration_attempt`: attempt 0 is neutral, subsequent attempts
//! foreground the previously failing critical issues.

use async_trait::async_trait;
use seo_pipeline_domain::{ExecutionContext, Phase, PipelineError, Stage, StageName};
use std::time::Duration;

pub struct PromptBuildStage;

impl PromptBuildStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PromptBuildStage {
    fn default() -> Self {
        Self::new()
    }
}

fn link_candidates(urls: &[String], site_host: &str) -> Vec<String> {
    urls.iter().map(|url| crate::text::normalize::normalize_internal_href(url, site_host)).collect()
}

#[async_trait]
impl Stage for PromptBuildStage {
    fn ordinal(&self) -> u32 {
        1
    }

    fn name(&self) -> StageName {
        StageName::new("prompt_build")
    }

    fn phase(&self) -> Phase {
        Phase::Pre
    }

    fn critical(&self) -> bool {
        true
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let job_config = &context.job_config;
        let site_host = job_config
            .company_url
            .as_deref()
            .and_then(|url| url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")))
            .unwrap_or("");

        let candidates = context.sitemap_data.as_ref().map(|data| link_candidates(&data.urls, site_host)).unwrap_or_default();

        let mut prompt = String::new();
        prompt.push_str(&format!("Primary keyword: {}\n", job_config.primary_keyword));
        prompt.push_str(&format!("Target word count: {}\n", job_config.word_count_target.value()));
        prompt.push_str(&format!("Language: {}\n", job_config.language));
        prompt.push_str("Constraints:\n");
        prompt.push_str("- Headline length in [50, 60] characters.\n");
        prompt.push_str("- Meta title length <= 60 characters.\n");
        prompt.push_str("- Meta description length in [120, 160] characters.\n");
        prompt.push_str("- Direct answer section in [40, 60] words, containing the primary keyword and a [N] citation marker.\n");
        prompt.push_str("- Intro section in [80, 120] words.\n");
        prompt.push_str("- Primary keyword appears 5-8 times across main section content.\n");
        prompt.push_str("- FAQ size in [5, 6] entries; People-Also-Ask size in [3, 4] entries.\n");
        prompt.push_str("- At least 3 section titles phrased as questions.\n");
        prompt.push_str("- Cite sources inline with [N] markers balanced against a sources list.\n");
        prompt.push_str("- Use semantic HTML with at least 3 lists and at least 3 H2 headings.\n");
        prompt.push_str("- Natural, conversational tone; no forbidden vague phrasing.\n");
        prompt.push_str("- Never use the em-dash character.\n");

        if !candidates.is_empty() {
            prompt.push_str("Internal link candidates (use 1-2 per section, each anchor <= 6 words):\n");
            for candidate in &candidates {
                prompt.push_str(&format!("- {candidate}\n"));
            }
        }

        if context.regeneration_attempt > 0 {
            prompt.push_str(&format!("\nThis is regeneration attempt {}. Previously failing issues to fix:\n", context.regeneration_attempt));
            if let Some(report) = &context.quality_report {
                for issue in &report.critical_issues {
                    prompt.push_str(&format!("- [{}] {}: {}\n", issue.kind, issue.field, issue.detail));
                }
            }
        }

        context.prompt = Some(prompt);
        Ok(context)
    }
}

// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Generation Stage (pre, critical)
//!
//! Invokes the LLM collaborator with `ctx.prompt` and a declared JSON
//! response schema derived from `ArticleOutput`. Structured data from the
//! LLM is preserved as typed; no downstream stage may stringify it.

use async_trait::async_trait;
use seo_pipeline_domain::{ArticleOutput, CompletionRequest, ExecutionContext, LlmClient, Phase, PipelineError, Stage, StageName};
use std::sync::Arc;
use std::time::Duration;

const RESPONSE_SCHEMA_NOTE: &str = "Respond with a single JSON object matching: {title, subtitle, teaser, slug, meta_title, meta_description, sections: {field_name: html}, section_order: [field_name], toc: [{anchor, short_label}], faq: [{question, answer}], paa: [{question, answer}], comparison_tables: [...], images: {}, internal_links: {section_field_name: [{href, anchor_text}]}, citation_map: {marker: url}, sources: [{id, url, title}], word_count}. No prose outside the JSON object.";

pub struct GenerationStage {
    llm_client: Arc<dyn LlmClient>,
}

impl GenerationStage {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

fn validate_required_fields(article: &ArticleOutput) -> Result<(), PipelineError> {
    if article.title.trim().is_empty() {
        return Err(PipelineError::SchemaViolation { field: "title".to_string(), detail: "title is required".to_string() });
    }
    if article.sections.is_empty() || article.section_order.is_empty() {
        return Err(PipelineError::SchemaViolation { field: "sections".to_string(), detail: "at least one section is required".to_string() });
    }
    for name in &article.section_order {
        if !article.sections.contains_key(name) {
            return Err(PipelineError::SchemaViolation {
                field: "section_order".to_string(),
                detail: format!("section_order references unknown field '{name}'"),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl Stage for GenerationStage {
    fn ordinal(&self) -> u32 {
        2
    }

    fn name(&self) -> StageName {
        StageName::new("generation")
    }

    fn phase(&self) -> Phase {
        Phase::Pre
    }

    fn critical(&self) -> bool {
        true
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(90)
    }

    fn max_attempts(&self) -> u32 {
        3
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let prompt = context.prompt.clone().ok_or_else(|| PipelineError::InvariantViolation("prompt_build must run before generation".to_string()))?;

        let response = self
            .llm_client
            .complete(CompletionRequest {
                system_prompt: format!("You are a long-form SEO/AEO article generator. {RESPONSE_SCHEMA_NOTE}"),
                user_prompt: prompt,
                max_output_tokens: 8192,
                temperature: 0.7,
            })
            .await?;

        context.raw_article = Some(response.text.clone());

        let mut article: ArticleOutput = serde_json::from_str(&response.text)
            .map_err(|e| PipelineError::SchemaViolation { field: "<root>".to_string(), detail: format!("invalid JSON from generation collaborator: {e}") })?;

        validate_required_fields(&article)?;

        if article.word_count == 0 {
            article.word_count = article.full_text().split_whitespace().count() as u32;
        }

        context.structured_article = Some(article);
        Ok(context)
    }
}

// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Rewrite Engine
//!
//! Applies a single [`RewriteInstruction`] to one article field: selects a
//! prompt template, asks the LLM collaborator for a candidate rewrite,
//! validates it, and retries up to `instruction.max_attempts` times before
//! giving up and leaving the field untouched. Invoked both by the
//! quality-refinement stage and by the external refresh interface.

use crate::rewrite::templates::RewriteTemplate;
use crate::rewrite::validators::{validate, RewriteRejection};
use seo_pipeline_domain::{ArticleOutput, CompletionRequest, LlmClient, PipelineError, RewriteInstruction, RewriteMode};
use std::sync::Arc;
use tracing::warn;

/// Outcome of applying one rewrite instruction to one field.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub field: String,
    pub applied: bool,
    pub content: String,
    pub rejection: Option<RewriteRejection>,
}

/// Outcome of applying a batch of instructions to a whole article: the
/// updated article plus one [`RewriteOutcome`] per field touched, in the
/// order the instructions were given.
#[derive(Debug, Clone)]
pub struct RewriteBatchOutcome {
    pub article: ArticleOutput,
    pub outcomes: Vec<RewriteOutcome>,
}

pub struct RewriteEngine {
    llm_client: Arc<dyn LlmClient>,
}

impl RewriteEngine {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    /// Applies `instruction` to `current` (the field's current HTML
    /// content), retrying up to `instruction.max_attempts` times. Returns
    /// the original content unmodified (with `applied: false`) if every
    /// attempt is rejected, rather than erroring the whole job.
    pub async fn apply(
        &self,
        field: &str,
        current: &str,
        instruction: &RewriteInstruction,
        issue_kind: Option<&str>,
        primary_keyword: &str,
    ) -> Result<RewriteOutcome, PipelineError> {
        let template = RewriteTemplate::select(issue_kind, &instruction.instruction);
        let preamble = template.render_preamble(primary_keyword);

        let mut last_rejection = None;
        for _attempt in 0..instruction.max_attempts.max(1) {
            let prompt = format!("{preamble}\n\nInstruction: {}\n\nField content:\n{current}", instruction.instruction);
            let response = self
                .llm_client
                .complete(CompletionRequest {
                    system_prompt: "You perform targeted, minimal edits to HTML article fields.".to_string(),
                    user_prompt: prompt,
                    max_output_tokens: 2048,
                    temperature: 0.3,
                })
                .await?;

            match validate(current, &response.text, instruction.min_similarity, instruction.max_similarity) {
                Ok(()) => {
                    return Ok(RewriteOutcome {
                        field: field.to_string(),
                        applied: true,
                        content: response.text,
                        rejection: None,
                    });
                }
                Err(rejection) => {
                    last_rejection = Some(rejection);
                }
            }
        }

        warn!(field, ?last_rejection, "rewrite instruction failed validation on every attempt, leaving field untouched");
        Ok(RewriteOutcome {
            field: field.to_string(),
            applied: false,
            content: current.to_string(),
            rejection: last_rejection,
        })
    }

    /// Applies a batch of instructions to a whole article, resolving each
    /// instruction's [`RewriteTarget`] against the article's current
    /// section set and running [`Self::apply`] on every resolved field in
    /// order. Unresolvable fields (a target naming a section the article
    /// doesn't have) are skipped rather than erroring the batch.
    pub async fn rewrite(&self, article: &ArticleOutput, instructions: &[RewriteInstruction], primary_keyword: &str) -> Result<RewriteBatchOutcome, PipelineError> {
        let mut updated = article.clone();
        let mut outcomes = Vec::new();

        for instruction in instructions {
            let fields: Vec<String> = instruction.target.resolve(&updated.section_order).into_iter().map(str::to_string).collect();
            for field in fields {
                let Some(current) = updated.sections.get(&field).cloned() else { continue };
                let issue_kind = instruction.context.get("issue_kind").and_then(|v| v.as_str()).map(str::to_string);
                let outcome = self.apply(&field, &current, instruction, issue_kind.as_deref(), primary_keyword).await?;
                if outcome.applied {
                    updated.sections.insert(field, outcome.content.clone());
                }
                outcomes.push(outcome);
            }
        }

        Ok(RewriteBatchOutcome { article: updated, outcomes })
    }

    /// The external refresh endpoint: rewrites a previously published
    /// article against freshly supplied instructions (new statistics, a
    /// changed price, an updated citation). Every instruction is coerced
    /// to [`RewriteMode::Refresh`]'s wider similarity bounds before
    /// dispatch, since a refresh edit is expected to touch more of a
    /// field's text than an in-pipeline quality fix.
    pub async fn refresh(&self, article: &ArticleOutput, instructions: &[RewriteInstruction], primary_keyword: &str) -> Result<RewriteBatchOutcome, PipelineError> {
        let (min_similarity, max_similarity) = RewriteMode::Refresh.default_similarity_bounds();
        let refresh_instructions: Vec<RewriteInstruction> = instructions
            .iter()
            .cloned()
            .map(|mut instruction| {
                instruction.mode = RewriteMode::Refresh;
                instruction.min_similarity = min_similarity;
                instruction.max_similarity = max_similarity;
                instruction
            })
            .collect();
        self.rewrite(article, &refresh_instructions, primary_keyword).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use seo_pipeline_domain::{CompletionResponse, RewriteMode, RewriteTarget};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedLlm {
        responses: Vec<String>,
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, PipelineError> {
            let index = self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(CompletionResponse { text: self.responses[index.min(self.responses.len() - 1)].clone() })
        }
    }

    #[tokio::test]
    async fn applies_valid_rewrite_on_first_attempt() {
        let before = "<p>Our platform helps customer service teams resolve many tickets faster every single day.</p>";
        let after = "<p>Our platform helps customer support teams resolve many tickets faster every single day.</p>";
        let llm = Arc::new(ScriptedLlm { responses: vec![after.to_string()], call_count: AtomicUsize::new(0) });
        let engine = RewriteEngine::new(llm);
        let instruction = RewriteInstruction::new(RewriteTarget::Field("section_01_content".into()), "vary wording", RewriteMode::QualityFix);

        let outcome = engine.apply("section_01_content", before, &instruction, None, "customer service").await.unwrap();
        assert!(outcome.applied);
        assert_eq!(outcome.content, after);
    }

    #[tokio::test]
    async fn leaves_field_untouched_when_every_attempt_rejected() {
        let before = "<p>Our platform helps customer service teams resolve many tickets faster every single day.</p>";
        let llm = Arc::new(ScriptedLlm { responses: vec![before.to_string()], call_count: AtomicUsize::new(0) });
        let engine = RewriteEngine::new(llm);
        let mut instruction = RewriteInstruction::new(RewriteTarget::Field("section_01_content".into()), "vary wording", RewriteMode::QualityFix);
        instruction.max_attempts = 1;

        let outcome = engine.apply("section_01_content", before, &instruction, None, "customer service").await.unwrap();
        assert!(!outcome.applied);
        assert_eq!(outcome.content, before);
        assert_eq!(outcome.rejection, Some(RewriteRejection::NoOp));
    }

    fn article_with_section(name: &str, body: &str) -> ArticleOutput {
        let mut sections = std::collections::BTreeMap::new();
        sections.insert(name.to_string(), body.to_string());
        ArticleOutput { sections, section_order: vec![name.to_string()], ..Default::default() }
    }

    #[tokio::test]
    async fn rewrite_applies_a_batch_of_instructions_to_the_whole_article() {
        let before = "<p>Our platform helps customer service teams resolve many tickets faster every single day.</p>";
        let after = "<p>Our platform helps customer support teams resolve many tickets faster every single day.</p>";
        let llm = Arc::new(ScriptedLlm { responses: vec![after.to_string()], call_count: AtomicUsize::new(0) });
        let engine = RewriteEngine::new(llm);
        let article = article_with_section("section_01_content", before);
        let instruction = RewriteInstruction::new(RewriteTarget::Field("section_01_content".into()), "vary wording", RewriteMode::QualityFix);

        let batch = engine.rewrite(&article, &[instruction], "customer service").await.unwrap();
        assert_eq!(batch.outcomes.len(), 1);
        assert!(batch.outcomes[0].applied);
        assert_eq!(batch.article.sections.get("section_01_content").unwrap(), after);
    }

    #[tokio::test]
    async fn rewrite_skips_instructions_targeting_a_field_the_article_does_not_have() {
        let article = article_with_section("section_01_content", "<p>Unrelated content entirely here.</p>");
        let llm = Arc::new(ScriptedLlm { responses: vec!["irrelevant".to_string()], call_count: AtomicUsize::new(0) });
        let engine = RewriteEngine::new(llm);
        let instruction = RewriteInstruction::new(RewriteTarget::Field("missing_section".into()), "vary wording", RewriteMode::QualityFix);

        let batch = engine.rewrite(&article, &[instruction], "customer service").await.unwrap();
        assert!(batch.outcomes.is_empty());
        assert_eq!(batch.article.sections.get("section_01_content").unwrap(), "<p>Unrelated content entirely here.</p>");
    }

    #[tokio::test]
    async fn refresh_coerces_instructions_to_refresh_mode_and_bounds() {
        let before = "<p>Support teams resolved about one thousand tickets during a busy quarter using our platform.</p>";
        let after = "<p>Support teams resolved about twelve thousand tickets during a record quarter using our platform.</p>";
        let llm = Arc::new(ScriptedLlm { responses: vec![after.to_string()], call_count: AtomicUsize::new(0) });
        let engine = RewriteEngine::new(llm);
        let article = article_with_section("section_01_content", before);
        let instruction = RewriteInstruction::new(RewriteTarget::Field("section_01_content".into()), "update the quarterly ticket count", RewriteMode::QualityFix);

        let batch = engine.refresh(&article, &[instruction], "customer service").await.unwrap();
        assert!(batch.outcomes[0].applied);
        assert_eq!(batch.article.sections.get("section_01_content").unwrap(), after);
    }
}

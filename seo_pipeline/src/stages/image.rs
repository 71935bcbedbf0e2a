// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Image Stage (parallel, non-critical)
//!
//! Produces three images (hero, mid, bottom) via the image-generator
//! collaborator. A failure on any single slot is recorded as a warning;
//! the article is never failed for missing images.

use async_trait::async_trait;
use seo_pipeline_domain::{ExecutionContext, ImageGenerator, ImageRequest, Phase, PipelineError, Stage, StageFailure, StageName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageOutput {
    pub images: BTreeMap<String, String>,
}

pub struct ImageStage {
    image_generator: Arc<dyn ImageGenerator>,
}

impl ImageStage {
    pub fn new(image_generator: Arc<dyn ImageGenerator>) -> Self {
        Self { image_generator }
    }
}

fn mid_section_titles(titles: &[String]) -> String {
    let mid = titles.len() / 2;
    titles.get(mid).cloned().unwrap_or_default()
}

fn later_section_titles(titles: &[String]) -> String {
    titles.last().cloned().unwrap_or_default()
}

#[async_trait]
impl Stage for ImageStage {
    fn ordinal(&self) -> u32 {
        12
    }

    fn name(&self) -> StageName {
        StageName::new("image")
    }

    fn phase(&self) -> Phase {
        Phase::Parallel
    }

    fn critical(&self) -> bool {
        false
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(45)
    }

    async fn execute(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        let Some(article) = context.structured_article.clone() else {
            return Ok(context);
        };
        let section_titles: Vec<String> = article.toc.iter().map(|entry| entry.short_label.clone()).collect();

        let requests = [
            ("hero", article.title.clone()),
            ("mid", mid_section_titles(&section_titles)),
            ("bottom", later_section_titles(&section_titles)),
        ];

        let mut images = BTreeMap::new();
        for (placeholder_id, prompt_text) in requests {
            if prompt_text.trim().is_empty() {
                continue;
            }
            match self
                .image_generator
                .generate(ImageRequest { placeholder_id: placeholder_id.to_string(), prompt: prompt_text })
                .await
            {
                Ok(result) => {
                    images.insert(result.placeholder_id, result.url);
                }
                Err(err) => {
                    context.record_failure(StageFailure {
                        stage: self.name(),
                        kind: err.kind(),
                        message: format!("image slot '{placeholder_id}' failed: {err}"),
                        fatal: false,
                        occurred_at: chrono::Utc::now(),
                    });
                }
            }
        }

        let output = ImageOutput { images };
        let serialized = serde_json::to_string(&output)
            .map_err(|e| PipelineError::StageException { stage: "image".to_string(), detail: e.to_string() })?;
        context.parallel_results.insert(self.name(), serialized);
        Ok(context)
    }
}
